use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

use crate::{AssertionError, Result};

/// Unwraps a check result, panicking with the failure message.
#[track_caller]
pub(crate) fn ensure<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(error = %err, "bus assertion failed");
            panic!("{err}")
        }
    }
}

/// Runs an inspector, returning its failure message if it panicked.
pub(crate) fn run_inspector<T: ?Sized>(item: &T, inspector: &dyn Fn(&T)) -> Option<String> {
    panic::catch_unwind(AssertUnwindSafe(|| inspector(item)))
        .err()
        .map(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(err) = payload.downcast_ref::<AssertionError>() {
        err.to_string()
    } else {
        "inspector panicked with a non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_passes_value_through() {
        assert_eq!(ensure::<u8>(Ok(7)), 7);
    }

    #[test]
    #[should_panic(expected = "The bus contains no messages of type MessageSent<u8>")]
    fn ensure_panics_with_error_message() {
        ensure::<()>(Err(AssertionError::NoMessagesOfType("MessageSent<u8>".into())));
    }

    #[test]
    fn passing_inspector_has_no_failure() {
        assert_eq!(run_inspector(&1u8, &|v: &u8| assert_eq!(*v, 1)), None);
    }

    #[test]
    fn failing_inspector_reports_assert_message() {
        let failure = run_inspector(&1u8, &|v: &u8| assert_eq!(*v, 2, "value mismatch"));
        let failure = failure.expect("inspector should fail");
        assert!(failure.contains("value mismatch"), "{failure}");
        assert!(failure.contains("left: 1"), "{failure}");
    }

    #[test]
    fn static_str_panic_is_reported() {
        let failure = run_inspector(&(), &|_: &()| panic!("plain"));
        assert_eq!(failure.as_deref(), Some("plain"));
    }

    #[test]
    fn non_string_payload_is_described() {
        let failure = run_inspector(&(), &|_: &()| std::panic::panic_any(42u8));
        assert_eq!(
            failure.as_deref(),
            Some("inspector panicked with a non-string payload")
        );
    }
}
