//! Readable type names for failure messages.
//!
//! [`std::any::type_name`] reports fully qualified paths, which makes
//! messages like `alloc::vec::Vec<core::option::Option<my_crate::orders::Order>>`
//! hard to read. The names produced here keep the generic, tuple, slice,
//! array and reference structure but drop every module path.

/// Returns the name of `T` without module paths.
///
/// ```rust
/// use std::collections::HashMap;
/// use fakebus_assertions::friendly_type_name;
///
/// assert_eq!(friendly_type_name::<Vec<Option<u8>>>(), "Vec<Option<u8>>");
/// assert_eq!(friendly_type_name::<HashMap<String, (u8, bool)>>(), "HashMap<String, (u8, bool)>");
/// ```
pub fn friendly_type_name<T: ?Sized>() -> String {
    strip_paths(std::any::type_name::<T>())
}

pub(crate) fn strip_paths(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut segment_start = 0;

    for (i, c) in raw.char_indices() {
        if is_path_char(c) {
            continue;
        }
        out.push_str(last_segment(&raw[segment_start..i]));
        out.push(c);
        segment_start = i + c.len_utf8();
    }
    out.push_str(last_segment(&raw[segment_start..]));
    out
}

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == ':'
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::*;
    use crate::Headers;

    #[allow(dead_code)]
    struct Order;
    #[allow(dead_code)]
    struct Wrapper<A, B>(A, B);

    #[test]
    fn primitives_are_unchanged() {
        assert_eq!(friendly_type_name::<u32>(), "u32");
        assert_eq!(friendly_type_name::<str>(), "str");
        assert_eq!(friendly_type_name::<()>(), "()");
    }

    #[test]
    fn strips_module_path() {
        assert_eq!(friendly_type_name::<String>(), "String");
        assert_eq!(friendly_type_name::<Order>(), "Order");
    }

    #[test]
    fn renders_generic_arguments_recursively() {
        assert_eq!(
            friendly_type_name::<Wrapper<Vec<Order>, Option<String>>>(),
            "Wrapper<Vec<Order>, Option<String>>"
        );
        assert_eq!(
            friendly_type_name::<HashMap<String, Vec<u8>>>(),
            "HashMap<String, Vec<u8>>"
        );
        assert_eq!(friendly_type_name::<Headers>(), "BTreeMap<String, String>");
        assert_eq!(
            friendly_type_name::<BTreeMap<u8, BTreeMap<u8, Order>>>(),
            "BTreeMap<u8, BTreeMap<u8, Order>>"
        );
    }

    #[test]
    fn keeps_tuples_slices_and_references() {
        assert_eq!(friendly_type_name::<(String, String)>(), "(String, String)");
        assert_eq!(friendly_type_name::<&[Order]>(), "&[Order]");
        assert_eq!(friendly_type_name::<[Order; 3]>(), "[Order; 3]");
        assert_eq!(friendly_type_name::<&'static str>(), "&str");
    }

    #[test]
    fn strip_paths_on_raw_names() {
        assert_eq!(
            strip_paths("alloc::vec::Vec<core::option::Option<app::Order>>"),
            "Vec<Option<Order>>"
        );
        assert_eq!(strip_paths("app::Event<'a, app::Id>"), "Event<'a, Id>");
        assert_eq!(strip_paths("dyn core::any::Any"), "dyn Any");
    }
}
