use std::fmt;

/// The optional "because" clause of a failed assertion.
///
/// Built from a template with positional placeholders (`{0}`, `{1}`, ...)
/// that are replaced by the given arguments. `{{` and `}}` produce literal
/// braces. A placeholder without a matching argument is kept verbatim.
///
/// Renders as `" because <text>"`, or as nothing when no reason was given.
///
/// ```rust
/// use fakebus_assertions::Reason;
///
/// let reason = Reason::new("the order {0} was {1}", &[&42, &"cancelled"]);
/// assert_eq!(reason.to_string(), " because the order 42 was cancelled");
/// assert_eq!(Reason::none().to_string(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Reason(Option<String>);

impl Reason {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn new(template: &str, args: &[&dyn fmt::Display]) -> Self {
        let text = substitute(template, args);
        let text = text.trim();
        if text.is_empty() {
            Self(None)
        } else {
            Self(Some(text.to_string()))
        }
    }

    /// Returns the formatted reason text, without the leading "because".
    pub fn text(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => Ok(()),
            Some(text) if starts_with_because(text) => write!(f, " {text}"),
            Some(text) => write!(f, " because {text}"),
        }
    }
}

fn starts_with_because(text: &str) -> bool {
    match text.get(..7) {
        Some(head) if head.eq_ignore_ascii_case("because") => {
            text[7..].is_empty() || text[7..].starts_with(char::is_whitespace)
        }
        _ => false,
    }
}

fn substitute(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            '{' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek().is_some_and(|&(_, next)| next == '}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let rest = &template[start + 1..];
                let arg = rest
                    .find('}')
                    .filter(|&end| end > 0 && rest[..end].bytes().all(|b| b.is_ascii_digit()))
                    .and_then(|end| rest[..end].parse::<usize>().ok().map(|i| (end, i)))
                    .and_then(|(end, i)| args.get(i).map(|arg| (end, arg)));
                match arg {
                    Some((end, arg)) => {
                        out.push_str(&arg.to_string());
                        // digits are ASCII, so bytes and chars line up
                        for _ in 0..=end {
                            chars.next();
                        }
                    }
                    None => out.push('{'),
                }
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_renders_nothing() {
        assert_eq!(Reason::none().to_string(), "");
        assert!(Reason::none().is_none());
    }

    #[test]
    fn substitutes_positional_arguments() {
        let reason = Reason::new("it should {0}", &[&"test-var"]);
        assert_eq!(reason.to_string(), " because it should test-var");
        assert_eq!(reason.text(), Some("it should test-var"));
    }

    #[test]
    fn placeholders_can_repeat_and_reorder() {
        let reason = Reason::new("{1} before {0}, then {1}", &[&"a", &"b"]);
        assert_eq!(reason.text(), Some("b before a, then b"));
    }

    #[test]
    fn escaped_braces_are_literal() {
        let reason = Reason::new("map {{{0}}}", &[&1]);
        assert_eq!(reason.text(), Some("map {1}"));
    }

    #[test]
    fn missing_argument_keeps_placeholder() {
        let reason = Reason::new("value {3} and {name}", &[&"x"]);
        assert_eq!(reason.text(), Some("value {3} and {name}"));
    }

    #[test]
    fn leading_because_is_not_repeated() {
        let reason = Reason::new("because the queue was drained", &[]);
        assert_eq!(reason.to_string(), " because the queue was drained");

        let reason = Reason::new("Because it said so", &[]);
        assert_eq!(reason.to_string(), " Because it said so");
    }

    #[test]
    fn word_starting_with_because_still_gets_prefix() {
        let reason = Reason::new("becauseless", &[]);
        assert_eq!(reason.to_string(), " because becauseless");
    }

    #[test]
    fn bare_because_is_kept_as_is() {
        let reason = Reason::new("because", &[]);
        assert_eq!(reason.to_string(), " because");
        assert_eq!(Reason::new("BECAUSE", &[]).to_string(), " BECAUSE");
    }

    #[test]
    fn signed_or_spaced_placeholder_is_literal() {
        let reason = Reason::new("{+0} {-0} { 0} {} {0}", &[&"x"]);
        assert_eq!(reason.text(), Some("{+0} {-0} { 0} {} x"));
    }

    #[test]
    fn blank_template_is_no_reason() {
        assert!(Reason::new("   ", &[]).is_none());
        assert!(Reason::new("", &[&1]).is_none());
    }
}
