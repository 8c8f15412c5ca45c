//! String checks and formatted assertions.
//!
//! Message templates use `%s` as the placeholder, so the same template
//! text can be shared with clients written against printf-style
//! formatters. `%%` produces a literal percent sign.

use std::fmt::{self, Write as _};

use crate::CoreError;

/// Returns `true` if the value is absent or the empty string.
pub fn is_empty(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// Returns `true` if the value is present and not empty.
pub fn has_length(value: Option<&str>) -> bool {
    !is_empty(value)
}

/// Substitutes each `%s` in `template` with the next argument.
///
/// Surplus arguments are ignored.
///
/// # Errors
/// Returns [`CoreError::MissingFormatArgument`] if the template has more
/// `%s` specifiers than there are arguments.
///
/// ```rust
/// use lambda_lite_core::util::message;
///
/// assert_eq!(message("Text %s", &[&"value"]).unwrap(), "Text value");
/// assert!(message("Text %s", &[]).is_err());
/// ```
pub fn message(
    template: &str,
    args: &[&dyn fmt::Display],
) -> Result<String, CoreError> {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => {
                let arg = args.next().ok_or_else(|| {
                    CoreError::MissingFormatArgument("%s".into())
                })?;
                // Writing into a String cannot fail.
                let _ = write!(out, "{arg}");
            }
            Some('%') => out.push('%'),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }

    Ok(out)
}

/// Returns the value, or an [`CoreError::IllegalArgument`] carrying the
/// formatted message if it is absent.
pub fn not_null<T>(
    value: Option<T>,
    template: &str,
    args: &[&dyn fmt::Display],
) -> Result<T, CoreError> {
    match value {
        Some(value) => Ok(value),
        None => Err(CoreError::IllegalArgument(message(template, args)?)),
    }
}

/// Returns the string, or an [`CoreError::IllegalArgument`] carrying the
/// formatted message if it is absent or empty.
pub fn has_text<'a>(
    value: Option<&'a str>,
    template: &str,
    args: &[&dyn fmt::Display],
) -> Result<&'a str, CoreError> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(CoreError::IllegalArgument(message(template, args)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty_and_has_length() {
        assert!(is_empty(None));
        assert!(is_empty(Some("")));
        assert!(!is_empty(Some(" ")));
        assert!(!has_length(None));
        assert!(!has_length(Some("")));
        assert!(has_length(Some("42")));
    }

    #[test]
    fn test_message_with_no_params() {
        assert_eq!(message("", &[]).unwrap(), "");
        assert_eq!(message("Qwerty123", &[]).unwrap(), "Qwerty123");
        let err = message("Text %s", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Format specifier '%s'");
    }

    #[test]
    fn test_message_with_params() {
        assert_eq!(message("Qwerty123", &[&"value"]).unwrap(), "Qwerty123");
        assert_eq!(message("Text %s", &[&"value"]).unwrap(), "Text value");
        assert_eq!(
            message("Text %s %s", &[&"value1", &"value2"]).unwrap(),
            "Text value1 value2"
        );
        assert_eq!(message("%s items", &[&42]).unwrap(), "42 items");
        let err = message("Text %s %s", &[&"value"]).unwrap_err();
        assert!(matches!(err, CoreError::MissingFormatArgument(_)));
    }

    #[test]
    fn test_message_escapes_and_unknown_specifiers() {
        assert_eq!(message("100%% sure", &[]).unwrap(), "100% sure");
        assert_eq!(message("%d stays", &[]).unwrap(), "%d stays");
        assert_eq!(message("trailing %", &[]).unwrap(), "trailing %");
    }

    #[test]
    fn test_not_null() {
        assert_eq!(not_null(Some(42), "Test comment", &[]).unwrap(), 42);

        let err = not_null(None::<u32>, "Instance <%s> is empty", &[&"null"])
            .unwrap_err();
        assert_eq!(err, CoreError::IllegalArgument("Instance <null> is empty".into()));

        let err = not_null(
            None::<u32>,
            "Instance <%s> is empty because of <%s>",
            &[&"null", &"null"],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Instance <null> is empty because of <null>");
    }

    #[test]
    fn test_has_text() {
        assert_eq!(has_text(Some("42"), "Test comment", &[]).unwrap(), "42");

        let err = has_text(Some(""), "Instance <%s> is empty", &[&""]).unwrap_err();
        assert_eq!(err.to_string(), "Instance <> is empty");

        let err = has_text(None, "missing", &[]).unwrap_err();
        assert!(matches!(err, CoreError::IllegalArgument(_)));
    }

    #[test]
    fn test_broken_template_reports_format_error() {
        let err = not_null(None::<u8>, "Instance <%s>", &[]).unwrap_err();
        assert!(matches!(err, CoreError::MissingFormatArgument(_)));
    }
}
