//! Error reporting on stderr.

use crate::error::Error;

/// Title line for errors whose message alone lacks context
fn headline(error: &Error) -> Option<&'static str> {
    match error {
        Error::Io(io_err) => Some(match io_err.kind() {
            std::io::ErrorKind::NotFound => "File Not Found",
            std::io::ErrorKind::PermissionDenied => "Permission Denied",
            _ => "File System Error",
        }),
        Error::Yaml(_) => Some("YAML Parsing Error"),
        Error::Json(_) => Some("JSON Parsing Error"),
        Error::Toml(_) => Some("TOML Parsing Error"),
        Error::Anyhow(_) => Some("Error"),
        _ => None,
    }
}

/// Prints `error` as structured JSON when `json_format` is set, else as text.
pub fn print_error_with_json(error: &Error, json_format: bool) {
    if json_format {
        if let Ok(rendered) = serde_json::to_string_pretty(&error.to_json()) {
            // ast-grep-ignore: no-println
            eprintln!("{rendered}");
            return;
        }
    }
    print_error(error);
}

/// Prints a user-facing message followed by a hint where one applies.
pub fn print_error(error: &Error) {
    let report = error.to_json();
    let mut text = match headline(error) {
        Some(title) => format!("{title}\n{}", report.message),
        None => report.message,
    };
    if let Some(hint) = report.context {
        text.push_str("\n\nHint: ");
        text.push_str(&hint);
    }
    // ast-grep-ignore: no-println
    eprintln!("{text}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_by_io_kind() {
        let err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "x"));
        assert_eq!(headline(&err), Some("File Not Found"));
        let err = Error::Io(std::io::Error::other("x"));
        assert_eq!(headline(&err), Some("File System Error"));
    }

    #[test]
    fn test_domain_errors_need_no_headline() {
        assert_eq!(headline(&Error::layout_load("bad")), None);
        assert_eq!(headline(&Error::unresolved_reference("#/x")), None);
    }
}
