use std::error;
use std::fmt;
use std::num::ParseFloatError;

// type alias for Result for use across the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Top-level payload not recognised as any supported format
    Format(String),
    /// A single shape's path text could not be tokenized
    Parse(String),
    /// A token was present but not a valid value of the expected kind
    InvalidValue(String, String),
    /// Path produced fewer than two anchors
    InsufficientGeometry(usize),
    /// A command was followed by the wrong number of arguments
    Arity {
        command: char,
        expected: usize,
        found: usize,
    },
    /// Import was cancelled by the caller
    Cancelled,
    Json(serde_json::Error),
    Xml(String),
    Io(std::io::Error),
    Cli(String),
    Other(Box<dyn error::Error + Send + Sync>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format(reason) => write!(f, "Unrecognized format: {reason}"),
            Error::Parse(reason) => write!(f, "Parse error: {reason}"),
            Error::InvalidValue(kind, value) => write!(f, "Invalid {kind}: '{value}'"),
            Error::InsufficientGeometry(count) => {
                write!(f, "Insufficient geometry: {count} anchor(s), need at least 2")
            }
            Error::Arity {
                command,
                expected,
                found,
            } => write!(
                f,
                "Command '{command}' expects a multiple of {expected} arguments, found {found}"
            ),
            Error::Cancelled => write!(f, "Operation cancelled"),
            Error::Json(source) => write!(f, "JSON error: {source}"),
            Error::Xml(reason) => write!(f, "XML error: {reason}"),
            Error::Io(source) => write!(f, "IO error: {source}"),
            Error::Cli(reason) => write!(f, "{reason}"),
            Error::Other(source) => write!(f, "{source}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Json(source) => Some(source),
            Error::Io(source) => Some(source),
            Error::Other(source) => Some(&**source),
            _ => None,
        }
    }
}

impl Error {
    pub fn from_err<T>(err: T) -> Error
    where
        T: error::Error + Send + Sync + 'static,
    {
        Error::Other(Box::new(err))
    }

    /// True for errors which are contained to a single shape; the import
    /// pipeline skips the shape and carries on.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Error::Parse(_)
                | Error::InvalidValue(_, _)
                | Error::InsufficientGeometry(_)
                | Error::Arity { .. }
                | Error::Json(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<ParseFloatError> for Error {
    fn from(err: ParseFloatError) -> Error {
        Error::Parse(format!("float: {err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Json(err)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Error {
        Error::Xml(err.to_string())
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Error {
        Error::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::InsufficientGeometry(1).to_string(),
            "Insufficient geometry: 1 anchor(s), need at least 2"
        );
        assert_eq!(
            Error::Arity {
                command: 'C',
                expected: 6,
                found: 4
            }
            .to_string(),
            "Command 'C' expects a multiple of 6 arguments, found 4"
        );
    }

    #[test]
    fn test_shape_errors() {
        assert!(Error::InsufficientGeometry(0).is_shape_error());
        assert!(Error::Parse("x".into()).is_shape_error());
        assert!(!Error::Format("x".into()).is_shape_error());
        assert!(!Error::Cancelled.is_shape_error());
    }
}
