use std::fmt;

/// All errors that can occur while preparing data or training a model.
#[derive(Debug)]
pub enum Error {
    /// Two arrays whose dimensions must agree do not.
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// An input had zero rows or zero columns.
    EmptyInput(&'static str),
    /// A hyperparameter or helper argument is out of range.
    InvalidConfig(String),
    /// Labels outside the set the model accepts.
    InvalidLabels(String),
    /// `predict` called before `fit`.
    NotFitted,
    /// The loss stopped being finite, usually from a learning rate that is too large.
    Diverged { iteration: usize, loss: f64 },
    /// A CSV row could not be parsed.
    Parse { line: usize, message: String },
    Io(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                what,
                expected,
                found,
            } => write!(f, "shape mismatch in {what}: expected {expected}, found {found}"),
            Self::EmptyInput(what) => write!(f, "{what} must have at least one row and one column"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::InvalidLabels(msg) => write!(f, "invalid labels: {msg}"),
            Self::NotFitted => write!(f, "model not fitted, call fit() first"),
            Self::Diverged { iteration, loss } => {
                write!(f, "gradient descent diverged at iteration {iteration} (loss = {loss})")
            }
            Self::Parse { line, message } => write!(f, "parse error on line {line}: {message}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Fails with [`Error::ShapeMismatch`] unless `expected == found`.
pub(crate) fn ensure_len(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(Error::ShapeMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::ShapeMismatch {
            what: "targets rows",
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "shape mismatch in targets rows: expected 3, found 2");
        assert_eq!(Error::NotFitted.to_string(), "model not fitted, call fit() first");
    }

    #[test]
    fn test_ensure_len() {
        assert!(ensure_len("rows", 4, 4).is_ok());
        assert!(matches!(
            ensure_len("rows", 4, 5),
            Err(Error::ShapeMismatch { expected: 4, found: 5, .. })
        ));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as _;
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert!(err.source().is_some());
    }
}
