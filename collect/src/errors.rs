use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for collection operations.
///
/// Each kind describes a category of failure so callers can match on it
/// instead of parsing messages.
///
/// # Examples
///
/// ```rust
/// use collect::errors::{CollectError, CollectResult, ErrorKind};
///
/// fn example() -> CollectResult<()> {
///     Err(CollectError::new("not a sequence", ErrorKind::TypeConstraint))
/// }
///
/// assert_eq!(example().unwrap_err().kind(), &ErrorKind::TypeConstraint);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// A collection was constructed from something that is not an ordered sequence
    TypeConstraint,
    /// A seedless fold was requested over an empty sequence
    EmptySequence,

    /// The operation is not valid in the current context
    InvalidOperation,
    /// Invalid field name
    InvalidFieldName,

    /// Error mapping a value to or from a serialized form
    ObjectMappingError,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::TypeConstraint => write!(f, "Type constraint violation"),
            ErrorKind::EmptySequence => write!(f, "Empty sequence"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InvalidFieldName => write!(f, "Invalid field name"),
            ErrorKind::ObjectMappingError => write!(f, "Object mapping error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom collection error type.
///
/// `CollectError` carries a message, an [ErrorKind], an optional cause and the
/// backtrace captured where it was raised.
///
/// # Examples
///
/// ```rust
/// use collect::errors::{CollectError, ErrorKind};
///
/// let cause = CollectError::new("no elements", ErrorKind::EmptySequence);
/// let err = CollectError::new_with_cause("sum failed", ErrorKind::InternalError, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct CollectError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<CollectError>>,
    backtrace: Atomic<Backtrace>,
}

impl CollectError {
    /// Creates a new `CollectError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        CollectError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `CollectError` chained to the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: CollectError) -> Self {
        CollectError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&CollectError> {
        self.cause.as_deref()
    }
}

impl Display for CollectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for CollectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for CollectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// `CollectResult<T>` is shorthand for `Result<T, CollectError>`.
pub type CollectResult<T> = Result<T, CollectError>;

#[cfg(feature = "serde")]
impl serde::de::Error for CollectError {
    fn custom<T: Display>(msg: T) -> Self {
        CollectError::new(&msg.to_string(), ErrorKind::ObjectMappingError)
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for CollectError {
    fn custom<T: Display>(msg: T) -> Self {
        CollectError::new(&msg.to_string(), ErrorKind::ObjectMappingError)
    }
}

impl From<std::fmt::Error> for CollectError {
    fn from(err: std::fmt::Error) -> Self {
        CollectError::new(
            &format!("Formatting error: {}", err),
            ErrorKind::InternalError,
        )
    }
}

impl From<String> for CollectError {
    fn from(msg: String) -> Self {
        CollectError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for CollectError {
    fn from(msg: &str) -> Self {
        CollectError::new(msg, ErrorKind::InternalError)
    }
}
