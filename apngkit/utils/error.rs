use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;

/// Error taxonomy reported by every load and save operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Format,
    Data,
    Unsupported,
    InvalidInput,
}

#[derive(Debug)]
pub enum PngError {
    Io(io::Error),
    /// The byte stream is not a well-formed PNG container.
    Format(String),
    /// The container is well formed but its content is inconsistent.
    Data(String),
    /// A valid feature this codec does not implement.
    Unsupported(String),
    InvalidDimensions { width: u32, height: u32 },
    /// Caller-supplied pixel buffers that do not match their declared shape.
    InvalidInput(String),
}

impl PngError {
    pub fn format(msg: impl Into<String>) -> Self {
        PngError::Format(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        PngError::Data(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        PngError::Unsupported(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        PngError::InvalidInput(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PngError::Io(_) => ErrorKind::Io,
            PngError::Format(_) | PngError::InvalidDimensions { .. } => ErrorKind::Format,
            PngError::Data(_) => ErrorKind::Data,
            PngError::Unsupported(_) => ErrorKind::Unsupported,
            PngError::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }
}

impl Error for PngError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PngError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for PngError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PngError::Io(err) => write!(f, "I/O error: {}", err),
            PngError::Format(msg) => write!(f, "Format error: {}", msg),
            PngError::Data(msg) => write!(f, "Data error: {}", msg),
            PngError::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
            PngError::InvalidDimensions { width, height } => {
                write!(f, "Invalid image dimensions: {}x{}", width, height)
            }
            PngError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl From<io::Error> for PngError {
    fn from(error: io::Error) -> Self {
        PngError::Io(error)
    }
}

// Result type alias for apngkit operations
pub type PngResult<T> = Result<T, PngError>;
