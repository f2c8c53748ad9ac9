use std::error::Error;
use std::fmt;
use std::rc::Rc;

/// Rejected [`RefreshIndicatorConfig`](crate::RefreshIndicatorConfig) values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidDisplacement { value: f32 },
    InvalidEdgeOffset { value: f32 },
    InvalidStrokeWidth { value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDisplacement { value } => {
                write!(f, "displacement must be finite and non-negative, got {value}")
            }
            ConfigError::InvalidEdgeOffset { value } => {
                write!(f, "edge offset must be finite and non-negative, got {value}")
            }
            ConfigError::InvalidStrokeWidth { value } => {
                write!(f, "stroke width must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Why a refresh cycle did not complete successfully.
///
/// Cloned into every holder of the cycle's [`RefreshHandle`](crate::RefreshHandle).
#[derive(Clone)]
pub enum RefreshError {
    /// The refresh callback's future resolved with an error.
    Callback(Rc<dyn Error>),
    /// The controller was disposed before the cycle finished.
    Disposed,
}

impl fmt::Debug for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshError::Callback(err) => f.debug_tuple("Callback").field(&err.to_string()).finish(),
            RefreshError::Disposed => f.write_str("Disposed"),
        }
    }
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshError::Callback(err) => write!(f, "refresh callback failed: {err}"),
            RefreshError::Disposed => f.write_str("refresh indicator disposed"),
        }
    }
}

impl Error for RefreshError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RefreshError::Callback(err) => Some(err.as_ref()),
            RefreshError::Disposed => None,
        }
    }
}

impl From<Box<dyn Error>> for RefreshError {
    fn from(err: Box<dyn Error>) -> Self {
        RefreshError::Callback(Rc::from(err))
    }
}
