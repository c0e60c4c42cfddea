use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluatorError {
    #[error("Array index out of bounds: index={index} size={len}")]
    OutOfRange { index: isize, len: usize },
    #[error("Illegal initial capacity {0}")]
    IllegalCapacity(isize),
    #[error("Capacity overflow: requested {requested} slots, maximum is {max}")]
    CapacityOverflow { requested: usize, max: usize },
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EvaluatorError>;

impl EvaluatorError {
    // Indices come in as usize everywhere except the not-found sentinel.
    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index: isize::try_from(index).unwrap_or(isize::MAX), len }
    }
    pub(crate) fn not_found(len: usize) -> Self {
        Self::OutOfRange { index: -1, len }
    }
}

// Helper conversions
impl From<::config::ConfigError> for EvaluatorError {
    fn from(e: ::config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
