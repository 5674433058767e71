use thiserror::Error;

pub type Result<T, E = AlignError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AlignError {
    #[error("position ({x}, {y}) is out of bounds of a {width}x{height} matrix")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("position ({x}, {y}) is outside of a band of radius {radius}")]
    OutsideBand { x: usize, y: usize, radius: usize },
    #[error("alignment impossible: {reason}")]
    AlignmentImpossible { reason: String },
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },
    #[error("matrix iterator has no more positions")]
    IteratorExhausted,
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("config error in {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl AlignError {
    pub(crate) fn impossible(reason: impl Into<String>) -> Self {
        Self::AlignmentImpossible { reason: reason.into() }
    }

    pub(crate) fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    /// True for the failures a too narrow band produces.
    pub fn is_band_limited(&self) -> bool {
        matches!(self, Self::OutsideBand { .. } | Self::AlignmentImpossible { .. })
    }
}

/// Fails with `InvalidParameter` unless `value` lies in `[0, 1]`.
pub(crate) fn check_unit_interval(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AlignError::invalid_parameter(name, format!("{value} is not in [0, 1]")))
    }
}
