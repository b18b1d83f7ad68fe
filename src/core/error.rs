use thiserror::Error;

/// Errors raised while building a simulated actuator.
///
/// Per-tick operations never fail; only construction and configuration do.
#[derive(Debug, Error)]
pub enum SimError {
    /// A physical or controller parameter is outside its valid domain.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The configuration text could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Rejects NaN and infinities.
pub fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}

/// Rejects anything that is not a finite, strictly positive number.
pub fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter {
            name,
            value,
            reason: "must be strictly positive",
        })
    }
}

/// Rejects negative or non-finite numbers. Zero is allowed.
pub fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter {
            name,
            value,
            reason: "must not be negative",
        })
    }
}
