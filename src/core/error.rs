use crate::core::types::{EntityId, EntityKind};
use thiserror::Error;

/// Failures reported to callers of the engine
///
/// None of these are fatal: a rejected request leaves the world untouched
/// and the simulation keeps ticking. Out-of-range vitals are clamped
/// silently and never surface here.
#[derive(Error, Debug)]
pub enum EcoError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: EntityId },

    #[error("Value out of range for {field}: {value}")]
    InvalidRange { field: &'static str, value: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EcoError {
    pub fn not_found(kind: EntityKind, id: EntityId) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn invalid_range(field: &'static str, value: impl Into<f64>) -> Self {
        Self::InvalidRange { field, value: value.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, EcoError>;

/// Reject NaN, infinite and negative inputs
pub fn ensure_non_negative(field: &'static str, value: f32) -> Result<f32> {
    if !value.is_finite() || value < 0.0 {
        return Err(EcoError::invalid_range(field, value));
    }
    Ok(value)
}
