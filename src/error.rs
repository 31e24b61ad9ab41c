//! Error types shared across the dashboard engine

use thiserror::Error;

/// Errors surfaced by the dashboard engine
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Business system {0} not found")]
    UnknownSystem(String),

    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Reject viewports a layout pass cannot divide into bands
pub(crate) fn check_viewport(width: f64, height: f64) -> DashboardResult<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(DashboardError::InvalidViewport { width, height })
    }
}
