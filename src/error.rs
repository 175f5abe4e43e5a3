//! Error types for pagination configuration and rendering

use thiserror::Error;

/// Errors reported by the pagination engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaginationError {
    /// A height, gap, or margin was negative or not a finite number
    #[error("invalid value for `{field}`: {value} (expected a non-negative number)")]
    InvalidConfigurationValue { field: &'static str, value: f32 },

    /// Header and footer bands leave no room for content
    #[error(
        "header ({header}) + footer ({footer}) must be smaller than the page height ({page_height})"
    )]
    DegenerateGeometry {
        page_height: f32,
        header: f32,
        footer: f32,
    },

    /// The pagination widget is not mounted in the render target yet
    #[error("pagination widget is not present in the render target")]
    MissingRenderTarget,

    /// Margin updates are disabled for this paginator
    #[error("page margin updates are not enabled for this paginator")]
    MarginsLocked,

    /// Host options could not be parsed
    #[error("invalid pagination options: {0}")]
    InvalidOptions(String),
}

impl From<serde_json::Error> for PaginationError {
    fn from(e: serde_json::Error) -> Self {
        PaginationError::InvalidOptions(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PaginationError>;
