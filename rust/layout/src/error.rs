use thiserror::Error;

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during framing layout
#[derive(Error, Debug)]
pub enum Error {
    #[error("base curve is degenerate: {0}")]
    DegenerateBase(String),

    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),

    #[error("solid intersection oracle failed: {0}")]
    Oracle(String),

    #[error("geometry error: {0}")]
    Geometry(#[from] framing_lite_geometry::Error),
}
