use thiserror::Error;

pub type AxisResult<T> = Result<T, AxisError>;

/// Errors raised by the scale, tick, and layout engine.
///
/// Degenerate inputs (zero-width domains, unknown ordinal keys, layout space
/// below the draw-area floor) are not errors; those paths return documented
/// fallback values instead.
#[derive(Debug, Error)]
pub enum AxisError {
    /// Incorrect wiring by the surrounding chart code, e.g. a bucketing
    /// provider queried before its threshold is set.
    #[error("precondition violated: {0}")]
    Precondition(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid layout size: width={width}, height={height}")]
    InvalidLayoutSize { width: f64, height: f64 },
}
