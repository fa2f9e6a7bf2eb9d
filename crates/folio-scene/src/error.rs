//! Scene errors

/// Errors raised while building scene values from external input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// Pointer text is not `x,y`
    #[error("invalid pointer {0:?}: expected \"x,y\" with values in [-1, 1]")]
    InvalidPointer(String),

    /// Position and colour arrays disagree
    #[error("particle arrays disagree: {positions} positions, {colors} colors")]
    LengthMismatch {
        /// Number of positions supplied
        positions: usize,
        /// Number of colours supplied
        colors: usize,
    },
}
