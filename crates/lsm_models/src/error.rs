//! Error types for the model layer.

use thiserror::Error;

/// Maximum supported order for the orthogonal polynomial families.
pub const MAX_POLY_ORDER: u32 = 5;

/// Basis-function construction error.
///
/// Raised when a basis function is requested with parameters outside the
/// supported range. Construction never clamps: an out-of-range order is
/// an error, not a silently adjusted value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BasisError {
    /// Polynomial order outside `[0, 5]` for Laguerre/Hermite families.
    #[error("polynomial order {0} out of range: must be in [0, {MAX_POLY_ORDER}]")]
    OrderOutOfRange(u32),
}
