//! Result type alias for Quire
//!
//! This module provides a convenient Result type alias that uses QuireError
//! as the error type.

use super::errors::QuireError;

/// Result type alias for Quire operations
///
/// # Examples
///
/// ```
/// use quire::domain::result::Result;
/// use quire::domain::errors::QuireError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(QuireError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, QuireError>;
