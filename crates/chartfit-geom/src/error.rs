#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("item {id:?} has a negative weight: {weight}")]
    NegativeWeight { id: String, weight: f64 },

    #[error("item {id:?} has a non-finite weight: {weight}")]
    NonFiniteWeight { id: String, weight: f64 },

    #[error("{field} must be a positive finite number (got {value})")]
    InvalidDimension { field: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rejects non-finite or non-positive dimensions.
pub fn positive_dimension(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidDimension { field, value })
    }
}

/// Rejects non-finite or negative dimensions; zero is allowed.
pub fn non_negative_dimension(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidDimension { field, value })
    }
}
