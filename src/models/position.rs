use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A reported or registered coordinate, kept as the decimal strings it
/// arrived as. `x` is the longitude, `y` the latitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: String,
    pub y: String,
}

impl Position {
    /// Build a position from raw strings, rejecting anything that is not a
    /// finite decimal number.
    pub fn parse(x: &str, y: &str) -> AppResult<Self> {
        parse_coordinate(x)?;
        parse_coordinate(y)?;
        Ok(Self {
            x: x.trim().to_string(),
            y: y.trim().to_string(),
        })
    }

    /// (longitude, latitude) as floats.
    pub fn coords(&self) -> AppResult<(f64, f64)> {
        Ok((parse_coordinate(&self.x)?, parse_coordinate(&self.y)?))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub fn parse_coordinate(raw: &str) -> AppResult<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidCoordinate(raw.to_string()))?;

    if !value.is_finite() {
        return Err(AppError::InvalidCoordinate(raw.to_string()));
    }
    Ok(value)
}
