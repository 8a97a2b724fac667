use super::position::Position;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A registered check-in site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub road_address: String,
    pub jibun_address: Option<String>,
    pub english_address: Option<String>,
    pub x: String,
    pub y: String,
}

impl Site {
    pub fn position(&self) -> Position {
        Position {
            x: self.x.clone(),
            y: self.y.clone(),
        }
    }
}

/// Validated input for registering a site.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSite {
    pub road_address: String,
    pub jibun_address: Option<String>,
    pub english_address: Option<String>,
    pub position: Position,
}

impl NewSite {
    pub fn new(
        road_address: &str,
        x: &str,
        y: &str,
        jibun_address: Option<String>,
        english_address: Option<String>,
    ) -> AppResult<Self> {
        let road_address = road_address.trim();
        if road_address.is_empty() {
            return Err(AppError::InvalidSite("road address must not be empty".into()));
        }

        Ok(Self {
            road_address: road_address.to_string(),
            jibun_address: non_empty(jibun_address),
            english_address: non_empty(english_address),
            position: Position::parse(x, y)?,
        })
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
