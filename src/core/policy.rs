use crate::config::Config;
use crate::core::clock::parse_utc_offset;
use crate::errors::AppResult;
use chrono::FixedOffset;

/// Deployment-wide attendance settings, resolved once from `Config`.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    pub offset: FixedOffset,
    pub geofence_radius: f64,
}

impl Policy {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Ok(Self {
            offset: parse_utc_offset(&cfg.utc_offset)?,
            geofence_radius: cfg.geofence_radius,
        })
    }
}
