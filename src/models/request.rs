use serde::{Deserialize, Serialize};

pub const UNKNOWN_IP: &str = "0.0.0.0";

/// Metadata captured from the request that produced an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestMeta {
    pub user_agent: String,
    pub ip_address: String,
}

impl RequestMeta {
    /// Resolve the client address the way the reverse proxy reports it:
    /// first hop of `X-Forwarded-For`, then `X-Real-IP`, then `0.0.0.0`.
    pub fn from_headers(
        user_agent: Option<&str>,
        forwarded_for: Option<&str>,
        real_ip: Option<&str>,
    ) -> Self {
        let first_hop = forwarded_for
            .and_then(|xff| xff.split(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let ip = first_hop
            .or_else(|| real_ip.map(str::trim).filter(|s| !s.is_empty()))
            .unwrap_or(UNKNOWN_IP);

        Self {
            user_agent: user_agent.unwrap_or_default().to_string(),
            ip_address: ip.to_string(),
        }
    }
}
