use serde::{Deserialize, Serialize};

/// The two ledger event kinds. `CheckIn < CheckOut` so the furthest state
/// reached on a day is simply the maximum kind seen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    CheckIn,
    CheckOut,
}

impl EventType {
    pub fn et_from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "in" | "check_in" | "checkin" => Some(Self::CheckIn),
            "out" | "check_out" | "checkout" => Some(Self::CheckOut),
            _ => None,
        }
    }

    /// Human label used in CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            EventType::CheckIn => "check-in",
            EventType::CheckOut => "check-out",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventType::CheckIn => "check_in",
            EventType::CheckOut => "check_out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "check_in" => Some(EventType::CheckIn),
            "check_out" => Some(EventType::CheckOut),
            _ => None,
        }
    }

    pub fn is_check_in(&self) -> bool {
        matches!(self, EventType::CheckIn)
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cli_aliases() {
        assert_eq!(EventType::et_from_str("IN"), Some(EventType::CheckIn));
        assert_eq!(EventType::et_from_str("check-out"), Some(EventType::CheckOut));
        assert_eq!(EventType::et_from_str("lunch"), None);
    }

    #[test]
    fn check_out_ranks_above_check_in() {
        assert!(EventType::CheckOut > EventType::CheckIn);
    }
}
