//! Money request lifecycle states
//!
//! Stored as VARCHAR in PostgreSQL; every transition goes through a
//! compare-and-set on the stored string so concurrent responders and the
//! expiry sweep cannot double-apply.

use std::fmt;

/// Money request lifecycle
///
/// Terminal states: ACCEPTED, DECLINED, EXPIRED.
/// ACCEPTED_PENDING_SETTLEMENT marks a request whose acceptance was claimed
/// but whose settling transfer has not committed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    /// Awaiting a response from the recipient
    Pending,

    /// Acceptance claimed, settling transfer in progress
    AcceptedPendingSettlement,

    /// Terminal: settled, money moved
    Accepted,

    /// Terminal: recipient refused
    Declined,

    /// Terminal: deadline passed without a response
    Expired,
}

impl RequestStatus {
    /// Check if this is a terminal state (no more transitions possible)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Accepted | RequestStatus::Declined | RequestStatus::Expired
        )
    }

    /// Get the stored state name
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::AcceptedPendingSettlement => "ACCEPTED_PENDING_SETTLEMENT",
            RequestStatus::Accepted => "ACCEPTED",
            RequestStatus::Declined => "DECLINED",
            RequestStatus::Expired => "EXPIRED",
        }
    }

    /// Convert from the stored state name
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(RequestStatus::Pending),
            "ACCEPTED_PENDING_SETTLEMENT" => Some(RequestStatus::AcceptedPendingSettlement),
            "ACCEPTED" => Some(RequestStatus::Accepted),
            "DECLINED" => Some(RequestStatus::Declined),
            "EXPIRED" => Some(RequestStatus::Expired),
            _ => None,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(RequestStatus::Accepted.is_terminal());
        assert!(RequestStatus::Declined.is_terminal());
        assert!(RequestStatus::Expired.is_terminal());

        assert!(!RequestStatus::Pending.is_terminal());
        assert!(!RequestStatus::AcceptedPendingSettlement.is_terminal());
    }

    #[test]
    fn test_status_name_roundtrip() {
        let states = [
            RequestStatus::Pending,
            RequestStatus::AcceptedPendingSettlement,
            RequestStatus::Accepted,
            RequestStatus::Declined,
            RequestStatus::Expired,
        ];
        for state in states {
            assert_eq!(RequestStatus::parse(state.as_str()), Some(state));
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        assert_eq!(RequestStatus::parse("CANCELLED"), None);
        assert_eq!(RequestStatus::parse("pending"), None);
        assert_eq!(RequestStatus::parse(""), None);
    }
}
