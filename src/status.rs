//! Health status codes and severity ordering.
//!
//! # Severity
//! ```text
//! UP (1) < UNKNOWN (2) < OUT_OF_SERVICE (3) < DOWN (4)
//! ```
//!
//! Roll-up of a composite takes the worst-ranked status among its children;
//! an empty composite reports UP.

use serde::{Deserialize, Serialize};

/// Outcome category of a single check or a rolled-up composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
    #[serde(rename = "OUT_OF_SERVICE")]
    OutOfService,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl Status {
    /// Wire code as rendered in JSON output and logs.
    pub fn as_code(&self) -> &'static str {
        match self {
            Status::Up => "UP",
            Status::Down => "DOWN",
            Status::OutOfService => "OUT_OF_SERVICE",
            Status::Unknown => "UNKNOWN",
        }
    }

    /// Severity rank; higher is worse.
    pub fn rank(&self) -> u8 {
        match self {
            Status::Up => 1,
            Status::Unknown => 2,
            Status::OutOfService => 3,
            Status::Down => 4,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Returns the worse of two statuses; ties keep `a`.
pub fn worse_of(a: Status, b: Status) -> Status {
    if b.rank() > a.rank() {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order() {
        assert!(Status::Down.rank() > Status::OutOfService.rank());
        assert!(Status::OutOfService.rank() > Status::Unknown.rank());
        assert!(Status::Unknown.rank() > Status::Up.rank());
    }

    #[test]
    fn worse_of_picks_higher_rank() {
        assert_eq!(worse_of(Status::Up, Status::Down), Status::Down);
        assert_eq!(worse_of(Status::Down, Status::Up), Status::Down);
        assert_eq!(worse_of(Status::Unknown, Status::OutOfService), Status::OutOfService);
    }

    #[test]
    fn worse_of_tie_keeps_first() {
        assert_eq!(worse_of(Status::Up, Status::Up), Status::Up);
        assert_eq!(worse_of(Status::Down, Status::Down), Status::Down);
    }

    #[test]
    fn worse_of_is_associative_and_commutative() {
        let all = [Status::Up, Status::Down, Status::OutOfService, Status::Unknown];
        for a in all {
            for b in all {
                assert_eq!(worse_of(a, b).rank(), worse_of(b, a).rank());
                for c in all {
                    assert_eq!(
                        worse_of(worse_of(a, b), c).rank(),
                        worse_of(a, worse_of(b, c)).rank()
                    );
                }
            }
        }
    }

    #[test]
    fn wire_codes() {
        assert_eq!(Status::OutOfService.as_code(), "OUT_OF_SERVICE");
        assert_eq!(serde_json::to_string(&Status::Up).unwrap(), "\"UP\"");
    }
}
