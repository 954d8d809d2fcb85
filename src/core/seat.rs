//! Seat identification for the two cooperating players.
//!
//! Regicide here is strictly two-handed: `Seat::One` and `Seat::Two`
//! alternate, and the turn marker exposed in observations is the seat
//! number (1 or 2).

use serde::{Deserialize, Serialize};

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    #[default]
    One,
    Two,
}

impl Seat {
    /// Seat number (1 or 2).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Seat::One => 1,
            Seat::Two => 2,
        }
    }

    /// The other seat.
    #[must_use]
    pub const fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}
