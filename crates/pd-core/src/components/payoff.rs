//! Payoff Matrix
//!
//! One-shot Prisoner's Dilemma payouts, parameterized by the defection
//! bonus `u`.

use serde::{Deserialize, Serialize};

/// Payout to the row player for each pairing.
///
/// `cc` cooperator meets cooperator, `cd` cooperator meets defector,
/// `dc` defector meets cooperator, `dd` defector meets defector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffTable {
    pub cc: f64,
    pub cd: f64,
    pub dc: f64,
    pub dd: f64,
}

impl PayoffTable {
    /// CC = 1, CD = 0, DC = 1 + u, DD = u.
    pub fn from_defection_bonus(u: f64) -> Self {
        Self {
            cc: 1.0,
            cd: 0.0,
            dc: 1.0 + u,
            dd: u,
        }
    }

    /// Payouts `(against cooperator, against defector)` for a strategy.
    pub fn row(&self, coop: bool) -> (f64, f64) {
        if coop {
            (self.cc, self.cd)
        } else {
            (self.dc, self.dd)
        }
    }
}

impl Default for PayoffTable {
    fn default() -> Self {
        Self::from_defection_bonus(0.0)
    }
}
