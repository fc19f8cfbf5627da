use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;

/// rate increment for deposits that capitalize interest: 0.5 percentage points
pub const CAPITALIZATION_BONUS: Rate = Rate::from_decimal(Decimal::from_parts(5, 0, 0, false, 3));

/// combines a product's base rate with its bonuses into one effective annual rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateComposer {
    pub capitalization_bonus: Rate,
}

impl Default for RateComposer {
    fn default() -> Self {
        Self {
            capitalization_bonus: CAPITALIZATION_BONUS,
        }
    }
}

impl RateComposer {
    pub fn new(capitalization_bonus: Rate) -> Self {
        Self { capitalization_bonus }
    }

    pub fn compose(&self, base: Rate, term_bonus: Rate, capitalization_enabled: bool) -> Rate {
        let bonus = if capitalization_enabled {
            self.capitalization_bonus
        } else {
            Rate::ZERO
        };
        base + term_bonus + bonus
    }
}

/// effective annual rate under the standard capitalization bonus
pub fn compose_rate(base: Rate, term_bonus: Rate, capitalization_enabled: bool) -> Rate {
    RateComposer::default().compose(base, term_bonus, capitalization_enabled)
}
