//! Time sources for seed timestamps.

use chrono::{DateTime, SubsecRound, Utc};

use crate::infrastructure::ports::ClockPort;

/// BSON dates keep milliseconds; finer digits would be dropped on insert.
const BSON_DATE_DIGITS: u16 = 3;

/// Wall clock, truncated to what a BSON date can hold so the value logged
/// and the value stored agree.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(BSON_DATE_DIGITS)
    }
}

/// Always reports the same instant.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
