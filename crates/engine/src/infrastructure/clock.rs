//! Wall clock for skin-location cooldowns.

use chrono::{DateTime, Utc};

use crate::infrastructure::ports::ClockPort;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
