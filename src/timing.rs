/// Time gating: whether a tip is due at a given game-clock second.
///
/// Timings are whole seconds from the horn (0:00).  Negative values belong to
/// the strategy phase before creeps spawn.  Turbo games run on a compressed
/// schedule, so a tip may carry a second timing list for them.
use serde::{Deserialize, Serialize};

use crate::catalog::TipRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Normal,
    Turbo,
}

/// One time or several, as written in the data files (`timing = 90` or
/// `timing = [90, 150]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timing {
    Single(i32),
    Many(Vec<i32>),
}

impl Timing {
    pub fn as_slice(&self) -> &[i32] {
        match self {
            Timing::Single(t) => std::slice::from_ref(t),
            Timing::Many(ts)  => ts,
        }
    }
}

impl TipRecord {
    /// Base trigger times for `mode`.  Falls back to the normal timing when a
    /// tip has no turbo-specific one.
    pub fn timings(&self, mode: GameMode) -> &[i32] {
        let timing = match mode {
            GameMode::Turbo => self.turbo_timing.as_ref().or(self.timing.as_ref()),
            GameMode::Normal => self.timing.as_ref(),
        };
        timing.map(Timing::as_slice).unwrap_or(&[])
    }

    /// True if the tip triggers exactly at `clock_s`, counting repeats.
    pub fn is_due(&self, clock_s: i32, mode: GameMode) -> bool {
        self.timings(mode).iter().any(|&t| self.fires_from(t, clock_s))
    }

    fn fires_from(&self, base: i32, clock_s: i32) -> bool {
        if clock_s == base {
            return true;
        }
        let Some(interval) = self.repeat_interval.filter(|i| *i > 0) else {
            return false;
        };
        if clock_s < base {
            return false;
        }
        let elapsed = (clock_s as i64 - base as i64) as u64;
        let interval = interval as u64;
        if elapsed % interval != 0 {
            return false;
        }
        match self.repeat_count {
            Some(max) => elapsed / interval <= max as u64,
            None => true,
        }
    }

    /// Text for display: the short form when asked for and available.
    pub fn display_text(&self, prefer_short: bool) -> &str {
        match (&self.short_text, prefer_short) {
            (Some(short), true) => short,
            _ => &self.text,
        }
    }
}
