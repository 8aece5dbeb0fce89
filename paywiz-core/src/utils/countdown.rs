/// A whole-second countdown.
///
/// The remaining count is the only source of truth for what is displayed;
/// nothing is re-derived from the wall clock. The count never drops below
/// zero: the tick that reaches zero reports expiry instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    total: u32,
}

impl Countdown {
    pub fn new(total: u32) -> Self {
        Self {
            remaining: total,
            total,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Restore the full count.
    pub fn reset(&mut self) {
        self.remaining = self.total;
    }

    /// Advance by one second. Returns `true` on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining <= 1 {
            self.remaining = 0;
            true
        } else {
            self.remaining -= 1;
            false
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Elapsed share of the countdown, 0..=100, rounded down.
    pub fn elapsed_percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let elapsed = u64::from(self.total - self.remaining);
        // Bounded by 100 because `remaining <= total`.
        (elapsed * 100 / u64::from(self.total)) as u8
    }
}

impl std::fmt::Display for Countdown {
    /// Formats as `m:ss`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
