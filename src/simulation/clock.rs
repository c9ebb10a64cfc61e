// ABOUTME: Session clock and transmission indicator for the live tracking view
// ABOUTME: Elapsed seconds accumulate per tick; the transmit flag flips per toggle tick
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

/// Seconds elapsed since the session started
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SessionClock {
    elapsed_seconds: u64,
}

impl SessionClock {
    /// Record one clock tick
    pub fn tick(&mut self) {
        self.elapsed_seconds += 1;
    }

    /// Seconds elapsed
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Elapsed time formatted for the session header
    #[must_use]
    pub fn label(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

/// Cosmetic "data transfer" flag; not coupled to any real data flow
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TransmissionIndicator {
    transmitting: bool,
}

impl Default for TransmissionIndicator {
    fn default() -> Self {
        Self { transmitting: true }
    }
}

impl TransmissionIndicator {
    /// Flip the flag and return the new value
    pub fn toggle(&mut self) -> bool {
        self.transmitting = !self.transmitting;
        self.transmitting
    }

    /// Current flag
    #[must_use]
    pub const fn is_transmitting(&self) -> bool {
        self.transmitting
    }

    /// Status line shown next to the indicator
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.transmitting {
            "Передача данных..."
        } else {
            "Ожидание..."
        }
    }
}

/// `"{h}ч {m}м"` once an hour has passed, `"{m}м {s}с"` before that
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}ч {minutes}м")
    } else {
        format!("{minutes}м {secs}с")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0м 0с");
        assert_eq!(format_elapsed(125), "2м 5с");
        assert_eq!(format_elapsed(3_725), "1ч 2м");
    }

    #[test]
    fn test_indicator_starts_transmitting() {
        let mut indicator = TransmissionIndicator::default();
        assert!(indicator.is_transmitting());
        assert!(!indicator.toggle());
        assert_eq!(indicator.status_label(), "Ожидание...");
    }
}
