//! Output driver boundary.

/// Digital output line for one channel (jack plus LED on the hardware).
///
/// The engine never reads the physical level back; `is_high` reports the
/// last value written.
pub trait OutputDriver {
    fn high(&mut self);
    fn low(&mut self);
    fn is_high(&self) -> bool;

    fn write(&mut self, high: bool) {
        if high {
            self.high();
        } else {
            self.low();
        }
    }
}

impl<O: OutputDriver + ?Sized> OutputDriver for Box<O> {
    fn high(&mut self) {
        (**self).high()
    }
    fn low(&mut self) {
        (**self).low()
    }
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}

/// In-memory output that latches the last written level and counts writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatchOutput {
    level: bool,
    writes: u32,
    rising: u32,
}

impl LatchOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of writes, including writes that did not change the level.
    pub fn writes(&self) -> u32 {
        self.writes
    }

    /// Number of low-to-high transitions seen.
    pub fn pulses(&self) -> u32 {
        self.rising
    }

    fn set(&mut self, level: bool) {
        if level && !self.level {
            self.rising = self.rising.wrapping_add(1);
        }
        self.level = level;
        self.writes = self.writes.wrapping_add(1);
    }
}

impl OutputDriver for LatchOutput {
    fn high(&mut self) {
        self.set(true);
    }
    fn low(&mut self) {
        self.set(false);
    }
    fn is_high(&self) -> bool {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_tracks_level_and_pulses() {
        let mut out = LatchOutput::new();
        assert!(!out.is_high());
        out.high();
        out.high();
        out.low();
        out.write(true);
        assert!(out.is_high());
        assert_eq!(out.writes(), 4);
        assert_eq!(out.pulses(), 2);
    }

    #[test]
    fn counters_wrap_instead_of_overflowing() {
        let mut out = LatchOutput {
            level: false,
            writes: u32::MAX,
            rising: u32::MAX,
        };
        out.high();
        assert_eq!(out.writes(), 0);
        assert_eq!(out.pulses(), 0);
        assert!(out.is_high());
    }

    #[test]
    fn boxed_driver_delegates() {
        let mut out: Box<dyn OutputDriver> = Box::new(LatchOutput::new());
        out.write(true);
        assert!(out.is_high());
        out.write(false);
        assert!(!out.is_high());
    }
}
