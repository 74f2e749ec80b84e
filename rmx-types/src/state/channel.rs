//! Per-channel and chain configuration.

use serde::{Deserialize, Serialize};

use super::clock::ClockSource;
use super::division::{DivisionTable, MAX_DIVISION_INDEX};
use super::mode::ChannelMode;

/// Upper bound of the probability parameter (and of the random draw range).
pub const MAX_PROBABILITY: u8 = 100;

/// Number of outputs on the hardware panel.
pub const DEFAULT_CHANNEL_COUNT: usize = 6;

/// User-facing configuration of one channel. Every setter clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub mode: ChannelMode,
    /// Coin-toss threshold, 0-100
    pub probability: u8,
    /// Index into the division table, 0-18
    pub division_index: u8,
    pub clock_source: ClockSource,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            mode: ChannelMode::Trigger,
            probability: MAX_PROBABILITY,
            division_index: 0,
            clock_source: ClockSource::A,
        }
    }
}

impl ChannelConfig {
    pub fn new(
        mode: ChannelMode,
        probability: u8,
        clock_source: ClockSource,
        division_index: u8,
    ) -> Self {
        let mut cfg = Self {
            mode,
            probability: 0,
            division_index: 0,
            clock_source,
        };
        cfg.set_probability(probability);
        cfg.set_division_index(division_index);
        cfg
    }

    pub fn set_mode(&mut self, mode: ChannelMode) {
        self.mode = mode;
    }

    pub fn set_mode_id(&mut self, id: u8) {
        self.mode = ChannelMode::from_id(id);
    }

    pub fn set_probability(&mut self, probability: u8) {
        self.probability = probability.min(MAX_PROBABILITY);
    }

    pub fn set_division_index(&mut self, index: u8) {
        self.division_index = DivisionTable::clamp_index(index);
    }

    pub fn set_clock_source(&mut self, source: ClockSource) {
        self.clock_source = source;
    }

    pub fn set_clock_source_id(&mut self, id: u8) {
        self.clock_source = ClockSource::from_id(id);
    }

    /// Step the mode-contextual parameter: division index in division
    /// modes, probability otherwise.
    pub fn adjust_parameter(&mut self, delta: i16) {
        if self.mode.is_division() {
            self.division_index = (self.division_index as i32 + delta as i32)
                .clamp(0, MAX_DIVISION_INDEX as i32) as u8;
        } else {
            self.probability = (self.probability as i32 + delta as i32)
                .clamp(0, MAX_PROBABILITY as i32) as u8;
        }
    }

    pub fn divisor(&self) -> u8 {
        DivisionTable::divisor(self.division_index)
    }

    /// Probability as a fraction in [0, 1].
    pub fn probability_fraction(&self) -> f32 {
        self.probability as f32 / MAX_PROBABILITY as f32
    }

    /// What the parameter knob currently shows.
    pub fn parameter(&self) -> ChannelParameter {
        if self.mode.is_division() {
            ChannelParameter::Divisor(self.divisor())
        } else {
            ChannelParameter::Probability(self.probability_fraction())
        }
    }

    /// Clock label, blank when the channel is off.
    pub fn clock_label(&self) -> char {
        if self.mode == ChannelMode::Off {
            ' '
        } else {
            self.clock_source.label()
        }
    }
}

/// Mode-contextual parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChannelParameter {
    Probability(f32),
    Divisor(u8),
}

impl ChannelParameter {
    pub fn label(&self) -> String {
        match self {
            ChannelParameter::Probability(p) => format!("{:.0}%", p * 100.0),
            ChannelParameter::Divisor(d) => format!("/{}", d),
        }
    }
}

/// Read-only view handed to the display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelDisplay {
    pub mode_name: &'static str,
    pub mode_short: &'static str,
    pub parameter: ChannelParameter,
    pub clock_label: char,
    pub output: bool,
}

/// Value fed as `prev` to the first channel of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChainSeed {
    #[default]
    Low,
    High,
}

impl ChainSeed {
    pub fn value(&self) -> bool {
        matches!(self, ChainSeed::High)
    }

    pub fn from_bool(high: bool) -> Self {
        if high {
            ChainSeed::High
        } else {
            ChainSeed::Low
        }
    }
}

/// Ordered channel configurations plus the chain seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub seed: ChainSeed,
    pub channels: Vec<ChannelConfig>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            seed: ChainSeed::Low,
            channels: vec![ChannelConfig::default(); DEFAULT_CHANNEL_COUNT],
        }
    }
}

impl ChainConfig {
    pub fn new(channels: Vec<ChannelConfig>) -> Self {
        Self {
            seed: ChainSeed::Low,
            channels,
        }
    }

    pub fn with_seed(mut self, seed: ChainSeed) -> Self {
        self.seed = seed;
        self
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_inputs() {
        let cfg = ChannelConfig::new(ChannelMode::ClockDiv, 250, ClockSource::B, 40);
        assert_eq!(cfg.probability, 100);
        assert_eq!(cfg.division_index, 18);
        assert_eq!(cfg.divisor(), 96);
    }

    #[test]
    fn setters_clamp() {
        let mut cfg = ChannelConfig::default();
        cfg.set_probability(101);
        assert_eq!(cfg.probability, 100);
        cfg.set_division_index(19);
        assert_eq!(cfg.division_index, 18);
        cfg.set_mode_id(42);
        assert_eq!(cfg.mode, ChannelMode::Off);
        cfg.set_clock_source_id(3);
        assert_eq!(cfg.clock_source, ClockSource::Both);
    }

    #[test]
    fn adjust_parameter_is_mode_contextual() {
        let mut cfg = ChannelConfig::new(ChannelMode::Trigger, 50, ClockSource::A, 2);
        cfg.adjust_parameter(5);
        assert_eq!(cfg.probability, 55);
        assert_eq!(cfg.division_index, 2);

        cfg.set_mode(ChannelMode::PrevClockDivFlip);
        cfg.adjust_parameter(-1);
        assert_eq!(cfg.division_index, 1);
        assert_eq!(cfg.probability, 55);
    }

    #[test]
    fn adjust_parameter_saturates() {
        let mut cfg = ChannelConfig::new(ChannelMode::Flip, 98, ClockSource::A, 0);
        cfg.adjust_parameter(10);
        assert_eq!(cfg.probability, 100);
        cfg.adjust_parameter(-500);
        assert_eq!(cfg.probability, 0);

        cfg.set_mode(ChannelMode::ClockDiv);
        cfg.adjust_parameter(-1);
        assert_eq!(cfg.division_index, 0);
        cfg.adjust_parameter(100);
        assert_eq!(cfg.division_index, 18);
    }

    #[test]
    fn parameter_depends_on_mode() {
        let cfg = ChannelConfig::new(ChannelMode::Trigger, 25, ClockSource::A, 3);
        assert_eq!(cfg.parameter(), ChannelParameter::Probability(0.25));
        assert_eq!(cfg.parameter().label(), "25%");

        let cfg = ChannelConfig::new(ChannelMode::ClockDiv, 25, ClockSource::A, 3);
        assert_eq!(cfg.parameter(), ChannelParameter::Divisor(4));
        assert_eq!(cfg.parameter().label(), "/4");
    }

    #[test]
    fn clock_label_blank_when_off() {
        let mut cfg = ChannelConfig::new(ChannelMode::Trigger, 100, ClockSource::Both, 0);
        assert_eq!(cfg.clock_label(), '*');
        cfg.set_mode(ChannelMode::Off);
        assert_eq!(cfg.clock_label(), ' ');
    }

    #[test]
    fn default_chain_has_six_triggers() {
        let chain = ChainConfig::default();
        assert_eq!(chain.len(), 6);
        assert_eq!(chain.seed, ChainSeed::Low);
        assert!(chain.channels.iter().all(|c| c.mode == ChannelMode::Trigger));
    }

    #[test]
    fn seed_values() {
        assert!(!ChainSeed::Low.value());
        assert!(ChainSeed::High.value());
        assert_eq!(ChainSeed::from_bool(true), ChainSeed::High);
    }

    #[test]
    fn chain_config_serializes() {
        let chain = ChainConfig::new(vec![ChannelConfig::new(
            ChannelMode::PrevCopy,
            40,
            ClockSource::Both,
            1,
        )])
        .with_seed(ChainSeed::High);
        let json = serde_json::to_string(&chain).unwrap();
        let back: ChainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chain);
    }
}
