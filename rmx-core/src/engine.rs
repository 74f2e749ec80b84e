//! Per-channel edge engine.
//!
//! Each channel reacts to rising and falling clock edges according to its
//! [`ChannelMode`]. Three pieces of runtime state sit next to the
//! configuration:
//!
//! - the output level, owned by the [`OutputDriver`] (the engine reads back
//!   what it wrote, never the pin)
//! - the division counter, always below the current divisor
//! - the clock line that last drove the output, used to pair falling edges
//!   with their rising edge when the channel listens to both lines

use rmx_types::reduce::{reduce_channel, Reduced};
use rmx_types::{
    ChannelAction, ChannelConfig, ChannelDisplay, ChannelMode, ChannelParameter, ClockEvent,
    ClockLine, ClockSource, Edge,
};

use crate::output::OutputDriver;
use crate::random::RandomSource;

/// State machine for one output channel.
#[derive(Debug, Clone)]
pub struct ChannelEngine<O> {
    output: O,
    config: ChannelConfig,
    counter: u8,
    last_driver: ClockLine,
}

impl<O: OutputDriver> ChannelEngine<O> {
    /// Out-of-range values in `config` are clamped.
    pub fn new(output: O, config: ChannelConfig) -> Self {
        Self {
            output,
            config: normalize(config),
            counter: 0,
            last_driver: ClockLine::A,
        }
    }

    /// Handle a rising edge on `line`. `prev` is the output the preceding
    /// channel produced for this edge. Returns this channel's output, or
    /// `prev` unchanged when the channel is off.
    pub fn on_rising_edge<R: RandomSource + ?Sized>(
        &mut self,
        line: ClockLine,
        prev: bool,
        rng: &mut R,
    ) -> bool {
        let mode = self.config.mode;
        match mode {
            ChannelMode::Off => return self.pass_through(line, prev),
            _ if !self.config.clock_source.admits(line) => {}
            ChannelMode::Trigger => {
                if self.coin_toss(rng) {
                    self.drive(line, true);
                }
            }
            ChannelMode::Flip => {
                if self.coin_toss(rng) {
                    self.toggle(line);
                }
            }
            ChannelMode::ClockDiv => {
                if self.advance_counter() {
                    self.drive(line, true);
                }
            }
            ChannelMode::ClockDivFlip => {
                if self.advance_counter() {
                    self.toggle(line);
                }
            }
            ChannelMode::PrevCopy => self.drive(line, prev),
            ChannelMode::PrevBernoulli | ChannelMode::PrevBernoulliFlip => {
                self.drive(line, !prev)
            }
            ChannelMode::PrevFollow => {
                if prev && self.coin_toss(rng) {
                    self.drive(line, true);
                }
            }
            ChannelMode::PrevFollowFlip => {
                if prev && self.coin_toss(rng) {
                    self.toggle(line);
                }
            }
            ChannelMode::PrevClockDiv => {
                if prev && self.advance_counter() {
                    self.drive(line, true);
                }
            }
            ChannelMode::PrevClockDivFlip => {
                if prev && self.advance_counter() {
                    self.toggle(line);
                }
            }
        }
        self.output_state()
    }

    /// Handle a falling edge on `line`. Never draws randomness and never
    /// touches the division counter.
    pub fn on_falling_edge(&mut self, line: ClockLine, prev: bool) -> bool {
        let mode = self.config.mode;
        match mode {
            ChannelMode::Off => return self.pass_through(line, prev),
            _ if !self.config.clock_source.admits(line) => {}
            // Listening to both lines: only the line that drove us may release us
            _ if self.config.clock_source == ClockSource::Both
                && self.last_driver != line => {}
            ChannelMode::Trigger
            | ChannelMode::ClockDiv
            | ChannelMode::PrevFollow
            | ChannelMode::PrevClockDiv => self.drive(line, false),
            ChannelMode::Flip
            | ChannelMode::ClockDivFlip
            | ChannelMode::PrevFollowFlip
            | ChannelMode::PrevClockDivFlip
            | ChannelMode::PrevBernoulliFlip => {}
            ChannelMode::PrevCopy => self.drive(line, prev),
            ChannelMode::PrevBernoulli => self.drive(line, !prev),
        }
        self.output_state()
    }

    pub fn on_edge<R: RandomSource + ?Sized>(
        &mut self,
        event: ClockEvent,
        prev: bool,
        rng: &mut R,
    ) -> bool {
        match event.edge {
            Edge::Rising => self.on_rising_edge(event.line, prev, rng),
            Edge::Falling => self.on_falling_edge(event.line, prev),
        }
    }

    // -- configuration -------------------------------------------------------

    pub fn set_mode(&mut self, mode: ChannelMode) {
        self.config.set_mode(mode);
    }

    /// Out-of-range ids select `Off`.
    pub fn set_mode_id(&mut self, id: u8) {
        self.config.set_mode_id(id);
    }

    pub fn set_probability(&mut self, probability: u8) {
        self.config.set_probability(probability);
    }

    pub fn set_division_index(&mut self, index: u8) {
        self.config.set_division_index(index);
        self.rewrap_counter();
    }

    pub fn set_clock_source(&mut self, source: ClockSource) {
        self.config.set_clock_source(source);
    }

    /// Out-of-range ids select `Both`.
    pub fn set_clock_source_id(&mut self, id: u8) {
        self.config.set_clock_source_id(id);
    }

    /// Encoder step on the parameter: division index in division modes,
    /// probability otherwise.
    pub fn adjust_parameter(&mut self, delta: i16) {
        self.config.adjust_parameter(delta);
        self.rewrap_counter();
    }

    pub fn apply(&mut self, action: &ChannelAction) {
        match reduce_channel(action, &mut self.config) {
            Reduced::Config => {}
            Reduced::Division => self.rewrap_counter(),
            Reduced::ResetCounter => self.reset(),
        }
    }

    /// Zero the division counter.
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Replace the whole configuration and reset the counter. The output
    /// level is left as is.
    pub fn reinit(&mut self, config: ChannelConfig) {
        self.config = normalize(config);
        self.reset();
    }

    // -- queries -------------------------------------------------------------

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    pub fn mode(&self) -> ChannelMode {
        self.config.mode
    }

    pub fn mode_id(&self) -> u8 {
        self.config.mode.id()
    }

    pub fn mode_name(&self) -> &'static str {
        self.config.mode.name()
    }

    pub fn mode_short_name(&self) -> &'static str {
        self.config.mode.short_name()
    }

    pub fn probability(&self) -> u8 {
        self.config.probability
    }

    pub fn division_index(&self) -> u8 {
        self.config.division_index
    }

    pub fn divisor(&self) -> u8 {
        self.config.divisor()
    }

    /// Probability fraction, or divisor in division modes.
    pub fn parameter(&self) -> ChannelParameter {
        self.config.parameter()
    }

    pub fn clock_source(&self) -> ClockSource {
        self.config.clock_source
    }

    pub fn clock_id(&self) -> u8 {
        self.config.clock_source.id()
    }

    /// `'a'`, `'b'`, `'*'`, or blank when off.
    pub fn clock_label(&self) -> char {
        self.config.clock_label()
    }

    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Starts as line A and survives `reinit`.
    pub fn last_driving_source(&self) -> ClockLine {
        self.last_driver
    }

    pub fn output_state(&self) -> bool {
        self.output.is_high()
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn display(&self) -> ChannelDisplay {
        ChannelDisplay {
            mode_name: self.mode_name(),
            mode_short: self.mode_short_name(),
            parameter: self.parameter(),
            clock_label: self.clock_label(),
            output: self.output_state(),
        }
    }

    // -- internals -----------------------------------------------------------

    fn pass_through(&mut self, line: ClockLine, prev: bool) -> bool {
        self.drive(line, false);
        prev
    }

    fn coin_toss<R: RandomSource + ?Sized>(&self, rng: &mut R) -> bool {
        rng.draw() <= self.config.probability
    }

    /// Count one edge; true when the divided clock fires.
    fn advance_counter(&mut self) -> bool {
        self.counter = rmx_types::DivisionTable::advance(self.counter, self.config.division_index);
        self.counter == 0
    }

    fn rewrap_counter(&mut self) {
        self.counter %= self.config.divisor();
    }

    fn drive(&mut self, line: ClockLine, high: bool) {
        self.last_driver = line;
        self.output.write(high);
    }

    fn toggle(&mut self, line: ClockLine) {
        let level = !self.output.is_high();
        self.drive(line, level);
    }
}

fn normalize(config: ChannelConfig) -> ChannelConfig {
    ChannelConfig::new(
        config.mode,
        config.probability,
        config.clock_source,
        config.division_index,
    )
}
