//! Chain dispatcher: threads each edge through the channels in order.

use rmx_types::{
    ChainAction, ChainConfig, ChainSeed, ChannelDisplay, ChannelId, ClockEvent, ClockLine,
};

use crate::engine::ChannelEngine;
use crate::output::OutputDriver;
use crate::random::RandomSource;

/// Ordered channels sharing one random source.
///
/// Channel 0 receives the chain seed as its `prev`; every later channel
/// receives what its predecessor returned for the same edge. Each physical
/// edge must be delivered exactly once: a repeated edge advances division
/// counters and draws coin tosses a second time.
pub struct ChainDispatcher<O, R> {
    channels: Vec<ChannelEngine<O>>,
    rng: R,
    seed: ChainSeed,
}

impl<O: OutputDriver, R: RandomSource> ChainDispatcher<O, R> {
    pub fn new(channels: Vec<ChannelEngine<O>>, rng: R) -> Self {
        Self {
            channels,
            rng,
            seed: ChainSeed::default(),
        }
    }

    /// Build one engine per configured channel, asking `make_output` for
    /// each channel's driver.
    pub fn from_config(
        config: &ChainConfig,
        mut make_output: impl FnMut(ChannelId) -> O,
        rng: R,
    ) -> Self {
        let channels = config
            .channels
            .iter()
            .enumerate()
            .map(|(i, cfg)| ChannelEngine::new(make_output(ChannelId::new(i)), *cfg))
            .collect();
        Self {
            channels,
            rng,
            seed: config.seed,
        }
    }

    pub fn with_seed(mut self, seed: ChainSeed) -> Self {
        self.seed = seed;
        self
    }

    pub fn seed(&self) -> ChainSeed {
        self.seed
    }

    pub fn set_seed(&mut self, seed: ChainSeed) {
        self.seed = seed;
    }

    /// Run one edge through the whole chain. Returns the last channel's
    /// result (the seed for an empty chain).
    pub fn on_edge(&mut self, event: ClockEvent) -> bool {
        let mut prev = self.seed.value();
        for (i, channel) in self.channels.iter_mut().enumerate() {
            let next = channel.on_edge(event, prev, &mut self.rng);
            log::trace!(
                target: "chain",
                "{} ch{} {} prev={} -> {}",
                event,
                i + 1,
                channel.mode_short_name(),
                prev,
                next
            );
            prev = next;
        }
        prev
    }

    pub fn on_rising_edge(&mut self, line: ClockLine) -> bool {
        self.on_edge(ClockEvent::rising(line))
    }

    pub fn on_falling_edge(&mut self, line: ClockLine) -> bool {
        self.on_edge(ClockEvent::falling(line))
    }

    /// Route a configuration action. Returns false when the channel does not exist.
    pub fn apply(&mut self, action: &ChainAction) -> bool {
        match self.channels.get_mut(action.channel.get()) {
            Some(channel) => {
                channel.apply(&action.action);
                true
            }
            None => {
                log::debug!(target: "chain", "action for missing channel {}", action.channel);
                false
            }
        }
    }

    pub fn reset_counters(&mut self) {
        for channel in &mut self.channels {
            channel.reset();
        }
    }

    /// Reconfigure in place from `config`. Channels beyond the current chain
    /// length are ignored; the chain length is fixed once built.
    pub fn reinit(&mut self, config: &ChainConfig) {
        self.seed = config.seed;
        for (channel, cfg) in self.channels.iter_mut().zip(&config.channels) {
            channel.reinit(*cfg);
        }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn channel(&self, id: ChannelId) -> Option<&ChannelEngine<O>> {
        self.channels.get(id.get())
    }

    pub fn channels(&self) -> &[ChannelEngine<O>] {
        &self.channels
    }

    pub fn outputs(&self) -> Vec<bool> {
        self.channels.iter().map(|c| c.output_state()).collect()
    }

    pub fn snapshot(&self) -> Vec<ChannelDisplay> {
        self.channels.iter().map(|c| c.display()).collect()
    }

    pub fn config(&self) -> ChainConfig {
        ChainConfig {
            seed: self.seed,
            channels: self.channels.iter().map(|c| *c.config()).collect(),
        }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
