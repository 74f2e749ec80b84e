#![allow(dead_code)]
//! Test harness utilities for rmx-core integration tests.

use rmx_core::chain::ChainDispatcher;
use rmx_core::output::LatchOutput;
use rmx_core::random::ScriptedRandom;
use rmx_types::{ChainConfig, ChannelConfig, ChannelMode, ClockEvent, ClockSource};

pub type TestChain = ChainDispatcher<LatchOutput, ScriptedRandom>;

/// Shorthand for a channel config.
pub fn ch(mode: ChannelMode, probability: u8, clock: ClockSource, div: u8) -> ChannelConfig {
    ChannelConfig::new(mode, probability, clock, div)
}

/// Build a chain of latch outputs with a scripted random source.
pub fn make_chain(channels: Vec<ChannelConfig>, draws: Vec<u8>) -> TestChain {
    ChainDispatcher::from_config(
        &ChainConfig::new(channels),
        |_| LatchOutput::new(),
        ScriptedRandom::new(draws),
    )
}

/// Feed a compact edge script ("A+ A- B+ ...") and collect the outputs after each edge.
pub fn run_script(chain: &mut TestChain, script: &str) -> Vec<Vec<bool>> {
    script
        .split_whitespace()
        .map(|tok| {
            let event = ClockEvent::parse(tok).unwrap_or_else(|| panic!("bad edge token {}", tok));
            chain.on_edge(event);
            chain.outputs()
        })
        .collect()
}

/// Count high pulses per channel.
pub fn pulses(chain: &TestChain) -> Vec<u32> {
    chain.channels().iter().map(|c| c.output().pulses()).collect()
}
