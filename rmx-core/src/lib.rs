//! # rmx-core
//!
//! Edge-driven engine for the RMX six-output trigger/gate processor. Two clock
//! lines (A and B) feed a fixed chain of channels; on every rising or falling
//! edge each channel decides, according to its mode, whether its output goes
//! high, goes low, toggles, divides the clock, or follows what the channel
//! before it just produced.
//!
//! ## Quick Start
//!
//! ```rust
//! use rmx_core::chain::ChainDispatcher;
//! use rmx_core::output::LatchOutput;
//! use rmx_core::random::Lcg;
//! use rmx_types::{ChainConfig, ClockLine};
//!
//! let config = ChainConfig::default();
//! let mut chain = ChainDispatcher::from_config(&config, |_| LatchOutput::new(), Lcg::new(1));
//!
//! // The firmware loop detects edges and forwards each one exactly once
//! chain.on_rising_edge(ClockLine::A);
//! chain.on_falling_edge(ClockLine::A);
//! assert_eq!(chain.outputs(), vec![false; 6]);
//! ```
//!
//! ## Module Overview
//!
//! - [`engine`]: `ChannelEngine`, the per-channel state machine
//! - [`chain`]: `ChainDispatcher`, threads each edge through the channels in order
//! - [`random`]: `RandomSource` trait, seeded `Lcg`, and `ScriptedRandom` for tests
//! - [`output`]: `OutputDriver` trait and the in-memory `LatchOutput`
//! - [`config`]: TOML configuration loading (embedded factory patch + user override)

pub mod chain;
pub mod config;
pub mod engine;
pub mod output;
pub mod random;
