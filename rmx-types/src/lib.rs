//! # rmx-types
//!
//! Shared type definitions for the RMX trigger/gate chain.
//! This crate holds the plain data that rmx-core drives and rmx-sim prints:
//! clock lines and edges, the channel modes, the division table, per-channel
//! and chain configuration, and the pure configuration reducer.

pub mod action;
pub mod reduce;
pub mod state;

pub use action::*;

// Re-export all state types at crate root for convenience
pub use state::*;

/// Position of a channel within the chain (0-based).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ChannelId(usize);

impl ChannelId {
    pub fn new(idx: usize) -> Self {
        Self(idx)
    }
    pub fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Panel labels are 1-based
        write!(f, "{}", self.0 + 1)
    }
}
