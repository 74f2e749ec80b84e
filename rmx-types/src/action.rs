//! Configuration actions for channels in the chain.
//!
//! These mirror the panel controls: encoder turns map to the adjust and cycle
//! variants, the configuration file and bench harness use the set variants.

use crate::ChannelId;

/// Configuration change for a single channel. Integer arguments are clamped
/// when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelAction {
    /// Set mode by id (0-11)
    SetMode(u8),
    /// Next mode, wrapping
    CycleMode,
    /// Previous mode, wrapping
    CycleModeReverse,
    /// Set probability (0-100)
    SetProbability(u8),
    /// Set division index (0-18)
    SetDivisionIndex(u8),
    /// Set clock source by id (0-2)
    SetClockSource(u8),
    /// Next clock source, wrapping
    CycleClockSource,
    /// Step probability or division index depending on mode
    AdjustParameter(i16),
    /// Zero the division counter
    Reset,
}

/// A channel action addressed to a position in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainAction {
    pub channel: ChannelId,
    pub action: ChannelAction,
}

impl ChainAction {
    pub fn new(channel: ChannelId, action: ChannelAction) -> Self {
        Self { channel, action }
    }
}
