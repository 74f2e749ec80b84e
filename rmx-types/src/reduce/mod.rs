//! Pure state-mutation reducers for channel configuration.
//!
//! Reducers mutate `ChannelConfig` only. Runtime state (division counter,
//! output level) belongs to the engine in rmx-core, which inspects the
//! returned [`Reduced`] to decide what else to touch.

mod channel;

pub use channel::{reduce_channel, Reduced};
