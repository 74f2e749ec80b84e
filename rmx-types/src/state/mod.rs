pub mod channel;
pub mod clock;
pub mod division;
pub mod mode;

pub use channel::*;
pub use clock::*;
pub use division::{DivisionTable, DIVISIONS, MAX_DIVISION_INDEX};
pub use mode::ChannelMode;
