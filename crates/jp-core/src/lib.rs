//! jp-core: Shared types for the jackpot round visualizer
//!
//! Everything the visualizer reads from the round authority lives here:
//! the polled status payload, the participant records it carries, and the
//! cosmetic pattern catalog used to paint participant tiles.

mod error;
mod hash;
mod participant;
mod pattern;
mod status;

pub use error::*;
pub use hash::*;
pub use participant::*;
pub use pattern::*;
pub use status::*;
