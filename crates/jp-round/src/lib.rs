//! jp-round: Jackpot round visualizer
//!
//! Glue between the polled round status and the spin animation:
//!
//! - `RoundWatcher`: edge detector that fires once per round on `complete`
//! - `FrozenRound`: snapshot of the participants and winner at that edge
//! - `PollScheduler`: status polling, suspended while a spin is on screen
//! - `VisualizerConfig`: geometry, timing and strip settings (JSON file)
//! - `JackpotVisualizer`: owns all of the above and drives one spin per round
//!
//! Single-threaded and cooperative. The host calls `on_status` with each
//! polled payload and `on_frame` once per rendered frame.

pub mod config;
pub mod error;
pub mod poll;
pub mod snapshot;
pub mod state;
pub mod visualizer;

pub use config::{StripSettings, VisualizerConfig};
pub use error::{VisualizerError, VisualizerResult};
pub use poll::PollScheduler;
pub use snapshot::FrozenRound;
pub use state::{RoundWatcher, round_key};
pub use visualizer::{
    JackpotVisualizer, SpinSummary, StripTile, VisualFrame, materialize, render_window,
};
