//! jp-motion: Spin animation for the jackpot strip
//!
//! - Easing curves for the decelerating scroll
//! - Timing profiles (spin duration, reveal delay, poll interval)
//! - `SpinAnimator`: frame-driven scheduler that scrolls a safe window of
//!   the strip to an exact target distance
//!
//! Time is passed in explicitly (milliseconds from any monotonic origin),
//! so the animator is driven the same way by a browser frame callback, a
//! native render loop, or a test.

pub mod curve;
pub mod scheduler;
pub mod timing;

pub use curve::EaseCurve;
pub use scheduler::{AnimationHandle, FrameEvent, FrameOutput, SpinAnimator, SpinPhase, SpinPlan};
pub use timing::{SpinTiming, TimingProfile};
