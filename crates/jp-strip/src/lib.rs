//! # jp-strip: Weighted jackpot tile strip
//!
//! Turns a small list of weighted participants into the long horizontal strip
//! the jackpot spin scrolls over, and works out where that strip has to stop.
//!
//! ## Pipeline
//!
//! ```text
//! participants + round id
//!     │
//!     ├── build_tiles()      weighted expansion + seeded Fisher–Yates
//!     │
//!     ├── locate_target()    winner-owned tile far enough into the strip
//!     │
//!     ├── StripGeometry      pixel distance that centers it under the marker
//!     │
//!     └── SafeWindow         bounded, wrap-safe rendering window
//! ```
//!
//! Everything here is a pure function of its inputs. The same participants
//! and round id always yield the same strip, so re-renders and caches agree.

pub mod cache;
pub mod error;
pub mod geometry;
pub mod rng;
pub mod target;
pub mod tiles;

pub use cache::*;
pub use error::*;
pub use geometry::*;
pub use rng::*;
pub use target::*;
pub use tiles::*;
