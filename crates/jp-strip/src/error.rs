//! Strip errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StripError {
    /// The authoritative winner owns no tile. The snapshot and the payload
    /// disagree; animating anything would show the wrong winner.
    #[error("Winner index {winner_index} owns none of the {tile_count} tiles")]
    WinnerNotInStrip {
        winner_index: usize,
        tile_count: usize,
    },

    #[error("Strip has no tiles")]
    EmptyStrip,

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

pub type StripResult<T> = Result<T, StripError>;
