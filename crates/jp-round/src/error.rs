//! Visualizer errors

use thiserror::Error;

use jp_strip::StripError;

/// Errors that stop a round from animating. The visualizer keeps the last
/// one as its visible error state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VisualizerError {
    #[error("Round {round} completed without a winner index")]
    MissingWinnerIndex { round: String },

    #[error("Winner index {winner_index} is out of range for {participant_count} participants")]
    WinnerOutOfRange {
        winner_index: usize,
        participant_count: usize,
    },

    #[error("Winner index {winner_index} points at {found}, but the reported winner is {expected}")]
    WinnerMismatch {
        winner_index: usize,
        expected: String,
        found: String,
    },

    #[error("Strip error: {0}")]
    Strip(#[from] StripError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl VisualizerError {
    /// Payload and snapshot disagree about who won
    pub fn is_desync(&self) -> bool {
        matches!(
            self,
            VisualizerError::WinnerOutOfRange { .. }
                | VisualizerError::WinnerMismatch { .. }
                | VisualizerError::Strip(StripError::WinnerNotInStrip { .. })
        )
    }
}

pub type VisualizerResult<T> = Result<T, VisualizerError>;
