use thiserror::Error;

use crate::types::Coord;

/// Errors raised while building snapshots or configuring the engine.
///
/// Move generation itself never fails; these cover the inputs around it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("board size {size} is too small: at least 3 is required")]
    BoardTooSmall { size: usize },

    #[error("board size {size} needs more than 26 column letters")]
    BoardTooLarge { size: usize },

    #[error("expected {expected} calibration corners, found {found}")]
    CornerCountMismatch { expected: usize, found: usize },

    #[error("corner buffer has odd length {len}: expected x,y pairs")]
    OddCoordinateBuffer { len: usize },

    #[error("no field {coord} on this board")]
    UnknownField { coord: Coord },

    #[error("malformed field name: {text:?}")]
    InvalidCoord { text: String },

    #[error("color range for {player} has lower bound above upper bound in channel {channel}")]
    InvertedColorRange {
        player: &'static str,
        channel: &'static str,
    },

    #[error("radius range is inverted: min {min} > max {max}")]
    InvertedRadius { min: u32, max: u32 },

    #[error("minimum piece distance must be positive, got {distance}")]
    InvalidDistance { distance: f64 },
}

pub type EngineResult<T> = Result<T, EngineError>;
