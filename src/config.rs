use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

pub const DEFAULT_BOARD_SIZE: usize = 10;
const MIN_BOARD_SIZE: usize = 3;
const MAX_COLUMNS: usize = 26;

/// A color in OpenCV channel order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    pub const fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }
}

/// Inclusive color window a piece must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    pub lower: Bgr,
    pub upper: Bgr,
}

impl ColorRange {
    fn validate(&self, player: &'static str) -> EngineResult<()> {
        let channels = [
            ("b", self.lower.b, self.upper.b),
            ("g", self.lower.g, self.upper.g),
            ("r", self.lower.r, self.upper.r),
        ];
        for (channel, lower, upper) in channels {
            if lower > upper {
                return Err(EngineError::InvertedColorRange { player, channel });
            }
        }
        Ok(())
    }
}

/// Piece-detection thresholds.
///
/// The engine stores these for the upstream owner tagging; move generation
/// never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub player_a: ColorRange,
    pub player_b: ColorRange,
    /// Minimum distance in pixels between two detected piece centers.
    pub min_distance: f64,
    pub radius_min: u32,
    pub radius_max: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            player_a: ColorRange {
                lower: Bgr::new(0, 0, 150),
                upper: Bgr::new(90, 90, 255),
            },
            player_b: ColorRange {
                lower: Bgr::new(150, 0, 0),
                upper: Bgr::new(255, 90, 90),
            },
            min_distance: 20.0,
            radius_min: 20,
            radius_max: 30,
        }
    }
}

impl DetectionConfig {
    pub fn validate(&self) -> EngineResult<()> {
        self.player_a.validate("player_a")?;
        self.player_b.validate("player_b")?;
        if self.radius_min > self.radius_max {
            return Err(EngineError::InvertedRadius {
                min: self.radius_min,
                max: self.radius_max,
            });
        }
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(EngineError::InvalidDistance {
                distance: self.min_distance,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveRules {
    /// When set, slides are dropped whenever any capture is available.
    pub mandatory_capture: bool,
}

/// Everything one engine instance is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Squares per side of the printed calibration pattern; the camera sees
    /// `(board_size - 1)^2` inner corners.
    pub board_size: usize,
    pub rules: MoveRules,
    pub detection: DetectionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            rules: MoveRules::default(),
            detection: DetectionConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        validate_board_size(self.board_size)?;
        self.detection.validate()
    }
}

/// Checks that `size` yields at least one square and no more columns than letters.
pub fn validate_board_size(size: usize) -> EngineResult<()> {
    if size < MIN_BOARD_SIZE {
        return Err(EngineError::BoardTooSmall { size });
    }
    if size - 2 > MAX_COLUMNS {
        return Err(EngineError::BoardTooLarge { size });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();

        assert_eq!(config.board_size, 10);
        assert!(!config.rules.mandatory_capture);
        assert_eq!(config.detection.radius_min, 20);
        assert_eq!(config.detection.radius_max, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn board_size_limits() {
        assert_eq!(
            validate_board_size(2),
            Err(EngineError::BoardTooSmall { size: 2 })
        );
        assert!(validate_board_size(3).is_ok());
        assert!(validate_board_size(28).is_ok());
        assert_eq!(
            validate_board_size(29),
            Err(EngineError::BoardTooLarge { size: 29 })
        );
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let mut config = EngineConfig::default();
        config.detection.player_b.lower.g = 200;

        assert_eq!(
            config.validate(),
            Err(EngineError::InvertedColorRange {
                player: "player_b",
                channel: "g",
            })
        );

        let mut config = EngineConfig::default();
        config.detection.radius_min = 40;

        assert_eq!(
            config.validate(),
            Err(EngineError::InvertedRadius { min: 40, max: 30 })
        );
    }

    #[test]
    fn non_positive_distance_is_rejected() {
        let mut config = EngineConfig::default();
        config.detection.min_distance = 0.0;
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidDistance { .. })
        ));

        config.detection.min_distance = f64::NAN;
        assert!(config.validate().is_err());
    }
}
