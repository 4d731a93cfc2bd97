use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{BoardSizeError, board::GameSize, placement::Position};

/// Tunable game constants.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use minofall_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "width": 8 }"#).unwrap();
/// assert_eq!(config.width, 8);
/// assert_eq!(config.height, 20);
/// assert_eq!(config.spawn_origin().x, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Interval between automatic soft drops, in milliseconds.
    pub drop_interval_ms: u64,
    /// Where new pieces appear; `(width / 2, 0)` when unset.
    pub spawn: Option<Position>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let size = GameSize::default();
        Self {
            width: size.width,
            height: size.height,
            drop_interval_ms: 500,
            spawn: None,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("invalid board size")]
    BoardSize(BoardSizeError),
    #[display("drop interval must be at least 1 ms")]
    ZeroDropInterval,
    #[display("spawn origin ({}, {}) is outside the board", _0.x, _0.y)]
    SpawnOutsideBoard(#[error(not(source))] Position),
}

impl GameConfig {
    #[must_use]
    pub fn size(&self) -> GameSize {
        GameSize::new(self.width, self.height)
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.drop_interval_ms)
    }

    #[must_use]
    pub fn spawn_origin(&self) -> Position {
        self.spawn.unwrap_or_else(|| {
            let x = i32::try_from(self.width / 2).unwrap_or(i32::MAX);
            Position::new(x, 0)
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.size().validate().map_err(ConfigError::BoardSize)?;
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        if let Some(spawn) = self.spawn {
            let inside = |value: i32, len: usize| {
                usize::try_from(value).is_ok_and(|value| value < len)
            };
            if !inside(spawn.x, self.width) || !inside(spawn.y, self.height) {
                return Err(ConfigError::SpawnOutsideBoard(spawn));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.size(), GameSize::new(10, 20));
        assert_eq!(config.drop_interval(), Duration::from_millis(500));
        assert_eq!(config.spawn_origin(), Position::new(5, 0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_spawn_origin_follows_width() {
        let config = GameConfig {
            width: 7,
            ..GameConfig::default()
        };
        assert_eq!(config.spawn_origin(), Position::new(3, 0));

        let config = GameConfig {
            spawn: Some(Position::new(1, 2)),
            ..config
        };
        assert_eq!(config.spawn_origin(), Position::new(1, 2));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_width = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            zero_width.validate(),
            Err(ConfigError::BoardSize(BoardSizeError::Empty(_)))
        ));

        let zero_interval = GameConfig {
            drop_interval_ms: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            zero_interval.validate(),
            Err(ConfigError::ZeroDropInterval)
        ));
    }

    #[test]
    fn test_validate_rejects_spawn_outside_board() {
        for (x, y) in [(-1, 0), (10, 0), (0, -1), (0, 20)] {
            let config = GameConfig {
                spawn: Some(Position::new(x, y)),
                ..GameConfig::default()
            };
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::SpawnOutsideBoard(p)) if p == Position::new(x, y)
                ),
                "({x}, {y})"
            );
        }

        let corner = GameConfig {
            spawn: Some(Position::new(9, 19)),
            ..GameConfig::default()
        };
        assert!(corner.validate().is_ok());
    }

    #[test]
    fn test_board_size_error_is_reported_once() {
        use std::error::Error as _;

        let config = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("board must be at least 1x1, got 0x20"));
        assert!(!err.to_string().contains("0x20"), "{err}");
    }

    #[test]
    fn test_partial_json() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "height": 24, "spawn": { "x": 3, "y": 1 } }"#).unwrap();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 24);
        assert_eq!(config.drop_interval_ms, 500);
        assert_eq!(config.spawn_origin(), Position::new(3, 1));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_json::from_str::<GameConfig>(r#"{ "speed": 3 }"#).is_err());
    }
}
