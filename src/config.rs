//! Runtime configuration from environment variables.
//!
//! Every setting has a default and unparsable values fall back to it, so
//! loading configuration never fails.
//!
//! | Variable | Default |
//! |---|---|
//! | `TETRIS_SEED` | random |
//! | `TETRIS_LOG_PATH` | unset (no event log) |
//! | `TETRIS_CELL_WIDTH` | 2 (clamped to 1..=4) |
//! | `TETRIS_RESTART_ANYTIME` | false |

/// Game shell configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub log_path: Option<String>,
    /// Terminal columns per board cell
    pub cell_width: u16,
    /// Forward restart keys during play, not only after game over
    pub restart_anytime: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_path: None,
            cell_width: 2,
            restart_anytime: false,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("TETRIS_SEED").and_then(|s| s.trim().parse().ok());

        let log_path = lookup("TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let cell_width = lookup("TETRIS_CELL_WIDTH")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .map(|w| w.clamp(1, 4))
            .unwrap_or(defaults.cell_width);

        let restart_anytime = lookup("TETRIS_RESTART_ANYTIME")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(defaults.restart_anytime);

        Self {
            seed,
            log_path,
            cell_width,
            restart_anytime,
        }
    }

    /// Configured seed, or a fresh random one.
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> GameConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GameConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), GameConfig::default());
    }

    #[test]
    fn parses_all_variables() {
        let config = config_from(&[
            ("TETRIS_SEED", "42"),
            ("TETRIS_LOG_PATH", " /tmp/tetris.jsonl "),
            ("TETRIS_CELL_WIDTH", "3"),
            ("TETRIS_RESTART_ANYTIME", "TRUE"),
        ]);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_path.as_deref(), Some("/tmp/tetris.jsonl"));
        assert_eq!(config.cell_width, 3);
        assert!(config.restart_anytime);
        assert_eq!(config.seed_or_random(), 42);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = config_from(&[
            ("TETRIS_SEED", "not-a-number"),
            ("TETRIS_LOG_PATH", "   "),
            ("TETRIS_CELL_WIDTH", "wide"),
            ("TETRIS_RESTART_ANYTIME", "yes please"),
        ]);
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn cell_width_is_clamped() {
        assert_eq!(config_from(&[("TETRIS_CELL_WIDTH", "0")]).cell_width, 1);
        assert_eq!(config_from(&[("TETRIS_CELL_WIDTH", "9")]).cell_width, 4);
    }
}
