//! Match configuration.
//!
//! Hosts configure a match at creation time, either with the builder methods
//! or by loading a RON document. Missing fields fall back to the defaults
//! used by the live game.
//!
//! ```
//! use lane_ccg::core::MatchConfig;
//!
//! let config = MatchConfig::from_ron("(starting_hp: 30, lane_count: 4)").unwrap();
//! assert_eq!(config.starting_hp, 30);
//! assert_eq!(config.lane_count, 4);
//! assert_eq!(config.mana_cap, 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Player HP at match start.
    pub starting_hp: i32,

    /// Ceiling for max mana.
    pub mana_cap: i32,

    /// Lanes per row. Both rows always have the same length.
    pub lane_count: usize,

    /// Cards drawn by each side before the first turn.
    pub opening_hand: usize,

    /// Cards drawn at the start of every turn.
    pub cards_per_turn: usize,

    /// Lines kept in the on-screen action log.
    pub log_capacity: usize,

    /// Seed for deck shuffles.
    pub seed: u64,

    /// Shuffle decks on submission. Disabled only for scripted scenarios.
    pub shuffle_decks: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            starting_hp: 20,
            mana_cap: 10,
            lane_count: 5,
            opening_hand: 5,
            cards_per_turn: 1,
            log_capacity: 30,
            seed: 0,
            shuffle_decks: true,
        }
    }
}

impl MatchConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a RON document.
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no match can be played with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count == 0 {
            return Err(ConfigError::Invalid("lane_count must be at least 1".into()));
        }
        if self.mana_cap < 1 {
            return Err(ConfigError::Invalid("mana_cap must be at least 1".into()));
        }
        if self.starting_hp < 1 {
            return Err(ConfigError::Invalid("starting_hp must be positive".into()));
        }
        Ok(())
    }

    /// Set starting HP.
    #[must_use]
    pub fn with_starting_hp(mut self, hp: i32) -> Self {
        self.starting_hp = hp;
        self
    }

    /// Set the mana cap.
    #[must_use]
    pub fn with_mana_cap(mut self, cap: i32) -> Self {
        self.mana_cap = cap;
        self
    }

    /// Set lanes per row.
    #[must_use]
    pub fn with_lane_count(mut self, lanes: usize) -> Self {
        self.lane_count = lanes;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand(mut self, cards: usize) -> Self {
        self.opening_hand = cards;
        self
    }

    /// Set the action log capacity.
    #[must_use]
    pub fn with_log_capacity(mut self, lines: usize) -> Self {
        self.log_capacity = lines;
        self
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Keep decks in submission order.
    #[must_use]
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle_decks = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.starting_hp, 20);
        assert_eq!(config.mana_cap, 10);
        assert_eq!(config.opening_hand, 5);
        assert_eq!(config.cards_per_turn, 1);
        assert_eq!(config.log_capacity, 30);
        assert!(config.shuffle_decks);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = MatchConfig::new()
            .with_starting_hp(5)
            .with_mana_cap(3)
            .with_lane_count(2)
            .with_seed(9)
            .without_shuffle();

        assert_eq!(config.starting_hp, 5);
        assert_eq!(config.mana_cap, 3);
        assert_eq!(config.lane_count, 2);
        assert_eq!(config.seed, 9);
        assert!(!config.shuffle_decks);
    }

    #[test]
    fn test_from_ron_partial() {
        let config = MatchConfig::from_ron("(seed: 7, shuffle_decks: false)").unwrap();
        assert_eq!(config.seed, 7);
        assert!(!config.shuffle_decks);
        assert_eq!(config.lane_count, 5);
    }

    #[test]
    fn test_from_ron_rejects_zero_lanes() {
        let err = MatchConfig::from_ron("(lane_count: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_from_ron_syntax_error() {
        let err = MatchConfig::from_ron("(starting_hp: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
