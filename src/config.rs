//! Tunable gameplay constants.
//!
//! Everything has a sane `Default`; with the `serde` feature the struct can be
//! (de)serialized and missing fields fall back to those defaults.

use crate::error::GameError;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Hit points the player starts with.
    pub starting_hp: u32,
    /// Player flight speed in pixels per second.
    pub player_speed: f64,
    /// Correct answers needed to beat one boss.
    pub answers_to_win: u32,
    /// Points credited to the score per correct answer.
    pub points_per_answer: u32,
    /// Inclusive VisBuck reward range drawn once per encounter.
    pub money_min: u32,
    pub money_max: u32,
    /// Pause before the next boss appears and before the death hand-off.
    pub transition_delay_ms: f64,
    /// Volume for every sound effect (0.0 ..= 1.0).
    pub sfx_volume: f64,
    /// Canvas size used when the viewport reports nothing usable.
    pub fallback_width: u32,
    pub fallback_height: u32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_hp: 3,
            player_speed: 360.0,
            answers_to_win: 3,
            points_per_answer: 100,
            money_min: 10,
            money_max: 25,
            transition_delay_ms: 5_000.0,
            sfx_volume: 0.5,
            fallback_width: 1280,
            fallback_height: 720,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.starting_hp == 0 {
            return Err(GameError::InvalidConfig("starting_hp must be at least 1".into()));
        }
        if self.answers_to_win == 0 {
            return Err(GameError::InvalidConfig("answers_to_win must be at least 1".into()));
        }
        if self.points_per_answer.checked_mul(self.answers_to_win).is_none() {
            return Err(GameError::InvalidConfig(format!(
                "points_per_answer ({}) x answers_to_win ({}) overflows one encounter's points",
                self.points_per_answer, self.answers_to_win
            )));
        }
        if self.money_min > self.money_max {
            return Err(GameError::InvalidConfig(format!(
                "money_min ({}) exceeds money_max ({})",
                self.money_min, self.money_max
            )));
        }
        if !(0.0..=1.0).contains(&self.sfx_volume) {
            return Err(GameError::InvalidConfig(format!(
                "sfx_volume {} outside 0.0..=1.0",
                self.sfx_volume
            )));
        }
        if !self.player_speed.is_finite() || self.player_speed < 0.0 {
            return Err(GameError::InvalidConfig("player_speed must be finite and >= 0".into()));
        }
        if !self.transition_delay_ms.is_finite() || self.transition_delay_ms < 0.0 {
            return Err(GameError::InvalidConfig(
                "transition_delay_ms must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON config and validate it.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let cfg: GameConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
