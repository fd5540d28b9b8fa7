//! Tunable constants for physics and game rules.
//!
//! World units are pixels at zoom 1 and the y axis grows downward, so a jump
//! launch is a negative vertical velocity. Every struct deserializes with
//! `#[serde(default)]`, so a config document only needs the fields it changes.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub tile_size: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_velocity: f32,
    /// Downward speed cap, numerically one second of gravity.
    pub max_fall_speed: f32,
    /// Upper bound on the delta fed into a single tick.
    pub max_dt: f32,
    /// Gap left between a resolved body and the face it touched.
    pub contact_epsilon: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            player_width: 26.0,
            player_height: 32.0,
            gravity: 1800.0,
            move_speed: 260.0,
            jump_velocity: -720.0,
            max_fall_speed: 1800.0,
            max_dt: 0.04,
            contact_epsilon: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub start_lives: u32,
    pub max_lives: u32,
    pub coins_per_bonus_life: u32,
    /// Half-extent of the square pickup test, in tiles.
    pub pickup_radius_tiles: f32,
    /// How far below the level floor the player's top edge must drop to die.
    pub fall_margin_tiles: f32,
    /// Distance from the right boundary that counts as reaching the goal.
    pub win_margin_tiles: f32,
    pub spawn_col: i32,
    pub spawn_row: i32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            start_lives: 3,
            max_lives: 9,
            coins_per_bonus_life: 5,
            pickup_radius_tiles: 0.6,
            fall_margin_tiles: 2.0,
            win_margin_tiles: 2.0,
            spawn_col: 2,
            spawn_row: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub rules: RulesConfig,
    pub viewport: ViewportConfig,
}

impl GameConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, String> {
        let config: GameConfig =
            serde_json::from_str(raw).map_err(|e| format!("Failed to parse config JSON: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        let p = &self.physics;
        let positive = [
            ("tile_size", p.tile_size),
            ("player_width", p.player_width),
            ("player_height", p.player_height),
            ("gravity", p.gravity),
            ("move_speed", p.move_speed),
            ("max_fall_speed", p.max_fall_speed),
            ("max_dt", p.max_dt),
            ("viewport.width", self.viewport.width),
            ("viewport.height", self.viewport.height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("Config validation failed: {name} must be > 0"));
            }
        }
        if !(p.jump_velocity.is_finite() && p.jump_velocity < 0.0) {
            return Err(
                "Config validation failed: jump_velocity must be < 0 (y grows downward)"
                    .to_string(),
            );
        }
        if !(p.contact_epsilon.is_finite() && p.contact_epsilon >= 0.0) {
            return Err("Config validation failed: contact_epsilon must be >= 0".to_string());
        }
        if p.contact_epsilon >= p.tile_size {
            return Err(
                "Config validation failed: contact_epsilon must be smaller than tile_size"
                    .to_string(),
            );
        }

        let r = &self.rules;
        if r.start_lives == 0 {
            return Err("Config validation failed: start_lives must be > 0".to_string());
        }
        if r.max_lives < r.start_lives {
            return Err("Config validation failed: max_lives must be >= start_lives".to_string());
        }
        if r.coins_per_bonus_life == 0 {
            return Err("Config validation failed: coins_per_bonus_life must be > 0".to_string());
        }
        if !(r.pickup_radius_tiles.is_finite() && r.pickup_radius_tiles > 0.0) {
            return Err("Config validation failed: pickup_radius_tiles must be > 0".to_string());
        }
        let margins = [
            ("fall_margin_tiles", r.fall_margin_tiles),
            ("win_margin_tiles", r.win_margin_tiles),
        ];
        for (name, value) in margins {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("Config validation failed: {name} must be >= 0"));
            }
        }
        if r.spawn_col < 0 || r.spawn_row < 0 {
            return Err(format!(
                "Config validation failed: spawn cell ({}, {}) must not be negative",
                r.spawn_col, r.spawn_row
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config = GameConfig::from_json_str(r#"{ "physics": { "move_speed": 300.0 } }"#)
            .expect("partial config should parse");
        assert_eq!(config.physics.move_speed, 300.0);
        assert_eq!(config.physics.gravity, 1800.0);
        assert_eq!(config.rules, RulesConfig::default());
    }

    #[test]
    fn rejects_upward_gravity_and_positive_jump() {
        let err = GameConfig::from_json_str(r#"{ "physics": { "gravity": -10.0 } }"#)
            .expect_err("negative gravity should fail");
        assert!(err.contains("gravity"));

        let err = GameConfig::from_json_str(r#"{ "physics": { "jump_velocity": 500.0 } }"#)
            .expect_err("downward jump should fail");
        assert!(err.contains("jump_velocity"));
    }

    #[test]
    fn rejects_inconsistent_lives() {
        let err = GameConfig::from_json_str(r#"{ "rules": { "start_lives": 5, "max_lives": 4 } }"#)
            .expect_err("max below start should fail");
        assert!(err.contains("max_lives"));
    }

    #[test]
    fn rejects_negative_or_nan_margins() {
        let err = GameConfig::from_json_str(r#"{ "rules": { "win_margin_tiles": -100.0 } }"#)
            .expect_err("negative win margin should fail");
        assert!(err.contains("win_margin_tiles"));

        let err = GameConfig::from_json_str(r#"{ "rules": { "fall_margin_tiles": -50.0 } }"#)
            .expect_err("negative fall margin should fail");
        assert!(err.contains("fall_margin_tiles"));

        let mut config = GameConfig::default();
        config.rules.win_margin_tiles = f32::NAN;
        assert!(config.validate().is_err());

        config.rules.win_margin_tiles = 0.0;
        config.rules.fall_margin_tiles = 0.0;
        assert!(config.validate().is_ok(), "zero margins are allowed");
    }

    #[test]
    fn rejects_negative_spawn_cell() {
        let err = GameConfig::from_json_str(r#"{ "rules": { "spawn_col": -1 } }"#)
            .expect_err("negative spawn column should fail");
        assert!(err.contains("spawn cell"));

        let err = GameConfig::from_json_str(r#"{ "rules": { "spawn_row": -3 } }"#)
            .expect_err("negative spawn row should fail");
        assert!(err.contains("spawn cell"));
    }

    #[test]
    fn rejects_contact_epsilon_as_large_as_a_tile() {
        let err = GameConfig::from_json_str(
            r#"{ "physics": { "tile_size": 16.0, "contact_epsilon": 16.0 } }"#,
        )
        .expect_err("epsilon equal to tile should fail");
        assert!(err.contains("contact_epsilon"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = GameConfig::from_json_str("{ physics: }").expect_err("bad json");
        assert!(err.contains("Failed to parse config JSON"));
    }
}
