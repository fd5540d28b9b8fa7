//! Game lifecycle and per-tick orchestration.
//!
//! [`GameSession`] owns every piece of mutable simulation state: the player
//! body, the collectable set and the session counters. Nothing else mutates
//! them. Each tick runs, in order:
//!
//!   1. motion (horizontal pass, vertical pass)
//!   2. coin pickup against the collectable set
//!   3. fall check (soft respawn or game over)
//!   4. goal check
//!
//! While the status is anything other than [`GameStatus::Playing`] a tick is a
//! no-op; the host keeps rendering the frozen state. Leaving `Ready`, `Won` or
//! `Lost` happens only through [`GameSession::activate`], which the host calls
//! when it sees an activation input.
//!
//! Every change is reported back as a list of [`GameEvent`]s. The HUD tuple is
//! pushed through [`HudSink`]; sinks are expected to drop duplicates.

use glam::Vec2;

use crate::camera::Camera2D;
use crate::collectables::CollectableRegistry;
use crate::config::GameConfig;
use crate::controller::PlayerBody;
use crate::input::InputSnapshot;
use crate::level::LevelGrid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    #[default]
    Ready,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What the presentation layer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudState {
    pub coins: u32,
    pub lives: u32,
    pub status: GameStatus,
}

pub trait HudSink {
    fn publish(&mut self, hud: HudState);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    CoinCollected { index: usize, coins: u32 },
    LifeGained { lives: u32 },
    LifeLost { lives: u32 },
    Respawned,
    Won,
    Lost,
}

pub struct GameSession {
    config: GameConfig,
    grid: LevelGrid,
    collectables: CollectableRegistry,
    player: PlayerBody,
    spawn: Vec2,
    coins: u32,
    lives: u32,
    status: GameStatus,
}

impl GameSession {
    /// Builds a session in `Ready`, with the spawn point taken from the rules.
    pub fn new(grid: LevelGrid, config: GameConfig) -> Self {
        let tile = grid.tile_size();
        let spawn = Vec2::new(
            config.rules.spawn_col as f32 * tile,
            config.rules.spawn_row as f32 * tile,
        );
        Self::with_spawn(grid, config, spawn)
    }

    /// Builds a session in `Ready` with an explicit world-space spawn point
    /// (top-left of the player box).
    pub fn with_spawn(grid: LevelGrid, config: GameConfig, spawn: Vec2) -> Self {
        let physics = config.physics;
        let collectables = CollectableRegistry::from_grid(&grid);
        let player = PlayerBody::new(
            spawn.x,
            spawn.y,
            physics.player_width,
            physics.player_height,
        );
        let mut session = Self {
            config,
            grid,
            collectables,
            player,
            spawn,
            coins: 0,
            lives: config.rules.start_lives,
            status: GameStatus::Ready,
        };
        session.enter_menu(GameStatus::Ready);
        session
    }

    /// Starts or restarts play. Does nothing while already playing.
    pub fn activate(&mut self) -> Vec<GameEvent> {
        if self.status == GameStatus::Playing {
            return Vec::new();
        }
        self.reset_level();
        self.coins = 0;
        self.lives = self.config.rules.start_lives;
        self.status = GameStatus::Playing;
        log::info!(
            "Session started: lives={}, coins available={}",
            self.lives,
            self.collectables.len()
        );
        vec![GameEvent::Started]
    }

    /// Advances the simulation by one frame. Frozen unless playing.
    pub fn tick(&mut self, input: InputSnapshot, dt: f32) -> Vec<GameEvent> {
        if self.status != GameStatus::Playing {
            return Vec::new();
        }

        let mut events = Vec::new();
        self.player.step(input, dt, &self.grid, &self.config.physics);
        self.collect_coins(&mut events);
        self.check_fall(&mut events);
        if self.status == GameStatus::Playing {
            self.check_goal(&mut events);
        }
        events
    }

    pub fn publish_hud(&self, sink: &mut impl HudSink) {
        sink.publish(self.hud());
    }

    pub fn hud(&self) -> HudState {
        HudState {
            coins: self.coins,
            lives: self.lives,
            status: self.status,
        }
    }

    /// Camera centred on the player for the configured viewport.
    pub fn camera(&self) -> Camera2D {
        let viewport = self.config.viewport;
        let mut camera = Camera2D::new(viewport.width, viewport.height);
        camera.follow(
            self.player.center(),
            Vec2::new(self.grid.width(), self.grid.height()),
        );
        camera
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    pub fn grid(&self) -> &LevelGrid {
        &self.grid
    }

    pub fn collectables(&self) -> &CollectableRegistry {
        &self.collectables
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    /// World y the player's top edge must pass to count as fallen.
    pub fn fall_threshold(&self) -> f32 {
        self.grid.height() + self.config.rules.fall_margin_tiles * self.grid.tile_size()
    }

    /// World x the player's right edge must reach to win.
    pub fn goal_line(&self) -> f32 {
        self.grid.width() - self.config.rules.win_margin_tiles * self.grid.tile_size()
    }

    fn collect_coins(&mut self, events: &mut Vec<GameEvent>) {
        let rules = self.config.rules;
        let radius = rules.pickup_radius_tiles * self.grid.tile_size();
        for pickup in self.collectables.collect_at(self.player.center(), radius) {
            self.coins += 1;
            log::debug!("Coin {} collected ({} total)", pickup.index, self.coins);
            events.push(GameEvent::CoinCollected {
                index: pickup.index,
                coins: self.coins,
            });
            // A zero interval disables the bonus.
            let bonus_due = self.coins.checked_rem(rules.coins_per_bonus_life) == Some(0);
            if bonus_due && self.lives < rules.max_lives {
                self.lives += 1;
                log::debug!("Bonus life at {} coins: lives={}", self.coins, self.lives);
                events.push(GameEvent::LifeGained { lives: self.lives });
            }
        }
    }

    fn check_fall(&mut self, events: &mut Vec<GameEvent>) {
        if self.player.y <= self.fall_threshold() {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        events.push(GameEvent::LifeLost { lives: self.lives });
        if self.lives == 0 {
            log::info!("Out of lives with {} coins", self.coins);
            self.enter_menu(GameStatus::Lost);
            events.push(GameEvent::Lost);
        } else {
            log::debug!("Fell out of the level, respawning (lives={})", self.lives);
            self.player.reset_to(self.spawn.x, self.spawn.y);
            events.push(GameEvent::Respawned);
        }
    }

    fn check_goal(&mut self, events: &mut Vec<GameEvent>) {
        if self.player.right() >= self.goal_line() {
            log::info!(
                "Goal reached with {} coins and {} lives",
                self.coins,
                self.lives
            );
            self.enter_menu(GameStatus::Won);
            events.push(GameEvent::Won);
        }
    }

    /// Puts the player back at spawn with a fresh coin set.
    fn reset_level(&mut self) {
        self.player.reset_to(self.spawn.x, self.spawn.y);
        self.collectables.rebuild(&self.grid);
    }

    /// Non-playing states show the level reset behind the menu. `Won` keeps
    /// the final tally on the HUD; `Lost` shows empty counters.
    fn enter_menu(&mut self, status: GameStatus) {
        self.reset_level();
        match status {
            GameStatus::Ready => {
                self.coins = 0;
                self.lives = self.config.rules.start_lives;
            }
            GameStatus::Lost => {
                self.coins = 0;
                self.lives = 0;
            }
            GameStatus::Won | GameStatus::Playing => {}
        }
        self.status = status;
    }
}
