//! Host-side frame loop: input decoding, clock, simulation and HUD plumbing.
//!
//! Two cadences are kept apart here. Rendering (here: a trace of what a
//! renderer would draw) runs every frame; the simulation tick runs every frame
//! too but the session ignores it unless it is playing. Activation is derived
//! from raw key edges before the tick, so the state machine never interprets
//! keys itself.

use hop_core::input::{InputSnapshot, InputState, Key};
use hop_core::session::{GameEvent, GameSession, GameStatus, HudSink, HudState};
use hop_core::time::FrameClock;

pub struct FrameRunner {
    session: GameSession,
    input: InputState,
    clock: FrameClock,
}

impl FrameRunner {
    pub fn new(session: GameSession) -> Self {
        let clock = FrameClock::new(session.config().physics.max_dt);
        Self {
            session,
            input: InputState::new(),
            clock,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Runs one display frame with `held` as the physical control state at
    /// time `now_secs`.
    pub fn frame(
        &mut self,
        held: InputSnapshot,
        now_secs: f64,
        hud: &mut impl HudSink,
    ) -> Vec<GameEvent> {
        self.apply_held(held);

        let mut events = Vec::new();
        if self.input.activation() && self.session.status() != GameStatus::Playing {
            events.extend(self.session.activate());
            // The start press is consumed; the first playing frame is a zero step.
            self.clock.reset();
            self.input.release_all();
        }

        let dt = self.clock.tick(now_secs);
        events.extend(self.session.tick(self.input.snapshot(), dt));
        if !events.is_empty() {
            self.session.publish_hud(hud);
        }

        self.render();
        self.input.end_frame();
        events
    }

    fn apply_held(&mut self, held: InputSnapshot) {
        let controls = [
            (Key::Left, held.left),
            (Key::Right, held.right),
            (Key::Space, held.jump),
        ];
        for (key, down) in controls {
            match (down, self.input.is_held(key)) {
                (true, false) => self.input.key_down(key),
                (false, true) => self.input.key_up(key),
                _ => {}
            }
        }
    }

    fn render(&self) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        let camera = self.session.camera();
        let player = self.session.player();
        let (rows, cols) = camera.visible_cells(self.session.grid().tile_size());
        log::trace!(
            "frame {}: status={} player=({:.2}, {:.2}) v=({:.1}, {:.1}) grounded={} camera=({:.1}, {:.1}) rows={:?} cols={:?} coins_visible={}",
            self.clock.frame_count,
            self.session.status(),
            player.x,
            player.y,
            player.vx,
            player.vy,
            player.on_ground,
            camera.position.x,
            camera.position.y,
            rows,
            cols,
            self.session.collectables().active_count()
        );
    }
}

/// HUD sink that logs each distinct tuple once.
#[derive(Debug, Default)]
pub struct HudLog {
    last: Option<HudState>,
    pub updates: usize,
}

impl HudSink for HudLog {
    fn publish(&mut self, hud: HudState) {
        if self.last == Some(hud) {
            return;
        }
        log::info!(
            "HUD coins={:03} lives={} status={}",
            hud.coins,
            hud.lives,
            hud.status
        );
        self.last = Some(hud);
        self.updates += 1;
    }
}

impl HudLog {
    pub fn last(&self) -> Option<HudState> {
        self.last
    }
}
