//! Hop simulation core: tile grid, collision, motion and the game lifecycle.
//!
//! Everything in this crate is single-threaded and frame-driven. A host feeds
//! one [`input::InputSnapshot`] and one clamped delta per frame into
//! [`session::GameSession::tick`]; renderers and HUDs only read the session
//! between ticks.

pub mod camera;
pub mod collectables;
pub mod collision;
pub mod config;
pub mod controller;
pub mod input;
pub mod level;
pub mod session;
pub mod time;

pub use camera::Camera2D;
pub use collectables::{Collectable, CollectableRegistry, Pickup};
pub use collision::{Aabb, Axis, AxisResolution, CollisionResolver};
pub use config::{GameConfig, PhysicsConfig, RulesConfig, ViewportConfig};
pub use controller::{PlayerBody, StepContacts};
pub use input::{Control, InputSnapshot, InputState, Key};
pub use level::{CellKind, LevelGrid};
pub use session::{GameEvent, GameSession, GameStatus, HudSink, HudState};
pub use time::FrameClock;

pub use glam::Vec2;
