//! Hop -- headless host for the platformer simulation core.
//!
//! The binary plays a scripted input replay against a level, one display frame
//! per replay frame, using the same frame loop a windowed host would:
//!
//!   1. fold the frame's held controls into `InputState`
//!   2. derive activation (start/restart) from key edges
//!   3. clamp the frame delta, tick the session (frozen unless playing)
//!   4. push the HUD tuple, trace the render view
//!
//! Usage: `hop_game [--config PATH] [--level PATH] [--replay PATH]`

mod level_file;
mod replay;
mod runner;

use std::path::{Path, PathBuf};

use hop_core::config::GameConfig;
use hop_core::level::{LevelGrid, WORLD_1_1};
use hop_core::session::GameSession;
use level_file::load_level_from_path;
use replay::load_script_from_path;
use runner::{FrameRunner, HudLog};

const CONFIG_PATH: &str = "assets/config/game.json";
const LEVEL_PATH: &str = "assets/levels/world_1_1.json";
const REPLAY_PATH: &str = "assets/replays/demo_run.json";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config: Option<PathBuf>,
    level: Option<PathBuf>,
    replay: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        let slot = match flag.as_str() {
            "--config" => &mut parsed.config,
            "--level" => &mut parsed.level,
            "--replay" => &mut parsed.replay,
            other => return Err(format!("Unknown argument '{other}'")),
        };
        let value = args
            .next()
            .ok_or_else(|| format!("Missing value for {flag}"))?;
        *slot = Some(PathBuf::from(value));
    }
    Ok(parsed)
}

/// Reads the config; the default path may be absent, an explicit one may not.
fn load_config(explicit: Option<&Path>) -> Result<GameConfig, String> {
    let path = explicit.unwrap_or(Path::new(CONFIG_PATH));
    if explicit.is_none() && !path.exists() {
        log::info!("No config at '{}', using built-in defaults", path.display());
        return Ok(GameConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let config =
        GameConfig::from_json_str(&raw).map_err(|e| format!("{e} ({})", path.display()))?;
    log::info!("Config loaded from '{}'", path.display());
    Ok(config)
}

fn build_session(
    explicit_level: Option<&Path>,
    mut config: GameConfig,
) -> Result<GameSession, String> {
    let path = explicit_level.unwrap_or(Path::new(LEVEL_PATH));
    if explicit_level.is_none() && !path.exists() {
        log::warn!(
            "Level '{}' was not found, falling back to the built-in world 1-1",
            path.display()
        );
        let grid = LevelGrid::from_rows(WORLD_1_1, config.physics.tile_size)?;
        return Ok(GameSession::new(grid, config));
    }

    let level = load_level_from_path(path, &config.physics)?;
    if let Some(spawn) = level.spawn {
        config.rules.spawn_col = spawn.col;
        config.rules.spawn_row = spawn.row;
    }
    log::info!(
        "Level loaded: {} ({}) {}x{} tiles, {} coins",
        level.level_id,
        level.version,
        level.grid.cols(),
        level.grid.rows(),
        level.grid.coin_spawns().count()
    );
    Ok(GameSession::new(level.grid, config))
}

fn run(args: CliArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let session = build_session(args.level.as_deref(), config)?;

    let script_path = args.replay.unwrap_or_else(|| PathBuf::from(REPLAY_PATH));
    let script = load_script_from_path(&script_path)?;
    log::info!(
        "Replaying {} frames from '{}' at {} fps",
        script.total_frames(),
        script_path.display(),
        script.fps
    );

    let mut runner = FrameRunner::new(session);
    let mut hud = HudLog::default();
    runner.session().publish_hud(&mut hud);
    for (frame, (now, controls)) in script.timeline().enumerate() {
        for event in runner.frame(controls, now, &mut hud) {
            log::debug!("frame {frame}: {event:?}");
        }
    }

    let session = runner.session();
    let player = session.player();
    log::info!(
        "Run finished after {} frames: status={} coins={} lives={} player=({:.2}, {:.2}) coins_left={}",
        runner.clock().frame_count,
        session.status(),
        session.coins(),
        session.lives(),
        player.x,
        player.y,
        session.collectables().active_count()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Hop starting...");

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    if let Err(err) = result {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_args_accepts_all_flags() {
        let parsed = parse_args(args(&[
            "--level",
            "a.json",
            "--replay",
            "b.json",
            "--config",
            "c.json",
        ]))
        .expect("flags should parse");
        assert_eq!(parsed.level, Some(PathBuf::from("a.json")));
        assert_eq!(parsed.replay, Some(PathBuf::from("b.json")));
        assert_eq!(parsed.config, Some(PathBuf::from("c.json")));
    }

    #[test]
    fn parse_args_rejects_unknown_and_dangling_flags() {
        assert!(parse_args(args(&["--fast"])).is_err());
        let err = parse_args(args(&["--level"])).expect_err("missing value");
        assert!(err.contains("Missing value for --level"));
        assert_eq!(parse_args(Vec::new()), Ok(CliArgs::default()));
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/config/game.json");
        let config = load_config(Some(path.as_path())).expect("shipped config should load");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let path = std::env::temp_dir().join("hop_definitely_missing_config.json");
        assert!(load_config(Some(path.as_path())).is_err());
    }

    #[test]
    fn explicit_missing_level_is_an_error() {
        let path = std::env::temp_dir().join("hop_definitely_missing_level.json");
        assert!(build_session(Some(path.as_path()), GameConfig::default()).is_err());
    }
}
