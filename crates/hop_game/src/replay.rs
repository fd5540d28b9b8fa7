//! Scripted input runs.
//!
//! A script is a list of steps, each holding a set of controls for a number of
//! display frames:
//!
//! ```json
//! { "fps": 60, "steps": [ { "hold": "", "frames": 30 }, { "hold": "RJ", "frames": 4 } ] }
//! ```
//!
//! `hold` letters: `L` left, `R` right, `J` jump. An empty string is idle.

use std::path::Path;

use hop_core::input::InputSnapshot;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputScript {
    #[serde(default = "InputScript::default_fps")]
    pub fps: u32,
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptStep {
    #[serde(default)]
    pub hold: Hold,
    pub frames: u32,
}

/// Controls held during a step, parsed from its letter string when the script
/// is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Hold(pub InputSnapshot);

impl TryFrom<String> for Hold {
    type Error = String;

    fn try_from(letters: String) -> Result<Self, Self::Error> {
        letters
            .chars()
            .try_fold(InputSnapshot::IDLE, |mut snap, letter| {
                match letter.to_ascii_uppercase() {
                    'L' => snap.left = true,
                    'R' => snap.right = true,
                    'J' => snap.jump = true,
                    other => return Err(format!("unknown control '{other}'")),
                }
                Ok(snap)
            })
            .map(Hold)
    }
}

impl InputScript {
    const fn default_fps() -> u32 {
        60
    }

    pub fn frame_dt(&self) -> f64 {
        1.0 / f64::from(self.fps)
    }

    pub fn total_frames(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.frames)).sum()
    }

    /// One `(timestamp, controls)` pair per display frame, starting at t = 0.
    pub fn timeline(&self) -> impl Iterator<Item = (f64, InputSnapshot)> + '_ {
        let dt = self.frame_dt();
        self.steps
            .iter()
            .flat_map(|step| std::iter::repeat(step.hold.0).take(step.frames as usize))
            .enumerate()
            .map(move |(frame, controls)| (frame as f64 * dt, controls))
    }

    fn validate(&self) -> Result<(), String> {
        if self.fps == 0 || self.fps > 1000 {
            return Err(format!("fps must be in 1..=1000, got {}", self.fps));
        }
        if self.steps.is_empty() {
            return Err("script has no steps".to_string());
        }
        for (i, step) in self.steps.iter().enumerate() {
            if step.frames == 0 {
                return Err(format!("step {i} holds for zero frames"));
            }
        }
        Ok(())
    }
}

pub fn load_script_from_path(path: &Path) -> Result<InputScript, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let script: InputScript = serde_json::from_str(&raw)
        .map_err(|e| format!("Invalid input script {}: {e}", path.display()))?;
    script
        .validate()
        .map_err(|e| format!("Invalid input script {}: {e}", path.display()))?;
    log::debug!(
        "Input script '{}': {} steps, {} frames at {} fps",
        path.display(),
        script.steps.len(),
        script.total_frames(),
        script.fps
    );
    Ok(script)
}
