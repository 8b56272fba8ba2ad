use maze_core::input::Key;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub held: Vec<Key>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    /// Held-key sets, one per simulation step.
    pub fn expanded_inputs(&self) -> Vec<Vec<Key>> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(frame.held.clone());
            }
        }
        out
    }

    /// A short walk used when no replay file is given.
    pub fn builtin() -> Self {
        let frame = |held: &[Key], repeat| ReplayFrame {
            held: held.to_vec(),
            repeat,
        };
        Self {
            frames: vec![
                frame(&[Key::Right], 60),
                frame(&[Key::Right, Key::Down], 60),
                frame(&[Key::Down], 60),
                frame(&[Key::Left], 90),
                frame(&[Key::Up, Key::Left], 60),
                frame(&[Key::Up], 60),
            ],
        }
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{Generation, InputState, World, WorldConfig};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "maze_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "held": ["right"], "repeat": 3 },
                { "held": ["up", "left"] },
                { "repeat": 0 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 5);
        assert_eq!(expanded[0], vec![Key::Right]);
        assert_eq!(expanded[3], vec![Key::Up, Key::Left]);
        assert!(expanded[4].is_empty());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_empty_frames() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty replay should fail");
        assert!(err.contains("frames list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_unknown_key() {
        let path = temp_file_path("unknown");
        fs::write(&path, r#"{ "frames": [ { "held": ["jump"] } ] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("unknown key should fail");
        assert!(err.contains("Failed to parse replay JSON"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn builtin_replay_run_is_deterministic() {
        let mut config = WorldConfig::default();
        config.grid.seed = 2024;
        config.grid.generation = Generation::CoordinateHash;
        let inputs = ReplaySequence::builtin().expanded_inputs();

        let mut run_a = World::new(config.clone());
        let mut run_b = World::new(config);
        let mut input = InputState::new();
        for held in &inputs {
            input.set_held(held);
            run_a.step(&input);
            run_b.step(&input);
            input.end_frame();
        }

        assert_eq!(run_a.player.position, run_b.player.position);
        assert_eq!(run_a.grid.draw_count(), run_b.grid.draw_count());
    }
}
