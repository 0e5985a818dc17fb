use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Get the data directory for the scene file and window state
/// - If running from source (binary path contains "target") or INVITE_FX_DEV is set: ./tmp/invite-fx
/// - If installed (binary path elsewhere): ~/.local/share/invite-fx
pub fn get_data_dir() -> PathBuf {
    let use_local_storage = std::env::var("INVITE_FX_DEV").is_ok()
        || std::env::current_exe()
            .map(|p| p.iter().any(|c| c == "target"))
            .unwrap_or(false);

    if use_local_storage {
        // cargo run sets CWD to the project root
        let mut path = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        path.push("tmp");
        path.push("invite-fx");
        path
    } else {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("invite-fx")
    }
}

/// Scene file read when no `--config` is given
pub fn default_scene_path() -> PathBuf {
    get_data_dir().join("scene.json")
}

/// Logical window size, restored on the next start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    pub width: f64,
    pub height: f64,
}

impl WindowState {
    fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

fn window_state_path() -> PathBuf {
    get_data_dir().join("window_state.json")
}

pub fn parse_window_state(content: &str) -> Option<WindowState> {
    serde_json::from_str::<WindowState>(content)
        .ok()
        .filter(WindowState::is_usable)
}

pub fn load_window_state() -> Option<WindowState> {
    let content = fs::read_to_string(window_state_path()).ok()?;
    parse_window_state(&content)
}

pub fn save_window_state(state: WindowState) -> std::io::Result<()> {
    let dir = ensure_data_dir()?;
    let path = dir.join("window_state.json");
    let payload = serde_json::to_string_pretty(&state).map_err(std::io::Error::other)?;
    fs::write(path, payload)
}

/// Ensure the data directory exists
pub fn ensure_data_dir() -> std::io::Result<PathBuf> {
    let dir = get_data_dir();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
