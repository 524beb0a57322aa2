use serde::{Deserialize, Serialize};

/// Player-issued dashboard commands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Clock control ─────────────────────────────
    TogglePlay,
    ChangeSpeed,

    // ── Manual advance (paused only) ──────────────
    NextDay,
}
