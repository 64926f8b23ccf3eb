use std::time::Duration;

/// Default grid width in cells.
pub const DEFAULT_COLS: i32 = 25;
/// Default grid height in cells.
pub const DEFAULT_ROWS: i32 = 20;

/// Configuration for creating a [`Controller`](crate::Controller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AppConfig {
    pub cols: i32,
    pub rows: i32,
    /// Search steps performed per [`Msg::Tick`](crate::Msg::Tick). Zero is
    /// treated as one.
    pub steps_per_tick: u32,
    /// How often the frontend should send a tick while a search runs.
    pub tick_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            steps_per_tick: 1,
            tick_interval: Duration::from_millis(16),
        }
    }
}
