//! Shared constants for the TUI to keep layout and timing in sync.

/// Interval in milliseconds between UI ticks/redraws.
pub const TUI_TICK_RATE_MS: u64 = 1000;
/// Time-to-live in seconds for transient status messages.
pub const UI_MESSAGE_TTL_SECS: u64 = 5;
/// Highlight symbol shown beside the selected lot.
pub const LOT_LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";
/// Width in cells of inline usage bars.
pub const USAGE_BAR_WIDTH: usize = 20;
/// Width of the compact bar on each lot list row.
pub const LOT_LIST_BAR_WIDTH: usize = 10;
/// Rows taken by the screen header.
pub const HEADER_HEIGHT: u16 = 4;
/// Rows taken by the key help and message footer.
pub const FOOTER_HEIGHT: u16 = 4;
