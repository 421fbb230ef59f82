//! Application layer for lotwatch.
//!
//! Data sources, report derivation, navigation, theming and configuration
//! shared by the CLI and the TUI.

pub mod config;
pub mod navigation;
pub mod schedule;
pub mod service;
pub mod source;
pub mod theme;

// Re-exports for convenience
pub use config::{AppConfig, DisplayConfig, default_config_path};
pub use navigation::{DEFAULT_CONNECTION_ERROR, NavStack, Screen};
pub use schedule::UpdateSchedule;
pub use service::{
    DEFAULT_ACTIVE_VIEWERS, EventImpactRow, EventReport, HistoryRow, LotDetail, LotHistory, LotRow,
    ParkingService, PredictionRow, ServiceError,
};
pub use source::{LotSource, MockLotSource};
pub use theme::Theme;
