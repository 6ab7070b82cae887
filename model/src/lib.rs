//! Toolkit independent view model of the sensor dashboard.
//!
//! Incoming feed messages are decoded by the [`Dashboard`], routed to the addressed
//! [`DevicePanel`] and folded into its gauges and history chart. A rendering layer asks
//! [`Dashboard::render`] for a [`DashboardView`] at the current time and draws it with
//! whatever UI toolkit it likes.
//!
//! All time values are milliseconds since the Unix epoch and every time dependent
//! operation takes `now` explicitly, so the whole model can be driven from tests.

mod animation;
mod config;
mod dashboard;
mod device;
mod error;
mod gauge;
mod history;
mod payload;
mod settings;

pub use animation::{ease_in_out_cubic, AngleTransition};
pub use config::{DashboardConfig, DeviceConfig, HistoryConfig};
pub use dashboard::{Dashboard, DashboardView};
pub use device::{DevicePanel, DeviceView};
pub use error::UpdateError;
pub use gauge::{GaugeView, Sensor, FULL_CIRCLE};
pub use history::{ChartView, History, HistoryRetention, PlotPoint, Sample};
pub use payload::{Reading, UpdatePayload};
pub use settings::{MeaningSettings, Rgba, SettingsRegistry, ValueRange};

/// Current wall clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Whole seconds elapsed between `timestamp` and `now`, truncated towards zero.
///
/// Timestamps from the future yield negative values. Extreme timestamps saturate.
pub fn elapsed_secs(timestamp: i64, now: i64) -> i64 {
    now.saturating_sub(timestamp) / 1000
}
