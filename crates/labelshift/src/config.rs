//! Configuration types for the label dragging tool.
//!
//! All types implement [`serde::Deserialize`] so hosts can load them from
//! external sources such as a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`ToolConfig`] - Gesture settings: drag threshold and transaction name.
//!
//! # Example
//!
//! ```
//! # use labelshift::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.tool().drag_threshold(), 2.0);
//! assert_eq!(config.tool().transaction_name(), "Shifted Label");
//! ```

use serde::Deserialize;

/// Default click-versus-drag distance, in document units
pub const DEFAULT_DRAG_THRESHOLD: f32 = 2.0;

/// Default name of the transaction wrapping one drag gesture
pub const DEFAULT_TRANSACTION_NAME: &str = "Shifted Label";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Tool configuration section.
    #[serde(default)]
    tool: ToolConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified tool configuration.
    pub fn new(tool: ToolConfig) -> Self {
        Self { tool }
    }

    /// Returns the tool configuration.
    pub fn tool(&self) -> &ToolConfig {
        &self.tool
    }
}

/// Settings for the label dragging gesture.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolConfig {
    /// Pointer travel that must be strictly exceeded before a press becomes a drag.
    #[serde(default = "default_drag_threshold")]
    drag_threshold: f32,

    /// Name of the transaction opened for each gesture.
    #[serde(default = "default_transaction_name")]
    transaction_name: String,
}

fn default_drag_threshold() -> f32 {
    DEFAULT_DRAG_THRESHOLD
}

fn default_transaction_name() -> String {
    DEFAULT_TRANSACTION_NAME.to_string()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            transaction_name: DEFAULT_TRANSACTION_NAME.to_string(),
        }
    }
}

impl ToolConfig {
    /// Creates a new [`ToolConfig`].
    ///
    /// # Arguments
    ///
    /// * `drag_threshold` - Pointer travel required before a drag starts.
    /// * `transaction_name` - Name of the per-gesture transaction.
    pub fn new(drag_threshold: f32, transaction_name: impl Into<String>) -> Self {
        Self {
            drag_threshold,
            transaction_name: transaction_name.into(),
        }
    }

    /// Returns the drag threshold in document units
    pub fn drag_threshold(&self) -> f32 {
        self.drag_threshold
    }

    /// Returns the transaction name
    pub fn transaction_name(&self) -> &str {
        &self.transaction_name
    }

    /// Checks the configured values.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(format!(
                "drag_threshold must be a non-negative number, got {}",
                self.drag_threshold
            ));
        }
        if self.transaction_name.trim().is_empty() {
            return Err("transaction_name must not be empty".to_string());
        }
        Ok(())
    }
}
