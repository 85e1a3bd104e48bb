//! Timeline configuration - retention and baseline settings
//!
//! This module provides configuration for how much history a timeline
//! retains and how the baseline entry recorded by [`init`] is labeled.
//!
//! [`init`]: crate::Timeline::init

use serde::{Deserialize, Serialize};

/// Configuration for a timeline
///
/// # Example
///
/// ```
/// use retrace_core::TimelineConfig;
///
/// let config = TimelineConfig::default();
/// assert_eq!(config.capacity, 50);
///
/// let config = TimelineConfig::with_capacity(200);
/// assert_eq!(config.capacity, 200);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Maximum number of entries to keep (0 = unlimited)
    ///
    /// When a push would exceed this bound, the oldest entry is evicted.
    pub capacity: usize,
    /// Label recorded on the baseline entry created by `init`
    pub baseline_label: String,
}

impl TimelineConfig {
    /// Create a configuration with the given capacity and default labels
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Check if retention is unbounded
    pub fn is_unlimited(&self) -> bool {
        self.capacity == 0
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            capacity: 50, // Keep the last 50 entries
            baseline_label: "Initial State".to_string(),
        }
    }
}
