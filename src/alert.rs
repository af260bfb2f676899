//! Sustained-heat alert rule.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::{Alert, Reading};

// ---

pub const THRESHOLD_EXCEEDED: &str = "Temperature threshold exceeded";

/// Fires when every reading in the trailing window is strictly above the
/// threshold. An empty window never fires.
#[derive(Debug, Clone, Copy)]
pub struct AlertRule {
    pub threshold: f64,
    pub window: TimeDelta,
}

impl AlertRule {
    // ---
    pub fn new(threshold: f64, window: Duration) -> Self {
        // ---
        let window = TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX);
        Self { threshold, window }
    }

    pub fn evaluate(&self, city: &str, readings: &[Reading], now: DateTime<Utc>) -> Option<Alert> {
        // ---
        let mut recent = readings
            .iter()
            .filter(|r| now - r.timestamp <= self.window)
            .peekable();

        recent.peek()?;

        if recent.all(|r| r.temperature > self.threshold) {
            Some(Alert {
                city: city.to_string(),
                message: THRESHOLD_EXCEEDED.to_string(),
            })
        } else {
            None
        }
    }
}
