//! Pipeline configuration.
//!
//! Every engine owns its settings struct with sensible defaults;
//! [`DashboardConfig`] bundles them and can be overridden from `STOCKPULSE_*`
//! environment variables.

use core::str::FromStr;

use thiserror::Error;

use stockpulse_aggregation::AggregationConfig;
use stockpulse_charts::{ChartFrame, ChartLayout};
use stockpulse_forecast::ForecastPolicy;
use stockpulse_heatmap::{HeatmapConfig, MAX_GRID_DIMENSION};

pub const ENV_HORIZON_DAYS: &str = "STOCKPULSE_HORIZON_DAYS";
pub const ENV_DEFAULT_CAPACITY: &str = "STOCKPULSE_DEFAULT_CAPACITY";
pub const ENV_MIN_ZOOM: &str = "STOCKPULSE_MIN_ZOOM";
pub const ENV_MAX_ZOOM: &str = "STOCKPULSE_MAX_ZOOM";
pub const ENV_CELL_SIZE: &str = "STOCKPULSE_CELL_SIZE";
pub const ENV_ACCURACY_RATE: &str = "STOCKPULSE_ACCURACY_RATE";
pub const ENV_GRID_LIMIT: &str = "STOCKPULSE_GRID_LIMIT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("inconsistent configuration: {0}")]
    Inconsistent(String),
}

/// Display constants that have no derivation in the inventory data.
///
/// They are shown on the dashboard as-is and are expected to be replaced once
/// real measurements exist.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderMetrics {
    /// Reported barcode scan accuracy, in `[0, 1]`.
    pub scan_accuracy_rate: f64,
}

impl Default for PlaceholderMetrics {
    fn default() -> Self {
        Self {
            scan_accuracy_rate: 0.965,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub aggregation: AggregationConfig,
    pub charts: ChartLayout,
    /// Chart surface used when the view is fullscreen.
    pub fullscreen_frame: ChartFrame,
    pub heatmap: HeatmapConfig,
    /// Base heatmap cell size in pixels.
    pub heatmap_cell_size: f64,
    pub forecast: ForecastPolicy,
    pub default_horizon_days: u32,
    pub placeholders: PlaceholderMetrics,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            aggregation: AggregationConfig::default(),
            charts: ChartLayout::default(),
            fullscreen_frame: ChartFrame {
                width: 1280.0,
                height: 720.0,
                padding: 40.0,
            },
            heatmap: HeatmapConfig::default(),
            heatmap_cell_size: 100.0,
            forecast: ForecastPolicy::default(),
            default_horizon_days: 14,
            placeholders: PlaceholderMetrics::default(),
        }
    }
}

fn parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: core::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn positive(key: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let value: f64 = parse(key, raw)?;
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "must be a finite positive number".to_string(),
        });
    }
    Ok(value)
}

impl DashboardConfig {
    /// Defaults overridden by `STOCKPULSE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each known key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_HORIZON_DAYS) {
            config.default_horizon_days = parse(ENV_HORIZON_DAYS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_DEFAULT_CAPACITY) {
            config.aggregation = config
                .aggregation
                .with_default_capacity(parse(ENV_DEFAULT_CAPACITY, &raw)?);
        }
        if let Some(raw) = lookup(ENV_MIN_ZOOM) {
            config.heatmap.zoom.min = positive(ENV_MIN_ZOOM, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_ZOOM) {
            config.heatmap.zoom.max = positive(ENV_MAX_ZOOM, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CELL_SIZE) {
            config.heatmap_cell_size = positive(ENV_CELL_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_GRID_LIMIT) {
            let limit: u32 = parse(ENV_GRID_LIMIT, &raw)?;
            if !(1..=MAX_GRID_DIMENSION).contains(&limit) {
                return Err(ConfigError::Invalid {
                    key: ENV_GRID_LIMIT,
                    value: raw,
                    reason: format!("must be within [1, {MAX_GRID_DIMENSION}]"),
                });
            }
            config.heatmap = config.heatmap.with_max_dimension(limit);
        }
        if let Some(raw) = lookup(ENV_ACCURACY_RATE) {
            let rate: f64 = parse(ENV_ACCURACY_RATE, &raw)?;
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::Invalid {
                    key: ENV_ACCURACY_RATE,
                    value: raw,
                    reason: "must be within [0, 1]".to_string(),
                });
            }
            config.placeholders.scan_accuracy_rate = rate;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let zoom = self.heatmap.zoom;
        if !zoom.is_valid() {
            return Err(ConfigError::Inconsistent(format!(
                "zoom range [{}, {}] must satisfy 0 < min <= max",
                zoom.min, zoom.max
            )));
        }
        if self.heatmap.max_dimension == 0 || self.heatmap.max_dimension > MAX_GRID_DIMENSION {
            return Err(ConfigError::Inconsistent(format!(
                "heatmap size limit {} outside [1, {MAX_GRID_DIMENSION}]",
                self.heatmap.max_dimension
            )));
        }
        if self.default_horizon_days == 0 {
            return Err(ConfigError::Inconsistent("horizon must be at least one day".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = DashboardConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.placeholders.scan_accuracy_rate, 0.965);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (ENV_HORIZON_DAYS, "30"),
            (ENV_DEFAULT_CAPACITY, "250"),
            (ENV_MIN_ZOOM, "0.5"),
            (ENV_MAX_ZOOM, "8"),
            (ENV_CELL_SIZE, "64"),
            (ENV_ACCURACY_RATE, "0.9"),
            (ENV_GRID_LIMIT, "64"),
        ]))
        .unwrap();
        assert_eq!(config.default_horizon_days, 30);
        assert_eq!(config.aggregation.default_capacity, 250);
        assert_eq!(config.heatmap.zoom.min, 0.5);
        assert_eq!(config.heatmap.zoom.max, 8.0);
        assert_eq!(config.heatmap_cell_size, 64.0);
        assert_eq!(config.placeholders.scan_accuracy_rate, 0.9);
        assert_eq!(config.heatmap.max_dimension, 64);
    }

    #[test]
    fn malformed_values_are_reported() {
        let err = DashboardConfig::from_lookup(lookup(&[(ENV_HORIZON_DAYS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_HORIZON_DAYS, .. }));

        let err = DashboardConfig::from_lookup(lookup(&[(ENV_CELL_SIZE, "-3")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_CELL_SIZE, .. }));

        let err = DashboardConfig::from_lookup(lookup(&[(ENV_MIN_ZOOM, "5"), (ENV_MAX_ZOOM, "2")])).unwrap_err();
        assert!(matches!(err, ConfigError::Inconsistent(_)));

        let err = DashboardConfig::from_lookup(lookup(&[(ENV_GRID_LIMIT, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_GRID_LIMIT, .. }));

        let err = DashboardConfig::from_lookup(lookup(&[(ENV_ACCURACY_RATE, "1.5")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_ACCURACY_RATE, .. }));
    }

    #[test]
    fn non_positive_zoom_range_is_inconsistent() {
        let mut config = DashboardConfig::default();
        config.heatmap.zoom.min = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Inconsistent(_))));

        config.heatmap.zoom.min = -2.0;
        config.heatmap.zoom.max = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Inconsistent(_))));
    }
}
