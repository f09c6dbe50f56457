//! The dashboard's TOML configuration file.
//!
//! ```toml
//! [series]
//! moving_average_periods = [7, 30]
//! week_start = "monday"
//!
//! [layout]
//! width = 960.0
//!
//! [layout.legend]
//! policy = "reflect"
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use keyword_layout::config::LayoutConfig;
use market_series::config::SeriesConfig;
use serde::{Deserialize, Serialize};
use shared_utils::{config::load_toml_path, env::resolve_config_path};
use tracing::{debug, info};

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV: &str = "DASHBOARD_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON records instead of human-readable lines.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub series: SeriesConfig,
    pub layout: LayoutConfig,
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Loads the config from `explicit` or `$DASHBOARD_CONFIG`, falling back
    /// to the defaults when neither is set.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self> {
        let Some(path) = resolve_config_path(explicit, CONFIG_ENV) else {
            debug!("No config file given, using defaults");
            return Ok(Self::default());
        };
        let cfg: Self = load_toml_path(&path)
            .with_context(|| format!("loading dashboard config from {}", path.display()))?;
        cfg.validate()
            .with_context(|| format!("invalid dashboard config in {}", path.display()))?;
        info!(path = %path.display(), "Loaded dashboard config");
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.series.validate()?;
        self.layout.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use keyword_layout::config::LegendPolicy;
    use market_series::models::week::WeekStart;

    use super::*;

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_nested_sections() {
        let file = write_config(
            r#"
            [series]
            moving_average_periods = [7, 30]
            week_start = "monday"

            [layout]
            width = 960.0

            [layout.legend]
            policy = "reflect"

            [logging]
            json = true
            "#,
        );
        let cfg = DashboardConfig::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(cfg.series.moving_average_periods, vec![7, 30]);
        assert_eq!(cfg.series.week_start, WeekStart::Monday);
        assert_eq!(cfg.series.benchmark, "SPY");
        assert_eq!(cfg.layout.width, 960.0);
        assert_eq!(cfg.layout.height, 700.0);
        assert_eq!(cfg.layout.legend.policy, LegendPolicy::Reflect);
        assert!(cfg.logging.json);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn invalid_values_name_the_file() {
        let file = write_config("[series]\nmoving_average_periods = [0]\n");
        let err = DashboardConfig::load(Some(file.path().to_path_buf())).unwrap_err();
        let text = format!("{err:#}");
        assert!(text.contains("invalid dashboard config"), "{text}");
        assert!(text.contains("period must be > 0"), "{text}");
    }

    #[test]
    fn unknown_section_is_rejected() {
        let file = write_config("[colors]\nup = \"green\"\n");
        assert!(DashboardConfig::load(Some(file.path().to_path_buf())).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = DashboardConfig::load(Some("/nonexistent/dashboard.toml".into())).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }
}
