//! Configuration loading and margin policy
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. `PLANPILOT_CONFIG` environment variable
//! 3. Platform config file (`~/.config/planpilot/config.toml`, then
//!    `/etc/planpilot/config.toml` on Unix)
//! 4. Compiled defaults (fallback)
//!
//! A missing config file is not an error: the service starts on compiled
//! defaults. A file that exists but does not parse or validate is.

use crate::comparator::MetricKind;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "PLANPILOT_CONFIG";

/// Default relative non-inferiority margin for plan-quality metrics (5%)
pub const DEFAULT_RELATIVE_MARGIN: f64 = 0.05;

// ========================================
// Margin Policy
// ========================================

/// How a margin value is turned into an acceptance tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginMode {
    /// Tolerance is `value * manual_value`
    Relative,
    /// Tolerance is `value` in the metric's own units
    Absolute,
}

/// Acceptance margin for one metric kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarginPolicy {
    pub mode: MarginMode,
    pub value: f64,
}

impl MarginPolicy {
    pub const fn relative(value: f64) -> Self {
        Self {
            mode: MarginMode::Relative,
            value,
        }
    }

    pub const fn absolute(value: f64) -> Self {
        Self {
            mode: MarginMode::Absolute,
            value,
        }
    }

    /// Tolerance to apply against `manual_value`
    pub fn tolerance(&self, manual_value: f64) -> f64 {
        match self.mode {
            MarginMode::Relative => self.value * manual_value,
            MarginMode::Absolute => self.value,
        }
    }

    fn validate(&self, key: &str) -> Result<()> {
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(Error::Config(format!(
                "margins.{key}.value must be a finite non-negative number, got {}",
                self.value
            )));
        }
        if self.mode == MarginMode::Relative && self.value > 1.0 {
            return Err(Error::Config(format!(
                "margins.{key}.value is a relative fraction and must be at most 1.0, got {}",
                self.value
            )));
        }
        Ok(())
    }
}

impl Default for MarginPolicy {
    fn default() -> Self {
        Self::relative(DEFAULT_RELATIVE_MARGIN)
    }
}

/// Policy for an efficiency metric (planning time, revisions)
///
/// Efficiency metrics are reported but do not gate the overall verdict
/// unless `gating` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EfficiencyPolicy {
    #[serde(default)]
    pub gating: bool,
    #[serde(default = "default_efficiency_mode")]
    pub mode: MarginMode,
    #[serde(default)]
    pub value: f64,
}

fn default_efficiency_mode() -> MarginMode {
    MarginMode::Absolute
}

impl EfficiencyPolicy {
    pub fn margin(&self) -> MarginPolicy {
        MarginPolicy {
            mode: self.mode,
            value: self.value,
        }
    }
}

impl Default for EfficiencyPolicy {
    fn default() -> Self {
        Self {
            gating: false,
            mode: default_efficiency_mode(),
            value: 0.0,
        }
    }
}

/// Margin and gating resolved for a single metric kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricPolicy {
    pub metric: MetricKind,
    pub margin: MarginPolicy,
    pub gating: bool,
}

/// Non-inferiority thresholds keyed by metric kind
///
/// Plan-quality metrics (CI, HI, OAR) always gate the overall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarginConfig {
    pub ci: MarginPolicy,
    pub hi: MarginPolicy,
    pub oar_score: MarginPolicy,
    pub planning_time: EfficiencyPolicy,
    pub revisions: EfficiencyPolicy,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            ci: MarginPolicy::default(),
            hi: MarginPolicy::default(),
            oar_score: MarginPolicy::default(),
            planning_time: EfficiencyPolicy::default(),
            revisions: EfficiencyPolicy::default(),
        }
    }
}

impl MarginConfig {
    /// Policy in force for `metric`
    pub fn policy(&self, metric: MetricKind) -> MetricPolicy {
        let (margin, gating) = match metric {
            MetricKind::Ci => (self.ci, true),
            MetricKind::Hi => (self.hi, true),
            MetricKind::OarScore => (self.oar_score, true),
            MetricKind::PlanningTime => (self.planning_time.margin(), self.planning_time.gating),
            MetricKind::Revisions => (self.revisions.margin(), self.revisions.gating),
        };
        MetricPolicy {
            metric,
            margin,
            gating,
        }
    }

    /// Every metric's policy, in the fixed metric order
    pub fn entries(&self) -> Vec<MetricPolicy> {
        MetricKind::ALL.iter().map(|&m| self.policy(m)).collect()
    }

    pub fn validate(&self) -> Result<()> {
        self.ci.validate("ci")?;
        self.hi.validate("hi")?;
        self.oar_score.validate("oar_score")?;
        self.planning_time.margin().validate("planning_time")?;
        self.revisions.margin().validate("revisions")?;
        Ok(())
    }
}

// ========================================
// TOML Bootstrap Config
// ========================================

/// Service configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Non-inferiority margins (optional, defaults to 5% relative)
    #[serde(default)]
    pub margins: MarginConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logging: LoggingConfig::default(),
            margins: MarginConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Parse and validate config text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        config.margins.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// ========================================
// Config File Resolution
// ========================================

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    CliArgument(PathBuf),
    Environment(PathBuf),
    PlatformFile(PathBuf),
    CompiledDefaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::CliArgument(p)
            | ConfigSource::Environment(p)
            | ConfigSource::PlatformFile(p) => Some(p),
            ConfigSource::CompiledDefaults => None,
        }
    }
}

/// Resolve the config source following the priority order above
pub fn resolve_config_source(cli_arg: Option<&Path>) -> ConfigSource {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return ConfigSource::CliArgument(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return ConfigSource::Environment(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config file
    if let Some(path) = platform_config_file() {
        return ConfigSource::PlatformFile(path);
    }

    // Priority 4: Compiled defaults
    ConfigSource::CompiledDefaults
}

/// First existing platform config file, if any
fn platform_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("planpilot").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/planpilot/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Load configuration from a resolved source
///
/// Runs before logging is initialized, so it reports through its result only.
pub fn load_config(source: &ConfigSource) -> Result<TomlConfig> {
    match source {
        ConfigSource::CompiledDefaults => Ok(TomlConfig::default()),
        ConfigSource::CliArgument(path)
        | ConfigSource::Environment(path)
        | ConfigSource::PlatformFile(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            TomlConfig::load(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_margins_are_five_percent_relative() {
        let config = MarginConfig::default();
        for metric in [MetricKind::Ci, MetricKind::Hi, MetricKind::OarScore] {
            let policy = config.policy(metric);
            assert_eq!(policy.margin, MarginPolicy::relative(0.05));
            assert!(policy.gating);
        }
        assert!(!config.policy(MetricKind::PlanningTime).gating);
        assert!(!config.policy(MetricKind::Revisions).gating);
    }

    #[test]
    fn test_tolerance_by_mode() {
        assert!((MarginPolicy::relative(0.05).tolerance(24.0) - 1.2).abs() < 1e-12);
        assert_eq!(MarginPolicy::absolute(3.0).tolerance(24.0), 3.0);
    }

    #[test]
    fn test_entries_cover_every_metric_in_order() {
        let kinds: Vec<MetricKind> = MarginConfig::default()
            .entries()
            .into_iter()
            .map(|p| p.metric)
            .collect();
        assert_eq!(kinds, MetricKind::ALL.to_vec());
    }

    #[test]
    fn test_validate_rejects_negative_margin() {
        let mut config = MarginConfig::default();
        config.hi = MarginPolicy::absolute(-0.1);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_relative_above_one() {
        let mut config = MarginConfig::default();
        config.ci = MarginPolicy::relative(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_absolute_margins_from_toml() {
        let config = TomlConfig::from_toml_str(
            r#"
            port = 9000

            [margins.ci]
            mode = "absolute"
            value = 0.05

            [margins.oar_score]
            mode = "absolute"
            value = 3

            [margins.planning_time]
            gating = true
            mode = "relative"
            value = 0.1
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.margins.ci, MarginPolicy::absolute(0.05));
        assert_eq!(config.margins.oar_score, MarginPolicy::absolute(3.0));
        assert_eq!(config.margins.hi, MarginPolicy::relative(0.05));
        let time = config.margins.policy(MetricKind::PlanningTime);
        assert!(time.gating);
        assert_eq!(time.margin, MarginPolicy::relative(0.1));
    }

    #[test]
    fn test_unknown_margin_key_rejected() {
        let result = TomlConfig::from_toml_str(
            r#"
            [margins.conformity]
            mode = "absolute"
            value = 0.05
            "#,
        );
        assert!(matches!(result, Err(Error::Toml(_))));
    }
}
