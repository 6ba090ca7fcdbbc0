//! Index configuration.
use crate::geohash::MAX_PRECISION;
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Index configuration.
///
/// Every field has a serde default, so partial JSON or TOML documents load.
///
/// # Example
///
/// ```rust
/// use geomark::Config;
///
/// let config = Config::default();
/// assert_eq!(config.geohash_precision, 7);
///
/// let config = Config::from_json(r#"{ "geohash_precision": 6 }"#).unwrap();
/// assert_eq!(config.geohash_precision, 6);
/// assert_eq!(config.max_covering_cells, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Geohash precision for `insert_marker` and default searches (1-12, default: 7).
    /// Precision 7 cells are roughly 150 m across.
    #[serde(default = "Config::default_geohash_precision")]
    pub geohash_precision: usize,

    /// Upper bound on cells a radius query may visit while building its
    /// covering; `None` leaves the traversal unbounded.
    #[serde(default)]
    pub max_covering_cells: Option<usize>,
}

impl Config {
    const fn default_geohash_precision() -> usize {
        7
    }

    pub fn with_geohash_precision(mut self, precision: usize) -> Self {
        assert!(
            (1..=MAX_PRECISION).contains(&precision),
            "Geohash precision must be between 1 and 12"
        );
        self.geohash_precision = precision;
        self
    }

    pub fn with_max_covering_cells(mut self, limit: usize) -> Self {
        assert!(limit > 0, "Covering cell limit must be greater than zero");
        self.max_covering_cells = Some(limit);
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_PRECISION).contains(&self.geohash_precision) {
            return Err(format!(
                "Geohash precision must be between 1 and {}",
                MAX_PRECISION
            ));
        }

        if self.max_covering_cells == Some(0) {
            return Err("Covering cell limit must be greater than zero".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geohash_precision: Self::default_geohash_precision(),
            max_covering_cells: None,
        }
    }
}
