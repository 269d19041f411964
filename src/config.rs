//! Runtime configuration
//!
//! Loaded from an optional YAML file, then overridden by `HERD_*`
//! environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HerdError, Result};
use crate::genealogy::DEFAULT_MAX_LEVEL;
use crate::purity::PurityTable;
use crate::seed::generation_year;

/// Deepest genealogy a caller may request
pub const MAX_GENEALOGY_LEVEL: u32 = 12;

/// Most offspring generations the demo herd will fabricate
pub const MAX_SEED_GENERATIONS: usize = 50;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HerdConfig {
    pub genealogy: GenealogyConfig,
    pub purity: PurityConfig,
    pub seed: SeedConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenealogyConfig {
    pub max_level: u32,
}

impl Default for GenealogyConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PurityConfig {
    pub table: PurityTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub rng_seed: u64,
    pub founders: usize,
    pub generations: usize,
    pub offspring_per_generation: usize,
    /// Birth year of the founder cohort
    pub start_year: i32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            founders: 24,
            generations: 4,
            offspring_per_generation: 16,
            start_year: 2012,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl HerdConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: HerdConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!("Loaded herd configuration from {:?}", path);
        Ok(config)
    }

    /// File (if given) or defaults, then process environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `HERD_*` overrides from `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("HERD_GENEALOGY_MAX_LEVEL") {
            self.genealogy.max_level = parse_env("HERD_GENEALOGY_MAX_LEVEL", &v)?;
        }
        if let Some(v) = lookup("HERD_PURITY_TABLE") {
            self.purity.table = v.parse()?;
        }
        if let Some(v) = lookup("HERD_SEED") {
            self.seed.rng_seed = parse_env("HERD_SEED", &v)?;
        }
        if let Some(v) = lookup("HERD_BIND_ADDR") {
            self.server.bind_addr = v;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.genealogy.max_level > MAX_GENEALOGY_LEVEL {
            return Err(HerdError::Config(format!(
                "genealogy.max_level {} exceeds {}",
                self.genealogy.max_level, MAX_GENEALOGY_LEVEL
            )));
        }
        if self.seed.founders < 2 {
            return Err(HerdError::Config(
                "seed.founders must be at least 2 to produce a breeding pair".to_string(),
            ));
        }
        if self.seed.generations > MAX_SEED_GENERATIONS {
            return Err(HerdError::Config(format!(
                "seed.generations {} exceeds {}",
                self.seed.generations, MAX_SEED_GENERATIONS
            )));
        }
        generation_year(self.seed.start_year, 0)?;
        generation_year(self.seed.start_year, self.seed.generations)?;
        if self.server.bind_addr.trim().is_empty() {
            return Err(HerdError::Config("server.bind_addr is empty".to_string()));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| HerdError::Config(format!("{} has invalid value '{}'", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = HerdConfig::default();
        assert_eq!(config.genealogy.max_level, 4);
        assert_eq!(config.purity.table, PurityTable::Canonical);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = HerdConfig::from_yaml_str(
            r#"
purity:
  table: progressive
seed:
  rng_seed: 7
"#,
        )
        .unwrap();
        assert_eq!(config.purity.table, PurityTable::Progressive);
        assert_eq!(config.seed.rng_seed, 7);
        assert_eq!(config.seed.founders, 24);
        assert_eq!(config.genealogy.max_level, 4);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("HERD_GENEALOGY_MAX_LEVEL", "2"),
            ("HERD_PURITY_TABLE", "progressive"),
            ("HERD_BIND_ADDR", "0.0.0.0:8080"),
        ]
        .into_iter()
        .collect();

        let config = HerdConfig::default()
            .with_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.genealogy.max_level, 2);
        assert_eq!(config.purity.table, PurityTable::Progressive);
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_env_value() {
        let err = HerdConfig::default()
            .with_overrides(|k| (k == "HERD_SEED").then(|| "forty-two".to_string()))
            .unwrap_err();
        assert!(matches!(err, HerdError::Config(_)));
    }

    #[test]
    fn test_depth_limit_enforced() {
        let err = HerdConfig::from_yaml_str("genealogy:\n  max_level: 40\n").unwrap_err();
        assert!(matches!(err, HerdError::Config(_)));
    }

    #[test]
    fn test_seed_calendar_enforced() {
        let err = HerdConfig::from_yaml_str("seed:\n  start_year: 2147483646\n").unwrap_err();
        assert!(matches!(err, HerdError::Config(_)));

        let err = HerdConfig::from_yaml_str("seed:\n  generations: 100000\n").unwrap_err();
        assert!(matches!(err, HerdError::Config(_)));

        let config = HerdConfig::from_yaml_str("seed:\n  start_year: 1990\n").unwrap();
        assert_eq!(config.seed.start_year, 1990);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  bind_addr: \"127.0.0.1:9000\"").unwrap();
        let config = HerdConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
    }
}
