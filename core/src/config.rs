use failure;
use failure::Error;

use serde_derive::Deserialize;

use std::fs::File;
use std::io::Read;

use crate::scheduler::DistancePolicy;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParserConfig {
  pub fps: f64,
  pub offset: f64,
  pub strict: bool,
}

impl Default for ParserConfig {
  fn default() -> ParserConfig {
    ParserConfig {
      fps: 24.0,
      offset: 0.0,
      strict: false,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SchedulerConfig {
  pub actuators: usize,
  pub distance: DistancePolicy,
  pub no_overlap: bool,
  /// Rewards below this mean the assignment is physically impossible
  pub reward_floor: f64,
  /// Negative slack (frames) accepted between near simultaneous notes when `no_overlap` is set
  pub overlap_tolerance: f64,
}

impl Default for SchedulerConfig {
  fn default() -> SchedulerConfig {
    SchedulerConfig {
      actuators: 4,
      distance: DistancePolicy::Linear,
      no_overlap: false,
      reward_floor: -1e5,
      overlap_tolerance: 0.5,
    }
  }
}

impl SchedulerConfig {
  pub fn effective_floor(&self) -> f64 {
    if self.no_overlap {
      self.reward_floor.max(-self.overlap_tolerance)
    } else {
      self.reward_floor
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
  pub parser: ParserConfig,
  pub scheduler: SchedulerConfig,
}

impl Default for Config {
  fn default() -> Config {
    Config {
      parser: ParserConfig::default(),
      scheduler: SchedulerConfig::default(),
    }
  }
}

impl Config {
  pub fn from_file<'a, T>(path: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let mut content = String::new();
    let path_str = path.into();
    let mut file = File::open(path_str)?;
    file.read_to_string(&mut content)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
  }

  pub fn from_str<'a, T>(content: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    Ok(config)
  }
}

#[cfg(test)]
mod test {

  use super::{Config, DistancePolicy};

  #[test]
  /// An empty document falls back to the defaults of every section
  pub fn from_str_defaults() {
    let config = Config::from_str("").unwrap();
    assert_eq!(config.parser.fps, 24.0);
    assert_eq!(config.parser.offset, 0.0);
    assert!(!config.parser.strict);
    assert_eq!(config.scheduler.actuators, 4);
    assert_eq!(config.scheduler.distance, DistancePolicy::Linear);
    assert!(!config.scheduler.no_overlap);
    assert_eq!(config.scheduler.reward_floor, -1e5);
  }

  #[test]
  pub fn from_str_sections() {
    let content = r#"
[parser]
fps = 30.0
offset = 12.5
strict = true

[scheduler]
actuators = 3
distance = "square"
no_overlap = true
overlap_tolerance = 2.0
"#;
    let config = Config::from_str(content).unwrap();
    assert_eq!(config.parser.fps, 30.0);
    assert_eq!(config.parser.offset, 12.5);
    assert!(config.parser.strict);
    assert_eq!(config.scheduler.actuators, 3);
    assert_eq!(config.scheduler.distance, DistancePolicy::Square);
    assert!(config.scheduler.no_overlap);
    assert_eq!(config.scheduler.overlap_tolerance, 2.0);
    assert_eq!(config.scheduler.reward_floor, -1e5);
  }

  #[test]
  /// Unknown distance policies are rejected
  pub fn from_str_invalid_distance() {
    let content = "[scheduler]\ndistance = \"cubic\"\n";
    assert!(Config::from_str(content).is_err());
  }

  #[test]
  /// The overlap tolerance only tightens the floor when overlaps are disallowed
  pub fn effective_floor() {
    let mut config = Config::default().scheduler;
    assert_eq!(config.effective_floor(), -1e5);
    config.no_overlap = true;
    assert_eq!(config.effective_floor(), -0.5);
    config.overlap_tolerance = 1e6;
    assert_eq!(config.effective_floor(), -1e5);
  }
}
