use std::{error::Error, fs::File, path::Path};

use clap::ValueEnum;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::{
    direction::{Direction, Rotation},
    error::SpiralError,
    region::Region,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Stateful,
    Fast,
    Reference,
}

/// Settings for a traversal run, stored as pretty-printed JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub start: Option<(i32, i32)>,
    pub direction: Direction,
    pub rotation: Rotation,
    pub algorithm: Algorithm,
    /// Cells advanced per scheduling tick when the stateful walk is used.
    pub batch: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        TraversalConfig {
            left: 0,
            top: 0,
            right: 9,
            bottom: 9,
            start: None,
            direction: Direction::default(),
            rotation: Rotation::default(),
            algorithm: Algorithm::default(),
            batch: 16,
        }
    }
}

impl TraversalConfig {
    /// Reads the config at `path`. A missing or malformed file is replaced with the
    /// defaults, which are then returned.
    pub fn load(path: &Path) -> TraversalConfig {
        match TraversalConfig::read(path) {
            Ok(config) => {
                debug!("loaded config from {}", path.display());
                config
            }
            Err(err) => {
                warn!("Error loading config {}: {err}", path.display());
                warn!("Loading defaults");
                let config = TraversalConfig::default();
                if let Err(err) = config.save(path) {
                    error!("Error saving default config: {err}");
                }
                config
            }
        }
    }

    pub fn read(path: &Path) -> Result<TraversalConfig, Box<dyn Error>> {
        let mut file = File::open(path)?;
        Ok(serde_json::from_reader(&mut file)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let mut file = File::create(path)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        Ok(())
    }

    pub fn region(&self) -> Result<Region, SpiralError> {
        Region::new(self.left, self.top, self.right, self.bottom)
    }

    /// Rejects a start, direction or rotation the chosen algorithm would ignore.
    ///
    /// Only the stateful walk can be steered; the other two always spiral clockwise from
    /// the center heading right. A start equal to the center is accepted.
    pub fn check_orientation(&self, region: &Region) -> Result<(), SpiralError> {
        if self.algorithm == Algorithm::Stateful {
            return Ok(());
        }
        let custom_start = self.start.is_some_and(|start| start != region.center());
        if custom_start
            || self.direction != Direction::default()
            || self.rotation != Rotation::default()
        {
            return Err(SpiralError::FixedOrientation);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::{fs, path::PathBuf, time::SystemTime};

    use super::{Algorithm, TraversalConfig};
    use crate::{
        direction::{Direction, Rotation},
        error::SpiralError,
    };

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("tile-spiral-{name}-{nanos}.json"))
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TraversalConfig = serde_json::from_str(
            r#"{"right": 4, "bottom": 0, "rotation": "counter-clockwise", "start": [1, 0]}"#,
        )
        .unwrap();
        assert_eq!(config.right, 4);
        assert_eq!(config.bottom, 0);
        assert_eq!(config.rotation, Rotation::CounterClockwise);
        assert_eq!(config.start, Some((1, 0)));
        assert_eq!(config.direction, Direction::Right);
        assert_eq!(config.algorithm, Algorithm::Stateful);
        assert_eq!(config.region().unwrap().area(), 5);
    }

    #[test]
    fn test_load_missing_writes_defaults() {
        let path = temp_path("missing");
        let config = TraversalConfig::load(&path);
        assert_eq!(config, TraversalConfig::default());
        assert_eq!(TraversalConfig::read(&path).unwrap(), config);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("saved");
        let config = TraversalConfig {
            left: -3,
            algorithm: Algorithm::Fast,
            direction: Direction::Down,
            ..TraversalConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(TraversalConfig::load(&path), config);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_fixed_orientation_algorithms() {
        let config = TraversalConfig {
            right: 2,
            bottom: 2,
            algorithm: Algorithm::Fast,
            ..TraversalConfig::default()
        };
        let region = config.region().unwrap();
        assert_eq!(config.check_orientation(&region), Ok(()));

        let centered = TraversalConfig {
            start: Some((1, 1)),
            ..config.clone()
        };
        assert_eq!(centered.check_orientation(&region), Ok(()));

        let steered = [
            TraversalConfig {
                start: Some((0, 0)),
                ..config.clone()
            },
            TraversalConfig {
                rotation: Rotation::CounterClockwise,
                ..config.clone()
            },
            TraversalConfig {
                direction: Direction::Up,
                algorithm: Algorithm::Reference,
                ..config.clone()
            },
        ];
        for config in steered {
            assert_eq!(
                config.check_orientation(&region),
                Err(SpiralError::FixedOrientation)
            );
            let stateful = TraversalConfig {
                algorithm: Algorithm::Stateful,
                ..config
            };
            assert_eq!(stateful.check_orientation(&region), Ok(()));
        }
    }
}
