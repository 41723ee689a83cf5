//! The game's `settings.csv` file.
//!
//! The first line is a header and is skipped. Every other line is `KEY,VALUE`, split at
//! the first comma. Lines without a comma are ignored and a repeated key keeps its last
//! value.

use fnv::FnvHashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::errors::*;

pub const SETTINGS_FILE: &str = "settings.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub maze_width: usize,
    pub maze_height: usize,
    pub cell_size: u32,
    pub player_speed: f32,
    /// Load the previously saved maze instead of generating a new one.
    pub const_maze: bool,
    pub plane_width_cm: Option<f32>,
    pub plane_height_cm: Option<f32>,
    pub distance_cm: Option<f32>,
    /// Seed for a reproducible maze, otherwise every run is different.
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).chain_err(|| format!("Failed to open settings file {}", path.display()))?;
        Settings::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Settings> {
        let values = key_values(text);

        let settings = Settings {
            maze_width: required(&values, "MAZE_WIDTH")?,
            maze_height: required(&values, "MAZE_HEIGHT")?,
            cell_size: required(&values, "CELL_SIZE")?,
            player_speed: required(&values, "PLAYER_SPEED")?,
            const_maze: required::<f32>(&values, "CONST_MAZE")? != 0.0,
            plane_width_cm: optional(&values, "PLANE_WIDTH_CM")?,
            plane_height_cm: optional(&values, "PLANE_HEIGHT_CM")?,
            distance_cm: optional(&values, "DISTANCE_CM")?,
            seed: optional(&values, "SEED")?,
        };

        if settings.cell_size == 0 {
            bail!(ErrorKind::InvalidSetting("CELL_SIZE".to_string(), "0".to_string()));
        }
        Ok(settings)
    }
}

type SettingsMap<'a> = FnvHashMap<&'a str, &'a str>;

fn key_values(text: &str) -> SettingsMap {
    let mut values = SettingsMap::default();
    for line in text.lines().skip(1) {
        if let Some(comma) = line.find(',') {
            let (key, value) = (&line[..comma], &line[comma + 1..]);
            values.insert(key.trim(), value.trim());
        }
    }
    values
}

fn optional<T: FromStr>(values: &SettingsMap, key: &str) -> Result<Option<T>> {
    match values.get(key) {
        Some(raw) => {
            raw.parse::<T>()
                .map(Some)
                .map_err(|_| ErrorKind::InvalidSetting(key.to_string(), raw.to_string()).into())
        }
        None => Ok(None),
    }
}

fn required<T: FromStr>(values: &SettingsMap, key: &str) -> Result<T> {
    optional(values, key)?.ok_or_else(|| ErrorKind::MissingSetting(key.to_string()).into())
}
