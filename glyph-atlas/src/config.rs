use crate::{
    atlas::{AtlasOptions, DEFAULT_REFERENCE_CHAR},
    error::{AtlasError, AtlasResult},
    header::DEFAULT_DRIVER_HEADER,
    intervals::{CodepointInterval, DEFAULT_INTERVALS, IntervalPlan},
    source::DEFAULT_DPI,
};
use log::error;
use serde::{Deserialize, Serialize};
use std::{fs::read_to_string, path::Path};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub dpi: u32,
    pub reference_char: char,
    pub driver_header: String,
    pub intervals: Vec<CodepointInterval>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            reference_char: DEFAULT_REFERENCE_CHAR,
            driver_header: DEFAULT_DRIVER_HEADER.to_string(),
            intervals: DEFAULT_INTERVALS.to_vec(),
        }
    }
}

impl AtlasConfig {
    pub fn new_from_file<P: AsRef<Path>>(path: P) -> AtlasResult<Self> {
        let path = path.as_ref();
        let config_err = |reason: String| AtlasError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let config_file = match read_to_string(path) {
            Ok(f) => f,
            Err(e) => {
                error!("Failed to read config file: {}", e);
                return Err(config_err(e.to_string()));
            }
        };

        match toml::from_str(&config_file) {
            Ok(c) => Ok(c),
            Err(e) => {
                error!("Failed to parse config file: {}", e);
                Err(config_err(e.to_string()))
            }
        }
    }

    pub fn plan(&self) -> AtlasResult<IntervalPlan> {
        IntervalPlan::new(self.intervals.clone())
    }

    pub fn atlas_options(&self, compress: bool) -> AtlasOptions {
        AtlasOptions {
            compress,
            reference_char: self.reference_char,
        }
    }
}
