use std::path::Path;

use orienteer_core::CellScale;
use orienteer_paths::{PlanConfig, SearchConfig, SeasonalConfig};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::io::read_text;

/// Settings read from `--config`. Every section may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cell_scale: CellScale,
    pub search: SearchConfig,
    pub seasonal: SeasonalConfig,
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        Self::from_toml(&read_text(path)?)
    }

    pub fn plan_config(&self) -> PlanConfig {
        PlanConfig {
            search: self.search.clone(),
            seasonal: self.seasonal.clone(),
        }
    }
}
