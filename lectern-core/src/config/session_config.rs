use serde::{Deserialize, Serialize};

use super::defaults;

/// Session lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Root data directory. Learner files live under `<data_dir>/students`.
    pub data_dir: String,
    /// Class average strictly below which a concept is flagged weak.
    pub class_weak_threshold: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::DEFAULT_DATA_DIR.to_string(),
            class_weak_threshold: defaults::DEFAULT_CLASS_WEAK_THRESHOLD,
        }
    }
}
