//! Mechanism configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::joint::JointConfig;

/// Root configuration structure: every joint of one mechanism.
#[derive(Debug, Clone, Deserialize)]
pub struct MechanismConfig {
    /// Named joint configurations.
    pub joints: FnvIndexMap<String<32>, JointConfig, 8>,
}

impl MechanismConfig {
    /// Get a joint configuration by key.
    pub fn joint(&self, name: &str) -> Option<&JointConfig> {
        self.joints
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all joint keys, in declaration order.
    pub fn joint_names(&self) -> impl Iterator<Item = &str> {
        self.joints.keys().map(|s| s.as_str())
    }
}

impl Default for MechanismConfig {
    fn default() -> Self {
        Self {
            joints: FnvIndexMap::new(),
        }
    }
}
