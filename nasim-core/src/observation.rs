//! Result of performing an action against a host

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name -> active map used for both services and OS fingerprints
pub type CapabilityMap = BTreeMap<String, bool>;

/// What the attacker learns from a single action
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionObservation {
    /// Whether the action succeeded
    pub success: bool,
    /// Reward released by the action
    pub value: f64,
    /// Service fingerprint, when the action revealed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<CapabilityMap>,
    /// OS fingerprint, when the action revealed it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<CapabilityMap>,
}

impl ActionObservation {
    /// Successful action that reveals nothing yet
    pub fn success(value: f64) -> Self {
        Self {
            success: true,
            value,
            ..Default::default()
        }
    }

    /// Failed action: no reward, nothing revealed
    pub fn failure() -> Self {
        Self::default()
    }

    /// Attach the revealed services
    pub fn with_services(mut self, services: &CapabilityMap) -> Self {
        self.services = Some(services.clone());
        self
    }

    /// Attach the revealed OS map
    pub fn with_os(mut self, os: &CapabilityMap) -> Self {
        self.os = Some(os.clone());
        self
    }
}
