//! Actions an attacker can perform against a host

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::Address;

/// What an action does when it reaches its target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// Reveal which services the host runs
    ServiceScan,
    /// Reveal which OS the host runs
    OsScan,
    /// Attempt to compromise the host through a service
    Exploit {
        /// Service the exploit targets
        service: String,
        /// OS the exploit requires, `None` for OS-independent exploits
        #[serde(default)]
        os: Option<String>,
    },
}

/// An action directed at a single host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Address of the targeted host
    pub target: Address,

    /// Cost charged to the attacker by the environment, never negative
    #[serde(default = "default_cost", deserialize_with = "deserialize_cost")]
    pub cost: f64,

    /// The action itself
    #[serde(flatten)]
    pub kind: ActionKind,
}

fn default_cost() -> f64 {
    1.0
}

fn clamp_cost(cost: f64) -> f64 {
    cost.max(0.0)
}

fn deserialize_cost<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(clamp_cost)
}

impl Action {
    pub fn service_scan(target: Address) -> Self {
        Self {
            target,
            cost: default_cost(),
            kind: ActionKind::ServiceScan,
        }
    }

    pub fn os_scan(target: Address) -> Self {
        Self {
            target,
            cost: default_cost(),
            kind: ActionKind::OsScan,
        }
    }

    /// Create an exploit against `service`, optionally requiring `os`
    pub fn exploit(target: Address, service: &str, os: Option<&str>) -> Self {
        Self {
            target,
            cost: default_cost(),
            kind: ActionKind::Exploit {
                service: service.to_string(),
                os: os.map(str::to_string),
            },
        }
    }

    /// Set the cost
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = clamp_cost(cost);
        self
    }

    pub fn is_service_scan(&self) -> bool {
        matches!(self.kind, ActionKind::ServiceScan)
    }

    pub fn is_os_scan(&self) -> bool {
        matches!(self.kind, ActionKind::OsScan)
    }

    pub fn is_exploit(&self) -> bool {
        matches!(self.kind, ActionKind::Exploit { .. })
    }

    /// Targeted service, for exploits
    pub fn service(&self) -> Option<&str> {
        match &self.kind {
            ActionKind::Exploit { service, .. } => Some(service),
            _ => None,
        }
    }

    /// Required OS, for exploits that have one
    pub fn os(&self) -> Option<&str> {
        match &self.kind {
            ActionKind::Exploit { os, .. } => os.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ActionKind::ServiceScan => write!(f, "ServiceScan: target={}", self.target),
            ActionKind::OsScan => write!(f, "OSScan: target={}", self.target),
            ActionKind::Exploit { service, os } => write!(
                f,
                "Exploit: target={}, service={}, os={}",
                self.target,
                service,
                os.as_deref().unwrap_or("None")
            ),
        }
    }
}
