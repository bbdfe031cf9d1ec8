//! Host addressing
//!
//! Hosts are identified by the subnet they live in and their index within it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-part host identifier: `(subnet, id)`
///
/// Serialized as a two element array so scenario files can write `[1, 0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct Address {
    /// Subnet the host belongs to
    pub subnet: u32,
    /// Index of the host within its subnet
    pub id: u32,
}

impl Address {
    pub fn new(subnet: u32, id: u32) -> Self {
        Self { subnet, id }
    }
}

impl From<(u32, u32)> for Address {
    fn from((subnet, id): (u32, u32)) -> Self {
        Self { subnet, id }
    }
}

impl From<Address> for (u32, u32) {
    fn from(address: Address) -> Self {
        (address.subnet, address.id)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.subnet, self.id)
    }
}
