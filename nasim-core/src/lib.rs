//! # NASim Core
//!
//! Host state model for a network attack simulation.
//!
//! Each simulated machine is a [`Host`] with a fixed fingerprint (address,
//! OS, services, value) and mutable mission state (compromised, reachable,
//! discovered). Hosts resolve attacker [`Action`]s into
//! [`ActionObservation`]s and expose their state to a learning agent as a
//! fixed-width numeric vector, optionally masked for partial observability.
//!
//! ## Core Concepts
//!
//! - **Host**: authoritative state and action resolution
//! - **HostVector**: the numeric view of a host, kept in lockstep with it
//! - **Action**: service scan, OS scan or exploit aimed at one host
//! - **Scenario**: hosts described as JSON data
//!
//! ## Example
//!
//! ```rust
//! use nasim_core::{Action, Address, Host, ObservationMask};
//!
//! let mut host = Host::builder(Address::new(1, 0))
//!     .service("ssh", true)
//!     .os("linux", true)
//!     .value(10.0)
//!     .build()
//!     .unwrap();
//!
//! let obs = host
//!     .perform_action(&Action::exploit(host.address(), "ssh", None))
//!     .unwrap();
//! assert_eq!(obs.value, 10.0);
//!
//! let view = host.observe(ObservationMask { compromised: true, ..Default::default() });
//! assert_eq!(view.len(), host.state_size());
//! ```

pub mod action;
pub mod address;
pub mod error;
pub mod host;
pub mod observation;
pub mod scenario;
pub mod vector;

pub use action::{Action, ActionKind};
pub use address::Address;
pub use error::{HostError, Result};
pub use host::{Host, HostBuilder, HostStatus, StatusChange};
pub use observation::{ActionObservation, CapabilityMap};
pub use scenario::{HostConfig, Scenario, ScenarioConfig};
pub use vector::{HostVector, ObservationMask, ReadableHost};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
