//! # sla-core
//!
//! Foundation crate for the SLA availability engine.
//! Defines the domain models, errors, configuration, cancellation, and
//! tracing setup shared by the fetch and engine crates.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing_setup;

// Re-export the most commonly used types at the crate root.
pub use config::SlaConfig;
pub use errors::{SlaError, SlaResult};
pub use models::{
    Alert, AvailabilityState, HealthEvent, ImpactedService, Incident, RegionTarget, Resource,
    ServiceCategory, SlaValue,
};
pub use traits::{Cancellable, CancellationToken};
