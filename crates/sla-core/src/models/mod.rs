//! Domain models. Everything here is created fresh per run and read-only
//! once retrieved.

pub mod alert;
pub mod category;
pub mod health_event;
pub mod incident;
pub mod region;
pub mod resource;
pub mod sla_value;

pub use alert::Alert;
pub use category::ServiceCategory;
pub use health_event::{AvailabilityState, HealthEvent};
pub use incident::{ImpactedService, Incident};
pub use region::RegionTarget;
pub use resource::Resource;
pub use sla_value::SlaValue;
