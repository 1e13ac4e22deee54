//! Configuration system for the SLA engine.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod aggregation_config;
pub mod defaults;
pub mod fetch_config;
pub mod observability_config;
pub mod regions;
pub mod scope_config;
pub mod sla_config;
pub mod transport_config;

pub use aggregation_config::AggregationConfig;
pub use fetch_config::FetchConfig;
pub use observability_config::ObservabilityConfig;
pub use scope_config::{RegionEntry, ScopeConfig};
pub use sla_config::SlaConfig;
pub use transport_config::TransportConfig;
