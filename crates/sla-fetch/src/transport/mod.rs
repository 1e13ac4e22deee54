//! Transport layer: resource-graph wire protocol and the HTTP query service.

#[cfg(feature = "http")]
pub mod http_client;
pub mod protocol;

#[cfg(feature = "http")]
pub use http_client::HttpQueryService;
pub use protocol::{
    classify, decode_page, error_detail, GraphError, GraphErrorBody, GraphOptions, GraphRequest,
    GraphResponse,
};
