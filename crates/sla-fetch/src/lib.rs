//! # sla-fetch
//!
//! Drains large, cursor-limited result sets from a remote query service.
//! Offset paging runs up to a fixed ceiling, continuation-token paging takes
//! over beyond it, and every page request is retried with backoff. A fetch
//! never discards pages it already holds: failures degrade the result
//! instead of erroring.

pub mod cursor;
pub mod fetcher;
pub mod memory;
pub mod query;
pub mod retry;
pub mod service;
pub mod transport;

pub use cursor::{CursorStep, FetchPhase, PaginationCursor};
pub use fetcher::{FetchOutcome, FetchResult, PagedFetcher};
pub use memory::MemoryQueryService;
pub use query::{QueryBuilder, SortOrder};
pub use retry::RetryPolicy;
pub use service::{PagePosition, QueryPage, QueryRequest, QueryService};
