//! History enrichment - fetches track metadata from the remote catalog and
//! joins it onto play events.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain errors** (`domain.rs`) - what can go wrong talking to the catalog
//! - **API DTOs** (`spotify/dto.rs`) - Exact API response shapes
//! - **Adapters** (`spotify/adapter.rs`) - Convert DTOs to [`crate::model`] types
//! - **Clients** (`spotify/auth.rs`, `spotify/client.rs`) - HTTP clients
//! - **Traits** (`traits.rs`) - Seams for substituting mock clients
//! - **Fetch / Join** - Batched lookup and the metadata join
//! - **Service** - High-level orchestration of the pipeline
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::{EnrichmentService, EnrichmentConfig};
//!
//! let config = EnrichmentConfig {
//!     client_id: "your-client-id".to_string(),
//!     client_secret: "your-client-secret".to_string(),
//!     ..Default::default()
//! };
//! let service = EnrichmentService::new(config)?;
//!
//! let mut sink = AppendFileSink::new("extended-output.csv");
//! let summary = service.run(&FileSource::new("extended.csv"), &mut sink).await?;
//! println!("Wrote {} rows", summary.written);
//! ```

pub mod domain;
pub mod fetch;
pub mod join;
pub mod service;
pub mod spotify;
pub mod traits;

pub use domain::EnrichmentError;
pub use fetch::{MAX_BATCH_SIZE, fetch_metadata};
pub use join::join;
pub use service::{EnrichmentConfig, EnrichmentService, RunSummary};
