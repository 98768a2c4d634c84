//! UI5 version resolution
//!
//! This module fetches the versions published on the UI5 hosts or npm,
//! caches them for the lifetime of the process, and filters them into the
//! list offered to the user.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registries │────▶│    Cache    │────▶│  Pipeline   │────▶│ Maintenance │
//! │ (http, npm) │     │  (memory)   │     │  (filter)   │     │ (annotate)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │   Compare   │
//!                                         │ (ordering)  │
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: In-memory cache keyed by source
//! - [`compare`]: Numeric and presentation ordering of version strings
//! - [`error`]: Error types for source adapters
//! - [`maintenance`]: Maintenance flags, default selection and the static fallback table
//! - [`pipeline`]: Filter and reduction stages
//! - [`registry`]: Source traits
//! - [`registries`]: HTTP and npm implementations of the source traits
//! - [`service`]: The [`service::Ui5Info`] entry point
//! - [`types`]: Common types like `VersionRecord` and `FilterOptions`

pub mod cache;
pub mod compare;
pub mod error;
pub mod maintenance;
pub mod pipeline;
pub mod registries;
pub mod registry;
pub mod service;
pub mod types;
