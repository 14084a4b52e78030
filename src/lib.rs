//! # autocat - Terminal Car Catalogue
//!
//! Browse a remote car-listing API from the terminal: search by manufacturer and
//! model, filter by fuel type and production year, and page through results ten
//! at a time.
//!
//! ## Features
//!
//! - **Filter Controller**: Owns the criteria, the latest results and the request state
//! - **Batched Refresh**: Several filter changes in one step cost a single fetch
//! - **Non-blocking Fetches**: Requests run on a background worker and settle in arrival order
//! - **Terminal UI**: Card listing with details panel, search suggestions and a status line
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - API credentials and endpoint, layered from file, environment and flags
//! - [`catalogue`] - Filter criteria, records and the catalogue controller
//! - [`fetch`] - Listing fetch service and the background fetch worker
//! - [`input`] - Keyboard input state machine
//! - [`render`] - Render coordination and terminal user interface components
//! - [`app`] - Application core and component coordination

// Core modules
pub mod config;
pub mod constants;
pub mod error;

// Domain
pub mod catalogue;
pub mod fetch;

// Subsystems
pub mod input;
pub mod render;

// Core components
pub mod app;

// Re-export commonly used types for convenience
pub use error::{AutocatError, Result};

// Public API surface for external usage
pub use app::Application;
pub use catalogue::{CatalogueController, FilterCriteria};
pub use config::{ApiConfig, ConfigLayer};
pub use fetch::{HttpListingService, ListingFetchService};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
