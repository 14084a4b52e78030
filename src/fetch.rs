//! Listing retrieval: the service contract, its HTTP implementation, and the
//! background worker that runs fetches for the event loop.

pub mod http;
pub mod service;
pub mod worker;

pub use http::HttpListingService;
pub use service::ListingFetchService;
pub use worker::fetch_worker_loop;
