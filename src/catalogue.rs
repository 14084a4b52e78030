//! Catalogue state: filter criteria, listing records, and the controller that owns them.

pub mod controller;
pub mod criteria;
pub mod record;

pub use controller::{CatalogueController, CatalogueView, RequestState};
pub use criteria::{FilterCriteria, FilterUpdate};
pub use record::{CarRecord, ResultSet};
