//! Seeding the transaction store from a JSON dataset.

mod endpoint;
mod loader;
mod records;
mod source;

pub use endpoint::{SeedSummary, initialize_endpoint};
pub use loader::seed_from_source;
pub use records::parse_seed_records;
pub use source::{DEFAULT_SEED_URI, SeedSource};
