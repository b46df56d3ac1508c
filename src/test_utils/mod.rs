#![allow(missing_docs)]

pub(crate) mod fixtures;
pub(crate) mod html;
pub(crate) mod stores;

pub(crate) use fixtures::{
    generated_records, march_example_records, sample_records, seed_file, seeded_state,
    state_with_seed_file, state_with_store, store_with,
};
pub(crate) use html::assert_valid_html;
pub(crate) use stores::{FailingStore, ShiftingStore};
