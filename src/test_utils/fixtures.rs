use std::{io::Write, path::PathBuf, sync::Arc};

use tempfile::NamedTempFile;
use time::{Date, Month, macros::date};

use crate::{
    AppState, PaginationConfig, SeedSource,
    transaction::{InMemoryTransactionStore, TransactionRecord, TransactionStore},
};

const CATEGORIES: [&str; 4] = [
    "electronics",
    "jewelery",
    "men's clothing",
    "women's clothing",
];

/// A small hand-written dataset, sorted by ID.
///
/// March has four records, two of which mention "shirt". November has a
/// single "electronics" record and August has none.
pub(crate) fn sample_records() -> Vec<TransactionRecord> {
    vec![
        TransactionRecord::build(
            1,
            "Mens Casual Premium Slim Fit T-Shirts",
            22.3,
            date!(2022 - 03 - 15),
        )
        .description("Slim-fitting style, contrast raglan long sleeve.")
        .category("men's clothing")
        .sold(true)
        .finish(),
        TransactionRecord::build(
            2,
            "Fjallraven Foldsack No. 1 Backpack",
            109.95,
            date!(2021 - 03 - 27),
        )
        .description("Your perfect pack for everyday use and walks in the forest.")
        .category("men's clothing")
        .image("https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg")
        .finish(),
        TransactionRecord::build(3, "Mens Cotton Jacket", 55.99, date!(2022 - 03 - 05))
            .description("Great outerwear jacket to wear over a SHIRT in spring or autumn.")
            .category("men's clothing")
            .sold(true)
            .finish(),
        TransactionRecord::build(4, "Solid Gold Petite Micropave", 168.0, date!(2021 - 06 - 10))
            .description("Satisfaction guaranteed.")
            .category("jewelery")
            .sold(true)
            .finish(),
        TransactionRecord::build(
            5,
            "WD 2TB Elements Portable External Hard Drive",
            64.0,
            date!(2021 - 11 - 20),
        )
        .description("USB 3.0 and USB 2.0 compatibility.")
        .category("electronics")
        .finish(),
        TransactionRecord::build(
            6,
            "Opna Women's Short Sleeve Moisture",
            7.95,
            date!(2022 - 01 - 08),
        )
        .description("100% polyester, machine wash.")
        .category("women's clothing")
        .sold(true)
        .finish(),
        TransactionRecord::build(
            7,
            "Samsung 49-Inch Curved Gaming Monitor",
            999.99,
            date!(2022 - 03 - 21),
        )
        .description("49 inch super ultrawide 32:9 curved gaming monitor.")
        .category("electronics")
        .sold(true)
        .finish(),
        TransactionRecord::build(
            8,
            "DANVOUY Womens T Shirt Casual Cotton Short",
            12.99,
            date!(2022 - 09 - 30),
        )
        .description("95% cotton, 5% spandex.")
        .category("women's clothing")
        .finish(),
        TransactionRecord::build(
            9,
            "John Hardy Women's Legends Naga Bracelet",
            695.0,
            date!(2021 - 12 - 02),
        )
        .description("From our Legends Collection.")
        .category("jewelery")
        .finish(),
    ]
}

/// The two March records used in the worked example: one sold at 50 and one
/// unsold at 150.
pub(crate) fn march_example_records() -> Vec<TransactionRecord> {
    vec![
        TransactionRecord::build(1, "Sold product", 50.0, date!(2023 - 03 - 01))
            .category("electronics")
            .sold(true)
            .finish(),
        TransactionRecord::build(2, "Unsold product", 150.0, date!(2023 - 03 - 15))
            .category("jewelery")
            .finish(),
    ]
}

/// `count` records with IDs from 1, spread over every month of two years.
///
/// Every title contains "product".
pub(crate) fn generated_records(count: i64) -> Vec<TransactionRecord> {
    (1..=count)
        .map(|id| {
            let month = Month::try_from(((id - 1) % 12 + 1) as u8).unwrap();
            let day = (id % 28 + 1) as u8;
            let year = 2021 + (id % 2) as i32;
            let date = Date::from_calendar_date(year, month, day).unwrap();

            TransactionRecord::build(
                id,
                &format!("Generated product {id}"),
                (id * 37 % 1100) as f64 + 0.99,
                date,
            )
            .description("A generated product for testing.")
            .category(CATEGORIES[id as usize % CATEGORIES.len()])
            .sold(id % 3 != 0)
            .finish()
        })
        .collect()
}

pub(crate) fn store_with(records: Vec<TransactionRecord>) -> InMemoryTransactionStore {
    let store = InMemoryTransactionStore::new();
    store
        .replace_all(records)
        .expect("Could not populate test store");
    store
}

/// Write `records` to a temporary file in the seed dataset format.
pub(crate) fn seed_file(records: &[TransactionRecord]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Could not create seed file");
    let json = serde_json::to_vec(records).expect("Could not serialize records");
    file.write_all(&json).expect("Could not write seed file");
    file
}

/// An empty in-memory store whose seed source is a file containing `records`.
///
/// The file is deleted when the returned [NamedTempFile] is dropped.
pub(crate) fn state_with_seed_file(records: &[TransactionRecord]) -> (AppState, NamedTempFile) {
    let file = seed_file(records);
    let state = AppState::new(
        Arc::new(InMemoryTransactionStore::new()),
        SeedSource::File(file.path().to_owned()),
        PaginationConfig::default(),
    );

    (state, file)
}

/// An in-memory store already holding `records`.
pub(crate) fn seeded_state(records: Vec<TransactionRecord>) -> AppState {
    state_with_store(Arc::new(store_with(records)))
}

/// State backed by `store`, with a seed source that is never read.
pub(crate) fn state_with_store(store: Arc<dyn TransactionStore>) -> AppState {
    AppState::new(
        store,
        SeedSource::File(PathBuf::from("unused-seed.json")),
        PaginationConfig::default(),
    )
}
