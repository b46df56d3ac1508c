//! Parsing the seed dataset into transaction records.

use std::collections::HashSet;

use serde::Deserialize;
use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::{Error, database_id::TransactionId, transaction::TransactionRecord};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// A transaction as it appears in the seed dataset.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedRecord {
    id: TransactionId,
    title: String,
    price: f64,
    description: String,
    category: String,
    #[serde(default)]
    image: String,
    sold: bool,
    date_of_sale: String,
}

/// Parse a JSON array of seed records.
///
/// Sale dates may be RFC 3339 timestamps, in which case the calendar date in
/// the timestamp's own offset is used, or plain `YYYY-MM-DD` dates.
///
/// # Errors
/// Returns an [Error::SeedFormat] if `body` is not a JSON array of records,
/// or if a record has a duplicate ID, a negative or non-finite price, or an
/// unparseable sale date.
pub fn parse_seed_records(body: &[u8]) -> Result<Vec<TransactionRecord>, Error> {
    let seed_records: Vec<SeedRecord> = serde_json::from_slice(body)
        .map_err(|error| Error::SeedFormat(format!("expected a JSON array of records: {error}")))?;

    let mut seen_ids = HashSet::with_capacity(seed_records.len());

    seed_records
        .into_iter()
        .map(|record| {
            if !seen_ids.insert(record.id) {
                return Err(Error::SeedFormat(format!("duplicate ID {}", record.id)));
            }

            if !record.price.is_finite() || record.price < 0.0 {
                return Err(Error::SeedFormat(format!(
                    "record {} has an invalid price {}",
                    record.id, record.price
                )));
            }

            let date_of_sale = parse_sale_date(&record.date_of_sale).ok_or_else(|| {
                Error::SeedFormat(format!(
                    "record {} has an invalid sale date \"{}\"",
                    record.id, record.date_of_sale
                ))
            })?;

            Ok(TransactionRecord {
                id: record.id,
                title: record.title,
                description: record.description,
                category: record.category,
                price: record.price,
                date_of_sale,
                sold: record.sold,
                image: record.image,
            })
        })
        .collect()
}

fn parse_sale_date(raw: &str) -> Option<Date> {
    OffsetDateTime::parse(raw, &Rfc3339)
        .map(|date_time| date_time.date())
        .or_else(|_| Date::parse(raw, DATE_FORMAT))
        .ok()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::Error;

    use super::parse_seed_records;

    #[test]
    fn parses_dataset_records() {
        let body = br#"[
            {
                "id": 1,
                "title": "Fjallraven  - Foldsack No. 1 Backpack, Fits 15 Laptops",
                "price": 329.85,
                "description": "Your perfect pack for everyday use and walks in the forest.",
                "category": "men's clothing",
                "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
                "sold": false,
                "dateOfSale": "2021-11-27T20:29:54+05:30"
            },
            {
                "id": 2,
                "title": "Mens Casual Premium Slim Fit T-Shirts",
                "price": 44.6,
                "description": "Slim-fitting style",
                "category": "men's clothing",
                "sold": true,
                "dateOfSale": "2022-03-01"
            }
        ]"#;

        let got = parse_seed_records(body).unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].date_of_sale, date!(2021 - 11 - 27));
        assert_eq!(got[0].price, 329.85);
        assert!(!got[0].sold);
        assert_eq!(got[1].date_of_sale, date!(2022 - 03 - 01));
        assert_eq!(got[1].image, "");
    }

    #[test]
    fn uses_the_date_in_the_timestamps_offset() {
        let body = br#"[{"id": 1, "title": "t", "price": 1, "description": "", "category": "c",
            "sold": true, "dateOfSale": "2022-03-31T23:30:00-05:00"}]"#;

        let got = parse_seed_records(body).unwrap();

        assert_eq!(got[0].date_of_sale, date!(2022 - 03 - 31));
    }

    #[test]
    fn rejects_non_array() {
        let got = parse_seed_records(br#"{"message": "Access Denied"}"#);

        assert!(matches!(got, Err(Error::SeedFormat(_))));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let body = br#"[
            {"id": 1, "title": "a", "price": 1, "description": "", "category": "c", "sold": true, "dateOfSale": "2022-03-01"},
            {"id": 1, "title": "b", "price": 2, "description": "", "category": "c", "sold": true, "dateOfSale": "2022-03-02"}
        ]"#;

        let got = parse_seed_records(body);

        assert!(matches!(got, Err(Error::SeedFormat(message)) if message.contains("duplicate")));
    }

    #[test]
    fn rejects_negative_price() {
        let body = br#"[{"id": 1, "title": "a", "price": -1, "description": "", "category": "c",
            "sold": true, "dateOfSale": "2022-03-01"}]"#;

        assert!(matches!(
            parse_seed_records(body),
            Err(Error::SeedFormat(_))
        ));
    }

    #[test]
    fn rejects_invalid_date() {
        let body = br#"[{"id": 1, "title": "a", "price": 1, "description": "", "category": "c",
            "sold": true, "dateOfSale": "2022-13-01"}]"#;

        assert!(matches!(
            parse_seed_records(body),
            Err(Error::SeedFormat(message)) if message.contains("2022-13-01")
        ));
    }
}
