//! Where seed data comes from.

use std::{fmt::Display, path::PathBuf, time::Duration};

use crate::Error;

/// The public product transaction dataset the dashboard was built around.
pub const DEFAULT_SEED_URI: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// A location to read a JSON array of transactions from.
#[derive(Debug, Clone)]
pub enum SeedSource {
    /// Fetch the data with a GET request.
    Http {
        /// The client used for the request, configured with a timeout.
        client: reqwest::Client,
        /// The http or https URL of the data.
        url: String,
    },
    /// Read the data from a local file.
    File(PathBuf),
}

impl SeedSource {
    /// Create a source from a URI.
    ///
    /// `http://` and `https://` URIs are fetched over the network with the
    /// given `timeout`; `file://` URIs and URIs without a scheme are treated as
    /// file paths.
    ///
    /// # Errors
    /// Returns an [Error::UnsupportedSeedUri] for any other scheme, or an
    /// [Error::SeedFetch] if the HTTP client could not be created.
    pub fn from_uri(uri: &str, timeout: Duration) -> Result<Self, Error> {
        let uri = uri.trim();

        if uri.starts_with("http://") || uri.starts_with("https://") {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|error| Error::SeedFetch(error.to_string()))?;

            return Ok(Self::Http {
                client,
                url: uri.to_owned(),
            });
        }

        if let Some(path) = uri.strip_prefix("file://") {
            return Ok(Self::File(PathBuf::from(path)));
        }

        if uri.is_empty() || uri.contains("://") {
            return Err(Error::UnsupportedSeedUri(uri.to_owned()));
        }

        Ok(Self::File(PathBuf::from(uri)))
    }

    /// Read the raw seed data.
    ///
    /// # Errors
    /// Returns an [Error::SeedFetch] if the server could not be reached,
    /// responded with an error status, or if the file could not be read.
    pub async fn fetch(&self) -> Result<Vec<u8>, Error> {
        match self {
            Self::Http { client, url } => {
                let response = client
                    .get(url)
                    .send()
                    .await
                    .and_then(|response| response.error_for_status())
                    .map_err(|error| Error::SeedFetch(error.to_string()))?;

                let body = response
                    .bytes()
                    .await
                    .map_err(|error| Error::SeedFetch(error.to_string()))?;

                Ok(body.to_vec())
            }
            Self::File(path) => tokio::fs::read(path)
                .await
                .map_err(|error| Error::SeedFetch(format!("{}: {error}", path.display()))),
        }
    }
}

impl Display for SeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http { url, .. } => write!(f, "{url}"),
            Self::File(path) => write!(f, "file://{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use crate::Error;

    use super::{DEFAULT_SEED_URI, SeedSource};

    const TIMEOUT: Duration = Duration::from_secs(1);

    #[test]
    fn http_uris_are_fetched_over_the_network() {
        let source = SeedSource::from_uri(DEFAULT_SEED_URI, TIMEOUT).unwrap();

        assert!(matches!(source, SeedSource::Http { ref url, .. } if url == DEFAULT_SEED_URI));
        assert_eq!(source.to_string(), DEFAULT_SEED_URI);
    }

    #[test]
    fn file_uris_and_bare_paths_are_files() {
        let from_uri = SeedSource::from_uri("file:///tmp/seed.json", TIMEOUT).unwrap();
        let from_path = SeedSource::from_uri("data/seed.json", TIMEOUT).unwrap();

        let (SeedSource::File(uri_path), SeedSource::File(bare_path)) = (from_uri, from_path) else {
            panic!("want file sources");
        };
        assert_eq!(uri_path, PathBuf::from("/tmp/seed.json"));
        assert_eq!(bare_path, PathBuf::from("data/seed.json"));
    }

    #[test]
    fn rejects_other_schemes() {
        let got = SeedSource::from_uri("ftp://example.com/seed.json", TIMEOUT);

        assert!(matches!(got, Err(Error::UnsupportedSeedUri(_))));
    }

    #[tokio::test]
    async fn missing_file_is_a_fetch_error() {
        let source = SeedSource::File(PathBuf::from("/definitely/not/here.json"));

        let got = source.fetch().await;

        assert!(matches!(got, Err(Error::SeedFetch(_))));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_fetch_error() {
        // Port 9 (discard) on localhost is not expected to accept connections.
        let source = SeedSource::from_uri("http://127.0.0.1:9/seed.json", TIMEOUT).unwrap();

        let got = source.fetch().await;

        assert!(matches!(got, Err(Error::SeedFetch(_))));
    }
}
