//! Congress API client for fetching record projections and bio statistics.
//!
//! This module provides a trait-based HTTP client for the two remote data
//! sources behind a card:
//!
//! - the record service, queried by id(s) plus a sparse field list
//!   (`GET {records}/v2?lang=..&id=..&field=..`)
//! - the bio service, queried by Bioguide ID (`GET {bio}/members/{id}.json`)
//!
//! Every failure is reported as [`UpstreamError`] and nothing is retried.
//!
//! # Example
//!
//! ```ignore
//! use congresscard_api::congress::{fetch_records, HttpCongressClient, Lang, MemberRecord};
//!
//! let client = HttpCongressClient::new("https://records.example.com", "https://bio.example.com", "my-api-key");
//! let members: Vec<MemberRecord> =
//!     fetch_records(&client, &["A000360".to_string()], &["firstName"], Lang::En).await?;
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::types::{BioDetail, BioResponse, Lang};
use crate::config::UpstreamConfig;

/// Errors that can occur when calling an upstream service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request URL could not be built
    #[error("invalid request URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// HTTP request failed before a response arrived (connect, TLS, timeout)
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Service answered with a non-success status
    #[error("request to {url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl UpstreamError {
    /// The URL (or request description) that failed.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url, .. }
            | Self::Transport { url, .. }
            | Self::Status { url, .. }
            | Self::Decode { url, .. } => url,
        }
    }
}

/// Trait for upstream data operations.
///
/// Use `HttpCongressClient` for real HTTP calls, or
/// `mock::MockCongressClient` in tests.
#[async_trait]
pub trait CongressApiClient: Send + Sync {
    /// Fetch the listed `fields` of each record in `ids`.
    async fn fetch_fields(
        &self,
        ids: &[String],
        fields: &[&str],
        lang: Lang,
    ) -> Result<Vec<Value>, UpstreamError>;

    /// Fetch term and voting statistics for a Bioguide ID.
    async fn fetch_bio_detail(&self, bio_id: &str) -> Result<BioDetail, UpstreamError>;

    /// Download a profile picture.
    async fn fetch_picture(&self, url: &str) -> Result<Vec<u8>, UpstreamError>;
}

/// Short description of a record request, used when a typed decode fails.
#[must_use]
pub fn describe_request(ids: &[String], fields: &[&str], lang: Lang) -> String {
    format!(
        "/v2?lang={}&id={}&field={}",
        lang.as_str(),
        ids.join(","),
        fields.join(",")
    )
}

/// Fetch records and deserialize each into `T`.
///
/// # Errors
///
/// Returns the client's [`UpstreamError`], or [`UpstreamError::Decode`] if a
/// record does not match `T`.
pub async fn fetch_records<T: DeserializeOwned>(
    client: &dyn CongressApiClient,
    ids: &[String],
    fields: &[&str],
    lang: Lang,
) -> Result<Vec<T>, UpstreamError> {
    let records = client.fetch_fields(ids, fields, lang).await?;
    records
        .into_iter()
        .map(|record| {
            serde_json::from_value(record).map_err(|e| UpstreamError::Decode {
                url: describe_request(ids, fields, lang),
                message: e.to_string(),
            })
        })
        .collect()
}

/// Fetch exactly one record.
///
/// # Errors
///
/// Same as [`fetch_records`], plus [`UpstreamError::Decode`] when the
/// service returns no record for `id`.
pub async fn fetch_record<T: DeserializeOwned>(
    client: &dyn CongressApiClient,
    id: &str,
    fields: &[&str],
    lang: Lang,
) -> Result<T, UpstreamError> {
    let ids = [id.to_string()];
    fetch_records(client, &ids, fields, lang)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| UpstreamError::Decode {
            url: describe_request(&ids, fields, lang),
            message: format!("no record returned for {id}"),
        })
}

/// HTTP-based implementation of `CongressApiClient`.
pub struct HttpCongressClient {
    client: reqwest::Client,
    records_base_url: String,
    bio_base_url: String,
    api_key: String,
}

impl HttpCongressClient {
    /// Create a new client for the given record and bio services.
    pub fn new(
        records_base_url: impl Into<String>,
        bio_base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::with_client(reqwest::Client::new(), records_base_url, bio_base_url, api_key)
    }

    /// Create a client with a custom `reqwest::Client` (for testing with custom config).
    pub fn with_client(
        client: reqwest::Client,
        records_base_url: impl Into<String>,
        bio_base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            records_base_url: records_base_url.into().trim_end_matches('/').to_string(),
            bio_base_url: bio_base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from configuration, applying the optional request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(
            builder.build()?,
            &config.records_base_url,
            &config.bio_base_url,
            &config.bio_api_key,
        ))
    }

    async fn send(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, UpstreamError> {
        tracing::debug!(%url, "upstream request");

        let response = request.send().await.map_err(|source| UpstreamError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl CongressApiClient for HttpCongressClient {
    async fn fetch_fields(
        &self,
        ids: &[String],
        fields: &[&str],
        lang: Lang,
    ) -> Result<Vec<Value>, UpstreamError> {
        let mut params: Vec<(&str, &str)> = vec![("lang", lang.as_str())];
        params.extend(ids.iter().map(|id| ("id", id.as_str())));
        params.extend(fields.iter().map(|field| ("field", *field)));

        let endpoint = format!("{}/v2", self.records_base_url);
        let url = reqwest::Url::parse_with_params(&endpoint, &params).map_err(|e| {
            UpstreamError::InvalidUrl {
                url: endpoint.clone(),
                message: e.to_string(),
            }
        })?;

        let response = self.send(url.as_str(), self.client.get(url.clone())).await?;
        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| UpstreamError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    async fn fetch_bio_detail(&self, bio_id: &str) -> Result<BioDetail, UpstreamError> {
        let url = format!("{}/members/{}.json", self.bio_base_url, bio_id);

        let response = self
            .send(&url, self.client.get(&url).header("X-API-Key", &self.api_key))
            .await?;

        let body: BioResponse = response.json().await.map_err(|e| UpstreamError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;

        body.results
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::Decode {
                url,
                message: "response has no results".to_string(),
            })
    }

    async fn fetch_picture(&self, url: &str) -> Result<Vec<u8>, UpstreamError> {
        let response = self.send(url, self.client.get(url)).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Transport {
                url: url.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! In-memory record store for unit and pipeline tests.

    use super::{describe_request, CongressApiClient, UpstreamError};
    use crate::congress::types::{BioDetail, Lang};
    use async_trait::async_trait;
    use serde_json::{Map, Value};
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// One recorded `fetch_fields` call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FetchCall {
        pub ids: Vec<String>,
        pub fields: Vec<String>,
        pub lang: Lang,
    }

    /// Mock implementation of `CongressApiClient`.
    ///
    /// Seed it with full records via `insert_record`; `fetch_fields` returns
    /// the requested projection of each known id (unknown ids are skipped,
    /// as the real service does). Ids registered with `fail_on` make any
    /// request that includes them fail with a 500.
    pub struct MockCongressClient {
        records: Mutex<HashMap<String, Value>>,
        bio_details: Mutex<HashMap<String, BioDetail>>,
        pictures: Mutex<HashMap<String, Vec<u8>>>,
        failing_ids: Mutex<HashSet<String>>,
        fetch_calls: Mutex<Vec<FetchCall>>,
        picture_calls: Mutex<Vec<String>>,
    }

    impl MockCongressClient {
        pub fn new() -> Self {
            Self {
                records: Mutex::new(HashMap::new()),
                bio_details: Mutex::new(HashMap::new()),
                pictures: Mutex::new(HashMap::new()),
                failing_ids: Mutex::new(HashSet::new()),
                fetch_calls: Mutex::new(Vec::new()),
                picture_calls: Mutex::new(Vec::new()),
            }
        }

        /// Store a record; it must carry a string `_id`.
        pub fn insert_record(&self, record: Value) {
            let id = record["_id"].as_str().unwrap().to_string();
            self.records.lock().unwrap().insert(id, record);
        }

        pub fn set_bio_detail(&self, bio_id: &str, detail: BioDetail) {
            self.bio_details
                .lock()
                .unwrap()
                .insert(bio_id.to_string(), detail);
        }

        pub fn set_picture(&self, url: &str, bytes: Vec<u8>) {
            self.pictures.lock().unwrap().insert(url.to_string(), bytes);
        }

        /// Fail every request that includes `id`.
        pub fn fail_on(&self, id: &str) {
            self.failing_ids.lock().unwrap().insert(id.to_string());
        }

        /// All `fetch_fields` calls, in order.
        pub fn fetch_calls(&self) -> Vec<FetchCall> {
            self.fetch_calls.lock().unwrap().clone()
        }

        /// All picture URLs requested, in order.
        pub fn picture_calls(&self) -> Vec<String> {
            self.picture_calls.lock().unwrap().clone()
        }
    }

    impl Default for MockCongressClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CongressApiClient for MockCongressClient {
        async fn fetch_fields(
            &self,
            ids: &[String],
            fields: &[&str],
            lang: Lang,
        ) -> Result<Vec<Value>, UpstreamError> {
            self.fetch_calls.lock().unwrap().push(FetchCall {
                ids: ids.to_vec(),
                fields: fields.iter().map(|f| (*f).to_string()).collect(),
                lang,
            });

            let failing = self.failing_ids.lock().unwrap();
            if ids.iter().any(|id| failing.contains(id)) {
                return Err(UpstreamError::Status {
                    url: format!("mock://records{}", describe_request(ids, fields, lang)),
                    status: 500,
                    body: "{\"error\":\"Internal server error\"}".to_string(),
                });
            }

            let records = self.records.lock().unwrap();
            Ok(ids
                .iter()
                .filter_map(|id| records.get(id))
                .map(|record| {
                    let mut projection = Map::new();
                    projection.insert("_id".to_string(), record["_id"].clone());
                    for field in fields {
                        if let Some(value) = record.get(*field) {
                            projection.insert((*field).to_string(), value.clone());
                        }
                    }
                    Value::Object(projection)
                })
                .collect())
        }

        async fn fetch_bio_detail(&self, bio_id: &str) -> Result<BioDetail, UpstreamError> {
            self.bio_details
                .lock()
                .unwrap()
                .get(bio_id)
                .cloned()
                .ok_or_else(|| UpstreamError::Status {
                    url: format!("mock://bio/members/{bio_id}.json"),
                    status: 404,
                    body: String::new(),
                })
        }

        async fn fetch_picture(&self, url: &str) -> Result<Vec<u8>, UpstreamError> {
            self.picture_calls.lock().unwrap().push(url.to_string());
            self.pictures
                .lock()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| UpstreamError::Status {
                    url: url.to_string(),
                    status: 404,
                    body: String::new(),
                })
        }
    }
}
