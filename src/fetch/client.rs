//! HTTP fetch client for the public-bots listing API
//!
//! Every request carries the same fixed header set plus a fresh `Fingerprint`
//! token. Failures of any kind (network, non-2xx status, undecodable body) are
//! logged and collapse to `None`; nothing is raised to the caller.
//!
//! ## API Reference
//!
//! Endpoint: `{api_base}/profile/public-bots?userId={id}&page={n}&pageSize={size}`
//! Returns: `{ "result": { "records": [...], "page": n, "pages": m } }`

use {
    super::PageSource,
    crate::{
        config::GalleryConfig,
        model::{PageEnvelope, PageResult},
    },
    async_trait::async_trait,
    rand::Rng,
    serde::de::DeserializeOwned,
};

const FINGERPRINT_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FINGERPRINT_LEN: usize = 26;

/// Generate a per-request fingerprint token (26 base-36 characters).
///
/// Only meant to vary between requests; it is not a security token.
pub fn generate_fingerprint() -> String {
    let mut rng = rand::thread_rng();
    (0..FINGERPRINT_LEN)
        .map(|_| FINGERPRINT_ALPHABET[rng.gen_range(0..FINGERPRINT_ALPHABET.len())] as char)
        .collect()
}

pub struct FetchClient {
    http: reqwest::Client,
    api_base: String,
    page_size: u32,
}

impl FetchClient {
    pub fn new(config: &GalleryConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.fetch_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    /// GET `url` and decode the JSON body, or `None` on any failure
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        log::info!("Fetching: {}", url);

        let response = match self
            .http
            .get(url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json, text/plain, */*")
            .header("Accept-Language", "en")
            .header("DNT", "1")
            .header("Fingerprint", generate_fingerprint())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Fetch error for {}: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            log::warn!("Fetch error for {}: HTTP {}", url, status);
            return None;
        }

        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(e) => {
                log::warn!("Fetch error for {}: invalid JSON body: {}", url, e);
                None
            }
        }
    }

    pub fn page_url(&self, user_id: &str, page: u32) -> Option<String> {
        let base = format!("{}/profile/public-bots", self.api_base);
        let params = [
            ("userId", user_id.to_string()),
            ("page", page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];

        match reqwest::Url::parse_with_params(&base, &params) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                log::warn!("Cannot build listing URL from {}: {}", base, e);
                None
            }
        }
    }
}

#[async_trait]
impl PageSource for FetchClient {
    async fn fetch_page(&self, user_id: &str, page: u32) -> Option<PageResult> {
        let url = self.page_url(user_id, page)?;
        let envelope: PageEnvelope = self.fetch_json(&url).await?;

        match envelope.result {
            Some(result) => {
                log::info!(
                    "Got data: {} records, page {}/{}",
                    result.records.len(),
                    result.page,
                    result.pages
                );
                Some(result)
            }
            None => {
                log::warn!("Response for {} has no result field", url);
                None
            }
        }
    }
}
