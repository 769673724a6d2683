use std::time::Duration;

use anyhow::Result;

use super::types::ProbeRecord;

/// Performs one probe of a target URL.
///
/// Implementations never fail: transport errors come back as a status `0`
/// record.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> ProbeRecord;
}

/// GET prober backed by a shared `reqwest` client
pub struct HttpFetcher {
    client: reqwest::Client,
    snippet_length: usize,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, snippet_length: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("demo-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, snippet_length))
    }

    pub fn with_client(client: reqwest::Client, snippet_length: usize) -> Self {
        Self { client, snippet_length }
    }

    /// Send the request and read just enough of the body for the snippet
    async fn get(&self, url: &str) -> Result<(u16, String)> {
        let mut response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();

        // Four bytes per character covers any UTF-8 input.
        let byte_budget = self.snippet_length.saturating_mul(4).saturating_add(4);
        let mut body = Vec::new();

        while body.len() < byte_budget {
            match response.chunk().await? {
                Some(chunk) => body.extend_from_slice(&chunk),
                None => break,
            }
        }

        Ok((status_code, String::from_utf8_lossy(&body).into_owned()))
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> ProbeRecord {
        match self.get(url).await {
            Ok((status_code, body)) => ProbeRecord::response(status_code, &body, self.snippet_length),
            Err(e) => ProbeRecord::failure(format!("{e:#}")),
        }
    }
}
