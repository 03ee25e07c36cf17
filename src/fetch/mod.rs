mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::{debug, warn};

use crate::parser::parse_page;

/// Upper bound on pages requested from one endpoint.
pub const MAX_PAGES: u64 = 1000;

/// GETs `url` and returns the body. A non-success status is an error that
/// carries the response body.
pub async fn fetch_bytes<C: HttpClient + ?Sized>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid URL '{url}'"))?,
    );

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(anyhow!("{} returned status {}: {}", url, status, body));
    }

    Ok(resp.bytes().await?.to_vec())
}

/// Collects every item of a paginated list endpoint.
///
/// Requests `?page=N&limit=page_size` starting at page 1 and stops after a
/// short or empty page, when the server reports `has_more == false`, when
/// `total_pages` is reached, or after [`MAX_PAGES`].
#[tracing::instrument(skip(client, url), fields(url = %url))]
pub async fn fetch_all_pages<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
    page_size: usize,
) -> Result<Vec<Value>> {
    fetch_pages_capped(client, url, page_size, MAX_PAGES).await
}

async fn fetch_pages_capped<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
    page_size: usize,
    max_pages: u64,
) -> Result<Vec<Value>> {
    let page_size = page_size.max(1);
    let mut base: reqwest::Url = url.parse().with_context(|| format!("invalid URL '{url}'"))?;
    // page/limit are owned by this loop
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(k, _)| k != "page" && k != "limit")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    base.query_pairs_mut().clear().extend_pairs(kept);

    let mut items = Vec::new();
    let mut page = 1u64;

    loop {
        let mut page_url = base.clone();
        page_url
            .query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &page_size.to_string());

        let bytes = fetch_bytes(client, page_url.as_str()).await?;
        let value: Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("page {page} of {url} is not JSON"))?;
        let parsed = parse_page(value);
        let received = parsed.items.len();
        debug!(page, received, total_pages = ?parsed.total_pages, "Page received");
        items.extend(parsed.items);

        let last = received < page_size
            || parsed.has_more == Some(false)
            || parsed.total_pages.is_some_and(|total| page >= total);
        if last {
            break;
        }
        if page >= max_pages {
            warn!(page, "Page limit reached, result may be truncated");
            break;
        }
        page += 1;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves canned bodies in order and records every requested URL.
    struct CannedClient {
        bodies: Mutex<Vec<(u16, String)>>,
        seen: Mutex<Vec<String>>,
    }

    impl CannedClient {
        fn new(bodies: &[(u16, &str)]) -> Self {
            Self {
                bodies: Mutex::new(
                    bodies
                        .iter()
                        .rev()
                        .map(|(s, b)| (*s, b.to_string()))
                        .collect(),
                ),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClient for CannedClient {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            self.seen.lock().unwrap().push(req.url().to_string());
            let (status, body) = self
                .bodies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or((200, "[]".to_string()));
            let resp = http::Response::builder()
                .status(status)
                .body(body)
                .unwrap();
            Ok(reqwest::Response::from(resp))
        }
    }

    /// Answers every request with the same full page.
    struct EndlessClient {
        requests: Mutex<u64>,
    }

    #[async_trait]
    impl HttpClient for EndlessClient {
        async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            *self.requests.lock().unwrap() += 1;
            let resp = http::Response::builder()
                .status(200)
                .body(r#"{"data": [1, 2], "hasMore": true}"#.to_string())
                .unwrap();
            Ok(reqwest::Response::from(resp))
        }
    }

    #[tokio::test]
    async fn test_fetch_bytes_returns_body() {
        let client = CannedClient::new(&[(200, "hello")]);
        let bytes = fetch_bytes(&client, "http://api.test/x").await.unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[tokio::test]
    async fn test_fetch_bytes_error_status_includes_body() {
        let client = CannedClient::new(&[(401, "token expired")]);
        let err = fetch_bytes(&client, "http://api.test/x").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("token expired"));
    }

    #[tokio::test]
    async fn test_stops_on_short_page() {
        let client = CannedClient::new(&[(200, "[1, 2]"), (200, "[3]")]);
        let items = fetch_all_pages(&client, "http://api.test/course-mappings", 2)
            .await
            .unwrap();

        assert_eq!(items.len(), 3);
        let seen = client.seen();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].ends_with("page=1&limit=2"));
        assert!(seen[1].ends_with("page=2&limit=2"));
    }

    #[tokio::test]
    async fn test_stops_at_total_pages() {
        let client = CannedClient::new(&[
            (200, r#"{"data": [1], "meta": {"totalPages": 2}}"#),
            (200, r#"{"data": [2], "meta": {"totalPages": 2}}"#),
            (200, r#"{"data": [3], "meta": {"totalPages": 2}}"#),
        ]);
        let items = fetch_all_pages(&client, "http://api.test/courses", 1)
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(client.seen().len(), 2);
    }

    #[tokio::test]
    async fn test_stops_when_has_more_false() {
        let client = CannedClient::new(&[
            (200, r#"{"items": [1, 2], "hasMore": false}"#),
            (200, "[3, 4]"),
        ]);
        let items = fetch_all_pages(&client, "http://api.test/courses", 2)
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_replaces_existing_paging_params() {
        let client = CannedClient::new(&[(200, "[]")]);
        fetch_all_pages(&client, "http://api.test/courses?page=9&active=1", 50)
            .await
            .unwrap();

        assert_eq!(
            client.seen(),
            vec!["http://api.test/courses?active=1&page=1&limit=50".to_string()]
        );
    }

    #[tokio::test]
    async fn test_stops_at_page_cap() {
        let client = EndlessClient {
            requests: Mutex::new(0),
        };
        let items = fetch_pages_capped(&client, "http://api.test/courses", 2, 5)
            .await
            .unwrap();

        assert_eq!(*client.requests.lock().unwrap(), 5);
        assert_eq!(items.len(), 10);
    }

    #[tokio::test]
    async fn test_page_error_aborts() {
        let client = CannedClient::new(&[(200, "[1]"), (500, "boom")]);
        let result = fetch_all_pages(&client, "http://api.test/courses", 1).await;
        assert!(result.is_err());
    }
}
