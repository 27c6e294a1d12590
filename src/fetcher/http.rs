// src/fetcher/http.rs
// =============================================================================
// This module downloads batches of URLs concurrently.
//
// Key functionality:
// - Splits a batch into groups of 40 to bound simultaneous connections
// - Runs all requests within a group concurrently, groups sequentially
// - Supports a metadata-only mode (HEAD request, no body download)
// - Never fails the batch: transport errors become a sentinel status code
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - HashMap: Results are keyed by the original address
// - Pattern matching: To pick GET/HEAD/POST per request
// - join_all: Run many futures and wait for every one of them
// =============================================================================

use futures::future;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

// How many requests we allow in flight at the same time.
// Groups are processed one after another, so this also bounds the number
// of simultaneously open connections.
pub const GROUP_SIZE: usize = 40;

// Status code recorded when a request got no HTTP response at all
// (DNS failure, connection refused, timeout). It is deliberately outside
// the range of real HTTP codes so callers can never confuse the two.
pub const STATUS_NO_RESPONSE: u16 = 0;

// Per-request timers. Every request gets its own fresh deadline - there is
// no shared time budget across a group or a batch.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

// Maximum redirect hops when redirect following is enabled
const MAX_REDIRECTS: usize = 5;

// A single URL to fetch, with optional POST data
//
// `post` holds the wire form of the payload: a JSON object of form fields
// (e.g. r#"{"token": "abc"}"#). When present and non-empty, the request is
// sent as a POST with those fields as the form body.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// The address to fetch
    pub url: String,
    /// Optional JSON-encoded key-value data to send as a POST form body
    pub post: Option<String>,
}

impl FetchRequest {
    /// Creates a plain request with no POST payload
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            post: None,
        }
    }

    /// Creates a request that will be sent as a POST with form fields
    /// decoded from the given JSON object
    pub fn with_post(url: impl Into<String>, post: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            post: Some(post.into()),
        }
    }
}

// Knobs the caller decides once per batch
//
// Both values come from the caller's own context: the user-agent is passed
// through (never invented by us), and redirect following is a blanket
// decision for environments whose security policy forbids it.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Identifying client string forwarded with every outgoing request.
    /// None means the HTTP client's default is used.
    pub user_agent: Option<String>,
    /// Follow redirects (up to 5 hops) or disable them for the whole batch
    pub follow_redirects: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            follow_redirects: true,
        }
    }
}

// Everything a batch call produced, keyed by the original address
//
// Duplicate addresses in the input collapse to a single entry - callers
// that need per-occurrence results must de-duplicate upstream.
#[derive(Debug, Default)]
pub struct FetchResult {
    /// Response bodies by address. Empty in metadata-only mode.
    pub bodies: HashMap<String, String>,
    /// Final status code by address. STATUS_NO_RESPONSE on transport failure.
    pub status_codes: HashMap<String, u16>,
}

// Fetches every request in the batch
//
// This is the main entry point of the fetcher.
//
// Parameters:
//   requests: the batch, in caller order
//   fetch_body: true = GET and keep the body, false = HEAD, status code only
//   config: user-agent pass-through and redirect policy for the whole batch
//
// Concurrency shape: the batch is split into groups of GROUP_SIZE. All
// requests in a group run at the same time and we wait for every one of
// them (success, error or timeout) before the next group starts. A stuck
// request can therefore delay its own group but never leak into the next.
pub async fn fetch(requests: &[FetchRequest], fetch_body: bool, config: &FetchConfig) -> FetchResult {
    let client = build_client(config);

    let mut result = FetchResult::default();

    for group in requests.chunks(GROUP_SIZE) {
        // Fan out: one future per request in the group
        let in_flight = group
            .iter()
            .map(|request| fetch_single(&client, request, fetch_body));

        // Fan in: join_all is our completion barrier - it resolves only
        // when every request in the group has finished
        for (url, status, body) in future::join_all(in_flight).await {
            if let Some(body) = body {
                result.bodies.insert(url.clone(), body);
            }
            result.status_codes.insert(url, status);
        }
    }

    result
}

// Builds the HTTP client shared by all requests in one batch
//
// Clients hold a connection pool, so building one per batch (not one per
// request) is both cheaper and closer to how browsers behave.
fn build_client(config: &FetchConfig) -> Client {
    let redirect_policy = if config.follow_redirects {
        reqwest::redirect::Policy::limited(MAX_REDIRECTS)
    } else {
        // Blanket opt-out for the whole batch
        reqwest::redirect::Policy::none()
    };

    let mut builder = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .redirect(redirect_policy);

    // Forward the caller's identification string when it supplied one
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }

    builder.build().expect("Failed to create HTTP client")
}

// Performs one request and reduces whatever happened to plain data
//
// Returns: (address, status_code, body)
//   - status_code is STATUS_NO_RESPONSE if the request never got a response
//   - body is None in metadata-only mode, Some("") on transport failure
//
// Nothing here returns an error: a failure is local to this request and
// must never cancel or delay siblings in the same group.
async fn fetch_single(
    client: &Client,
    request: &FetchRequest,
    fetch_body: bool,
) -> (String, u16, Option<String>) {
    // Pick the method: POST when a payload is attached, otherwise GET for
    // full fetches and HEAD for metadata-only probing
    let builder = match &request.post {
        Some(payload) if !payload.is_empty() => match parse_post_fields(payload) {
            Some(fields) => client.post(&request.url).form(&fields),
            // A payload we can't decode degrades to an empty POST
            None => client.post(&request.url),
        },
        _ if fetch_body => client.get(&request.url),
        _ => client.head(&request.url),
    };

    match builder.send().await {
        Ok(response) => {
            let status = response.status().as_u16();

            // Only transfer the body when asked to. If the body transfer
            // itself breaks off we keep the status and record what we got.
            let body = if fetch_body {
                Some(response.text().await.unwrap_or_default())
            } else {
                None
            };

            (request.url.clone(), status, body)
        }
        Err(_) => {
            // DNS failure, connection refused, timeout, TLS trouble...
            // All of them collapse into the sentinel status code
            let body = if fetch_body { Some(String::new()) } else { None };
            (request.url.clone(), STATUS_NO_RESPONSE, body)
        }
    }
}

// Decodes a JSON object payload into form fields
//
// Example: r#"{"a": "1", "b": "2"}"# -> {a: 1, b: 2}
// Returns None when the payload is not a flat JSON object of strings.
fn parse_post_fields(payload: &str) -> Option<HashMap<String, String>> {
    serde_json::from_str(payload).ok()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why join_all instead of buffer_unordered?
//    - buffer_unordered(N) keeps a rolling window of N futures
//    - join_all waits for the WHOLE group before continuing
//    - We want the barrier: no request may outlive its group, so a group
//      is fully drained before the next one opens connections
//
// 2. Why is the status code a u16 instead of an enum?
//    - The resolver classifies outcomes purely by numeric ranges
//      (200 exactly, or 200..400 for the fallback probe)
//    - Keeping the raw number means the fetcher doesn't have to know
//      which ranges its callers care about
//
// 3. What is a sentinel value?
//    - A reserved value that means "no real data here"
//    - HTTP codes start at 100, so 0 can never collide with a real one
//
// 4. Why does the error branch still return a body?
//    - The result maps must contain every submitted address, so that a
//      caller can look up any URL it passed in and always find an entry
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post_fields_valid() {
        let fields = parse_post_fields(r#"{"user": "phyks", "token": "42"}"#).unwrap();
        assert_eq!(fields.get("user"), Some(&"phyks".to_string()));
        assert_eq!(fields.get("token"), Some(&"42".to_string()));
    }

    #[test]
    fn test_parse_post_fields_malformed() {
        assert!(parse_post_fields("not json at all").is_none());
        assert!(parse_post_fields("[1, 2, 3]").is_none());
    }

    #[test]
    fn test_request_constructors() {
        let plain = FetchRequest::new("https://example.com");
        assert_eq!(plain.url, "https://example.com");
        assert!(plain.post.is_none());

        let posted = FetchRequest::with_post("https://example.com", r#"{"a": "1"}"#);
        assert_eq!(posted.post.as_deref(), Some(r#"{"a": "1"}"#));
    }

    // The .invalid TLD is reserved (RFC 2606) and can never resolve, so these
    // tests exercise the transport-failure path without live network access.

    #[tokio::test]
    async fn test_transport_failure_yields_sentinel_status() {
        let requests = vec![FetchRequest::new("http://no-such-host.invalid/")];
        let result = fetch(&requests, true, &FetchConfig::default()).await;

        assert_eq!(
            result.status_codes.get("http://no-such-host.invalid/"),
            Some(&STATUS_NO_RESPONSE)
        );
        // Full-fetch mode records an (empty) body even on failure
        assert_eq!(
            result.bodies.get("http://no-such-host.invalid/"),
            Some(&String::new())
        );
    }

    #[tokio::test]
    async fn test_one_failure_does_not_drop_siblings() {
        let requests = vec![
            FetchRequest::new("http://first-host.invalid/"),
            FetchRequest::new("http://second-host.invalid/"),
        ];
        let result = fetch(&requests, true, &FetchConfig::default()).await;

        // Both addresses get their own entry - neither cancels the other
        assert_eq!(result.status_codes.len(), 2);
        assert!(result.status_codes.contains_key("http://first-host.invalid/"));
        assert!(result.status_codes.contains_key("http://second-host.invalid/"));
    }

    #[tokio::test]
    async fn test_metadata_only_mode_skips_bodies() {
        let requests = vec![FetchRequest::new("http://no-such-host.invalid/")];
        let result = fetch(&requests, false, &FetchConfig::default()).await;

        assert!(result.bodies.is_empty());
        assert_eq!(result.status_codes.len(), 1);
    }

    #[tokio::test]
    async fn test_batch_larger_than_one_group_keeps_every_address() {
        // GROUP_SIZE + 1 distinct addresses forces a second sequential
        // group; the internal split must be invisible in the result
        let requests: Vec<FetchRequest> = (0..GROUP_SIZE + 1)
            .map(|i| FetchRequest::new(format!("http://host-{}.invalid/", i)))
            .collect();
        let result = fetch(&requests, false, &FetchConfig::default()).await;

        assert_eq!(result.status_codes.len(), GROUP_SIZE + 1);
        for request in &requests {
            assert_eq!(
                result.status_codes.get(&request.url),
                Some(&STATUS_NO_RESPONSE)
            );
        }

        // Same addresses submitted as two separate calls (one full group,
        // one single request) must produce the same merged picture
        let (first_group, rest) = requests.split_at(GROUP_SIZE);
        let mut merged = fetch(first_group, false, &FetchConfig::default())
            .await
            .status_codes;
        merged.extend(fetch(rest, false, &FetchConfig::default()).await.status_codes);
        assert_eq!(merged, result.status_codes);
    }

    #[tokio::test]
    async fn test_duplicate_addresses_collapse_to_one_entry() {
        let requests = vec![
            FetchRequest::new("http://dup-host.invalid/"),
            FetchRequest::new("http://dup-host.invalid/"),
        ];
        let result = fetch(&requests, false, &FetchConfig::default()).await;

        // Results are keyed by address, so duplicates share a single slot
        assert_eq!(result.status_codes.len(), 1);
    }
}
