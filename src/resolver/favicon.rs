// src/resolver/favicon.rs
// =============================================================================
// This module orchestrates favicon resolution for a batch of websites.
//
// The algorithm runs two fetch rounds through the batch fetcher:
//
// Round 1: fetch every page in full and scan its <head> for an icon
//          declaration (see head.rs)
// Round 2: for every address that round 1 left unresolved - non-200 pages,
//          unreachable hosts, pages that simply declare no icon - probe the
//          synthesized root /favicon.ico address (see probe.rs) with a cheap
//          metadata-only request and classify purely by status code
//
// Per-address state machine:
//   Pending -> Resolved(round 1)
//   Pending -> AwaitingFallback -> Resolved(round 2)
//   Pending -> AwaitingFallback -> Failed
//
// Rust concepts:
// - async/await: Both rounds wait on the batch fetcher
// - HashMap/HashSet: Address-keyed results and de-duplication
// - Ranges: (200..400).contains() for status classification
// =============================================================================

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::fetcher::{fetch, FetchConfig, FetchRequest, STATUS_NO_RESPONSE};

use super::{head, probe};

// A resolved favicon for one input address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaviconRecord {
    /// The icon address, exactly as declared (round 1 hrefs may be relative)
    /// or as synthesized for the root probe (round 2)
    pub favicon_url: String,
    /// The raw declared size token (e.g. "16x16"), empty when absent
    pub sizes: String,
}

// The outcome of one resolution call
//
// Invariant: every (de-duplicated) input address appears in exactly one of
// `favicons` or `errors` - never both, never neither.
#[derive(Debug, Default, Serialize)]
pub struct ResolutionOutcome {
    /// Successfully resolved icons, keyed by the original input address
    pub favicons: HashMap<String, FaviconRecord>,
    /// Addresses that failed both rounds, in input encounter order
    pub errors: Vec<String>,
}

// Resolves a favicon for every address in the batch
//
// This is the sole public contract of the resolver. It never returns an
// error: transport failures, malformed pages and unparseable addresses are
// all folded into the `errors` list of the outcome.
//
// Parameters:
//   urls: the website addresses to resolve (duplicates collapse)
//   config: user-agent pass-through and redirect policy, forwarded
//           unchanged to both fetch rounds
pub async fn resolve_favicons(urls: &[String], config: &FetchConfig) -> ResolutionOutcome {
    // Results are keyed by address, so duplicate inputs can only ever fill
    // one slot. De-duplicating up front (keeping first-seen order) makes the
    // "every address appears exactly once" guarantee hold for the error
    // list too.
    let addresses = dedup_preserving_order(urls);

    // Round 1: full page fetch for every address
    let requests: Vec<FetchRequest> = addresses
        .iter()
        .map(|address| FetchRequest::new(address.as_str()))
        .collect();
    let pages = fetch(&requests, true, config).await;

    let mut favicons: HashMap<String, FaviconRecord> = HashMap::new();

    for address in &addresses {
        // Only a clean 200 is worth parsing; everything else goes straight
        // to the fallback round
        if pages.status_codes.get(address) != Some(&200) {
            continue;
        }
        let Some(content) = pages.bodies.get(address) else {
            continue;
        };
        if let Some(record) = head::extract_declared_favicon(content) {
            favicons.insert(address.clone(), record);
        }
    }

    // Round 2: probe the root favicon.ico for everything still unresolved.
    // This round starts only after round 1 (fetching AND parsing) has fully
    // completed for every address.
    let candidates: Vec<(String, String)> = addresses
        .iter()
        .filter(|address| !favicons.contains_key(*address))
        .map(|address| (address.clone(), probe::root_icon_url(address)))
        .collect();

    let probe_requests: Vec<FetchRequest> = candidates
        .iter()
        .map(|(_, probe_url)| FetchRequest::new(probe_url.as_str()))
        .collect();

    // Metadata-only: we only care whether the file is there
    let probed = fetch(&probe_requests, false, config).await;

    let mut errors = Vec::new();

    for (address, probe_url) in candidates {
        let status = probed
            .status_codes
            .get(&probe_url)
            .copied()
            .unwrap_or(STATUS_NO_RESPONSE);

        // 2xx means the icon is there; 3xx counts too when redirects are
        // disabled, since the server is at least pointing at one
        if (200..400).contains(&status) {
            favicons.insert(
                address,
                FaviconRecord {
                    favicon_url: probe_url,
                    sizes: String::new(),
                },
            );
        } else {
            // Both rounds failed: report the ORIGINAL address, not the probe
            errors.push(address);
        }
    }

    ResolutionOutcome { favicons, errors }
}

// Removes duplicate addresses while keeping first-seen order
fn dedup_preserving_order(urls: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.iter()
        .filter(|url| seen.insert(url.as_str()))
        .cloned()
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does round 2 discard round 1's error bookkeeping?
//    - A page that 404s can still have a perfectly good /favicon.ico
//    - Only the fallback probe's verdict decides the final error list
//
// 2. Why [200, 400) for the probe but exactly 200 for pages?
//    - A page body is only trustworthy on a clean 200
//    - The probe is an existence check: a redirect answer still tells us
//      the server has something to say about /favicon.ico
//
// 3. Why isn't this function fallible?
//    - Every failure mode is recovered into data (a status code, an entry
//      in `errors`); there is nothing meaningful left to return as an Err
// -----------------------------------------------------------------------------
