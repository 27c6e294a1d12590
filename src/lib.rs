// src/lib.rs
// =============================================================================
// This is the library root of favicon-guardian.
//
// Given a batch of website addresses, the library resolves a favicon URL for
// each of them: first by scanning every page's <head> markup for icon link
// declarations, then by probing the conventional root-level /favicon.ico
// for every address that yielded nothing. Addresses that fail both rounds
// are reported, never silently dropped.
//
// Architecture (one-way dependency):
//
//   resolver  ->  fetcher
//
// - fetcher: downloads many URLs in parallel with bounded concurrency and
//   per-request timeouts; knows nothing about favicons
// - resolver: drives the two fetch rounds and turns responses into a
//   ResolutionOutcome
//
// The CLI in src/main.rs is just one caller of this library; a web handler
// or feed reader can call resolve_favicons() directly.
// =============================================================================

// Declare our modules (tells Rust about our other source files)
pub mod fetcher; // src/fetcher/ - concurrent batch HTTP downloading
pub mod resolver; // src/resolver/ - favicon discovery logic

// Re-export the public API at the crate root so callers can write
// `favicon_guardian::resolve_favicons()` without knowing the module layout
pub use fetcher::{fetch, FetchConfig, FetchRequest, FetchResult};
pub use resolver::{resolve_favicons, FaviconRecord, ResolutionOutcome};
