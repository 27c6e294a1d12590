// src/fetcher/mod.rs
// =============================================================================
// This module contains the concurrent batch HTTP fetcher.
//
// Submodules:
// - http: Downloads many URLs in parallel with bounded concurrency
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// - async: Asynchronous code that can run concurrently
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod http;

// Re-export public items from submodules
// This lets users write `fetcher::fetch()` instead of
// `fetcher::http::fetch()`
pub use http::{fetch, FetchConfig, FetchRequest, FetchResult, GROUP_SIZE, STATUS_NO_RESPONSE};

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is mod.rs?
//    - When you have a directory as a module (like src/fetcher/), the
//      mod.rs file inside it is the module root
//    - It's like index.js in JavaScript or __init__.py in Python
//
// 2. Why use 'pub use'?
//    - It re-exports items from submodules
//    - Makes the API cleaner for users of this module
//    - They don't need to know about our internal organization
//
// 3. Why is the fetcher its own module?
//    - It knows nothing about favicons - it just downloads URLs
//    - The resolver depends on the fetcher, never the other way around
//    - Keeping the dependency one-way makes both easier to test
// -----------------------------------------------------------------------------
