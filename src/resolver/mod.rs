// src/resolver/mod.rs
// =============================================================================
// This module contains the favicon resolution logic.
//
// Submodules:
// - favicon: Orchestrates the two fetch rounds and builds the final outcome
// - head: Extracts icon declarations from a page's <head> markup
// - probe: Synthesizes the fallback root-level /favicon.ico address
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod favicon;
mod head;
mod probe;

// Re-export public items from submodules
// This lets users write `resolver::resolve_favicons()` instead of
// `resolver::favicon::resolve_favicons()`
pub use favicon::{resolve_favicons, FaviconRecord, ResolutionOutcome};
pub use head::extract_declared_favicon;
pub use probe::root_icon_url;
