// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::Parser;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "favicon-guardian",
    version = "0.1.0",
    about = "A CLI tool to resolve favicon URLs for batches of websites",
    long_about = "favicon-guardian takes a list of website addresses and finds a favicon for each: \
                  it scans every page's <head> for icon declarations and falls back to probing the \
                  root /favicon.ico for pages that declare none. Addresses that fail both rounds \
                  are reported as unresolved."
)]
pub struct Cli {
    /// Website URLs to resolve (e.g. https://example.com)
    ///
    /// These are positional arguments; at least one is required
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Output results in JSON format instead of a table
    ///
    /// This is an optional flag: --json
    /// #[arg(long)] creates a flag from the field name
    #[arg(long)]
    pub json: bool,

    /// User-Agent string forwarded with every outgoing request
    ///
    /// Pass your own client identification through here; when omitted,
    /// the HTTP client's default is used. Some feeds refuse requests
    /// without a recognizable User-Agent.
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Disable redirect following for the whole batch
    ///
    /// Use this in environments whose security policy forbids following
    /// redirects to arbitrary hosts. Normally up to 5 hops are followed.
    #[arg(long)]
    pub no_redirects: bool,
}
