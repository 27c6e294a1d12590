// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Hand the URL list to the resolver library
// 3. Print the outcome as a table or as JSON
// 4. Exit with proper code (0 = all resolved, 1 = unresolved addresses,
//    2 = internal error)
//
// All the actual resolution logic lives in the library (src/lib.rs); this
// file only supplies input and presents output.
//
// Rust concepts used:
// - async/await: Because resolution makes many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declaration - the CLI definition belongs to the binary, not the library
mod cli;

use cli::Cli;
use clap::Parser; // Parser trait enables the parse() method

use favicon_guardian::{resolve_favicons, FetchConfig, ResolutionOutcome};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = every address resolved to a favicon
//   Ok(1) = some addresses could not be resolved
//   Err = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    println!("🔍 Resolving favicons for {} address(es)...\n", cli.urls.len());

    // Both knobs are blanket decisions for the whole batch: the User-Agent
    // is passed through from whoever invoked us, and redirect following is
    // switched off entirely when the environment can't allow it
    let config = FetchConfig {
        user_agent: cli.user_agent.clone(),
        follow_redirects: !cli.no_redirects,
    };

    let outcome = resolve_favicons(&cli.urls, &config).await;

    // Print results and determine exit code
    print_outcome(&cli.urls, &outcome, cli.json)?;

    if outcome.errors.is_empty() {
        Ok(0) // Exit code 0 = everything resolved
    } else {
        Ok(1) // Exit code 1 = some addresses unresolved
    }
}

// Prints the outcome either as a table or JSON
fn print_outcome(urls: &[String], outcome: &ResolutionOutcome, json: bool) -> Result<()> {
    if json {
        // Serialize the outcome to JSON and print
        let json_output = serde_json::to_string_pretty(outcome)?;
        println!("{}", json_output);
    } else {
        // Print human-readable table
        print_table(urls, outcome);
    }
    Ok(())
}

// Prints the outcome as a human-readable table in the terminal
//
// Rows follow the input order (duplicates collapse to their first
// occurrence), so re-running the same command lines the results up the
// same way every time.
fn print_table(urls: &[String], outcome: &ResolutionOutcome) {
    // Print table header
    println!("{:<50} {:<50} {:<10}", "URL", "FAVICON", "SIZES");
    println!("{}", "=".repeat(110));

    let mut printed = std::collections::HashSet::new();

    for url in urls {
        // Skip duplicate input lines - there is only one result per address
        if !printed.insert(url.as_str()) {
            continue;
        }

        match outcome.favicons.get(url) {
            Some(record) => {
                println!(
                    "{:<50} {:<50} {:<10}",
                    truncate(url, 47),
                    truncate(&record.favicon_url, 47),
                    record.sizes
                );
            }
            None => {
                println!("{:<50} {:<50} {:<10}", truncate(url, 47), "❌ UNRESOLVED", "");
            }
        }
    }

    println!();

    // Print summary
    println!("📊 Summary:");
    println!("   ✅ Resolved: {}", outcome.favicons.len());
    println!("   ❌ Unresolved: {}", outcome.errors.len());
    println!(
        "   📋 Total: {}",
        outcome.favicons.len() + outcome.errors.len()
    );
}

// Truncates a value for table display if it is too long
//
// We count characters, not bytes: URLs can legitimately contain multibyte
// UTF-8 (internationalized domain names, unicode paths), and slicing a &str
// at a byte index inside such a character would panic.
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        let prefix: String = value.chars().take(max).collect();
        format!("{}...", prefix)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_value_untouched() {
        assert_eq!(truncate("https://example.com", 47), "https://example.com");
    }

    #[test]
    fn test_truncate_long_value() {
        let long = "a".repeat(60);
        let shown = truncate(&long, 47);
        assert_eq!(shown, format!("{}...", "a".repeat(47)));
    }

    #[test]
    fn test_truncate_multibyte_value_does_not_panic() {
        // 50 two-byte characters: byte 47 falls inside a character, so a
        // byte-indexed slice would panic here
        let accented = "é".repeat(50);
        let shown = truncate(&accented, 47);
        assert_eq!(shown, format!("{}...", "é".repeat(47)));
    }
}
