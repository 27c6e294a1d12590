// src/resolver/head.rs
// =============================================================================
// This module finds favicon declarations in a page's <head> markup.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser), so malformed markup is
//   repaired silently instead of raising errors
//
// Strategy:
// - Cut the document off at the first </head> - favicon declarations live
//   in the head, and body markup on real pages is often huge and broken
// - Scan the head's direct <link> children for a rel attribute that
//   contains "icon" ("icon", "shortcut icon", "apple-touch-icon", ...)
//
// Rust concepts:
// - Option<T>: For "a page may or may not declare an icon"
// - Iterators: For walking matching elements in document order
// - String slicing: For the cheap head truncation
// =============================================================================

use scraper::{Html, Selector};

use super::favicon::FaviconRecord;

// Extracts the favicon declared in a page's head, if any
//
// Parameters:
//   content: the full page markup as fetched (borrowed as &str)
//
// Returns: Some(FaviconRecord) when a qualifying <link> tag was found,
//          None otherwise (including for pages that fail to parse nicely -
//          a parse problem just means "no favicon declared")
//
// When several link tags qualify, the LAST one in document order wins.
// Pages rarely declare more than one, but some ship both a classic
// rel="shortcut icon" and a rel="apple-touch-icon"; we keep overwriting
// as we scan, so the record reflects the final qualifying tag.
pub fn extract_declared_favicon(content: &str) -> Option<FaviconRecord> {
    // We don't need the full page, just the <head>
    let fragment = truncate_at_head_close(content);

    // html5ever never fails: whatever we feed it becomes a best-effort tree
    let document = Html::parse_document(fragment);

    // Only direct children of <head> count. A stray <div> inside the head
    // implicitly opens the body, and link tags after it belong to the body -
    // exactly the elements we want to ignore.
    let selector = Selector::parse("head > link").unwrap();

    let mut found = None;

    for element in document.select(&selector) {
        // rel is where icon declarations announce themselves.
        // The match is a case-sensitive substring check: "icon",
        // "shortcut icon" and "apple-touch-icon" all qualify, "ICON" does not.
        let Some(rel) = element.value().attr("rel") else {
            continue;
        };
        if !rel.contains("icon") {
            continue;
        }

        // Missing attributes degrade to empty strings rather than skipping
        // the tag - a rel="icon" without href is still a declaration
        let favicon_url = element.value().attr("href").unwrap_or("").to_string();
        let sizes = element.value().attr("sizes").unwrap_or("").to_string();

        // Last qualifying tag in document order wins
        found = Some(FaviconRecord { favicon_url, sizes });
    }

    found
}

// Cuts the document off at the first head-closing tag
//
// Everything from </head> onwards is irrelevant for icon scanning.
// A page without a head-closing tag yields an empty fragment: we only
// trust declarations from an actually-closed head section.
fn truncate_at_head_close(content: &str) -> &str {
    match content.find("</head>") {
        Some(index) => &content[..index],
        None => "",
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why truncate before parsing?
//    - Bodies are often hundreds of kilobytes of (frequently malformed) markup
//    - The favicon declaration can only be in the head anyway
//    - find() + slicing is a single cheap scan, no allocation
//
// 2. What does "head > link" mean?
//    - A CSS child combinator: <link> elements whose PARENT is <head>
//    - This is stricter than "head link" (any descendant)
//
// 3. Why unwrap() on the selector?
//    - Selector::parse can fail if the CSS selector is invalid
//    - Our selector "head > link" is constant and known to be valid
//    - Generally avoid unwrap() on user input!
//
// 4. What is let-else?
//    - `let Some(rel) = ... else { continue; }` binds on success and
//      diverts (here: skips to the next element) on failure
//    - It saves a level of if-let nesting inside loops
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_icon_declaration() {
        let html = r#"<html><head><link rel="icon" href="/f.ico" sizes="16x16"></head><body></body></html>"#;
        let record = extract_declared_favicon(html).unwrap();
        assert_eq!(record.favicon_url, "/f.ico");
        assert_eq!(record.sizes, "16x16");
    }

    #[test]
    fn test_shortcut_icon_qualifies() {
        let html = r#"<head><link rel="shortcut icon" href="favicon.png"></head>"#;
        let record = extract_declared_favicon(html).unwrap();
        assert_eq!(record.favicon_url, "favicon.png");
        assert_eq!(record.sizes, "");
    }

    #[test]
    fn test_apple_touch_icon_qualifies() {
        let html = r#"<head><link rel="apple-touch-icon" href="/touch.png" sizes="180x180"></head>"#;
        let record = extract_declared_favicon(html).unwrap();
        assert_eq!(record.favicon_url, "/touch.png");
        assert_eq!(record.sizes, "180x180");
    }

    #[test]
    fn test_last_qualifying_tag_wins() {
        let html = r#"<head>
            <link rel="icon" href="/first.ico" sizes="16x16">
            <link rel="apple-touch-icon" href="/second.png" sizes="180x180">
        </head>"#;
        let record = extract_declared_favicon(html).unwrap();
        assert_eq!(record.favicon_url, "/second.png");
        assert_eq!(record.sizes, "180x180");
    }

    #[test]
    fn test_rel_match_is_case_sensitive() {
        let html = r#"<head><link rel="ICON" href="/f.ico"></head>"#;
        assert!(extract_declared_favicon(html).is_none());
    }

    #[test]
    fn test_non_icon_links_are_ignored() {
        let html = r#"<head>
            <link rel="stylesheet" href="/style.css">
            <link rel="canonical" href="https://example.com/">
        </head>"#;
        assert!(extract_declared_favicon(html).is_none());
    }

    #[test]
    fn test_link_after_head_close_is_ignored() {
        let html = r#"<html><head><title>t</title></head>
            <body><link rel="icon" href="/too-late.ico"></body></html>"#;
        assert!(extract_declared_favicon(html).is_none());
    }

    #[test]
    fn test_missing_head_close_yields_nothing() {
        let html = r#"<head><link rel="icon" href="/f.ico">"#;
        assert!(extract_declared_favicon(html).is_none());
    }

    #[test]
    fn test_missing_href_degrades_to_empty_string() {
        let html = r#"<head><link rel="icon"></head>"#;
        let record = extract_declared_favicon(html).unwrap();
        assert_eq!(record.favicon_url, "");
        assert_eq!(record.sizes, "");
    }

    #[test]
    fn test_malformed_markup_is_suppressed() {
        let html = "<head><<<>><link rel=\"icon\" href=/f.ico</head>";
        // Whatever html5ever makes of this, it must not panic or error
        let _ = extract_declared_favicon(html);
    }
}
