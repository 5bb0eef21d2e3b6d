// Tests for page records and the page store

use linkscope_core::config::ClassifierConfig;
use linkscope_core::page::{
    HOMEPAGE_SLUG, PageRecord, PageStore, PageType, extract_slug, parse_number,
};
use linkscope_ingest::RawRow;
use linkscope_ingest::row::columns;

fn row(url: &str, title: &str, ilr: &str, description: &str) -> RawRow {
    RawRow::from_pairs([
        (columns::URL, url),
        (columns::TITLE, title),
        (columns::ILR, ilr),
        (columns::DESCRIPTION, description),
    ])
}

// ============================================================================
// Slug Extraction Tests
// ============================================================================

#[test]
fn test_extract_slug_last_segment() {
    assert_eq!(
        extract_slug("https://example.com/services/office-building-cleaning/"),
        "office-building-cleaning"
    );
}

#[test]
fn test_extract_slug_without_trailing_slash() {
    assert_eq!(extract_slug("https://example.com/blog/floor-care"), "floor-care");
}

#[test]
fn test_extract_slug_root_is_homepage() {
    assert_eq!(extract_slug("https://example.com/"), HOMEPAGE_SLUG);
    assert_eq!(extract_slug("https://example.com"), HOMEPAGE_SLUG);
}

#[test]
fn test_extract_slug_ignores_query_and_fragment() {
    assert_eq!(extract_slug("https://example.com/contact?ref=nav#form"), "contact");
}

#[test]
fn test_extract_slug_relative_path() {
    assert_eq!(extract_slug("/about-us/team/?page=2"), "team");
    assert_eq!(extract_slug(""), HOMEPAGE_SLUG);
}

// ============================================================================
// Numeric Coercion Tests
// ============================================================================

#[test]
fn test_parse_number_plain_values() {
    assert_eq!(parse_number("42"), Some(42.0));
    assert_eq!(parse_number(" 3.75 "), Some(3.75));
    assert_eq!(parse_number("-2"), Some(-2.0));
}

#[test]
fn test_parse_number_leading_prefix() {
    assert_eq!(parse_number("95%"), Some(95.0));
    assert_eq!(parse_number("1.2s"), Some(1.2));
    assert_eq!(parse_number("12."), Some(12.0));
}

#[test]
fn test_parse_number_exponent() {
    assert_eq!(parse_number("1.5e2"), Some(150.0));
    assert_eq!(parse_number("2E-1"), Some(0.2));
    assert_eq!(parse_number("3e+1 links"), Some(30.0));
    assert_eq!(parse_number("4.5e"), Some(4.5));
    assert_eq!(parse_number("7e-"), Some(7.0));
    assert_eq!(parse_number("1e999"), None);
}

#[test]
fn test_parse_number_rejects_non_numeric() {
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("n/a"), None);
    assert_eq!(parse_number("-"), None);
    assert_eq!(parse_number("."), None);
}

// ============================================================================
// Record Construction Tests
// ============================================================================

#[test]
fn test_from_row_full_record() {
    let row = RawRow::from_pairs([
        (columns::URL, "https://example.com/office-building-cleaning/"),
        (columns::TITLE, "Office Building Cleaning"),
        (columns::ILR, "97.5"),
        (columns::RAW_ILR, "14.2"),
        (columns::INCOMING_LINKS, "64"),
        (columns::OUTGOING_LINKS, "18"),
        (columns::CRAWL_DEPTH, "1"),
        (columns::HTTP_STATUS, "200"),
        (columns::LOAD_TIME, "0.84"),
        (columns::IN_SITEMAP, "1"),
        (columns::ISSUES, "2"),
        (columns::DESCRIPTION, "Janitorial services for offices"),
    ]);

    let page = PageRecord::from_row(&row, &ClassifierConfig::default());

    assert_eq!(page.url, "https://example.com/office-building-cleaning/");
    assert_eq!(page.slug, "office-building-cleaning");
    assert_eq!(page.ilr, 97.5);
    assert_eq!(page.raw_ilr, 14.2);
    assert_eq!(page.incoming_links, 64);
    assert_eq!(page.outgoing_links, 18);
    assert_eq!(page.crawl_depth, 1);
    assert_eq!(page.http_status, 200);
    assert_eq!(page.load_time, 0.84);
    assert!(page.in_sitemap);
    assert_eq!(page.issues, 2);
    assert_eq!(page.page_type, PageType::Service);
    assert_eq!(page.tier, None);
}

#[test]
fn test_from_row_malformed_values_default() {
    let row = RawRow::from_pairs([
        (columns::URL, "https://example.com/x/"),
        (columns::ILR, "unknown"),
        (columns::INCOMING_LINKS, "-5"),
        (columns::LOAD_TIME, ""),
        (columns::IN_SITEMAP, "yes"),
    ]);

    let page = PageRecord::from_row(&row, &ClassifierConfig::default());

    assert_eq!(page.ilr, 0.0);
    assert_eq!(page.incoming_links, 0);
    assert_eq!(page.load_time, 0.0);
    assert_eq!(page.http_status, 0);
    assert!(!page.in_sitemap);
    assert_eq!(page.title, "");
    assert_eq!(page.description, "");
    assert_eq!(page.page_type, PageType::Other);
}

#[test]
fn test_from_row_truncates_fractional_counts() {
    let row = RawRow::from_pairs([
        (columns::URL, "https://example.com/"),
        (columns::INCOMING_LINKS, "12.9"),
    ]);

    let page = PageRecord::from_row(&row, &ClassifierConfig::default());
    assert_eq!(page.incoming_links, 12);
}

#[test]
fn test_display_title_falls_back() {
    let page = PageRecord::new("https://example.com/");
    assert_eq!(page.display_title(), "Unknown");
}

// ============================================================================
// Store Tests
// ============================================================================

fn sample_store() -> PageStore {
    let rows = vec![
        row("https://example.com/", "Home", "99", "Commercial cleaning company"),
        row(
            "https://example.com/blog/carpet-tips/",
            "Carpet Tips",
            "40",
            "How to keep carpets clean",
        ),
        row(
            "https://example.com/carpet-cleaning/",
            "Carpet Cleaning",
            "82",
            "Professional carpet care",
        ),
    ];
    PageStore::from_rows(&rows, &ClassifierConfig::default())
}

#[test]
fn test_store_preserves_order() {
    let store = sample_store();
    assert_eq!(store.len(), 3);
    assert!(!store.is_empty());
    assert_eq!(store.pages()[1].title, "Carpet Tips");
}

#[test]
fn test_store_page_by_url() {
    let store = sample_store();
    let page = store.page_by_url("https://example.com/carpet-cleaning/");
    assert_eq!(page.map(|p| p.title.as_str()), Some("Carpet Cleaning"));
    assert!(store.page_by_url("https://example.com/missing/").is_none());
}

#[test]
fn test_store_search_is_case_insensitive() {
    let store = sample_store();
    let results = store.search("CARPET");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Carpet Tips");
}

#[test]
fn test_store_search_matches_description() {
    let store = sample_store();
    let results = store.search("commercial");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "https://example.com/");
}

#[test]
fn test_store_suggestions_sorted_by_ilr() {
    let store = sample_store();
    let results = store.suggestions("carpet", 5);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Carpet Cleaning");
    assert_eq!(results[1].title, "Carpet Tips");
}

#[test]
fn test_store_suggestions_respects_limit() {
    let store = sample_store();
    assert_eq!(store.suggestions("example.com", 1).len(), 1);
}

#[test]
fn test_empty_store() {
    let store = PageStore::from_rows(&[], &ClassifierConfig::default());
    assert!(store.is_empty());
    assert!(store.search("anything").is_empty());
}
