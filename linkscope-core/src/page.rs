// Page records built from crawl export rows

use crate::classify::determine_page_type;
use crate::config::ClassifierConfig;
use linkscope_ingest::RawRow;
use linkscope_ingest::row::columns;
use serde::{Deserialize, Serialize};
use url::Url;

/// Slug given to pages whose URL path has no segments.
pub const HOMEPAGE_SLUG: &str = "homepage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Service,
    Supporting,
    Blog,
    Other,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Service => "service",
            PageType::Supporting => "supporting",
            PageType::Blog => "blog",
            PageType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Money,
    Supporting,
    Traffic,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Money, Tier::Supporting, Tier::Traffic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Money => "money",
            Tier::Supporting => "supporting",
            Tier::Traffic => "traffic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Money => "Money Pages",
            Tier::Supporting => "Supporting Pages",
            Tier::Traffic => "Traffic Pages",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub ilr: f64,
    pub raw_ilr: f64,
    pub incoming_links: u32,
    pub outgoing_links: u32,
    pub crawl_depth: u32,
    pub http_status: u16,
    pub load_time: f64,
    pub in_sitemap: bool,
    pub issues: u32,
    pub description: String,
    pub slug: String,
    pub page_type: PageType,
    /// Unset until the page has been through `classify`.
    pub tier: Option<Tier>,
}

impl PageRecord {
    /// A bare record for `url` with every metric zeroed.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: String::new(),
            ilr: 0.0,
            raw_ilr: 0.0,
            incoming_links: 0,
            outgoing_links: 0,
            crawl_depth: 0,
            http_status: 0,
            load_time: 0.0,
            in_sitemap: false,
            issues: 0,
            description: String::new(),
            slug: extract_slug(url),
            page_type: PageType::Other,
            tier: None,
        }
    }

    /// Build a record from an export row. Malformed or missing values fall
    /// back to zero, false or the empty string.
    pub fn from_row(row: &RawRow, config: &ClassifierConfig) -> Self {
        let url = row.get(columns::URL).unwrap_or_default().to_string();
        let title = row.get(columns::TITLE).unwrap_or_default().to_string();
        let page_type = determine_page_type(&url, &title, config);

        Self {
            slug: extract_slug(&url),
            ilr: float_field(row, columns::ILR),
            raw_ilr: float_field(row, columns::RAW_ILR),
            incoming_links: count_field(row, columns::INCOMING_LINKS),
            outgoing_links: count_field(row, columns::OUTGOING_LINKS),
            crawl_depth: count_field(row, columns::CRAWL_DEPTH),
            http_status: count_field(row, columns::HTTP_STATUS).min(u16::MAX as u32) as u16,
            load_time: float_field(row, columns::LOAD_TIME),
            in_sitemap: row.get(columns::IN_SITEMAP) == Some("1"),
            issues: count_field(row, columns::ISSUES),
            description: row.get(columns::DESCRIPTION).unwrap_or_default().to_string(),
            page_type,
            tier: None,
            url,
            title,
        }
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Unknown"
        } else {
            &self.title
        }
    }
}

/// Last path segment of a URL, or `HOMEPAGE_SLUG` when the path is empty.
pub fn extract_slug(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };

    path.trim_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| HOMEPAGE_SLUG.to_string())
}

/// Lenient numeric parse: reads the leading number of a value ("95%" -> 95,
/// "1.5e2" -> 150), yielding None when there is none.
pub fn parse_number(value: &str) -> Option<f64> {
    let value = value.trim();
    let bytes = value.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, c) in value.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }

    // An exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let digits = bytes[exp.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits > 0 {
            end = exp + digits;
        }
    }

    value[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn float_field(row: &RawRow, column: &str) -> f64 {
    row.get(column)
        .and_then(parse_number)
        .map(|v| v.max(0.0))
        .unwrap_or(0.0)
}

fn count_field(row: &RawRow, column: &str) -> u32 {
    row.get(column)
        .and_then(parse_number)
        .map(|v| v.trunc().clamp(0.0, u32::MAX as f64) as u32)
        .unwrap_or(0)
}

/// Ordered, in-memory collection of the pages of one export.
#[derive(Debug, Clone, Default)]
pub struct PageStore {
    pages: Vec<PageRecord>,
}

impl PageStore {
    pub fn from_rows(rows: &[RawRow], config: &ClassifierConfig) -> Self {
        Self {
            pages: rows
                .iter()
                .map(|row| PageRecord::from_row(row, config))
                .collect(),
        }
    }

    pub fn from_pages(pages: Vec<PageRecord>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page_by_url(&self, url: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|page| page.url == url)
    }

    /// Case-insensitive match on title, URL or description, in input order.
    pub fn search(&self, query: &str) -> Vec<&PageRecord> {
        let query = query.to_lowercase();
        self.pages
            .iter()
            .filter(|page| {
                page.title.to_lowercase().contains(&query)
                    || page.url.to_lowercase().contains(&query)
                    || page.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Search results ordered by ILR, strongest first.
    pub fn suggestions(&self, query: &str, limit: usize) -> Vec<&PageRecord> {
        let mut matches = self.search(query);
        matches.sort_by(|a, b| b.ilr.total_cmp(&a.ilr));
        matches.truncate(limit);
        matches
    }
}
