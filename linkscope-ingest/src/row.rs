use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column headers used by the crawl export.
pub mod columns {
    pub const URL: &str = "Page URL";
    pub const TITLE: &str = "Page Title";
    pub const ILR: &str = "ILR";
    pub const RAW_ILR: &str = "Raw ILR";
    pub const INCOMING_LINKS: &str = "Incoming Internal Links";
    pub const OUTGOING_LINKS: &str = "Outgoing Internal Links";
    pub const CRAWL_DEPTH: &str = "Crawl Depth";
    pub const HTTP_STATUS: &str = "HTTP Status Code";
    pub const LOAD_TIME: &str = "Page (HTML) Load Time, sec";
    pub const IN_SITEMAP: &str = "In sitemap";
    pub const ISSUES: &str = "Issues";
    pub const DESCRIPTION: &str = "Description";
}

/// One row of the export, keyed by column header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// 1-based line number in the source file (0 for rows built in memory)
    pub line: u64,
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new(line: u64) -> Self {
        Self {
            line,
            fields: HashMap::new(),
        }
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            line: 0,
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Returns the trimmed value of a column, or None if absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|v| v.trim())
    }

    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
