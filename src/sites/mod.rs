//! Site list handling
//!
//! A site list is plain text with one dealer site per line, either `<url>` or
//! `<url>|<label>`. Parsing is done up front so the batch knows its total size
//! before the first request goes out.

mod parser;

pub use parser::{load_site_list, parse_site_line, parse_site_list};

/// Label used when a site line carries no label field
pub const DEFAULT_LABEL: &str = "UNK";

/// A dealer site to process
///
/// Fields are private so a descriptor can only come out of the parser, which
/// guarantees an `http(s)://` base URL and a non-empty label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDescriptor {
    base_url: String,
    label: String,
}

impl SiteDescriptor {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
