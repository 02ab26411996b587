//! Token substitution over rendered HTML.
//!
//! Templates carry `{$TOKEN$}` placeholders; this component replaces each
//! one with its literal value. A single pass per token, no recursion: a
//! token's value is never itself scanned for tokens.

use std::collections::BTreeMap;

use crate::config::SiteConfig;
use crate::template::PageContext;

/// The token table for one render.
///
/// Built fresh per request from the site config plus the page context:
/// the configured page strings first, then the built-in tokens
/// (`PAGE_TITLE`, `SITE_TITLE`, `SITE_ROOT`, `MEDIA`), which win on
/// collision.
pub struct Localizations {
    tokens: BTreeMap<String, String>,
}

impl Localizations {
    pub fn new(site: &SiteConfig, cx: &PageContext) -> Self {
        let mut tokens = site.strings.clone();
        tokens.insert("PAGE_TITLE".to_owned(), cx.full_title(&site.title));
        tokens.insert("SITE_TITLE".to_owned(), site.title.clone());
        tokens.insert("SITE_ROOT".to_owned(), site.site_root.clone());
        tokens.insert("MEDIA".to_owned(), site.media_url.clone());
        Self { tokens }
    }

    /// Replaces every `{$TOKEN$}` occurrence with its mapped value.
    ///
    /// Idempotent on token-free input: rendering twice equals rendering
    /// once as long as no value re-introduces a token pattern.
    pub fn render(&self, html: &str) -> String {
        let mut out = html.to_owned();
        for (key, value) in &self.tokens {
            out = out.replace(&format!("{{${key}$}}"), value);
        }
        out
    }
}
