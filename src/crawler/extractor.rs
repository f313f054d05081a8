//! URL extraction for fetched documents
//!
//! A document is run through an ordered list of independent strategies and
//! their results are concatenated. Overlap between strategies is expected;
//! duplicates are left for the visited-set check in the engine.
//!
//! Default strategies, in order:
//! 1. [`StructuralScan`]: `href` on `<a>`, `<script>` and `<link>`
//! 2. [`TypedResourceScan`]: `.js` scripts, `.css` stylesheets, absolute script `src`
//! 3. [`EmbeddedResourceScan`]: quoted CSS `url(...)` references
//! 4. [`FreeTextScan`]: URL-shaped text anywhere in the body

use crate::url::resolve;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static HREF_TAGS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href], script[href], link[href]").expect("hardcoded selector is valid")
});

static SCRIPT_SRC: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script[src]").expect("hardcoded selector is valid"));

static STYLESHEET_LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"link[rel~="stylesheet"][href]"#).expect("hardcoded selector is valid")
});

static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\(["'](.*?)["']\)"#).expect("hardcoded regex pattern is valid")
});

// Scheme, optional userinfo, Punycode-aware domain, port, path, fragment and
// query parameters. The regex crate matches in linear time, so the nested
// repetitions cannot backtrack catastrophically.
static FREE_TEXT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?:https?|ftp|smtp)://
        (?:[\x21-\x39\x3b-\x3f\x41-\x7e]+(?::[\x21-\x39\x3b-\x3f\x41-\x7e]+)?@)?
        (?:xn--[0-9a-z]+|[0-9A-Za-z_-]+\.)*
        (?:xn--[0-9a-z]+|[0-9A-Za-z-]+)\.
        (?:xn--[0-9a-z]+|[0-9A-Za-z]{2,10})
        (?::(?:6553[0-5]|655[0-2][0-9]|65[0-4][0-9]{2}|6[0-4][0-9]{3}|[1-5][0-9]{4}|[1-9][0-9]{1,3}|[0-9]))?
        (?:/[\x21\x22\x24\x25\x27-\x2e\x30-\x3b\x3e\x40-\x5b\x5d-\x7e]*)*
        (?:\#[\x21\x22\x24\x25\x27-\x2e\x30-\x3b\x3e\x40-\x5b\x5d-\x7e]*)?
        (?:\?[\x21\x22\x24\x25\x27-\x2e\x30-\x3b\x40-\x5b\x5d-\x7e]+=[\x21\x22\x24\x25\x27-\x2e\x30-\x3b\x40-\x5b\x5d-\x7e]*)?
        (?:&[\x21\x22\x24\x25\x27-\x2e\x30-\x3b\x40-\x5b\x5d-\x7e]+=[\x21\x22\x24\x25\x27-\x2e\x30-\x3b\x40-\x5b\x5d-\x7e]*)*
        ",
    )
    .expect("hardcoded regex pattern is valid")
});

/// A fetched document as seen by the extraction strategies
///
/// The HTML is parsed once and shared by every strategy that needs it.
pub struct Page<'a> {
    /// URL the document was requested from; relative references resolve against it
    pub base_url: &'a Url,

    /// Raw decoded body
    pub body: &'a str,

    /// Parsed HTML tree (lenient; any text parses)
    pub document: Html,
}

impl<'a> Page<'a> {
    /// Parses `body` as an HTML document
    pub fn parse(base_url: &'a Url, body: &'a str) -> Self {
        Self {
            base_url,
            body,
            document: Html::parse_document(body),
        }
    }
}

/// One self-contained way of discovering URLs in a document
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Returns every candidate URL this strategy finds, in document order
    fn extract(&self, page: &Page<'_>) -> Vec<String>;
}

/// `href` attributes on `<a>`, `<script>` and `<link>` elements, resolved
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralScan;

impl ExtractionStrategy for StructuralScan {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn extract(&self, page: &Page<'_>) -> Vec<String> {
        page.document
            .select(&HREF_TAGS)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| resolve(page.base_url, href))
            .collect()
    }
}

/// Script and stylesheet resources
///
/// Emits, in this order: resolved `<script src>` values ending in `.js`,
/// resolved `<link rel="stylesheet" href>` values ending in `.css`, then
/// `<script src>` values that are already absolute `http(s)` URLs, verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedResourceScan;

impl ExtractionStrategy for TypedResourceScan {
    fn name(&self) -> &'static str {
        "typed-resource"
    }

    fn extract(&self, page: &Page<'_>) -> Vec<String> {
        let script_sources: Vec<&str> = page
            .document
            .select(&SCRIPT_SRC)
            .filter_map(|element| element.value().attr("src"))
            .collect();

        let scripts = script_sources
            .iter()
            .filter(|src| src.ends_with(".js"))
            .filter_map(|src| resolve(page.base_url, src));

        let stylesheets = page
            .document
            .select(&STYLESHEET_LINK)
            .filter_map(|element| element.value().attr("href"))
            .filter(|href| href.ends_with(".css"))
            .filter_map(|href| resolve(page.base_url, href));

        let third_party = script_sources
            .iter()
            .filter(|src| src.starts_with("http://") || src.starts_with("https://"))
            .map(|src| src.to_string());

        scripts.chain(stylesheets).chain(third_party).collect()
    }
}

/// Quoted CSS `url("...")` / `url('...')` references in the raw body, resolved
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResourceScan;

impl ExtractionStrategy for EmbeddedResourceScan {
    fn name(&self) -> &'static str {
        "embedded-resource"
    }

    fn extract(&self, page: &Page<'_>) -> Vec<String> {
        CSS_URL
            .captures_iter(page.body)
            .filter_map(|caps| caps.get(1))
            .filter_map(|path| resolve(page.base_url, path.as_str()))
            .collect()
    }
}

/// URL-shaped text anywhere in the raw body, emitted verbatim
///
/// Catches links in inline text, comments and minified scripts that no markup
/// rule would see. Matches are not resolved; relative text is never matched.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeTextScan;

impl ExtractionStrategy for FreeTextScan {
    fn name(&self) -> &'static str {
        "free-text"
    }

    fn extract(&self, page: &Page<'_>) -> Vec<String> {
        FREE_TEXT_URL
            .find_iter(page.body)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Runs an ordered list of strategies over a document
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(vec![
            Box::new(StructuralScan),
            Box::new(TypedResourceScan),
            Box::new(EmbeddedResourceScan),
            Box::new(FreeTextScan),
        ])
    }
}

impl Extractor {
    /// Creates an extractor with a custom strategy list
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Names of the configured strategies, in execution order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Extracts candidate URLs from `body`
    ///
    /// Every strategy runs unconditionally and the results are concatenated in
    /// strategy order. The output may contain duplicates and, for the
    /// free-text scan, URLs with schemes the fetcher cannot handle.
    ///
    /// # Example
    ///
    /// ```
    /// use paexkey::crawler::Extractor;
    /// use url::Url;
    ///
    /// let base = Url::parse("http://example.test/").unwrap();
    /// let urls = Extractor::default().extract(&base, r#"<a href="/b">b</a>"#);
    /// assert_eq!(urls, vec!["http://example.test/b".to_string()]);
    /// ```
    pub fn extract(&self, base_url: &Url, body: &str) -> Vec<String> {
        let page = Page::parse(base_url, body);
        let mut urls = Vec::new();

        for strategy in &self.strategies {
            let found = strategy.extract(&page);
            tracing::trace!("{}: {} found {} URLs", base_url, strategy.name(), found.len());
            urls.extend(found);
        }

        urls
    }
}
