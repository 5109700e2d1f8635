//! Decides whether recording is active on a page, from the user's list of
//! active URL patterns.
//!
//! A pattern such as `https://github.com/rust-lang` is read as
//! `https://github.com/rust-lang/*`: scheme, host and port must be equal and
//! the page path must start with `/rust-lang/`. A `*` inside the path part
//! matches any run of characters.

use globset::{GlobBuilder, GlobMatcher};
use url::Url;

pub use fnhist_core::link::is_valid_url_pattern as is_valid_pattern;

/// Append the implicit `/*` suffix.
pub fn normalize_pattern(pattern: &str) -> String {
    let pattern = pattern.trim();
    if pattern.ends_with("/*") {
        pattern.to_string()
    } else {
        format!("{pattern}/*")
    }
}

#[derive(Debug, Clone)]
enum PathRule {
    Prefix(String),
    Glob(GlobMatcher),
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    source: String,
    scheme: String,
    host: Option<String>,
    port: Option<u16>,
    path: PathRule,
}

impl CompiledPattern {
    fn compile(pattern: &str) -> Option<Self> {
        let normalized = normalize_pattern(pattern);
        let base = &normalized[..normalized.len() - 1];
        let url = match Url::parse(base) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!(pattern, error = %e, "invalid pattern URL");
                return None;
            }
        };
        let path = if url.path().contains('*') {
            let glob = format!("{}*", url.path());
            match GlobBuilder::new(&glob).literal_separator(false).build() {
                Ok(g) => PathRule::Glob(g.compile_matcher()),
                Err(e) => {
                    tracing::warn!(pattern, error = %e, "invalid pattern path");
                    return None;
                }
            }
        } else {
            PathRule::Prefix(url.path().to_string())
        };
        Some(Self {
            source: pattern.to_string(),
            scheme: url.scheme().to_string(),
            host: url.host_str().map(str::to_string),
            port: url.port(),
            path,
        })
    }

    fn matches(&self, page: &Url) -> bool {
        if page.scheme() != self.scheme
            || page.host_str() != self.host.as_deref()
            || page.port() != self.port
        {
            return false;
        }
        match &self.path {
            PathRule::Prefix(prefix) => page.path().starts_with(prefix.as_str()),
            PathRule::Glob(matcher) => matcher.is_match(page.path()),
        }
    }
}

/// Compiled set of active URL patterns.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    patterns: Vec<CompiledPattern>,
}

impl Gate {
    /// Compile patterns. Patterns that do not parse are skipped and logged.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .filter_map(|p| CompiledPattern::compile(p.as_ref()))
                .collect(),
        }
    }

    /// Number of usable patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The first pattern that enables `page_url`, if any.
    /// Only `http` and `https` pages can match.
    pub fn matching(&self, page_url: &str) -> Option<&str> {
        let page = match Url::parse(page_url) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!(page_url, error = %e, "invalid page URL");
                return None;
            }
        };
        if !matches!(page.scheme(), "http" | "https") {
            tracing::debug!(scheme = page.scheme(), "unsupported page scheme");
            return None;
        }
        let hit = self.patterns.iter().find(|p| p.matches(&page));
        match hit {
            Some(p) => tracing::debug!(page_url, pattern = %p.source, "page matches pattern"),
            None => tracing::debug!(page_url, "no matching pattern"),
        }
        hit.map(|p| p.source.as_str())
    }

    pub fn allows(&self, page_url: &str) -> bool {
        self.matching(page_url).is_some()
    }
}

/// One-shot check of `page_url` against `patterns`.
pub fn is_allowed<S: AsRef<str>>(page_url: &str, patterns: &[S]) -> bool {
    Gate::new(patterns).allows(page_url)
}
