//! Path exclusion matching.
//!
//! # Responsibilities
//! - Match framework-internal path prefixes (`/api`, `/_next`, `/_vercel`)
//! - Match top-level static files (`/favicon.ico`, `/robots.txt`)
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - Prefix matching is raw `starts_with`, so `/apiary` is excluded too
//! - Path matching is case-sensitive
//! - No regex to guarantee O(n) matching

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches a path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

/// Matches paths whose first segment starts like a file name:
/// `[\w-]+\.\w+` right after the leading slash.
#[derive(Debug, Clone, Default)]
pub struct StaticFileMatcher;

impl Matcher for StaticFileMatcher {
    fn matches(&self, path: &str) -> bool {
        let Some(rest) = path.strip_prefix('/') else {
            return false;
        };

        let stem_len = rest
            .bytes()
            .take_while(|b| is_word_byte(*b) || *b == b'-')
            .count();
        if stem_len == 0 {
            return false;
        }

        let mut tail = rest[stem_len..].bytes();
        tail.next() == Some(b'.') && tail.next().is_some_and(is_word_byte)
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug, Default)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Exclusion set built from prefixes, optionally with static files.
    pub fn exclusions<I, S>(prefixes: I, static_files: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut matchers: Vec<Box<dyn Matcher>> = prefixes
            .into_iter()
            .map(|p| Box::new(PathPrefixMatcher::new(p)) as Box<dyn Matcher>)
            .collect();
        if static_files {
            matchers.push(Box::new(StaticFileMatcher));
        }
        Self::new(matchers)
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        // Any matcher passing is enough (OR)
        self.matchers.iter().any(|m| m.matches(path))
    }
}
