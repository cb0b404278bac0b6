use crate::shared::Result;
use std::path::Path;

/// Maximum number of exclusion patterns accepted from configuration
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclusion pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// PathFilter - decides which directories manifest discovery skips
///
/// Patterns use `*` for any run of characters (including `/`; `**` is
/// treated like `*`). A directory is excluded when a pattern matches
/// either its full path or its final component, so both `node_modules`
/// and `**/build/*` work as expected.
#[derive(Debug)]
pub struct PathFilter {
    patterns: Vec<PathPattern>,
}

impl PathFilter {
    /// # Errors
    /// - Too many patterns (> MAX_EXCLUDE_PATTERNS)
    /// - Invalid pattern (empty, too long, forbidden characters, only wildcards)
    pub fn new(patterns: &[String]) -> Result<Self> {
        if patterns.len() > MAX_EXCLUDE_PATTERNS {
            anyhow::bail!(
                "Too many excluded path patterns: {} (maximum: {})",
                patterns.len(),
                MAX_EXCLUDE_PATTERNS
            );
        }

        let patterns = patterns
            .iter()
            .map(|p| PathPattern::new(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let full = path.to_string_lossy().replace('\\', "/");
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.patterns
            .iter()
            .any(|p| p.matcher.matches(&full) || p.matcher.matches(&name))
    }
}

#[derive(Debug)]
struct PathPattern {
    matcher: PatternMatcher,
}

impl PathPattern {
    fn new(pattern: &str) -> Result<Self> {
        validate_pattern(pattern)?;
        Ok(Self {
            matcher: compile_pattern(pattern),
        })
    }
}

#[derive(Debug)]
enum PatternMatcher {
    /// "node_modules"
    Exact(String),
    /// "*/vendor"
    EndsWith(String),
    /// "/ws/tmp*"
    StartsWith(String),
    /// "*build*"
    Contains(String),
    /// "a*b*c": parts in order; ends without `*` are anchored
    Ordered {
        parts: Vec<String>,
        anchored_start: bool,
        anchored_end: bool,
    },
}

impl PatternMatcher {
    fn matches(&self, candidate: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => candidate == s,
            PatternMatcher::EndsWith(s) => candidate.ends_with(s.as_str()),
            PatternMatcher::StartsWith(s) => candidate.starts_with(s.as_str()),
            PatternMatcher::Contains(s) => candidate.contains(s.as_str()),
            PatternMatcher::Ordered {
                parts,
                anchored_start,
                anchored_end,
            } => {
                let mut rest = candidate;
                let mut parts = parts.as_slice();
                if *anchored_start {
                    if let Some((first, tail)) = parts.split_first() {
                        match rest.strip_prefix(first.as_str()) {
                            Some(r) => rest = r,
                            None => return false,
                        }
                        parts = tail;
                    }
                }
                if *anchored_end {
                    if let Some((last, init)) = parts.split_last() {
                        match rest.strip_suffix(last.as_str()) {
                            Some(r) => rest = r,
                            None => return false,
                        }
                        parts = init;
                    }
                }
                for part in parts {
                    match rest.find(part.as_str()) {
                        Some(pos) => rest = &rest[pos + part.len()..],
                        None => return false,
                    }
                }
                true
            }
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        anyhow::bail!("Excluded path pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Excluded path pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        anyhow::bail!(
            "Excluded path pattern '{}' contains invalid character '{}'",
            pattern,
            ch
        );
    }

    if pattern.chars().all(|c| c == '*' || c == '/') {
        anyhow::bail!(
            "Excluded path pattern cannot contain only wildcards: '{}'",
            pattern
        );
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '\\' | '*' | '@' | ' ')
}

fn compile_pattern(pattern: &str) -> PatternMatcher {
    let normalized = pattern.replace('\\', "/");
    let starts_wild = normalized.starts_with('*');
    let ends_wild = normalized.ends_with('*');
    let parts: Vec<String> = normalized
        .split('*')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    match (parts.len(), starts_wild, ends_wild) {
        (1, false, false) => PatternMatcher::Exact(parts[0].clone()),
        (1, true, false) => PatternMatcher::EndsWith(parts[0].clone()),
        (1, false, true) => PatternMatcher::StartsWith(parts[0].clone()),
        (1, true, true) => PatternMatcher::Contains(parts[0].clone()),
        _ => PatternMatcher::Ordered {
            parts,
            anchored_start: !starts_wild,
            anchored_end: !ends_wild,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(patterns: &[&str]) -> PathFilter {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        PathFilter::new(&patterns).unwrap()
    }

    #[test]
    fn test_empty_filter_excludes_nothing() {
        assert!(!filter(&[]).is_excluded(Path::new("/ws/node_modules")));
    }

    #[test]
    fn test_bare_name_matches_final_component() {
        let f = filter(&["node_modules"]);
        assert!(f.is_excluded(Path::new("/ws/web/node_modules")));
        assert!(!f.is_excluded(Path::new("/ws/web/node_modules_backup")));
        assert!(!f.is_excluded(Path::new("/ws/web")));
    }

    #[test]
    fn test_double_star_prefix() {
        let f = filter(&["**/vendor"]);
        assert!(f.is_excluded(Path::new("/ws/svc/vendor")));
        assert!(!f.is_excluded(Path::new("/ws/svc/vendors")));
    }

    #[test]
    fn test_prefix_pattern() {
        let f = filter(&["/ws/tmp*"]);
        assert!(f.is_excluded(Path::new("/ws/tmp")));
        assert!(f.is_excluded(Path::new("/ws/tmp-1")));
        assert!(!f.is_excluded(Path::new("/other/ws/tmp")));
    }

    #[test]
    fn test_contains_pattern() {
        let f = filter(&["*fixtures*"]);
        assert!(f.is_excluded(Path::new("/ws/test-fixtures/app")));
        assert!(!f.is_excluded(Path::new("/ws/app")));
    }

    #[test]
    fn test_ordered_pattern() {
        let f = filter(&["/ws/*/build"]);
        assert!(f.is_excluded(Path::new("/ws/app/build")));
        assert!(!f.is_excluded(Path::new("/ws/app/build/out")));
        assert!(!f.is_excluded(Path::new("/other/app/build")));
    }

    #[test]
    fn test_invalid_patterns_rejected() {
        assert!(PathFilter::new(&["".to_string()]).is_err());
        assert!(PathFilter::new(&["**".to_string()]).is_err());
        assert!(PathFilter::new(&["a;rm".to_string()]).is_err());
        assert!(PathFilter::new(&["a".repeat(MAX_PATTERN_LENGTH + 1)]).is_err());

        let too_many: Vec<String> = (0..=MAX_EXCLUDE_PATTERNS).map(|i| format!("p{}", i)).collect();
        assert!(PathFilter::new(&too_many).is_err());
    }
}
