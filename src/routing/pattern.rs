//! Route template handling.
//!
//! # Responsibilities
//! - Translate brace templates (`/rules/{Namespace}`) into colon templates (`/rules/:Namespace`)
//! - Parse colon templates into segments
//! - Match request paths and capture named parameters
//!
//! # Design Decisions
//! - Translation is purely syntactic; names are never validated
//! - Malformed braces are copied through, the router decides what to reject
//! - Literal segments are case-sensitive
//! - No regex to guarantee O(n) matching

use crate::context::PathParams;

/// Rewrites every `{Name}` in `pattern` into `:Name`.
///
/// Text outside braces is copied unchanged. An unmatched `{` (and the rest of
/// the input), an empty `{}` and a stray `}` are copied verbatim. A parameter
/// opens at the innermost `{`, so `{a{b}` becomes `{a:b`.
pub fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find(['{', '}']) {
            Some(0) if after.starts_with('}') => {
                out.push_str("{}");
                rest = &after[1..];
            }
            Some(close) if after[close..].starts_with('}') => {
                out.push(':');
                out.push_str(&after[..close]);
                rest = &after[close + 1..];
            }
            // Another `{` comes first: this one is literal
            Some(_) => {
                out.push('{');
                rest = after;
            }
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed colon-syntax route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a colon template such as `/ruler/:Recipient/api/v1/rules`.
    pub fn parse(template: impl Into<String>) -> Self {
        let template = template.into();
        let segments = split_segments(&template)
            .map(|s| match s.strip_prefix(':') {
                Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                _ => Segment::Literal(s.to_string()),
            })
            .collect();

        Self { template, segments }
    }

    /// The colon template this pattern was parsed from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Names of the parameters in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match `path` against the pattern, returning captured parameters.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let mut params = PathParams::default();
        let mut parts = split_segments(path);

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => params.insert(name.clone(), part.to_string()),
            }
        }

        // All segments must be consumed (AND no extra path remains)
        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.trim_matches('/').split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_ruler_path() {
        assert_eq!(translate(""), "");
        assert_eq!(
            translate("/ruler/{Recipient}/api/v1/rules/{Namespace}/{Groupname}"),
            "/ruler/:Recipient/api/v1/rules/:Namespace/:Groupname"
        );
    }

    #[test]
    fn test_translate_without_braces_is_identity() {
        for p in ["/", "/api/v1/rules", "no/leading/slash", ":already/:colon", "a b c"] {
            assert_eq!(translate(p), p);
        }
    }

    #[test]
    fn test_translate_does_not_validate_names() {
        assert_eq!(translate("/x/{some-name.v2}"), "/x/:some-name.v2");
        assert_eq!(translate("{A}{B}"), ":A:B");
    }

    #[test]
    fn test_translate_malformed_braces() {
        assert_eq!(translate("/x/{open"), "/x/{open");
        assert_eq!(translate("/x/{}/y"), "/x/{}/y");
        assert_eq!(translate("/x/}/{Id}"), "/x/}/:Id");
    }

    #[test]
    fn test_translate_nested_open_brace() {
        assert_eq!(translate("/x/{a{b}"), "/x/{a:b");
        assert_eq!(translate("{{Id}}"), "{:Id}");
        assert_eq!(translate("/x/{a{b"), "/x/{a{b");
        assert_eq!(translate("/x/{a{}/{Id}"), "/x/{a{}/:Id");
    }

    #[test]
    fn test_pattern_captures_params() {
        let pattern = PathPattern::parse("/ruler/:Recipient/api/v1/rules/:Namespace");
        let params = pattern.matches("/ruler/42/api/v1/rules/team-a").unwrap();
        assert_eq!(params.get("Recipient"), Some("42"));
        assert_eq!(params.get("Namespace"), Some("team-a"));
        assert_eq!(
            pattern.param_names().collect::<Vec<_>>(),
            vec!["Recipient", "Namespace"]
        );
    }

    #[test]
    fn test_pattern_rejects_mismatch() {
        let pattern = PathPattern::parse("/ruler/:Recipient/api/v1/rules");
        assert!(pattern.matches("/ruler/1/api/v1/rules/").is_some()); // Trailing slash ignored
        assert!(pattern.matches("/ruler/1/api/v1/rules/ns").is_none());
        assert!(pattern.matches("/ruler/1/api/v1").is_none());
        assert!(pattern.matches("/Ruler/1/api/v1/rules").is_none()); // Case sensitive
    }
}
