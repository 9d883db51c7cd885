//! Resolution of free-form kind strings to knowledge base entries.

use serde::Serialize;
use tracing::debug;

use crate::kind::ResourceKind;
use crate::knowledge::KnowledgeBase;

/// Outcome of resolving a node's kind string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Known(ResourceKind),
    Unrecognized { raw: Option<String> },
}

impl NodeKind {
    /// The resolved kind, if any.
    pub fn known(&self) -> Option<ResourceKind> {
        match self {
            NodeKind::Known(kind) => Some(*kind),
            NodeKind::Unrecognized { .. } => None,
        }
    }

    /// Whether this node is a container emitted ahead of its members.
    pub fn is_grouping(&self) -> bool {
        self.known().is_some_and(|k| k.is_grouping())
    }

    /// Kind string for comments: canonical key, raw input, or `unknown`.
    pub fn describe(&self) -> &str {
        match self {
            NodeKind::Known(kind) => kind.as_str(),
            NodeKind::Unrecognized { raw: Some(raw) } if !raw.is_empty() => raw.as_str(),
            NodeKind::Unrecognized { .. } => "unknown",
        }
    }
}

/// Matches kind strings against a knowledge base.
///
/// Exact keys and aliases win. Otherwise the first entry in insertion order
/// whose key is a substring of the input, or that contains the input's second
/// `_`-separated segment, is chosen (`vendor_instance` matches `aws_instance`).
#[derive(Debug, Clone, Copy)]
pub struct ResourceMatcher<'kb> {
    kb: &'kb KnowledgeBase,
}

impl<'kb> ResourceMatcher<'kb> {
    pub fn new(kb: &'kb KnowledgeBase) -> Self {
        Self { kb }
    }

    /// Resolve an optional kind string.
    pub fn resolve(&self, kind: Option<&str>) -> NodeKind {
        match kind {
            Some(raw) => match self.match_kind(raw) {
                Some(kind) => NodeKind::Known(kind),
                None => NodeKind::Unrecognized {
                    raw: Some(raw.to_string()),
                },
            },
            None => NodeKind::Unrecognized { raw: None },
        }
    }

    /// Match a kind string, exact first, then fuzzy.
    pub fn match_kind(&self, kind: &str) -> Option<ResourceKind> {
        if let Some(entry) = self.kb.lookup(kind) {
            return Some(entry.kind);
        }

        let token = kind.split('_').nth(1).filter(|t| !t.is_empty());
        let matched = self.kb.entries().iter().map(|e| e.kind).find(|candidate| {
            let key = candidate.as_str();
            kind.contains(key) || token.is_some_and(|t| key.contains(t))
        });

        if let Some(found) = matched {
            debug!("Fuzzy matched kind '{}' to {}", kind, found);
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::load().unwrap()
    }

    #[test]
    fn test_exact_and_alias() {
        let kb = kb();
        let matcher = ResourceMatcher::new(&kb);
        assert_eq!(matcher.match_kind("aws_db_instance"), Some(ResourceKind::DbInstance));
        assert_eq!(matcher.match_kind("lambda"), Some(ResourceKind::LambdaFunction));
        assert_eq!(matcher.match_kind("network"), Some(ResourceKind::Vpc));
    }

    #[test]
    fn test_substring_match() {
        let kb = kb();
        let matcher = ResourceMatcher::new(&kb);
        assert_eq!(matcher.match_kind("aws_s3_bucket_v2"), Some(ResourceKind::S3Bucket));
    }

    #[test]
    fn test_second_segment_token() {
        let kb = kb();
        let matcher = ResourceMatcher::new(&kb);
        assert_eq!(matcher.match_kind("vendor_instance"), Some(ResourceKind::Instance));
        assert_eq!(matcher.match_kind("gcp_lambda_thing"), Some(ResourceKind::LambdaFunction));
        // "db" first appears in aws_db_instance
        assert_eq!(matcher.match_kind("azure_db"), Some(ResourceKind::DbInstance));
    }

    #[test]
    fn test_first_match_wins_in_insertion_order() {
        let kb = kb();
        let matcher = ResourceMatcher::new(&kb);
        // "instance" is contained by aws_instance and aws_db_instance
        assert_eq!(matcher.match_kind("x_instance"), Some(ResourceKind::Instance));
    }

    #[test]
    fn test_no_match() {
        let kb = kb();
        let matcher = ResourceMatcher::new(&kb);
        assert_eq!(matcher.match_kind("widget"), None);
        assert_eq!(matcher.match_kind("unknown_widget"), None);
        assert_eq!(matcher.match_kind("trailing_"), None);
        assert_eq!(matcher.match_kind(""), None);
    }

    #[test]
    fn test_resolve_describes_unrecognized() {
        let kb = kb();
        let matcher = ResourceMatcher::new(&kb);

        let unknown = matcher.resolve(Some("unknown_widget"));
        assert_eq!(unknown.describe(), "unknown_widget");
        assert!(!unknown.is_grouping());

        let absent = matcher.resolve(None);
        assert_eq!(absent, NodeKind::Unrecognized { raw: None });
        assert_eq!(absent.describe(), "unknown");

        assert!(matcher.resolve(Some("vpc")).is_grouping());
    }
}
