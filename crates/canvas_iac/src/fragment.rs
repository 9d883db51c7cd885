//! Generated text pieces and where they came from.

use serde::Serialize;

/// What produced a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FragmentOrigin {
    Node { id: String },
    Edge { source: String, target: String },
}

/// Kind of text a fragment holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentClass {
    /// A rendered knowledge base template.
    Resource,
    /// Commented description of a node with no recognised kind.
    Placeholder,
    /// Security group rules inferred from an edge.
    Rule,
    /// Comment asking for manual configuration of an edge.
    DeferredRule,
}

impl FragmentClass {
    /// Whether the fragment comes from a node rather than an edge.
    pub fn is_node(&self) -> bool {
        matches!(self, FragmentClass::Resource | FragmentClass::Placeholder)
    }
}

/// One unit of generated text. Always newline-terminated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub origin: FragmentOrigin,
    pub class: FragmentClass,
    pub text: String,
}

impl Fragment {
    pub fn new(origin: FragmentOrigin, class: FragmentClass, text: impl Into<String>) -> Self {
        let mut text = text.into();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Self {
            origin,
            class,
            text,
        }
    }

    pub fn for_node(id: impl Into<String>, class: FragmentClass, text: impl Into<String>) -> Self {
        Self::new(FragmentOrigin::Node { id: id.into() }, class, text)
    }

    pub fn for_edge(
        source: impl Into<String>,
        target: impl Into<String>,
        class: FragmentClass,
        text: impl Into<String>,
    ) -> Self {
        Self::new(
            FragmentOrigin::Edge {
                source: source.into(),
                target: target.into(),
            },
            class,
            text,
        )
    }

    /// Node id this fragment was produced for, if any.
    pub fn node_id(&self) -> Option<&str> {
        match &self.origin {
            FragmentOrigin::Node { id } => Some(id.as_str()),
            FragmentOrigin::Edge { .. } => None,
        }
    }
}

/// Text safe to place after `#` on a single comment line.
pub fn comment_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_safe_escapes_line_breaks() {
        assert_eq!(comment_safe("Gizmo"), "Gizmo");
        assert_eq!(comment_safe("a\nb\r\nc"), "a\\nb\\r\\nc");
        assert!(!comment_safe("widget\n}").contains('\n'));
    }

    #[test]
    fn test_text_is_newline_terminated() {
        let fragment = Fragment::for_node("n1", FragmentClass::Resource, "resource {}");
        assert_eq!(fragment.text, "resource {}\n");

        let fragment = Fragment::for_edge("a", "b", FragmentClass::Rule, "rule\n");
        assert_eq!(fragment.text, "rule\n");
        assert_eq!(fragment.node_id(), None);
    }
}
