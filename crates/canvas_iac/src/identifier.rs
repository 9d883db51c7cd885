//! Resource identifiers derived from node labels.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

fn non_identifier_char() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-z0-9]").unwrap())
}

/// Lower-case the label and replace every character outside `[a-z0-9]` by `_`.
pub fn derive_identifier(label: &str) -> String {
    non_identifier_char()
        .replace_all(&label.to_lowercase(), "_")
        .into_owned()
}

/// What to do when two nodes derive the same identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierPolicy {
    /// Keep colliding identifiers as they are.
    #[default]
    Preserve,
    /// Rename later duplicates `_2`, `_3`, ... in emission order.
    Suffix,
}

/// Hands out identifiers according to a policy.
#[derive(Debug, Default)]
pub struct IdentifierAllocator {
    policy: IdentifierPolicy,
    used: HashSet<String>,
}

impl IdentifierAllocator {
    pub fn new(policy: IdentifierPolicy) -> Self {
        Self {
            policy,
            used: HashSet::new(),
        }
    }

    /// Identifier for the next node with this label.
    pub fn allocate(&mut self, label: &str) -> String {
        let base = derive_identifier(label);
        if self.policy == IdentifierPolicy::Preserve || !self.used.contains(&base) {
            self.used.insert(base.clone());
            return base;
        }

        let mut n = 2;
        loop {
            let candidate = format!("{}_{}", base, n);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
