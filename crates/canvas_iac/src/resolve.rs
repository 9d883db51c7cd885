//! Per-node kind and identifier resolution shared by every stage.

use canvas_graph::Node;
use canvas_kb::{KnowledgeBase, NodeKind, ResourceMatcher};

use crate::identifier::{IdentifierAllocator, IdentifierPolicy};

/// A node with its resolved kind and resource identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode<'g> {
    pub node: &'g Node,
    pub kind: NodeKind,
    pub identifier: String,
}

/// All nodes of one generation call, resolved once.
#[derive(Debug, Clone)]
pub struct ResolvedGraph<'g> {
    nodes: Vec<ResolvedNode<'g>>,
    order: Vec<usize>,
}

impl<'g> ResolvedGraph<'g> {
    /// Resolve kinds, fix the emission order, then allocate identifiers in
    /// that order.
    pub fn resolve(kb: &KnowledgeBase, nodes: &'g [Node], policy: IdentifierPolicy) -> Self {
        let matcher = ResourceMatcher::new(kb);
        let kinds: Vec<NodeKind> = nodes
            .iter()
            .map(|n| matcher.resolve(n.kind.as_deref()))
            .collect();

        // Grouping nodes first, input order kept within each tier
        let (mut order, rest): (Vec<usize>, Vec<usize>) =
            (0..nodes.len()).partition(|&i| kinds[i].is_grouping());
        order.extend(rest);

        let mut identifiers = vec![String::new(); nodes.len()];
        let mut allocator = IdentifierAllocator::new(policy);
        for &i in &order {
            identifiers[i] = allocator.allocate(&nodes[i].label);
        }

        let nodes = nodes
            .iter()
            .zip(kinds)
            .zip(identifiers)
            .map(|((node, kind), identifier)| ResolvedNode {
                node,
                kind,
                identifier,
            })
            .collect();

        Self { nodes, order }
    }

    /// Nodes in input order.
    pub fn nodes(&self) -> &[ResolvedNode<'g>] {
        &self.nodes
    }

    /// Nodes in emission order.
    pub fn emission_order(&self) -> impl Iterator<Item = &ResolvedNode<'g>> + '_ {
        self.order.iter().map(move |&i| &self.nodes[i])
    }

    /// First node with the given id.
    pub fn find(&self, id: &str) -> Option<&ResolvedNode<'g>> {
        self.nodes.iter().find(|n| n.node.id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
