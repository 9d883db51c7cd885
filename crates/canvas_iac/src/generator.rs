//! The generation pipeline: emit, infer, assemble.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use canvas_graph::{Edge, Graph, Node};
use canvas_kb::{Clock, DefaultSynthesizer, KnowledgeBase};

use crate::assembler::DocumentAssembler;
use crate::emitter::ResourceEmitter;
use crate::error::{IacError, IacResult};
use crate::fragment::FragmentClass;
use crate::identifier::IdentifierPolicy;
use crate::network::NetworkInference;
use crate::profile::DocumentProfile;
use crate::resolve::ResolvedGraph;

/// Conventional entry-point file of a Terraform root module.
pub const ENTRY_POINT_FILE: &str = "main.tf";

/// Turns a diagram into a Terraform document.
///
/// Holds no per-call state; share it freely between threads.
#[derive(Debug, Clone)]
pub struct TerraformGenerator {
    kb: Arc<KnowledgeBase>,
    synthesizer: DefaultSynthesizer,
    assembler: DocumentAssembler,
    policy: IdentifierPolicy,
}

impl TerraformGenerator {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self {
            kb,
            synthesizer: DefaultSynthesizer::default(),
            assembler: DocumentAssembler::default(),
            policy: IdentifierPolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.synthesizer = DefaultSynthesizer::new(clock);
        self
    }

    pub fn with_profile(mut self, profile: DocumentProfile) -> Self {
        self.assembler = DocumentAssembler::new(profile);
        self
    }

    pub fn with_identifier_policy(mut self, policy: IdentifierPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Generate the full document for a graph.
    pub fn generate(&self, nodes: &[Node], edges: &[Edge]) -> String {
        let graph = ResolvedGraph::resolve(&self.kb, nodes, self.policy);

        let mut fragments = ResourceEmitter::new(&self.kb, &self.synthesizer).emit_resolved(&graph);
        let resources = fragments.len();
        fragments.extend(NetworkInference::new(&self.kb).infer_resolved(&graph, edges));

        let count = |class: FragmentClass| fragments.iter().filter(|f| f.class == class).count();
        info!(
            "Generated Terraform for {} nodes ({} placeholders) and {} connections ({} deferred)",
            resources,
            count(FragmentClass::Placeholder),
            fragments.len() - resources,
            count(FragmentClass::DeferredRule)
        );

        self.assembler.assemble(&fragments, &graph)
    }

    /// Generate the document for a [`Graph`].
    pub fn generate_graph(&self, graph: &Graph) -> String {
        self.generate(&graph.nodes, &graph.edges)
    }

    /// Write `text` to [`ENTRY_POINT_FILE`] inside `dir`, creating `dir`.
    pub fn export(dir: impl AsRef<Path>, text: &str) -> IacResult<PathBuf> {
        let dir = dir.as_ref();
        if dir.is_file() {
            return Err(IacError::ExportFailed(format!(
                "{} is a file, expected a directory",
                dir.display()
            )));
        }

        fs::create_dir_all(dir)?;
        let path = dir.join(ENTRY_POINT_FILE);
        debug!("Writing Terraform to {:?}", path);
        fs::write(&path, text)?;

        info!("Exported Terraform configuration to {:?}", path);
        Ok(path)
    }
}
