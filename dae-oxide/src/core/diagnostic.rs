use serde::Serialize;

use crate::core::shared::Semantic;

/// Problems that are local to one record. They are reported but do not stop
/// the decode; the affected fields read as absent or default.
#[remain::sorted]
#[derive(Clone, PartialEq, Debug, Serialize, thiserror::Error)]
pub enum Diagnostic {
    #[error("Source '{source_id}' is bound as {first} and as {second}; keeping {first}")]
    ConflictingSemantic { source_id: String, first: Semantic, second: Semantic },
    #[error("{what} declares count {declared} but holds {actual}")]
    CountMismatch { what: String, declared: usize, actual: usize },
    #[error("Polygon list for material '{material}' appears more than once; the later one replaces the earlier")]
    DuplicatePolylist { material: String },
    #[error("Source '{source_id}' holds {len} values, which is not a multiple of its stride {stride}")]
    RaggedSource { source_id: String, len: usize, stride: usize },
    #[error("Effect '{effect}' uses unknown reflection model '{model}'")]
    UnknownReflectionModel { effect: String, model: String },
    #[error("Material '{material}' refers to effect '{effect}', which is not defined")]
    UnresolvedEffect { material: String, effect: String },
    #[error("Polygon list refers to material '{material}', which is not defined")]
    UnresolvedMaterial { material: String },
    #[error("Polygon list for material '{material}' refers to source '{source_id}', which is not defined")]
    UnresolvedSource { material: String, source_id: String },
}

/// Collects diagnostics during decoding and forwards each to the log.
#[derive(Clone, Debug, Default)]
pub(crate) struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
