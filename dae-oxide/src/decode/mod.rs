pub mod config;
pub mod policy;
pub(crate) mod effect;
pub(crate) mod material;
pub(crate) mod source;
pub(crate) mod polylist;
pub(crate) mod transform;
pub(crate) mod flatten;

pub use transform::flip_v;

use crate::core::diagnostic::DiagnosticSink;
use crate::core::scene::SceneModel;
use crate::core::shared::Semantic;
use crate::decode::config::Config;
use crate::io::xml::{self, Node};

/// Structural errors. Any of them aborts the decode.
#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("Polygon list for material '{material}' refers to index {index} of source '{source_id}', which holds {len} tuples")]
    IndexOutOfRange { material: String, source_id: String, index: usize, len: usize },
    #[error("Polygon list for material '{material}' needs {expected} indices but holds {found}")]
    IndexStreamLength { material: String, expected: usize, found: usize },
    #[error("Color at '{path}' has {len} components, expected 3 or 4")]
    InvalidColor { path: String, len: usize },
    #[error("Source '{source_id}' has invalid stride {stride}")]
    InvalidStride { source_id: String, stride: usize },
    #[error("Input offsets of the polygon list for material '{material}' must be 0..n, got {offsets:?}")]
    NonContiguousOffsets { material: String, offsets: Vec<usize> },
    #[error("Source '{source_id}' is bound as {semantic} and needs stride {required}, but has stride {stride}")]
    StrideTooSmall { source_id: String, semantic: Semantic, stride: usize, required: usize },
    #[error("XML error: {0}")]
    Xml(#[from] xml::Err),
}

/// Decodes a COLLADA document into a [`SceneModel`].
///
/// The stages run in a fixed order: effects, materials, sources, polygon
/// lists, coordinate transform, flattening. The model is complete and
/// immutable once this returns.
pub fn decode(text: &str, cfg: &Config) -> Result<SceneModel, Err> {
    let document = xml::parse_document(text)?;
    let root = Node::root(&document);
    let mut sink = DiagnosticSink::new();

    let asset = root.child("asset")?;
    let z_up = asset.child("up_axis")?.text().trim() == "Z_UP";
    let tool_text = asset.find("contributor/authoring_tool")?.text().into_owned();
    let authoring_tool = policy::classify_authoring_tool(&tool_text);

    let transform_policy = policy::select_transform_policy(cfg, authoring_tool, z_up);
    tracing::debug!("authoring tool {:?}, z_up {}, policy {:?}", authoring_tool, z_up, transform_policy);

    let effects = effect::decode_effects(&root, &mut sink)?;
    let materials = material::decode_materials(&root, &effects, &mut sink)?;

    let mesh = root.find("library_geometries/geometry/mesh")?;
    let mut sources = source::decode_sources(&mesh, &mut sink)?;
    let polylist::DecodedPolylists { mut lists, usage } = polylist::decode_polylists(&mesh, &materials, &mut sink)?;

    transform::bind_and_transform(&mut sources, &lists, &transform_policy, &mut sink)?;
    let (totals, usage) = flatten::flatten_all(&mut lists, &sources, &materials, usage, cfg)?;

    Ok(SceneModel {
        z_up,
        authoring_tool,
        policy: transform_policy,
        config: cfg.clone(),
        usage,
        materials,
        sources,
        polylists: lists,
        face_count: totals.face_count,
        vertex_count: totals.vertex_count,
        diagnostics: sink.into_vec(),
    })
}
