use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::core::diagnostic::{Diagnostic, DiagnosticSink};
use crate::core::material::MaterialRecord;
use crate::core::polylist::{InputBinding, PolygonList};
use crate::core::shared::{Semantic, UsageFlags};
use crate::decode::material::strip_reference;
use crate::decode::Err;
use crate::io::xml::{self, Node};

/// Polygon lists keyed by material id in document order, together with the
/// semantics any of them declares.
#[derive(Debug)]
pub(crate) struct DecodedPolylists {
    pub lists: IndexMap<String, PolygonList>,
    pub usage: UsageFlags,
}

/// One input of the `vertices` element.
#[derive(Debug, Clone)]
struct VertexInput {
    semantic: Semantic,
    source_id: String,
}

/// Decodes every `polylist` and `triangles` element of the mesh.
pub(crate) fn decode_polylists(
    mesh: &Node<'_>,
    materials: &IndexMap<String, MaterialRecord>,
    sink: &mut DiagnosticSink,
) -> Result<DecodedPolylists, Err> {
    let (vertices_id, vertex_inputs) = decode_vertices(mesh)?;

    let mut lists = IndexMap::new();
    let mut usage = UsageFlags::default();
    for element in mesh.elements() {
        let list = match element.get_name() {
            "polylist" => decode_polylist(&element, &vertices_id, &vertex_inputs, sink)?,
            "triangles" => decode_triangles(&element, &vertices_id, &vertex_inputs)?,
            _ => continue,
        };

        usage.merge(list.get_usage());
        let material_id = list.get_material_id().to_owned();
        if !materials.contains_key(&material_id) {
            sink.report(Diagnostic::UnresolvedMaterial { material: material_id.clone() });
        }
        if lists.insert(material_id.clone(), list).is_some() {
            sink.report(Diagnostic::DuplicatePolylist { material: material_id });
        }
    }

    if lists.is_empty() {
        return Err(xml::Err::MissingElement(format!("{}/polylist", mesh.get_path())).into());
    }

    tracing::debug!("decoded {} polygon lists", lists.len());
    Ok(DecodedPolylists { lists, usage })
}

/// Reads the `vertices` element: its id and the inputs a `VERTEX` input
/// of a polygon list stands for.
fn decode_vertices(mesh: &Node<'_>) -> Result<(String, Vec<VertexInput>), Err> {
    let vertices = mesh.child("vertices")?;
    let id = vertices.attr("id")?.to_owned();
    let mut inputs = Vec::new();
    for input in vertices.children("input") {
        let name = input.attr("semantic")?;
        let source_id = strip_reference(input.attr("source")?).to_owned();
        match Semantic::from_collada(name) {
            Some(semantic) => inputs.push(VertexInput { semantic, source_id }),
            None => tracing::debug!("ignoring vertices input with semantic {}", name),
        }
    }
    if inputs.is_empty() {
        return Err(xml::Err::MissingElement(format!("{}/input", vertices.get_path())).into());
    }
    Ok((id, inputs))
}

fn decode_polylist(
    element: &Node<'_>,
    vertices_id: &str,
    vertex_inputs: &[VertexInput],
    sink: &mut DiagnosticSink,
) -> Result<PolygonList, Err> {
    let material_id = element.attr("material")?.to_owned();
    let vertex_counts = element.child("vcount")?.parse_list::<usize>()?;
    let declared_face_count = element.opt_parse_attr::<usize>("count")?.unwrap_or(vertex_counts.len());
    if declared_face_count != vertex_counts.len() {
        sink.report(Diagnostic::CountMismatch {
            what: format!("polylist of material '{}'", material_id),
            declared: declared_face_count,
            actual: vertex_counts.len(),
        });
    }
    build_list(element, material_id, FaceCounts::Listed(vertex_counts), declared_face_count, vertices_id, vertex_inputs)
}

/// `triangles` is a polygon list whose faces all have three vertices.
fn decode_triangles(
    element: &Node<'_>,
    vertices_id: &str,
    vertex_inputs: &[VertexInput],
) -> Result<PolygonList, Err> {
    let material_id = element.attr("material")?.to_owned();
    let count = element.parse_attr::<usize>("count")?;
    build_list(element, material_id, FaceCounts::Triangles(count), count, vertices_id, vertex_inputs)
}

/// Per-face vertex counts as declared. Triangle counts are expanded only
/// after the index stream has been checked against them.
enum FaceCounts {
    Listed(Vec<usize>),
    Triangles(usize),
}

impl FaceCounts {
    fn num_vertices(&self) -> Option<usize> {
        match self {
            FaceCounts::Listed(counts) => counts.iter().try_fold(0usize, |acc, &c| acc.checked_add(c)),
            FaceCounts::Triangles(count) => count.checked_mul(3),
        }
    }

    fn into_vec(self) -> Vec<usize> {
        match self {
            FaceCounts::Listed(counts) => counts,
            FaceCounts::Triangles(count) => vec![3; count],
        }
    }
}

fn build_list(
    element: &Node<'_>,
    material_id: String,
    face_counts: FaceCounts,
    declared_face_count: usize,
    vertices_id: &str,
    vertex_inputs: &[VertexInput],
) -> Result<PolygonList, Err> {
    let (bindings, num_offsets) = decode_inputs(element, &material_id, vertices_id, vertex_inputs)?;

    let indices = match element.opt_child("p") {
        Some(p) => p.parse_list::<usize>()?,
        None => Vec::new(),
    };
    let expected = face_counts.num_vertices().and_then(|n| n.checked_mul(num_offsets));
    if expected != Some(indices.len()) {
        return Err(Err::IndexStreamLength {
            material: material_id,
            expected: expected.unwrap_or(usize::MAX),
            found: indices.len(),
        });
    }

    let vertex_counts = face_counts.into_vec();
    Ok(PolygonList::new(material_id, bindings, num_offsets, vertex_counts, declared_face_count, indices))
}

/// Builds the offset to (semantic, source) table. Every distinct offset takes
/// one slot of the per-vertex index tuple, including offsets whose semantic
/// is not decoded; the offsets must therefore cover `0..n`.
fn decode_inputs(
    element: &Node<'_>,
    material_id: &str,
    vertices_id: &str,
    vertex_inputs: &[VertexInput],
) -> Result<(Vec<InputBinding>, usize), Err> {
    let mut bindings = Vec::new();
    let mut offsets = BTreeSet::new();
    for input in element.children("input") {
        let name = input.attr("semantic")?;
        let source_id = strip_reference(input.attr("source")?);
        let offset = input.parse_attr::<usize>("offset")?;
        offsets.insert(offset);

        if name == "VERTEX" && source_id == vertices_id {
            bindings.extend(vertex_inputs.iter().map(|v| InputBinding {
                offset,
                semantic: v.semantic,
                source_id: v.source_id.clone(),
            }));
            continue;
        }
        match Semantic::from_collada(name) {
            Some(semantic) => bindings.push(InputBinding {
                offset,
                semantic,
                source_id: source_id.to_owned(),
            }),
            None => tracing::debug!("ignoring input with semantic {} in material {}", name, material_id),
        }
    }

    if offsets.is_empty() {
        return Err(xml::Err::MissingElement(format!("{}/input", element.get_path())).into());
    }
    let num_offsets = offsets.len();
    if offsets.iter().copied().ne(0..num_offsets) {
        return Err(Err::NonContiguousOffsets {
            material: material_id.to_owned(),
            offsets: offsets.into_iter().collect(),
        });
    }

    Ok((bindings, num_offsets))
}
