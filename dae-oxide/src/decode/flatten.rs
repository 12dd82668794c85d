use indexmap::IndexMap;

use crate::core::material::MaterialRecord;
use crate::core::polylist::{FlatStreams, PolygonList};
use crate::core::shared::{Semantic, UsageFlags};
use crate::core::source::SourceArray;
use crate::decode::config::{ColorFormat, Config};
use crate::decode::Err;

/// Totals across all polygon lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FlattenTotals {
    pub face_count: usize,
    pub vertex_count: usize,
}

/// Expands every polygon list into non-indexed streams, stored on the list.
///
/// Returns the totals and the usage flags updated for synthesized colors.
pub(crate) fn flatten_all(
    lists: &mut IndexMap<String, PolygonList>,
    sources: &IndexMap<String, SourceArray>,
    materials: &IndexMap<String, MaterialRecord>,
    usage: UsageFlags,
    cfg: &Config,
) -> Result<(FlattenTotals, UsageFlags), Err> {
    let mut totals = FlattenTotals::default();
    let mut usage = usage;
    for list in lists.values_mut() {
        let mut flat = flatten_list(list, sources, cfg)?;

        if flat.color.is_empty() && cfg.force_vertex_color {
            let rgb = materials.get(list.get_material_id())
                .map(MaterialRecord::get_diffuse_rgb)
                .unwrap_or([1.0, 1.0, 1.0]);
            synthesize_colors(&mut flat, rgb, list.num_vertices(), cfg.color_format);
            let mut list_usage = list.get_usage();
            list_usage.mark(Semantic::Color);
            list.set_usage(list_usage);
            usage.mark(Semantic::Color);
        }

        totals.face_count += list.num_faces();
        totals.vertex_count += list.num_vertices();
        list.flat = flat;
    }

    tracing::debug!("flattened {} faces, {} vertices", totals.face_count, totals.vertex_count);
    Ok((totals, usage))
}

/// Walks faces, vertices and bindings in order and appends the resolved tuple
/// of each bound semantic. Only the first binding of a semantic contributes,
/// so every stream holds at most one entry per vertex. A source whose data was
/// laid out for another semantic is treated as unresolved.
fn flatten_list(list: &PolygonList, sources: &IndexMap<String, SourceArray>, cfg: &Config) -> Result<FlatStreams, Err> {
    let streams = Semantic::ALL.iter()
        .filter_map(|&semantic| list.get_binding(semantic))
        .filter_map(|binding| {
            sources.get(&binding.source_id)
                .filter(|source| source.get_semantic() == Some(binding.semantic))
                .map(|source| (binding.semantic, binding.offset, source))
        })
        .collect::<Vec<_>>();

    let num_vertices = list.num_vertices();
    let mut flat = FlatStreams::default();
    for (semantic, _, source) in &streams {
        let out = stream_mut(&mut flat, *semantic);
        out.reserve(num_vertices * source.get_data_stride());
    }

    for face in list.faces() {
        for tuple in face {
            for (semantic, offset, source) in &streams {
                let index = tuple[*offset];
                let values = source.get_tuple(index).ok_or_else(|| Err::IndexOutOfRange {
                    material: list.get_material_id().to_owned(),
                    source_id: source.get_id().to_owned(),
                    index,
                    len: source.tuples().len(),
                })?;
                match semantic {
                    Semantic::Color if cfg.color_format == ColorFormat::FloatRgba => {
                        flat.color.extend_from_slice(&values[..3]);
                        flat.color.push(values.get(3).copied().unwrap_or(1.0));
                    },
                    _ => stream_mut(&mut flat, *semantic).extend_from_slice(values),
                }
            }
        }
    }

    if let Some((_, _, source)) = streams.iter().find(|(semantic, _, _)| *semantic == Semantic::Color) {
        flat.color_width = match cfg.color_format {
            ColorFormat::FloatRgba => 4,
            _ => source.get_data_stride(),
        };
    }

    Ok(flat)
}

fn stream_mut(flat: &mut FlatStreams, semantic: Semantic) -> &mut Vec<f32> {
    match semantic {
        Semantic::Vertex => &mut flat.vertex,
        Semantic::Normal => &mut flat.normal,
        Semantic::TexCoord => &mut flat.uv,
        Semantic::Color => &mut flat.color,
    }
}

/// Broadcasts the material diffuse to one color per vertex.
fn synthesize_colors(flat: &mut FlatStreams, rgb: [f32; 3], num_vertices: usize, format: ColorFormat) {
    let width = match format {
        ColorFormat::FloatRgba => 4,
        _ => 3,
    };
    flat.color.clear();
    flat.color.reserve(num_vertices * width);
    for _ in 0..num_vertices {
        flat.color.extend_from_slice(&rgb);
        if width == 4 {
            flat.color.push(1.0);
        }
    }
    flat.color_width = width;
    flat.color_synthesized = true;
}
