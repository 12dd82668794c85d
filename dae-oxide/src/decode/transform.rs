use indexmap::IndexMap;

use crate::core::diagnostic::{Diagnostic, DiagnosticSink};
use crate::core::polylist::PolygonList;
use crate::core::shared::Semantic;
use crate::core::source::SourceArray;
use crate::decode::policy::TransformPolicy;
use crate::decode::Err;

/// Assigns each source the semantic it is bound to and fills its transformed
/// tuples. Bindings to undefined sources are reported once per list.
pub(crate) fn bind_and_transform(
    sources: &mut IndexMap<String, SourceArray>,
    lists: &IndexMap<String, PolygonList>,
    policy: &TransformPolicy,
    sink: &mut DiagnosticSink,
) -> Result<(), Err> {
    for list in lists.values() {
        let mut reported = Vec::new();
        for binding in list.get_bindings() {
            let Some(source) = sources.get_mut(&binding.source_id) else {
                if !reported.contains(&binding.source_id) {
                    sink.report(Diagnostic::UnresolvedSource {
                        material: list.get_material_id().to_owned(),
                        source_id: binding.source_id.clone(),
                    });
                    reported.push(binding.source_id.clone());
                }
                continue;
            };
            match source.get_semantic() {
                None => source.set_semantic(binding.semantic),
                Some(first) if first != binding.semantic => {
                    sink.report(Diagnostic::ConflictingSemantic {
                        source_id: binding.source_id.clone(),
                        first,
                        second: binding.semantic,
                    });
                },
                Some(_) => {},
            }
        }
    }

    for source in sources.values_mut() {
        let Some(semantic) = source.get_semantic() else {
            continue;
        };
        let required = semantic.get_min_stride();
        if source.get_stride() < required {
            return Err(Err::StrideTooSmall {
                source_id: source.get_id().to_owned(),
                semantic,
                stride: source.get_stride(),
                required,
            });
        }

        let (data, stride) = match semantic {
            Semantic::Vertex | Semantic::Normal => (transform_xyz(source, policy), 3),
            Semantic::TexCoord => {
                let uv = source.raw_tuples().map(|t| [t[0], t[1]]);
                let data = if policy.v_flip {
                    uv.flat_map(flip_v).collect()
                } else {
                    uv.flatten().collect()
                };
                (data, 2)
            },
            Semantic::Color => {
                let width = source.get_stride().min(4);
                (source.raw_tuples().flat_map(|t| t[..width].iter().copied()).collect(), width)
            },
        };
        source.set_data(data, stride);
    }

    Ok(())
}

/// Swaps Y and Z for Z-up documents, then applies the axis signs.
fn transform_xyz(source: &SourceArray, policy: &TransformPolicy) -> Vec<f32> {
    let [mx, my, mz] = policy.axis_sign_multiplier;
    source.raw_tuples()
        .flat_map(|t| {
            let (x, y, z) = if policy.swap_y_z { (t[0], t[2], t[1]) } else { (t[0], t[1], t[2]) };
            [x * mx, y * my, z * mz]
        })
        .collect()
}

/// Moves the texture origin between the top-left and bottom-left conventions.
pub fn flip_v(uv: [f32; 2]) -> [f32; 2] {
    [uv[0], 1.0 - uv[1]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::polylist::InputBinding;

    fn single_list(bindings: Vec<InputBinding>) -> IndexMap<String, PolygonList> {
        let num_offsets = bindings.len();
        let mut lists = IndexMap::new();
        lists.insert(
            "m".to_string(),
            PolygonList::new("m".to_string(), bindings, num_offsets, vec![], 0, vec![]),
        );
        lists
    }

    fn binding(offset: usize, semantic: Semantic, source_id: &str) -> InputBinding {
        InputBinding { offset, semantic, source_id: source_id.to_string() }
    }

    #[test]
    fn z_up_swap_then_flip() {
        let mut sources = IndexMap::new();
        sources.insert("p".to_string(), SourceArray::new("p".to_string(), vec![1.0, 2.0, 3.0], 3, 3, 1));
        let lists = single_list(vec![binding(0, Semantic::Vertex, "p")]);
        let policy = TransformPolicy { swap_y_z: true, axis_sign_multiplier: [1.0, 1.0, -1.0], v_flip: true };
        let mut sink = DiagnosticSink::new();
        bind_and_transform(&mut sources, &lists, &policy, &mut sink).unwrap();
        assert_eq!(sources["p"].get_tuple(0), Some(&[1.0, 3.0, -2.0][..]));
    }

    #[test]
    fn uv_flip_and_color_passthrough() {
        let mut sources = IndexMap::new();
        sources.insert("uv".to_string(), SourceArray::new("uv".to_string(), vec![0.25, 0.75, 0.5, 0.0], 2, 4, 2));
        sources.insert("c".to_string(), SourceArray::new("c".to_string(), vec![0.1, 0.2, 0.3, 0.4], 4, 4, 1));
        let lists = single_list(vec![binding(0, Semantic::TexCoord, "uv"), binding(1, Semantic::Color, "c")]);
        let policy = TransformPolicy { swap_y_z: false, axis_sign_multiplier: [1.0, 1.0, -1.0], v_flip: true };
        let mut sink = DiagnosticSink::new();
        bind_and_transform(&mut sources, &lists, &policy, &mut sink).unwrap();
        assert_eq!(sources["uv"].get_tuple(0), Some(&[0.25, 0.25][..]));
        assert_eq!(sources["uv"].get_tuple(1), Some(&[0.5, 1.0][..]));
        assert_eq!(sources["c"].get_tuple(0), Some(&[0.1, 0.2, 0.3, 0.4][..]));
        assert_eq!(sources["c"].get_data_stride(), 4);
    }

    #[test]
    fn missing_source_is_reported_once() {
        let mut sources = IndexMap::new();
        let lists = single_list(vec![binding(0, Semantic::Vertex, "gone"), binding(0, Semantic::Normal, "gone")]);
        let policy = TransformPolicy { swap_y_z: false, axis_sign_multiplier: [1.0; 3], v_flip: false };
        let mut sink = DiagnosticSink::new();
        bind_and_transform(&mut sources, &lists, &policy, &mut sink).unwrap();
        assert_eq!(sink.into_vec().len(), 1);
    }

    proptest::proptest! {
        #[test]
        fn flip_v_is_an_involution(u in -4.0f32..4.0, v in -4.0f32..4.0) {
            let back = flip_v(flip_v([u, v]));
            proptest::prop_assert_eq!(back[0], u);
            proptest::prop_assert!((back[1] - v).abs() <= 1e-5);
        }
    }

    #[test]
    fn narrow_position_source_is_structural() {
        let mut sources = IndexMap::new();
        sources.insert("p".to_string(), SourceArray::new("p".to_string(), vec![1.0, 2.0], 2, 2, 1));
        let lists = single_list(vec![binding(0, Semantic::Vertex, "p")]);
        let policy = TransformPolicy { swap_y_z: false, axis_sign_multiplier: [1.0; 3], v_flip: false };
        let mut sink = DiagnosticSink::new();
        let out = bind_and_transform(&mut sources, &lists, &policy, &mut sink);
        assert!(matches!(out, Err(Err::StrideTooSmall { required: 3, .. })));
    }
}
