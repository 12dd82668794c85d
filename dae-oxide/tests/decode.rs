use dae_oxide::prelude::*;
use dae_oxide::decode::Err as DecodeErr;
use dae_oxide::io::dae::Err;
use dae_oxide::io::xml;

fn load(name: &str, opts: &Options) -> SceneModel {
    load_dae(format!("tests/data/{}.dae", name), opts).unwrap()
}

#[test]
fn blender_quad_and_triangle() {
    let scene = load("blender_quad", &Options::default());
    assert!(scene.z_up());
    assert_eq!(scene.authoring_tool(), AuthoringTool::Blender);
    assert_eq!(scene.face_count(), 2);
    assert_eq!(scene.vertex_count(), 7);
    assert!(scene.diagnostics().is_empty());

    let vertex = scene.get_vertex_array().unwrap();
    assert_eq!(vertex.len(), 7 * 3);
    // third corner of the quad is (1, 2, 3) in the document
    assert_eq!(&vertex[6..9], &[1.0, 3.0, -2.0]);
    assert_eq!(&vertex[9..12], &[0.0, 0.0, -1.0]);

    let normal = scene.get_normal_array().unwrap();
    assert_eq!(&normal[0..3], &[0.0, 1.0, 0.0]);

    let uv = scene.get_uv_array().unwrap();
    assert_eq!(uv.len(), 7 * 2);
    assert_eq!(&uv[0..8], &[0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);

    assert!(scene.get_color_array().is_none());
    assert!(!scene.get_vertex_array_data().contains_key("color"));
}

#[test]
fn material_is_joined_with_effect() {
    let scene = load("blender_quad", &Options::default());
    assert_eq!(scene.get_material_name_list(), vec!["Material-material"]);
    let material = scene.get_material_data("Material-material").unwrap();
    assert_eq!(material.get_name(), "Material");
    assert_eq!(material.get_reflection(), Some(&Reflection::Phong));
    assert_eq!(material.get_diffuse(), Some([0.8, 0.1, 0.2, 1.0]));
    assert_eq!(material.get_specular(), Some([0.5, 0.5, 0.5, 1.0]));
    assert_eq!(material.get_shininess(), Some(50.0));
}

#[test]
fn counts_sum_over_materials() {
    let scene = load("multi_material", &Options::default());
    let ranges = scene.material_ranges();
    assert_eq!(ranges.iter().map(|r| r.count).sum::<usize>(), scene.vertex_count());
    assert_eq!(ranges.iter().map(|r| r.face_count).sum::<usize>(), scene.face_count());
    assert_eq!(ranges[0], DrawRange { material: "painted".to_string(), first: 0, count: 3, face_count: 1 });
    assert_eq!(ranges[1].first, 3);
    assert_eq!(scene.get_vertex_array().unwrap().len(), scene.vertex_count() * 3);
}

#[test]
fn unresolved_effect_does_not_stop_decoding() {
    let scene = load("multi_material", &Options::default());
    let ghost = scene.get_material_data("ghost").unwrap();
    assert!(!ghost.is_resolved());
    assert_eq!(ghost.get_diffuse(), None);
    assert!(scene.get_material_data("painted").unwrap().is_resolved());
    assert!(scene.diagnostics().contains(&Diagnostic::UnresolvedEffect {
        material: "ghost".to_string(),
        effect: "missing-fx".to_string(),
    }));
}

#[test]
fn authored_colors_match_vertices() {
    let scene = load("multi_material", &Options::default());
    let painted = scene.get_polylists()["painted"].get_flat();
    assert_eq!(painted.color_width, 4);
    assert_eq!(painted.num_colors(), painted.vertex.len() / 3);
    assert_eq!(&painted.color[..8], &[0.0, 1.0, 0.0, 0.5, 0.0, 0.0, 1.0, 1.0]);
}

#[test]
fn forced_colors_fill_every_material() {
    let opts = Options { force_vertex_color_from_material: true, ..Options::default() };
    let scene = load("multi_material", &opts);
    let ghost = scene.get_polylists()["ghost"].get_flat();
    assert!(ghost.color_synthesized);
    // unresolved effect falls back to white
    assert!(ghost.color.chunks_exact(3).all(|c| c == [1.0, 1.0, 1.0]));

    match scene.get_color_array() {
        Some(ColorArray::Float(colors)) => assert_eq!(colors.len(), scene.vertex_count() * 4),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn default_policy_flips_z_for_unknown_tools() {
    let scene = load("multi_material", &Options::default());
    let vertex = scene.get_vertex_array().unwrap();
    // middle corner of the last face is (2, 2, 2)
    assert_eq!(&vertex[vertex.len() - 6..vertex.len() - 3], &[2.0, 2.0, -2.0]);
}

#[test]
fn wings_heuristics() {
    let scene = load("wings_textured", &Options::default());
    assert_eq!(scene.authoring_tool(), AuthoringTool::Wings3D);
    assert_eq!(scene.get_policy().axis_sign_multiplier, [1.0, 1.0, 1.0]);

    let wood = scene.get_material_data("wood").unwrap();
    assert_eq!(wood.get_name(), "wood");
    assert_eq!(wood.get_shininess(), Some(64.0));
    assert_eq!(wood.get_diffuse(), Some([1.0, 1.0, 1.0, 1.0]));

    assert_eq!(scene.get_uv_array().unwrap(), vec![0.0, 1.0, 1.0, 1.0, 0.0, 0.0]);
    assert!(scene.get_normal_array().is_none());
}

#[test]
fn dxruby_preset() {
    let opts = Options { preset: Preset::DxRuby, ..Options::default() };
    let scene = load("wings_textured", &opts);
    assert_eq!(scene.get_policy().axis_sign_multiplier, [1.0, 1.0, -1.0]);
    assert_eq!(scene.get_color_array(), Some(ColorArray::Packed(vec![0xFFFFFFFF; 3])));
    assert_eq!(scene.get_rgba8_color_array(), Some(vec![[255, 255, 255, 255]; 3]));
}

#[test]
fn explicit_multiplier_wins() {
    let opts = Options { axis_sign_multiplier: [-1.0, 1.0, 1.0], ..Options::default() };
    let scene = load("multi_material", &opts);
    assert_eq!(scene.get_policy().axis_sign_multiplier, [-1.0, 1.0, 1.0]);
    let vertex = scene.get_vertex_array().unwrap();
    assert_eq!(&vertex[3..6], &[-1.0, 0.0, 0.0]);
}

#[test]
fn queries_are_idempotent() {
    let scene = load("blender_quad", &Options::default());
    assert_eq!(scene.get_vertex_array(), scene.get_vertex_array());
    assert_eq!(scene.get_vertex_array_data(), scene.get_vertex_array_data());
    assert_eq!(scene.to_raw(), scene.to_raw());
}

#[test]
fn missing_geometry_is_fatal() {
    let err = load_dae("tests/data/no_geometry.dae", &Options::default()).unwrap_err();
    match &err {
        Err::Decode { source: DecodeErr::Xml(xml::Err::MissingElement(path)), .. } => {
            assert_eq!(path, "COLLADA/library_geometries");
        },
        other => panic!("unexpected {:?}", other),
    }
    assert!(err.to_string().contains("no_geometry.dae"));
}

#[test]
fn out_of_range_index_is_fatal() {
    let err = load_dae("tests/data/index_out_of_range.dae", &Options::default()).unwrap_err();
    assert!(matches!(
        err,
        Err::Decode { source: DecodeErr::IndexOutOfRange { index: 7, len: 3, .. }, .. }
    ));
}

#[test]
fn source_bound_to_two_semantics_keeps_the_first() {
    for opts in [
        Options::default(),
        Options { append_alpha_channel: true, ..Options::default() },
        Options { hex_color_output: true, ..Options::default() },
    ] {
        let scene = load("shared_uv_color", &opts);
        assert!(scene.diagnostics().iter().any(|d| matches!(d, Diagnostic::ConflictingSemantic { .. })));
        assert_eq!(scene.get_uv_array().unwrap().len(), 6);
        assert!(scene.get_polylists()["b"].get_flat().color.is_empty());
        assert!(scene.get_color_array().unwrap().is_empty());
        assert_eq!(scene.get_rgba8_color_array(), Some(vec![]));
    }
}
