use dae_oxide::export::raw;
use dae_oxide::prelude::*;

fn load(name: &str, opts: &Options) -> SceneModel {
    load_dae(format!("tests/data/{}.dae", name), opts).unwrap()
}

#[test]
fn json_holds_present_streams_only() {
    let scene = load("wings_textured", &Options::default());
    let json = scene.to_json(false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let streams = value.as_object().unwrap();
    assert_eq!(streams.len(), 2);
    assert!(streams.contains_key("vertex") && streams.contains_key("uv"));
    assert!(json.starts_with(r#"{"vertex":"#));
    assert_eq!(value["uv"].as_array().unwrap().len(), 6);
}

#[test]
fn raw_and_json_carry_the_same_numbers() {
    let scene = load("blender_quad", &Options::default());
    let json: serde_json::Value = serde_json::from_str(&scene.to_json(true).unwrap()).unwrap();
    let text = scene.to_raw();
    assert!(text.starts_with("# ----"));

    for (key, width) in [("vertex", 3), ("normal", 3), ("uv", 2)] {
        let rows = raw::parse_block(&text, key).unwrap();
        assert!(rows.iter().all(|r| r.len() == width));
        let from_raw = rows.into_iter().flatten().collect::<Vec<_>>();
        let from_json = json[key].as_array().unwrap().iter()
            .map(|v| v.as_f64().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(from_raw, from_json);
    }
    assert!(raw::parse_block(&text, "color").is_none());
}

#[test]
fn packed_colors_dump_one_per_line() {
    let opts = Options { preset: Preset::DxRuby, ..Options::default() };
    let scene = load("wings_textured", &opts);
    let rows = raw::parse_block(&scene.to_raw(), "color").unwrap();
    assert_eq!(rows, vec![vec![4294967295.0]; 3]);
}

#[test]
fn debug_tables_serialize() {
    let scene = load("multi_material", &Options::default());
    let sources: serde_json::Value = serde_json::from_str(&scene.dump_sources_json(false).unwrap()).unwrap();
    assert_eq!(sources["two-col"]["stride"], 4);
    let lists: serde_json::Value = serde_json::from_str(&scene.dump_polylists_json(false).unwrap()).unwrap();
    assert_eq!(lists["ghost"]["vertex_counts"], serde_json::json!([3, 3]));
}
