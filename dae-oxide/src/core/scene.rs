use indexmap::IndexMap;
use serde::Serialize;

use crate::core::diagnostic::Diagnostic;
use crate::core::material::MaterialRecord;
use crate::core::polylist::PolygonList;
use crate::core::shared::{Semantic, UsageFlags};
use crate::core::source::SourceArray;
use crate::decode::config::{ColorFormat, Config};
use crate::decode::policy::TransformPolicy;
use crate::export::color::{self, ColorArray, ColorEncoder, ColorEncoderImpl};
use crate::export::{json, raw, ArrayData};

/// Exporter named by `asset/contributor/authoring_tool`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum AuthoringTool {
    Blender,
    Wings3D,
    Unknown,
}

/// The contiguous slice `[first, first + count)` of every flat stream that
/// belongs to one material. Indices count vertices, not components.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct DrawRange {
    pub material: String,
    pub first: usize,
    pub count: usize,
    pub face_count: usize,
}

/// A fully decoded document. Built once by [`crate::decode::decode`] and
/// read-only afterwards; every accessor derives its result from the stored
/// per-material streams without side effects.
#[derive(Clone, Debug)]
pub struct SceneModel {
    pub(crate) z_up: bool,
    pub(crate) authoring_tool: AuthoringTool,
    pub(crate) policy: TransformPolicy,
    pub(crate) config: Config,
    pub(crate) usage: UsageFlags,
    pub(crate) materials: IndexMap<String, MaterialRecord>,
    pub(crate) sources: IndexMap<String, SourceArray>,
    pub(crate) polylists: IndexMap<String, PolygonList>,
    pub(crate) face_count: usize,
    pub(crate) vertex_count: usize,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl SceneModel {
    /// Positions, three values per vertex, concatenated in material order.
    pub fn get_vertex_array(&self) -> Option<Vec<f32>> {
        self.concat(Semantic::Vertex, |l| &l.get_flat().vertex)
    }

    pub fn get_normal_array(&self) -> Option<Vec<f32>> {
        self.concat(Semantic::Normal, |l| &l.get_flat().normal)
    }

    /// Texture coordinates, two values per vertex.
    pub fn get_uv_array(&self) -> Option<Vec<f32>> {
        self.concat(Semantic::TexCoord, |l| &l.get_flat().uv)
    }

    /// Vertex colors in the configured [`ColorFormat`].
    pub fn get_color_array(&self) -> Option<ColorArray> {
        let (colors, width) = self.gather_colors()?;
        Some(ColorEncoder::new(self.config.color_format).encode(&colors, width))
    }

    /// Vertex colors as `[r, g, b, a]` bytes, independent of the configured format.
    pub fn get_rgba8_color_array(&self) -> Option<Vec<[u8; 4]>> {
        let (colors, width) = self.gather_colors()?;
        Some(color::to_rgba8(&colors, width))
    }

    /// Every present stream keyed `vertex`, `normal`, `uv`, `color`.
    /// Semantics no polygon list declares are left out.
    pub fn get_vertex_array_data(&self) -> IndexMap<&'static str, ArrayData> {
        let mut data = IndexMap::new();
        for semantic in Semantic::ALL {
            let array = match semantic {
                Semantic::Vertex => self.get_vertex_array().map(ArrayData::from),
                Semantic::Normal => self.get_normal_array().map(ArrayData::from),
                Semantic::TexCoord => self.get_uv_array().map(ArrayData::from),
                Semantic::Color => self.get_color_array().map(ArrayData::from),
            };
            if let Some(array) = array {
                data.insert(semantic.get_export_key(), array);
            }
        }
        data
    }

    /// Material ids in the order their polygon lists appear.
    pub fn get_material_name_list(&self) -> Vec<&str> {
        self.polylists.keys().map(String::as_str).collect()
    }

    pub fn get_material_data(&self, material: &str) -> Option<&MaterialRecord> {
        self.materials.get(material)
    }

    pub fn get_materials(&self) -> &IndexMap<String, MaterialRecord> {
        &self.materials
    }

    /// Draw ranges in stream order. The ranges tile `0..vertex_count()`.
    pub fn material_ranges(&self) -> Vec<DrawRange> {
        self.polylists.values()
            .scan(0usize, |first, list| {
                let range = DrawRange {
                    material: list.get_material_id().to_owned(),
                    first: *first,
                    count: list.num_vertices(),
                    face_count: list.num_faces(),
                };
                *first += range.count;
                Some(range)
            })
            .collect()
    }

    pub fn face_count(&self) -> usize {
        self.face_count
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn usage(&self) -> UsageFlags {
        self.usage
    }

    pub fn authoring_tool(&self) -> AuthoringTool {
        self.authoring_tool
    }

    pub fn z_up(&self) -> bool {
        self.z_up
    }

    pub fn get_policy(&self) -> &TransformPolicy {
        &self.policy
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    pub fn get_sources(&self) -> &IndexMap<String, SourceArray> {
        &self.sources
    }

    pub fn get_polylists(&self) -> &IndexMap<String, PolygonList> {
        &self.polylists
    }

    /// Non-fatal problems found while decoding, in the order they were found.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        json::to_json_string(&self.get_vertex_array_data(), pretty)
    }

    /// Text dump of the same streams as [`SceneModel::to_json`].
    pub fn to_raw(&self) -> String {
        let mut out = String::new();
        raw::write_rule(&mut out);
        let color_width = match self.config.color_format {
            ColorFormat::PackedArgb => 1,
            _ => self.gather_colors().map(|(_, w)| w).unwrap_or(3),
        };
        for (key, data) in self.get_vertex_array_data() {
            let width = match key {
                "uv" => 2,
                "color" => color_width,
                _ => 3,
            };
            raw::write_block(&mut out, key, &data, width);
        }
        out
    }

    /// The decoded source table, for debugging.
    pub fn dump_sources_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        json::to_json_string(&self.sources, pretty)
    }

    /// The decoded polygon lists including their flat streams, for debugging.
    pub fn dump_polylists_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        json::to_json_string(&self.polylists, pretty)
    }

    fn concat<'a, F>(&'a self, semantic: Semantic, stream: F) -> Option<Vec<f32>>
        where F: Fn(&'a PolygonList) -> &'a Vec<f32>
    {
        if !self.usage.uses(semantic) {
            return None;
        }
        Some(self.polylists.values().flat_map(|l| stream(l).iter().copied()).collect())
    }

    /// Concatenates the per-material colors at one width. When the materials
    /// disagree, RGB tuples are widened to RGBA.
    fn gather_colors(&self) -> Option<(Vec<f32>, usize)> {
        if !self.usage.use_color {
            return None;
        }
        let width = self.polylists.values()
            .map(|l| l.get_flat().color_width)
            .max()
            .unwrap_or(0)
            .max(3);
        let mut colors = Vec::new();
        for list in self.polylists.values() {
            let flat = list.get_flat();
            match flat.color_width {
                0 => {},
                w if w == width => colors.extend_from_slice(&flat.color),
                w => colors.extend(color::widen_to_rgba(&flat.color, w)),
            }
        }
        Some((colors, width))
    }
}
