use serde::Serialize;

use crate::core::shared::{Semantic, UsageFlags};

/// Binds one input offset of a polygon list to a semantic and a source.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct InputBinding {
    pub offset: usize,
    pub semantic: Semantic,
    pub source_id: String,
}

/// The faces of one material, with multi-stream index data: every vertex
/// carries one index per input offset, each into its own source array.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct PolygonList {
    material_id: String,
    bindings: Vec<InputBinding>,
    num_offsets: usize,
    vertex_counts: Vec<usize>,
    declared_face_count: usize,
    indices: Vec<usize>,
    usage: UsageFlags,
    pub(crate) flat: FlatStreams,
}

impl PolygonList {
    /// `indices` must hold exactly `sum(vertex_counts) * num_offsets` values.
    pub(crate) fn new(
        material_id: String,
        bindings: Vec<InputBinding>,
        num_offsets: usize,
        vertex_counts: Vec<usize>,
        declared_face_count: usize,
        indices: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(indices.len(), vertex_counts.iter().sum::<usize>() * num_offsets);
        let mut usage = UsageFlags::default();
        for binding in &bindings {
            usage.mark(binding.semantic);
        }
        Self {
            material_id,
            bindings,
            num_offsets,
            vertex_counts,
            declared_face_count,
            indices,
            usage,
            flat: FlatStreams::default(),
        }
    }

    pub fn get_material_id(&self) -> &str {
        &self.material_id
    }

    pub fn get_bindings(&self) -> &[InputBinding] {
        &self.bindings
    }

    /// The first declared binding of the semantic, which is the one that feeds
    /// the flat stream.
    pub fn get_binding(&self, semantic: Semantic) -> Option<&InputBinding> {
        self.bindings.iter().find(|b| b.semantic == semantic)
    }

    pub fn num_offsets(&self) -> usize {
        self.num_offsets
    }

    pub fn get_vertex_counts(&self) -> &[usize] {
        &self.vertex_counts
    }

    pub fn get_declared_face_count(&self) -> usize {
        self.declared_face_count
    }

    pub fn num_faces(&self) -> usize {
        self.vertex_counts.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertex_counts.iter().sum()
    }

    /// Semantics declared by this list alone.
    pub fn get_usage(&self) -> UsageFlags {
        self.usage
    }

    pub(crate) fn set_usage(&mut self, usage: UsageFlags) {
        self.usage = usage;
    }

    /// Iterates over faces; each face yields its vertices as index tuples
    /// (`tuple[offset]` is the raw index for that offset).
    pub fn faces(&self) -> impl Iterator<Item = std::slice::ChunksExact<'_, usize>> + '_ {
        let stride = self.num_offsets;
        self.vertex_counts.iter()
            .scan(0usize, move |start, &count| {
                let begin = *start;
                *start += count * stride;
                Some(self.indices[begin..*start].chunks_exact(stride))
            })
    }

    pub fn get_flat(&self) -> &FlatStreams {
        &self.flat
    }
}

/// Non-indexed attribute streams of one material: one entry per
/// (face, vertex, semantic).
#[derive(Clone, PartialEq, Debug, Default, Serialize)]
pub struct FlatStreams {
    pub vertex: Vec<f32>,
    pub normal: Vec<f32>,
    pub uv: Vec<f32>,
    pub color: Vec<f32>,
    /// Components per color tuple (3 or 4). Zero when there are no colors.
    pub color_width: usize,
    /// Colors were broadcast from the material diffuse instead of authored.
    pub color_synthesized: bool,
}

impl FlatStreams {
    pub fn num_colors(&self) -> usize {
        if self.color_width == 0 { 0 } else { self.color.len() / self.color_width }
    }
}
