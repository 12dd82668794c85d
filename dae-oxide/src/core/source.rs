use serde::Serialize;

use crate::core::shared::Semantic;

/// A strided numeric array of the mesh (`source` element).
/// Raw values are kept flat; tuples are views of `stride` consecutive values.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct SourceArray {
    id: String,
    raw: Vec<f32>,
    stride: usize,
    /// `float_array@count` as declared by the document.
    declared_count: usize,
    /// `accessor@count` as declared by the document.
    declared_accessor_count: usize,
    semantic: Option<Semantic>,
    data: Vec<f32>,
    data_stride: usize,
}

impl SourceArray {
    /// Trailing values that do not fill a whole tuple are dropped.
    pub fn new(id: String, mut raw: Vec<f32>, stride: usize, declared_count: usize, declared_accessor_count: usize) -> Self {
        debug_assert!(stride > 0);
        raw.truncate(raw.len() / stride * stride);
        Self {
            id,
            raw,
            stride,
            declared_count,
            declared_accessor_count,
            semantic: None,
            data: Vec::new(),
            data_stride: stride,
        }
    }

    pub fn get_id(&self) -> &str {
        &self.id
    }

    pub fn get_stride(&self) -> usize {
        self.stride
    }

    pub fn num_tuples(&self) -> usize {
        self.raw.len() / self.stride
    }

    pub fn get_declared_count(&self) -> usize {
        self.declared_count
    }

    pub fn get_declared_accessor_count(&self) -> usize {
        self.declared_accessor_count
    }

    pub fn get_semantic(&self) -> Option<Semantic> {
        self.semantic
    }

    pub(crate) fn set_semantic(&mut self, semantic: Semantic) {
        self.semantic = Some(semantic);
    }

    /// Raw tuples in document order.
    pub fn raw_tuples(&self) -> std::slice::ChunksExact<'_, f32> {
        self.raw.chunks_exact(self.stride)
    }

    pub fn get_raw_tuple(&self, idx: usize) -> Option<&[f32]> {
        self.raw.get(idx * self.stride..(idx + 1) * self.stride)
    }

    /// Tuples after the coordinate transform. Empty until the source is bound
    /// to a semantic and transformed.
    pub fn tuples(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.data_stride)
    }

    pub fn get_tuple(&self, idx: usize) -> Option<&[f32]> {
        self.data.get(idx * self.data_stride..(idx + 1) * self.data_stride)
    }

    pub fn get_data_stride(&self) -> usize {
        self.data_stride
    }

    pub(crate) fn set_data(&mut self, data: Vec<f32>, data_stride: usize) {
        debug_assert!(data_stride > 0 && data.len() % data_stride == 0);
        self.data = data;
        self.data_stride = data_stride;
    }
}
