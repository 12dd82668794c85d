pub mod color;
pub mod json;
pub mod raw;

use serde::Serialize;

use crate::export::color::ColorArray;

/// One flattened attribute stream as handed to callers.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(untagged)]
pub enum ArrayData {
    Float(Vec<f32>),
    Packed(Vec<u32>),
}

impl From<Vec<f32>> for ArrayData {
    fn from(v: Vec<f32>) -> Self {
        ArrayData::Float(v)
    }
}

impl From<ColorArray> for ArrayData {
    fn from(c: ColorArray) -> Self {
        match c {
            ColorArray::Float(v) => ArrayData::Float(v),
            ColorArray::Packed(v) => ArrayData::Packed(v),
        }
    }
}
