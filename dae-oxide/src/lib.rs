// lib.rs

/// Contains the interface between the `SceneModel` and .dae files on disk,
/// and the element navigation helpers over the parsed XML tree.
pub mod io;

/// Defines the decode pipeline: effects, materials, sources, polygon lists,
/// coordinate transforms and flattening.
pub mod decode;

/// Contains the decoded data model and the read-only query API.
pub mod core;

/// Contains the output encodings of the flattened data (colors, JSON, raw text).
pub mod export;


/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::scene::{SceneModel, AuthoringTool, DrawRange};
    pub use crate::core::material::MaterialRecord;
    pub use crate::core::effect::{EffectRecord, Reflection};
    pub use crate::core::shared::{ConfigType, Semantic, UsageFlags};
    pub use crate::core::diagnostic::Diagnostic;
    pub use crate::decode::config::{Config, Options, Preset, ColorFormat};
    pub use crate::export::{ArrayData, color::ColorArray};
    pub use crate::decode::{self, decode};
    pub use crate::io::dae::load_dae;
}
