use std::fmt;

use serde::Serialize;

pub trait ConfigType {
    fn default()-> Self;
}

/// The per-vertex attribute a polygon list input feeds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub enum Semantic {
    Vertex,
    Normal,
    TexCoord,
    Color,
}

impl Semantic {
    /// Maps a COLLADA `semantic` attribute to a semantic. `POSITION` is the name
    /// the `vertices` element uses for what polygon lists call `VERTEX`.
    pub fn from_collada(name: &str) -> Option<Self> {
        match name {
            "VERTEX" | "POSITION" => Some(Self::Vertex),
            "NORMAL" => Some(Self::Normal),
            "TEXCOORD" => Some(Self::TexCoord),
            "COLOR" => Some(Self::Color),
            _ => None,
        }
    }

    pub fn get_collada_name(&self) -> &'static str {
        match self {
            Self::Vertex => "VERTEX",
            Self::Normal => "NORMAL",
            Self::TexCoord => "TEXCOORD",
            Self::Color => "COLOR",
        }
    }

    /// The key used for this semantic in the exported vertex array data.
    pub fn get_export_key(&self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Normal => "normal",
            Self::TexCoord => "uv",
            Self::Color => "color",
        }
    }

    /// Smallest source stride a tuple of this semantic can be read from.
    pub(crate) fn get_min_stride(&self) -> usize {
        match self {
            Self::Vertex | Self::Normal | Self::Color => 3,
            Self::TexCoord => 2,
        }
    }

    pub const ALL: [Semantic; 4] = [Self::Vertex, Self::Normal, Self::TexCoord, Self::Color];
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get_collada_name())
    }
}

/// Records which semantics any polygon list of the document declares.
/// Merging is a monotonic OR: once a flag is set it stays set.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub struct UsageFlags {
    pub use_vertex: bool,
    pub use_normal: bool,
    pub use_uv: bool,
    pub use_color: bool,
}

impl UsageFlags {
    pub fn mark(&mut self, semantic: Semantic) {
        match semantic {
            Semantic::Vertex => self.use_vertex = true,
            Semantic::Normal => self.use_normal = true,
            Semantic::TexCoord => self.use_uv = true,
            Semantic::Color => self.use_color = true,
        }
    }

    pub fn merge(&mut self, other: UsageFlags) {
        self.use_vertex |= other.use_vertex;
        self.use_normal |= other.use_normal;
        self.use_uv |= other.use_uv;
        self.use_color |= other.use_color;
    }

    pub fn uses(&self, semantic: Semantic) -> bool {
        match semantic {
            Semantic::Vertex => self.use_vertex,
            Semantic::Normal => self.use_normal,
            Semantic::TexCoord => self.use_uv,
            Semantic::Color => self.use_color,
        }
    }
}
