use serde::Serialize;

/// RGBA color with components in [0, 1].
pub type Rgba = [f32; 4];

pub const OPAQUE_BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
pub const OPAQUE_WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

/// Shading model named by the first child of `profile_COMMON/technique`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reflection {
    Phong,
    Lambert,
    /// Any other model. The name is kept for diagnostics; its specular
    /// parameters are not decoded.
    Unknown(String),
}

impl Reflection {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "phong" => Self::Phong,
            "lambert" => Self::Lambert,
            other => Self::Unknown(other.to_owned()),
        }
    }

    pub fn get_name(&self) -> &str {
        match self {
            Self::Phong => "phong",
            Self::Lambert => "lambert",
            Self::Unknown(name) => name,
        }
    }
}

/// Shading parameters of one effect. Fields an unknown reflection model
/// could not provide are `None`.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct EffectRecord {
    pub reflection: Reflection,
    pub emission: Option<Rgba>,
    pub ambient: Option<Rgba>,
    pub diffuse: Option<Rgba>,
    pub specular: Option<Rgba>,
    pub shininess: Option<f32>,
}
