use serde::Serialize;

use crate::core::shared::ConfigType;

#[remain::sorted]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Err {
    #[error("Options '{0}' and '{1}' cannot be used together")]
    ConflictingOptions(&'static str, &'static str),
    #[error("Axis sign multiplier must consist of 1 and -1, got {0:?}")]
    InvalidAxisMultiplier([f32; 3]),
}

/// Named bundles of options, expanded by [`Options::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Preset {
    #[default]
    None,
    /// Index-less arrays, v-flipped texture coordinates, vertex colors
    /// synthesized from materials and packed as `0xAARRGGBB`.
    DxRuby,
}

/// How flattened vertex colors are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ColorFormat {
    /// Floating point tuples as authored (RGB or RGBA).
    #[default]
    Float,
    /// Floating point RGBA; RGB tuples get alpha 1.0.
    FloatRgba,
    /// One `u32` per vertex, channels A,R,G,B from the high byte down.
    PackedArgb,
}

/// Caller-facing options. Flags may overlap (a preset forces several of
/// them); [`Options::resolve`] turns them into a canonical [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Reserved. The flatten path never emits index buffers.
    pub use_index: bool,
    pub force_vertex_color_from_material: bool,
    pub v_flip: bool,
    pub z_flip: bool,
    pub axis_sign_multiplier: [f32; 3],
    pub hex_color_output: bool,
    pub append_alpha_channel: bool,
    pub preset: Preset,
    pub debug_dump: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            use_index: true,
            force_vertex_color_from_material: false,
            v_flip: true,
            z_flip: false,
            axis_sign_multiplier: [1.0, 1.0, 1.0],
            hex_color_output: false,
            append_alpha_channel: false,
            preset: Preset::None,
            debug_dump: false,
        }
    }
}

impl Options {
    /// Expands the preset and validates the combination.
    pub fn resolve(&self) -> Result<Config, Err> {
        let mut opts = self.clone();
        if opts.preset == Preset::DxRuby {
            opts.use_index = false;
            opts.force_vertex_color_from_material = true;
            opts.v_flip = true;
            opts.hex_color_output = true;
        }

        if opts.axis_sign_multiplier.iter().any(|&c| c != 1.0 && c != -1.0) {
            return Err(Err::InvalidAxisMultiplier(opts.axis_sign_multiplier));
        }

        let color_format = match (opts.hex_color_output, opts.append_alpha_channel) {
            (true, true) => return Err(Err::ConflictingOptions("hex_color_output", "append_alpha_channel")),
            (true, false) => ColorFormat::PackedArgb,
            (false, true) => ColorFormat::FloatRgba,
            (false, false) => ColorFormat::Float,
        };

        Ok(Config {
            use_index: opts.use_index,
            force_vertex_color: opts.force_vertex_color_from_material,
            v_flip: opts.v_flip,
            z_flip: opts.z_flip,
            axis_sign_multiplier: opts.axis_sign_multiplier,
            color_format,
            preset: opts.preset,
            debug_dump: opts.debug_dump,
        })
    }
}

/// Canonical decoder configuration. The document-derived parts of the
/// transform (up axis, authoring tool) are applied later by
/// [`crate::decode::policy::select_transform_policy`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub(crate) use_index: bool,
    pub(crate) force_vertex_color: bool,
    pub(crate) v_flip: bool,
    pub(crate) z_flip: bool,
    pub(crate) axis_sign_multiplier: [f32; 3],
    pub(crate) color_format: ColorFormat,
    pub(crate) preset: Preset,
    pub(crate) debug_dump: bool,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            use_index: true,
            force_vertex_color: false,
            v_flip: true,
            z_flip: false,
            axis_sign_multiplier: [1.0, 1.0, 1.0],
            color_format: ColorFormat::Float,
            preset: Preset::None,
            debug_dump: false,
        }
    }
}

impl Config {
    pub fn get_color_format(&self) -> ColorFormat {
        self.color_format
    }

    pub fn get_preset(&self) -> Preset {
        self.preset
    }

    pub fn is_v_flip(&self) -> bool {
        self.v_flip
    }

    pub fn is_force_vertex_color(&self) -> bool {
        self.force_vertex_color
    }

    pub fn is_use_index(&self) -> bool {
        self.use_index
    }

    pub fn is_debug_dump(&self) -> bool {
        self.debug_dump
    }
}
