//! Compatibility heuristics keyed on the authoring tool and on value ranges
//! observed in documents from specific exporters. They are guesses about
//! those exporters, not COLLADA semantics, and are kept here so the decode
//! pipeline never branches on the tool itself.
//!
//! Effects with a reflection model other than phong or lambert keep no
//! diffuse, specular or shininess at all, not even a literal diffuse color.

use serde::Serialize;

use crate::core::effect::{Rgba, OPAQUE_WHITE};
use crate::core::scene::AuthoringTool;
use crate::decode::config::{Config, Preset};

/// Effective coordinate transform for position and normal sources, plus the
/// texture coordinate flip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformPolicy {
    pub swap_y_z: bool,
    pub axis_sign_multiplier: [f32; 3],
    pub v_flip: bool,
}

/// Classifies `contributor/authoring_tool` by prefix.
pub fn classify_authoring_tool(text: &str) -> AuthoringTool {
    let text = text.trim_start();
    if text.starts_with("Blender") {
        AuthoringTool::Blender
    } else if text.starts_with("Wings3D") {
        AuthoringTool::Wings3D
    } else {
        AuthoringTool::Unknown
    }
}

/// Chooses the transform for a document.
///
/// Z is flipped when the caller asked for it, and otherwise by default for
/// every tool except Wings3D. The DxRuby preset inverts that default: only
/// Wings3D documents get the forced flip. The flip only applies when the
/// caller left the multiplier at identity; an explicit multiplier wins.
pub fn select_transform_policy(cfg: &Config, tool: AuthoringTool, z_up: bool) -> TransformPolicy {
    let z_flip = match cfg.preset {
        Preset::DxRuby => cfg.z_flip || tool == AuthoringTool::Wings3D,
        Preset::None => cfg.z_flip || tool != AuthoringTool::Wings3D,
    };

    let mut axis_sign_multiplier = cfg.axis_sign_multiplier;
    if z_flip && axis_sign_multiplier == [1.0, 1.0, 1.0] {
        axis_sign_multiplier[2] = -1.0;
    }

    TransformPolicy {
        swap_y_z: z_up,
        axis_sign_multiplier,
        v_flip: cfg.v_flip,
    }
}

/// Phong shininess strictly inside (0, 1) is taken to be on a normalized
/// scale (seen in Wings3D output) and rescaled to the 0..128 convention.
pub fn normalize_shininess(shininess: f32) -> f32 {
    if shininess > 0.0 && shininess < 1.0 {
        shininess * 128.0
    } else {
        shininess
    }
}

/// Diffuse used when the diffuse slot holds something other than a literal
/// color, e.g. a texture reference.
pub fn textured_diffuse_fallback() -> Rgba {
    OPAQUE_WHITE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shared::ConfigType;
    use crate::decode::config::Options;

    #[test]
    fn tool_classification() {
        assert_eq!(classify_authoring_tool("Blender 2.78.0 commit date:2017-02-24"), AuthoringTool::Blender);
        assert_eq!(classify_authoring_tool("Wings3D Collada Exporter"), AuthoringTool::Wings3D);
        assert_eq!(classify_authoring_tool("OpenCOLLADA for 3ds Max"), AuthoringTool::Unknown);
    }

    #[test]
    fn default_flips_z_except_for_wings() {
        let cfg = <Config as ConfigType>::default();
        let blender = select_transform_policy(&cfg, AuthoringTool::Blender, true);
        assert_eq!(blender.axis_sign_multiplier, [1.0, 1.0, -1.0]);
        assert!(blender.swap_y_z);
        let wings = select_transform_policy(&cfg, AuthoringTool::Wings3D, false);
        assert_eq!(wings.axis_sign_multiplier, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn dxruby_flips_only_wings() {
        let cfg = Options { preset: Preset::DxRuby, ..Options::default() }.resolve().unwrap();
        let wings = select_transform_policy(&cfg, AuthoringTool::Wings3D, false);
        assert_eq!(wings.axis_sign_multiplier, [1.0, 1.0, -1.0]);
        let blender = select_transform_policy(&cfg, AuthoringTool::Blender, false);
        assert_eq!(blender.axis_sign_multiplier, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn explicit_multiplier_is_kept() {
        let cfg = Options { axis_sign_multiplier: [-1.0, 1.0, 1.0], ..Options::default() }.resolve().unwrap();
        let policy = select_transform_policy(&cfg, AuthoringTool::Blender, false);
        assert_eq!(policy.axis_sign_multiplier, [-1.0, 1.0, 1.0]);
    }

    #[test]
    fn shininess_rescale() {
        assert_eq!(normalize_shininess(0.5), 64.0);
        assert_eq!(normalize_shininess(50.0), 50.0);
        assert_eq!(normalize_shininess(0.0), 0.0);
        assert_eq!(normalize_shininess(1.0), 1.0);
    }
}
