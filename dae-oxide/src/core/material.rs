use serde::Serialize;

use crate::core::effect::{EffectRecord, Reflection, Rgba, OPAQUE_WHITE};

/// A material of the document joined with the effect it instantiates.
/// The shading fields stay `None` when the effect binding did not resolve.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct MaterialRecord {
    id: String,
    name: String,
    effect_id: String,
    reflection: Option<Reflection>,
    emission: Option<Rgba>,
    ambient: Option<Rgba>,
    diffuse: Option<Rgba>,
    specular: Option<Rgba>,
    shininess: Option<f32>,
}

impl MaterialRecord {
    pub fn new(id: String, name: String, effect_id: String) -> Self {
        Self {
            id,
            name,
            effect_id,
            reflection: None,
            emission: None,
            ambient: None,
            diffuse: None,
            specular: None,
            shininess: None,
        }
    }

    /// Copies the shading fields of the effect into this material.
    pub(crate) fn bind_effect(&mut self, effect: &EffectRecord) {
        self.reflection = Some(effect.reflection.clone());
        self.emission = effect.emission;
        self.ambient = effect.ambient;
        self.diffuse = effect.diffuse;
        self.specular = effect.specular;
        self.shininess = effect.shininess;
    }

    pub fn get_id(&self) -> &str {
        &self.id
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_effect_id(&self) -> &str {
        &self.effect_id
    }

    pub fn is_resolved(&self) -> bool {
        self.reflection.is_some()
    }

    pub fn get_reflection(&self) -> Option<&Reflection> {
        self.reflection.as_ref()
    }

    pub fn get_emission(&self) -> Option<Rgba> {
        self.emission
    }

    pub fn get_ambient(&self) -> Option<Rgba> {
        self.ambient
    }

    pub fn get_diffuse(&self) -> Option<Rgba> {
        self.diffuse
    }

    pub fn get_specular(&self) -> Option<Rgba> {
        self.specular
    }

    pub fn get_shininess(&self) -> Option<f32> {
        self.shininess
    }

    /// Diffuse RGB used to synthesize vertex colors. Falls back to white
    /// when the material has no decoded diffuse.
    pub fn get_diffuse_rgb(&self) -> [f32; 3] {
        let [r, g, b, _] = self.diffuse.unwrap_or(OPAQUE_WHITE);
        [r, g, b]
    }
}
