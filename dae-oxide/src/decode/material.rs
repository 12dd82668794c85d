use indexmap::IndexMap;

use crate::core::diagnostic::{Diagnostic, DiagnosticSink};
use crate::core::effect::EffectRecord;
use crate::core::material::MaterialRecord;
use crate::decode::Err;
use crate::io::xml::Node;

/// Reads `library_materials` and joins every material against the effect
/// table. Unresolved effects are reported and leave the shading unset.
pub(crate) fn decode_materials(
    root: &Node<'_>,
    effects: &IndexMap<String, EffectRecord>,
    sink: &mut DiagnosticSink,
) -> Result<IndexMap<String, MaterialRecord>, Err> {
    let library = root.child("library_materials")?;

    let mut materials = IndexMap::new();
    for material in library.children("material") {
        let id = material.attr("id")?.to_owned();
        let name = material.opt_attr("name").unwrap_or(id.as_str()).to_owned();
        let url = material.child("instance_effect")?.attr("url")?;
        let effect_id = strip_reference(url).to_owned();
        materials.insert(id.clone(), MaterialRecord::new(id, name, effect_id));
    }

    for material in materials.values_mut() {
        match effects.get(material.get_effect_id()) {
            Some(effect) => material.bind_effect(effect),
            None => sink.report(Diagnostic::UnresolvedEffect {
                material: material.get_id().to_owned(),
                effect: material.get_effect_id().to_owned(),
            }),
        }
    }

    tracing::debug!("decoded {} materials", materials.len());
    Ok(materials)
}

/// Removes the leading `#` of a URI fragment reference.
pub(crate) fn strip_reference(url: &str) -> &str {
    url.strip_prefix('#').unwrap_or(url)
}
