use indexmap::IndexMap;

use crate::core::diagnostic::{Diagnostic, DiagnosticSink};
use crate::core::effect::{EffectRecord, Reflection, Rgba, OPAQUE_BLACK, OPAQUE_WHITE};
use crate::decode::{policy, Err};
use crate::io::xml::{self, Node};

/// Builds the effect table from `library_effects`, keyed by effect id.
pub(crate) fn decode_effects(root: &Node<'_>, sink: &mut DiagnosticSink) -> Result<IndexMap<String, EffectRecord>, Err> {
    let library = root.child("library_effects")?;

    let mut effects = IndexMap::new();
    for effect in library.children("effect") {
        let id = effect.attr("id")?.to_owned();
        let technique = effect.find("profile_COMMON/technique")?;
        let shading = technique.first_element()
            .ok_or_else(|| xml::Err::MissingElement(format!("{}/phong", technique.get_path())))?;

        let record = decode_shading(&id, &shading, sink)?;
        effects.insert(id, record);
    }

    tracing::debug!("decoded {} effects", effects.len());
    Ok(effects)
}

fn decode_shading(id: &str, shading: &Node<'_>, sink: &mut DiagnosticSink) -> Result<EffectRecord, Err> {
    let reflection = Reflection::from_tag(shading.get_name());

    let emission = Some(read_color(shading, "emission")?.unwrap_or(OPAQUE_BLACK));
    let ambient = Some(read_color(shading, "ambient")?.unwrap_or(OPAQUE_BLACK));

    let (diffuse, specular, shininess) = match &reflection {
        Reflection::Phong => {
            let specular = read_color(shading, "specular")?.unwrap_or(OPAQUE_BLACK);
            let shininess = match shading.opt_find("shininess/float") {
                Some(node) => node.parse_list::<f32>()?.first().copied().unwrap_or(0.0),
                None => 0.0,
            };
            (Some(read_diffuse(shading)?), Some(specular), Some(policy::normalize_shininess(shininess)))
        },
        Reflection::Lambert => {
            (Some(read_diffuse(shading)?), Some(OPAQUE_BLACK), Some(0.0))
        },
        Reflection::Unknown(model) => {
            sink.report(Diagnostic::UnknownReflectionModel {
                effect: id.to_owned(),
                model: model.clone(),
            });
            (None, None, None)
        },
    };

    Ok(EffectRecord { reflection, emission, ambient, diffuse, specular, shininess })
}

/// Diffuse is a literal color only when the slot's first child is `color`;
/// anything else (a texture reference) gets the fallback.
fn read_diffuse(shading: &Node<'_>) -> Result<Rgba, Err> {
    let Some(diffuse) = shading.opt_child("diffuse") else {
        return Ok(OPAQUE_WHITE);
    };
    match diffuse.first_element() {
        Some(first) if first.get_name() == "color" => parse_rgba(&first),
        _ => Ok(policy::textured_diffuse_fallback()),
    }
}

fn read_color(shading: &Node<'_>, slot: &str) -> Result<Option<Rgba>, Err> {
    shading.opt_child(slot)
        .and_then(|node| node.opt_child("color"))
        .map(|node| parse_rgba(&node))
        .transpose()
}

/// Accepts RGB or RGBA; RGB gets alpha 1.0.
fn parse_rgba(node: &Node<'_>) -> Result<Rgba, Err> {
    let values = node.parse_list::<f32>()?;
    match values[..] {
        [r, g, b] => Ok([r, g, b, 1.0]),
        [r, g, b, a] => Ok([r, g, b, a]),
        _ => Err(Err::InvalidColor { path: node.get_path().to_owned(), len: values.len() }),
    }
}
