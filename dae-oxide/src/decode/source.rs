use indexmap::IndexMap;

use crate::core::diagnostic::{Diagnostic, DiagnosticSink};
use crate::core::source::SourceArray;
use crate::decode::Err;
use crate::io::xml::Node;

/// Decodes every `source` of the mesh into strided tuples, keyed by id.
///
/// Declared counts are kept for diagnostics only; a document whose counts
/// disagree with its data still decodes.
pub(crate) fn decode_sources(mesh: &Node<'_>, sink: &mut DiagnosticSink) -> Result<IndexMap<String, SourceArray>, Err> {
    let mut sources = IndexMap::new();
    for source in mesh.children("source") {
        let id = source.attr("id")?.to_owned();

        let float_array = source.child("float_array")?;
        let raw = float_array.parse_list::<f32>()?;
        let declared_count = float_array.opt_parse_attr::<usize>("count")?.unwrap_or(raw.len());

        let accessor = source.find("technique_common/accessor")?;
        let stride = accessor.opt_parse_attr::<usize>("stride")?.unwrap_or(1);
        if stride == 0 {
            return Err(Err::InvalidStride { source_id: id, stride });
        }
        let num_tuples = raw.len() / stride;
        let declared_accessor_count = accessor.opt_parse_attr::<usize>("count")?.unwrap_or(num_tuples);

        if raw.len() % stride != 0 {
            sink.report(Diagnostic::RaggedSource { source_id: id.clone(), len: raw.len(), stride });
        }
        if declared_count != raw.len() {
            sink.report(Diagnostic::CountMismatch {
                what: format!("float_array of source '{}'", id),
                declared: declared_count,
                actual: raw.len(),
            });
        }
        if declared_accessor_count != num_tuples {
            sink.report(Diagnostic::CountMismatch {
                what: format!("accessor of source '{}'", id),
                declared: declared_accessor_count,
                actual: num_tuples,
            });
        }

        let array = SourceArray::new(id.clone(), raw, stride, declared_count, declared_accessor_count);
        sources.insert(id, array);
    }

    tracing::debug!("decoded {} sources", sources.len());
    Ok(sources)
}
