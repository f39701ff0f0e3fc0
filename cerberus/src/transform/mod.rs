use std::path::Path;

use cerberus_core::{AssetProbe, RewriteConfig, RewriteContext};
use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::CerberusError;

mod collector;
mod splice;

pub use splice::Edit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
    pub imports_rewritten: usize,
    pub calls_rewritten: usize,
    pub calls_skipped: usize,
}

impl TransformOutput {
    pub fn changed(&self) -> bool {
        self.imports_rewritten > 0 || self.calls_rewritten > 0
    }
}

/// Rewrites the imports and asset requires of one source file. `filename`
/// locates density variants and picks the parser dialect.
pub fn transform_source(
    source_text: &str,
    filename: &Path,
    config: &RewriteConfig,
    probe: &dyn AssetProbe,
) -> Result<TransformOutput, CerberusError> {
    let source_type = SourceType::from_path(filename).unwrap_or_default();
    // Declaration files hold no runtime imports; initializers there are invalid.
    if source_type.is_typescript_definition() {
        log::debug!("{}: declaration file left as is", filename.display());
        return Ok(TransformOutput {
            code: source_text.to_string(),
            imports_rewritten: 0,
            calls_rewritten: 0,
            calls_skipped: 0,
        });
    }
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source_text, source_type).parse();
    if parsed.panicked || !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .iter()
            .map(|e| format!("{e:?}"))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(CerberusError::Parse {
            path: filename.to_path_buf(),
            message,
        });
    }

    let ctx = RewriteContext::new(filename, probe);
    let mut collector = collector::RewriteCollector::new(config, ctx);
    collector.visit_program(&parsed.program);

    let imports_rewritten = collector.imports_rewritten;
    let calls_rewritten = collector.calls_rewritten;
    let calls_skipped = collector.calls_skipped;
    let code = splice::apply_edits(source_text, collector.into_edits());
    Ok(TransformOutput {
        code,
        imports_rewritten,
        calls_rewritten,
        calls_skipped,
    })
}
