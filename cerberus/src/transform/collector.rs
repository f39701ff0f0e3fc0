use cerberus_core::{
    Binding, CallArgument, CallExpressionNode, CallRewrite, Callee, ImportStatement,
    RewriteConfig, RewriteContext, rewrite_call, rewrite_import,
};
use oxc_ast::ast::{
    CallExpression, Expression, ImportDeclaration, ImportDeclarationSpecifier,
    ModuleExportName,
};
use oxc_ast_visit::{Visit, walk};
use oxc_span::Span;

use super::splice::Edit;

pub(super) struct RewriteCollector<'c> {
    config: &'c RewriteConfig,
    ctx: RewriteContext<'c>,
    edits: Vec<Edit>,
    pub(super) imports_rewritten: usize,
    pub(super) calls_rewritten: usize,
    pub(super) calls_skipped: usize,
}

impl<'c> RewriteCollector<'c> {
    pub(super) fn new(config: &'c RewriteConfig, ctx: RewriteContext<'c>) -> Self {
        Self {
            config,
            ctx,
            edits: vec![],
            imports_rewritten: 0,
            calls_rewritten: 0,
            calls_skipped: 0,
        }
    }

    pub(super) fn into_edits(self) -> Vec<Edit> {
        self.edits
    }

    fn replace(&mut self, span: Span, text: String) {
        self.edits.push(Edit {
            start: span.start as usize,
            end: span.end as usize,
            text,
        });
    }
}

impl<'a> Visit<'a> for RewriteCollector<'_> {
    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        let Some(import) = lower_import(it) else {
            return;
        };
        let fragment = rewrite_import(&import, self.config, &self.ctx);
        if fragment.is_empty() {
            return;
        }
        self.imports_rewritten += 1;
        self.replace(it.span, fragment.to_string());
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        match rewrite_call(&lower_call(it), self.config, &self.ctx) {
            CallRewrite::AlreadyRewritten => {
                self.calls_skipped += 1;
            }
            CallRewrite::Replace(fragment) => {
                self.calls_rewritten += 1;
                self.replace(it.span, fragment.to_string());
            }
            CallRewrite::Keep => walk::walk_call_expression(self, it),
        }
    }
}

/// `None` for `import type` declarations, which erase at compile time.
fn lower_import(it: &ImportDeclaration<'_>) -> Option<ImportStatement> {
    if it.import_kind.is_type() {
        return None;
    }
    let bindings = it
        .specifiers
        .iter()
        .flatten()
        .filter_map(|spec| match spec {
            ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                Some(Binding::default_import(s.local.name.as_str()))
            }
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                Some(Binding::namespace(s.local.name.as_str()))
            }
            ImportDeclarationSpecifier::ImportSpecifier(s) if !s.import_kind.is_type() => Some(
                Binding::named(export_name(&s.imported), s.local.name.as_str()),
            ),
            ImportDeclarationSpecifier::ImportSpecifier(_) => None,
        })
        .collect();
    Some(ImportStatement::new(it.source.value.as_str(), bindings))
}

fn export_name<'a>(name: &'a ModuleExportName<'_>) -> &'a str {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.as_str(),
        ModuleExportName::IdentifierReference(ident) => ident.name.as_str(),
        ModuleExportName::StringLiteral(lit) => lit.value.as_str(),
    }
}

/// Parentheses around the callee or an argument are looked through. Optional
/// calls (`require?.(...)`) lower to an unknown callee and stay untouched.
fn lower_call(it: &CallExpression<'_>) -> CallExpressionNode {
    let callee = match it.callee.without_parentheses() {
        _ if it.optional => Callee::Other,
        Expression::Identifier(ident) => Callee::Identifier(ident.name.to_string()),
        Expression::StaticMemberExpression(member) => match member.object.without_parentheses() {
            Expression::Identifier(object) => Callee::StaticMember {
                object: object.name.to_string(),
                property: member.property.name.to_string(),
            },
            _ => Callee::Other,
        },
        _ => Callee::Other,
    };
    let arguments = it
        .arguments
        .iter()
        .map(|arg| match arg.as_expression().map(Expression::without_parentheses) {
            Some(Expression::StringLiteral(lit)) => CallArgument::StringLiteral(lit.value.to_string()),
            _ => CallArgument::Other,
        })
        .collect();
    CallExpressionNode::new(callee, arguments)
}
