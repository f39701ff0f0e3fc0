use std::path::Path;

use crate::asset::{AssetProbe, resolve_asset_path};
use crate::config::RewriteConfig;
use crate::node::{Binding, CallExpressionNode, Callee, ImportStatement};
use crate::synth::{
    Expr, MODULES_GLOBAL, RESOLVE_ASSET, ReplacementFragment, builtin_reference, const_decl,
    resolve_asset_uri,
};

/// Per-file inputs of a rewrite.
#[derive(Clone, Copy)]
pub struct RewriteContext<'a> {
    pub filename: &'a Path,
    pub probe: &'a dyn AssetProbe,
}

impl<'a> RewriteContext<'a> {
    pub fn new(filename: &'a Path, probe: &'a dyn AssetProbe) -> Self {
        Self { filename, probe }
    }

    pub fn containing_dir(&self) -> &'a Path {
        match self.filename.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn resolve_asset_uri(&self, declared: &str) -> Expr {
        resolve_asset_uri(&resolve_asset_path(
            declared,
            self.containing_dir(),
            self.probe,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    ExcludedModule,
    Asset,
    PassThrough,
}

/// Exclusion wins over the resource test.
pub fn classify_import(import: &ImportStatement, config: &RewriteConfig) -> ImportKind {
    if config.is_excluded(&import.source) {
        ImportKind::ExcludedModule
    } else if config.resource_test().test(&import.source) {
        ImportKind::Asset
    } else {
        ImportKind::PassThrough
    }
}

pub fn rewrite_import(
    import: &ImportStatement,
    config: &RewriteConfig,
    ctx: &RewriteContext<'_>,
) -> ReplacementFragment {
    let kind = classify_import(import, config);
    let fragment: ReplacementFragment = match kind {
        ImportKind::ExcludedModule => import
            .bindings
            .iter()
            .map(|binding| const_decl(binding.local(), builtin_reference(&import.source, binding)))
            .collect(),
        // Namespace and named bindings of an asset are left alone.
        ImportKind::Asset => import
            .bindings
            .iter()
            .filter_map(|binding| match binding {
                Binding::Default { local } => {
                    Some(const_decl(local, ctx.resolve_asset_uri(&import.source)))
                }
                Binding::Namespace { .. } | Binding::Named { .. } => None,
            })
            .collect(),
        ImportKind::PassThrough => ReplacementFragment::empty(),
    };
    log::debug!(
        "{}: import {:?} -> {kind:?} ({} replacement statements)",
        ctx.filename.display(),
        import.source,
        fragment.len()
    );
    fragment
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallRewrite {
    /// Output of an earlier rewrite; neither the call nor its arguments may be revisited.
    AlreadyRewritten,
    Replace(ReplacementFragment),
    Keep,
}

/// True for `$MODULES$.resolveAsset(...)`, the call this crate emits.
pub fn is_generated_asset_call(call: &CallExpressionNode) -> bool {
    matches!(
        &call.callee,
        Callee::StaticMember { object, property }
            if object == MODULES_GLOBAL && property == RESOLVE_ASSET
    )
}

pub fn rewrite_call(
    call: &CallExpressionNode,
    config: &RewriteConfig,
    ctx: &RewriteContext<'_>,
) -> CallRewrite {
    if is_generated_asset_call(call) {
        log::debug!("{}: skipping generated asset call", ctx.filename.display());
        return CallRewrite::AlreadyRewritten;
    }
    if !call.is_dynamic_load() {
        return CallRewrite::Keep;
    }
    let Some(path) = call.single_string_argument() else {
        return CallRewrite::Keep;
    };
    if !config.resource_test().test(path) {
        return CallRewrite::Keep;
    }
    log::debug!("{}: require {path:?} -> asset", ctx.filename.display());
    CallRewrite::Replace(ReplacementFragment::expression(ctx.resolve_asset_uri(path)))
}
