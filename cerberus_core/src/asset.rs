use std::path::Path;

/// Density variants in order of preference.
pub const DENSITY_SUFFIXES: [&str; 2] = ["@3x", "@2x"];

const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

/// Answers "is there a file at this path". Failures to tell count as absent.
pub trait AssetProbe {
    fn exists(&self, path: &Path) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl AssetProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.try_exists().unwrap_or(false)
    }
}

/// Case-sensitive, unlike the default resource test.
pub fn is_image_source(path: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Extension of the last path segment including the dot, `""` when there is
/// none. A leading dot (`.env`) does not start an extension.
pub fn extname(path: &str) -> &str {
    let base_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    let base = &path[base_start..];
    match base.rfind('.') {
        Some(0) | None => "",
        Some(dot) => &base[dot..],
    }
}

/// Inserts `suffix` before the first occurrence of `ext` in `path`.
pub fn density_variant(path: &str, ext: &str, suffix: &str) -> String {
    if ext.is_empty() {
        return path.to_string();
    }
    path.replacen(ext, &format!("{suffix}{ext}"), 1)
}

/// Picks the path to request for `declared`, relative to `containing_dir`:
/// the `@3x` sibling, else the `@2x` sibling, else `declared` itself. Only
/// image paths are probed.
pub fn resolve_asset_path(declared: &str, containing_dir: &Path, probe: &dyn AssetProbe) -> String {
    if !is_image_source(declared) {
        return declared.to_string();
    }
    let ext = extname(declared);
    DENSITY_SUFFIXES
        .iter()
        .map(|suffix| density_variant(declared, ext, suffix))
        .find(|candidate| {
            let candidate_path = containing_dir.join(candidate);
            let found = probe.exists(&candidate_path);
            log::trace!("probe {} -> {found}", candidate_path.display());
            found
        })
        .unwrap_or_else(|| declared.to_string())
}
