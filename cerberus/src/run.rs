use std::io::Write;
use std::path::{Path, PathBuf};

use cerberus_core::{AssetProbe, FsProbe, RewriteConfig};
use ignore::WalkBuilder;
use path_slash::PathExt;

use crate::args::{CerberusCli, OutputMode};
use crate::config::{find_repo_root, load_options, load_options_from_path, merge_overrides};
use crate::error::CerberusError;
use crate::transform::{TransformOutput, transform_source};

const DECLARATION_SUFFIXES: [&str; 3] = [".d.ts", ".d.mts", ".d.cts"];

/// JS/TS sources, excluding TypeScript declaration files.
pub fn looks_like_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if DECLARATION_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            matches!(
                ext,
                "ts" | "tsx" | "js" | "jsx" | "mjs" | "cjs" | "mts" | "cts"
            )
        })
        .unwrap_or(false)
}

/// Explicit files are taken as given; directories contribute their
/// non-ignored JS/TS sources. Ignore files apply outside git checkouts too.
pub fn collect_source_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = vec![];
    for path in paths {
        let found: Vec<PathBuf> = if path.is_dir() {
            WalkBuilder::new(path)
                .require_git(false)
                .sort_by_file_name(|a, b| a.cmp(b))
                .build()
                .filter_map(Result::ok)
                .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
                .map(|entry| entry.into_path())
                .filter(|p| looks_like_source_file(p))
                .collect()
        } else {
            vec![path.clone()]
        };
        for file in found {
            if !out.contains(&file) {
                out.push(file);
            }
        }
    }
    out
}

/// Config file (explicit or discovered from the repo root) plus CLI overrides.
pub fn build_config(cli: &CerberusCli, cwd: &Path) -> Result<RewriteConfig, CerberusError> {
    let file_options = match &cli.config {
        Some(path) => load_options_from_path(&cwd.join(path))?,
        None => load_options(&find_repo_root(cwd))?,
    };
    let options = merge_overrides(file_options, &cli.modules, cli.resource_test.as_deref());
    Ok(RewriteConfig::from_options(&options)?)
}

pub fn transform_file(
    path: &Path,
    config: &RewriteConfig,
    probe: &dyn AssetProbe,
) -> Result<TransformOutput, CerberusError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CerberusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let filename = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    transform_source(&raw, &filename, config, probe)
}

/// Runs the CLI and returns the process exit code.
pub fn run(cli: &CerberusCli, cwd: &Path, out: &mut dyn Write) -> Result<i32, CerberusError> {
    let config = build_config(cli, cwd)?;
    let roots = cli.paths.iter().map(|p| cwd.join(p)).collect::<Vec<_>>();
    let files = collect_source_files(&roots);
    let mode = cli.output_mode();
    if mode == OutputMode::Stdout && files.len() != 1 {
        return Err(CerberusError::Usage(format!(
            "expected exactly one file without --write or --check, found {}",
            files.len()
        )));
    }
    log::debug!(
        "{} file(s), excluded modules: {:?}, resource test: {}",
        files.len(),
        config.excluded_modules().collect::<Vec<_>>(),
        config.resource_test().as_str()
    );

    let probe = FsProbe;
    let mut changed: Vec<&PathBuf> = vec![];
    let mut failures = 0usize;
    for file in &files {
        let output = match transform_file(file, &config, &probe) {
            Ok(output) => output,
            Err(err) if mode == OutputMode::Stdout => return Err(err),
            Err(err) => {
                log::error!("{err}");
                failures += 1;
                continue;
            }
        };
        match mode {
            OutputMode::Stdout => {
                out.write_all(output.code.as_bytes())
                    .and_then(|()| out.flush())
                    .map_err(|source| CerberusError::Io {
                        path: file.clone(),
                        source,
                    })?;
            }
            OutputMode::Write if output.changed() => {
                std::fs::write(file, &output.code).map_err(|source| CerberusError::Io {
                    path: file.clone(),
                    source,
                })?;
                log::info!(
                    "rewrote {} ({} imports, {} requires)",
                    display_path(cwd, file),
                    output.imports_rewritten,
                    output.calls_rewritten
                );
            }
            OutputMode::Check if output.changed() => changed.push(file),
            OutputMode::Write | OutputMode::Check => {}
        }
    }

    for file in &changed {
        writeln!(out, "{}", display_path(cwd, file)).map_err(|source| CerberusError::Io {
            path: (*file).clone(),
            source,
        })?;
    }
    Ok(if failures > 0 || !changed.is_empty() { 1 } else { 0 })
}

fn display_path(cwd: &Path, path: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_slash_lossy()
        .into_owned()
}
