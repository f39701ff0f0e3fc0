use std::path::{Path, PathBuf};

use cerberus_core::RewriteOptions;
use serde_json::Value as JsonValue;

use crate::error::CerberusError;

pub const PACKAGE_JSON_KEY: &str = "cerberus";

pub fn find_repo_root(start: &Path) -> PathBuf {
    git2::Repository::discover(start)
        .ok()
        .and_then(|repo| repo.workdir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| start.to_path_buf())
}

pub fn discover_config_path(repo_root: &Path) -> Option<PathBuf> {
    let names = [
        "cerberus.config.json",
        "cerberus.config.json5",
        "cerberus.config.jsonc",
        "cerberus.config.yaml",
        "cerberus.config.yml",
        "cerberus.toml",
        ".cerberusrc",
        ".cerberusrc.json",
        ".cerberusrc.json5",
        ".cerberusrc.yaml",
        ".cerberusrc.yml",
    ];
    names
        .into_iter()
        .map(|name| repo_root.join(name))
        .find(|p| p.is_file())
}

/// Options from the first config file found in `repo_root`, else from the
/// `"cerberus"` key of its `package.json`, else defaults.
pub fn load_options(repo_root: &Path) -> Result<RewriteOptions, CerberusError> {
    if let Some(path) = discover_config_path(repo_root) {
        log::debug!("using config {}", path.display());
        return load_options_from_path(&path);
    }

    let package_json = repo_root.join("package.json");
    if package_json.is_file()
        && let Some(options) = load_package_json_options(&package_json)?
    {
        log::debug!("using config from {}", package_json.display());
        return Ok(options);
    }

    Ok(RewriteOptions::default())
}

pub fn load_options_from_path(path: &Path) -> Result<RewriteOptions, CerberusError> {
    let ext = path
        .extension()
        .and_then(|x| x.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" | "json5" | "jsonc" | "" => load_json_options(path),
        "yaml" | "yml" => load_yaml_options(path),
        "toml" => load_toml_options(path),
        _ => Err(CerberusError::ConfigParse {
            path: path.to_path_buf(),
            message: format!("unsupported config extension '.{ext}'"),
        }),
    }
}

/// File options overridden by command-line values: extra modules are
/// appended, a resource test replaces the file's.
pub fn merge_overrides(
    base: RewriteOptions,
    extra_modules: &[String],
    resource_test: Option<&str>,
) -> RewriteOptions {
    let modules = if extra_modules.is_empty() {
        base.modules
    } else {
        Some(
            base.modules
                .into_iter()
                .flatten()
                .chain(extra_modules.iter().cloned())
                .collect(),
        )
    };
    RewriteOptions {
        modules,
        resource_test: resource_test.map(str::to_string).or(base.resource_test),
    }
}

fn read_config(path: &Path) -> Result<String, CerberusError> {
    std::fs::read_to_string(path).map_err(|source| CerberusError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_json_options(path: &Path) -> Result<RewriteOptions, CerberusError> {
    let raw = read_config(path)?;
    json5::from_str::<RewriteOptions>(&raw)
        .or_else(|_| serde_json::from_str::<RewriteOptions>(&raw))
        .map_err(|err| CerberusError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

fn load_yaml_options(path: &Path) -> Result<RewriteOptions, CerberusError> {
    let raw = read_config(path)?;
    serde_yaml::from_str::<RewriteOptions>(&raw).map_err(|err| CerberusError::ConfigParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn load_toml_options(path: &Path) -> Result<RewriteOptions, CerberusError> {
    let raw = read_config(path)?;
    let toml_value =
        toml::from_str::<toml::Value>(&raw).map_err(|err| CerberusError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    let json_value =
        serde_json::to_value(toml_value).map_err(|err| CerberusError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    serde_json::from_value::<RewriteOptions>(normalize_keys_to_camel_case(&json_value)).map_err(
        |err| CerberusError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        },
    )
}

fn load_package_json_options(path: &Path) -> Result<Option<RewriteOptions>, CerberusError> {
    let raw = read_config(path)?;
    let package = serde_json::from_str::<JsonValue>(&raw).map_err(|err| {
        CerberusError::ConfigParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    })?;
    let Some(section) = package.get(PACKAGE_JSON_KEY) else {
        return Ok(None);
    };
    serde_json::from_value::<RewriteOptions>(section.clone())
        .map(Some)
        .map_err(|err| CerberusError::ConfigParse {
            path: path.to_path_buf(),
            message: format!("\"{PACKAGE_JSON_KEY}\": {err}"),
        })
}

fn normalize_keys_to_camel_case(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(object) => JsonValue::Object(
            object
                .iter()
                .map(|(key, value)| (snake_to_camel(key), normalize_keys_to_camel_case(value)))
                .collect(),
        ),
        JsonValue::Array(array) => {
            JsonValue::Array(array.iter().map(normalize_keys_to_camel_case).collect())
        }
        other => other.clone(),
    }
}

fn snake_to_camel(key: &str) -> String {
    if !key.contains('_') {
        return key.to_string();
    }
    let mut segments = key.split('_').filter(|segment| !segment.is_empty());
    let Some(first_segment) = segments.next() else {
        return key.to_string();
    };
    let mut normalized_key = String::from(first_segment);
    for segment in segments {
        let mut chars = segment.chars();
        let Some(first_char) = chars.next() else {
            continue;
        };
        normalized_key.push(first_char.to_ascii_uppercase());
        normalized_key.extend(chars);
    }
    normalized_key
}
