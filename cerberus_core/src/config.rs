use indexmap::IndexSet;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::RewriteError;

/// Module names that are always redirected, whatever the caller passes.
pub const BUILTIN_MODULES: [&str; 2] = ["react", "react-native"];

/// Matched case-insensitively.
pub const DEFAULT_RESOURCE_TEST: &str = r"\.(gif|png|jpeg|jpg|svg)$";

/// Caller-facing options, as they appear in a config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RewriteOptions {
    pub modules: Option<Vec<String>>,
    pub resource_test: Option<String>,
}

/// Path predicate deciding which import sources are static assets.
#[derive(Debug, Clone)]
pub struct ResourceTest {
    source: String,
    regex: Regex,
}

impl ResourceTest {
    pub fn default_images() -> Self {
        let regex = RegexBuilder::new(DEFAULT_RESOURCE_TEST)
            .case_insensitive(true)
            .build()
            .expect("default resource pattern");
        Self {
            source: format!("/{DEFAULT_RESOURCE_TEST}/i"),
            regex,
        }
    }

    /// Accepts either a bare regular expression or a JS-style literal
    /// `/body/flags`. The literal form applies only when every flag is a
    /// distinct JS flag (`dgimsuyv`); anything else is a bare pattern.
    pub fn parse(pattern: &str) -> Result<Self, RewriteError> {
        let (body, flags) = split_regex_literal(pattern).unwrap_or((pattern, ""));
        let mut builder = RegexBuilder::new(body);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                // d g u v y have no bearing on a single match test.
                _ => {}
            }
        }
        let regex = builder
            .build()
            .map_err(|err| RewriteError::InvalidResourceTest {
                pattern: pattern.to_string(),
                message: err.to_string(),
            })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn test(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for ResourceTest {
    fn default() -> Self {
        Self::default_images()
    }
}

const JS_REGEX_FLAGS: &str = "dgimsuyv";

fn split_regex_literal(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, flags) = (&rest[..close], &rest[close + 1..]);
    let distinct_js_flags = flags
        .char_indices()
        .all(|(i, c)| JS_REGEX_FLAGS.contains(c) && !flags[..i].contains(c));
    (!body.is_empty() && distinct_js_flags).then_some((body, flags))
}

/// Per-run configuration shared by both rewriters. Immutable once built.
#[derive(Debug, Clone)]
pub struct RewriteConfig {
    excluded_modules: IndexSet<String>,
    resource_test: ResourceTest,
}

impl RewriteConfig {
    pub fn new<I, S>(extra_modules: I, resource_test: ResourceTest) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut excluded_modules: IndexSet<String> =
            BUILTIN_MODULES.iter().map(|name| name.to_string()).collect();
        excluded_modules.extend(extra_modules.into_iter().map(Into::into));
        Self {
            excluded_modules,
            resource_test,
        }
    }

    pub fn from_options(options: &RewriteOptions) -> Result<Self, RewriteError> {
        let resource_test = match options.resource_test.as_deref().map(str::trim) {
            Some(pattern) if !pattern.is_empty() => ResourceTest::parse(pattern)?,
            _ => ResourceTest::default_images(),
        };
        let modules = options
            .modules
            .iter()
            .flatten()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty());
        Ok(Self::new(modules, resource_test))
    }

    pub fn is_excluded(&self, module_name: &str) -> bool {
        self.excluded_modules.contains(module_name)
    }

    pub fn excluded_modules(&self) -> impl Iterator<Item = &str> {
        self.excluded_modules.iter().map(String::as_str)
    }

    pub fn resource_test(&self) -> &ResourceTest {
        &self.resource_test
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>(), ResourceTest::default_images())
    }
}
