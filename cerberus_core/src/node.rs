//! Host-independent view of the two syntax forms the rewriters inspect.
//!
//! The host adapter lowers its parser's nodes into these shapes; anything
//! the rewriters do not care about collapses into an `Other` variant.

/// Identifier used for dynamic loads, `require("./x")`.
pub const DYNAMIC_LOAD: &str = "require";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    pub source: String,
    pub bindings: Vec<Binding>,
}

impl ImportStatement {
    pub fn new(source: impl Into<String>, bindings: Vec<Binding>) -> Self {
        Self {
            source: source.into(),
            bindings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// `import * as local from "..."`
    Namespace { local: String },
    /// `import local from "..."`
    Default { local: String },
    /// `import { imported as local } from "..."`
    Named { imported: String, local: String },
}

impl Binding {
    pub fn namespace(local: impl Into<String>) -> Self {
        Self::Namespace {
            local: local.into(),
        }
    }

    pub fn default_import(local: impl Into<String>) -> Self {
        Self::Default {
            local: local.into(),
        }
    }

    pub fn named(imported: impl Into<String>, local: impl Into<String>) -> Self {
        Self::Named {
            imported: imported.into(),
            local: local.into(),
        }
    }

    pub fn local(&self) -> &str {
        match self {
            Self::Namespace { local } | Self::Default { local } | Self::Named { local, .. } => {
                local
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callee {
    Identifier(String),
    StaticMember { object: String, property: String },
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArgument {
    StringLiteral(String),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpressionNode {
    pub callee: Callee,
    pub arguments: Vec<CallArgument>,
}

impl CallExpressionNode {
    pub fn new(callee: Callee, arguments: Vec<CallArgument>) -> Self {
        Self { callee, arguments }
    }

    pub fn require(path: impl Into<String>) -> Self {
        Self::new(
            Callee::Identifier(DYNAMIC_LOAD.to_string()),
            vec![CallArgument::StringLiteral(path.into())],
        )
    }

    pub fn is_dynamic_load(&self) -> bool {
        matches!(&self.callee, Callee::Identifier(name) if name == DYNAMIC_LOAD)
    }

    /// The literal value when the call has exactly one string-literal argument.
    pub fn single_string_argument(&self) -> Option<&str> {
        match self.arguments.as_slice() {
            [CallArgument::StringLiteral(value)] => Some(value),
            _ => None,
        }
    }
}
