use std::fmt;

use crate::node::{Binding, DYNAMIC_LOAD};

pub const REACT_GLOBAL: &str = "$REACT$";
pub const REACT_NATIVE_GLOBAL: &str = "$REACTNATIVE$";
pub const MODULES_GLOBAL: &str = "$MODULES$";
pub const RESOLVE_ASSET: &str = "resolveAsset";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Identifier(String),
    StringLiteral(String),
    Member {
        object: Box<Expr>,
        property: MemberProperty,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberProperty {
    Static(String),
    Computed(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `const <name> = <init>;` with a single declarator.
    Const { name: String, init: Expr },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentNode {
    Statement(Stmt),
    Expression(Expr),
}

/// Nodes that replace one source node in place. Empty means "leave it".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementFragment {
    nodes: Vec<FragmentNode>,
}

impl ReplacementFragment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn expression(expr: Expr) -> Self {
        Self {
            nodes: vec![FragmentNode::Expression(expr)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[FragmentNode] {
        &self.nodes
    }
}

impl FromIterator<Stmt> for ReplacementFragment {
    fn from_iter<T: IntoIterator<Item = Stmt>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().map(FragmentNode::Statement).collect(),
        }
    }
}

pub fn ident(name: impl Into<String>) -> Expr {
    Expr::Identifier(name.into())
}

pub fn string_lit(value: impl Into<String>) -> Expr {
    Expr::StringLiteral(value.into())
}

pub fn member(object: Expr, property: impl Into<String>) -> Expr {
    Expr::Member {
        object: Box::new(object),
        property: MemberProperty::Static(property.into()),
    }
}

pub fn computed_member(object: Expr, property: Expr) -> Expr {
    Expr::Member {
        object: Box::new(object),
        property: MemberProperty::Computed(Box::new(property)),
    }
}

pub fn call(callee: Expr, arguments: Vec<Expr>) -> Expr {
    Expr::Call {
        callee: Box::new(callee),
        arguments,
    }
}

pub fn const_decl(name: impl Into<String>, init: Expr) -> Stmt {
    Stmt::Const {
        name: name.into(),
        init,
    }
}

/// Member lookup by an exported name; falls back to a computed lookup when
/// the name cannot appear after a dot.
pub fn export_member(object: Expr, exported: &str) -> Expr {
    if is_identifier_name(exported) {
        member(object, exported)
    } else {
        computed_member(object, string_lit(exported))
    }
}

/// The expression standing in for `binding` of the excluded module `module_name`.
pub fn builtin_reference(module_name: &str, binding: &Binding) -> Expr {
    let module_ref = match module_name {
        "react" => ident(REACT_GLOBAL),
        "react-native" => ident(REACT_NATIVE_GLOBAL),
        other => computed_member(ident(MODULES_GLOBAL), string_lit(other)),
    };
    match binding {
        Binding::Namespace { .. } | Binding::Default { .. } => module_ref,
        Binding::Named { imported, .. } => export_member(module_ref, imported),
    }
}

/// `$MODULES$.resolveAsset(require("<resolved_path>"))`
pub fn resolve_asset_uri(resolved_path: &str) -> Expr {
    call(
        member(ident(MODULES_GLOBAL), RESOLVE_ASSET),
        vec![call(ident(DYNAMIC_LOAD), vec![string_lit(resolved_path)])],
    )
}

pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(name) => f.write_str(name),
            Expr::StringLiteral(value) => {
                let quoted = serde_json::to_string(value).map_err(|_| fmt::Error)?;
                f.write_str(&quoted)
            }
            Expr::Member { object, property } => match property {
                MemberProperty::Static(name) => write!(f, "{object}.{name}"),
                MemberProperty::Computed(expr) => write!(f, "{object}[{expr}]"),
            },
            Expr::Call { callee, arguments } => {
                write!(f, "{callee}(")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Const { name, init } => write!(f, "const {name} = {init};"),
        }
    }
}

impl fmt::Display for FragmentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentNode::Statement(stmt) => write!(f, "{stmt}"),
            FragmentNode::Expression(expr) => write!(f, "{expr}"),
        }
    }
}

impl fmt::Display for ReplacementFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, node) in self.nodes.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
