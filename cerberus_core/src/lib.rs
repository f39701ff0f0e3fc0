pub mod asset;
pub mod config;
pub mod error;
pub mod node;
pub mod rewrite;
pub mod synth;

pub use asset::{AssetProbe, FsProbe};
pub use config::{ResourceTest, RewriteConfig, RewriteOptions};
pub use error::RewriteError;
pub use node::{Binding, CallArgument, CallExpressionNode, Callee, ImportStatement};
pub use rewrite::{
    CallRewrite, ImportKind, RewriteContext, classify_import, rewrite_call, rewrite_import,
};
pub use synth::ReplacementFragment;

pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
