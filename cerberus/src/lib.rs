pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod run;
#[cfg(test)]
mod run_test;
pub mod transform;

pub use transform::{TransformOutput, transform_source};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
