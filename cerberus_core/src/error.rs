use thiserror::Error;

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("invalid resourceTest pattern {pattern:?}: {message}")]
    InvalidResourceTest { pattern: String, message: String },
}
