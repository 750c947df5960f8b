use anyhow::Result;
use std::path::Path;

pub mod opacity_to_alpha;

pub use opacity_to_alpha::OpacityToAlpha;

/// A single source-to-source rewrite applied to one file's content.
///
/// `apply` returns `Ok(Some(updated))` when at least one rewrite happened and
/// `Ok(None)` when the content is already clean. The caller owns the write
/// side effect.
pub trait Codemod {
    fn name(&self) -> &'static str;
    fn apply(&self, path: &Path, content: &str) -> Result<Option<String>>;
}
