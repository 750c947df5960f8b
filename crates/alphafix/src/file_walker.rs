use anyhow::Result;
use ignore::WalkBuilder;
use std::path::Path;

/// Walk directories and process matching source files with a callback
///
/// Features:
/// - Always recursive traversal
/// - Always respects git ignore patterns
/// - Filters by file name suffix
pub fn walk_source_files<F>(
    paths: &[impl AsRef<Path>],
    suffix: &str,
    hidden: bool,
    mut processor: F,
) -> Result<usize>
where
    F: FnMut(&Path) -> Result<()>,
{
    let mut found_files = 0;

    for root in paths {
        let mut builder = WalkBuilder::new(root.as_ref());

        // Always use these settings: recursive, respect gitignore
        builder
            .hidden(!hidden)
            .git_ignore(true)
            .git_exclude(true)
            .git_global(true);

        for result in builder.build() {
            let entry = result?;
            let path = entry.path();

            if path.is_file() && has_suffix(path, suffix) {
                processor(path)?;
                found_files += 1;
            }
        }
    }

    Ok(found_files)
}

/// Check whether a path's file name ends with the configured suffix
fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(suffix))
}
