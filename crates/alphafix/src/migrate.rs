use anyhow::{Context, Result};
use clap::Args;
use log::debug;
use std::fs;
use std::path::PathBuf;

use alphafix_codemod::{Codemod, OpacityToAlpha};

use crate::file_walker;

/// Arguments for the rewrite run
#[derive(Args, Debug, Default, Clone)]
pub struct MigrateArgs {
    /// One or more files or directories to scan.
    /// When omitted, the `lib` directory tree is scanned.
    #[arg(value_name = "PATHS", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// File name suffix selecting which files are rewritten
    #[arg(long, default_value = ".dart", value_name = "SUFFIX")]
    pub suffix: String,

    /// Include hidden files and directories
    #[arg(long)]
    pub hidden: bool,
}

/// Run all codemods over the discovered files, rewriting changed files in place
pub fn execute(args: MigrateArgs) -> Result<()> {
    let walk_paths = if args.paths.is_empty() {
        vec![PathBuf::from("lib")]
    } else {
        args.paths.clone()
    };

    let codemods: Vec<Box<dyn Codemod>> = vec![Box::new(OpacityToAlpha::default())];

    let found = file_walker::walk_source_files(&walk_paths, &args.suffix, args.hidden, |path| {
        let original = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mut content = original.clone();
        let mut changed = false;

        for codemod in &codemods {
            debug!("Running {} on {}", codemod.name(), path.display());
            if let Some(updated) = codemod.apply(path, &content)? {
                content = updated;
                changed = true;
            }
        }

        if changed && content != original {
            fs::write(path, &content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Updated: {}", path.display());
        }

        Ok(())
    })?;

    debug!("Scanned {found} file(s)");
    Ok(())
}
