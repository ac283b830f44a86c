//! Turns a directory of markdown documents into JSON for a front-end: one
//! payload file per document plus a map describing the directory tree.

pub mod clean;
pub mod config;
pub mod error;
pub mod extract;
pub mod tree;

use log::{info, warn};
use std::path;

pub use config::BuildConfig;
pub use error::{Error, Result};
pub use extract::{ExtractRules, Extractor, Summary};
pub use tree::{BuildSummary, DirectoryEntry, DocumentEntry, Entry, TreeBuilder};

use error::IoContext;

/// Runs one full build: cleanup, walk, then the map file.
pub fn run(config: &BuildConfig) -> Result<BuildSummary> {
    let source_root = path::absolute(&config.source_root).at(&config.source_root)?;
    let output_dir = path::absolute(&config.output_dir).at(&config.output_dir)?;
    if !source_root.is_dir() {
        return Err(Error::NotADirectory(source_root));
    }
    info!(
        "building {} into {}",
        source_root.display(),
        output_dir.display()
    );

    let removed = clean::clean_output(&output_dir, |name| config.is_protected(name))?;
    info!("removed {removed} previously generated files");

    let mut builder = TreeBuilder::new(&output_dir, Extractor::new(config.rules.clone()));
    let entries = builder.build(&source_root, &config.root_namespace)?;
    let map = builder.write_map(&entries, &config.map_file)?;

    let summary = builder.summary();
    info!(
        "wrote {} documents ({} payload bytes) in {} directories, map at {}",
        summary.documents,
        summary.payload_bytes,
        summary.directories,
        map.display()
    );
    if summary.collisions > 0 {
        warn!("{} payload names were shared by several documents", summary.collisions);
    }
    Ok(summary)
}
