//! Directory tree construction and payload emission.
//!
//! The walk handles exactly one directory level per call: files first, then
//! subdirectories, each of which is recursed into with an extended namespace.
//! Payload files are written as documents are met; the map is written once
//! the whole tree is in memory.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, IoContext, Result};
use crate::extract::{modified_secs, Extractor};

/// `size` of every directory entry in the map.
pub const DIRECTORY_SIZE: i64 = -1;

const MARKDOWN_EXTENSION: &str = "md";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Document(DocumentEntry),
    Directory(DirectoryEntry),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub name: String,
    /// Payload file name inside the output directory.
    pub path: String,
    #[serde(rename = "lastedittime")]
    pub last_edit_time: i64,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    /// Always empty, directories have no payload.
    pub path: String,
    #[serde(rename = "lastedittime")]
    pub last_edit_time: i64,
    pub size: i64,
    pub children: Vec<Entry>,
}

#[derive(Serialize)]
struct Payload<'a> {
    data: &'a str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub documents: usize,
    pub directories: usize,
    pub payload_bytes: u64,
    /// Payload names produced by more than one document.
    pub collisions: usize,
}

pub struct TreeBuilder {
    extractor: Extractor,
    output_dir: PathBuf,
    written: HashSet<String>,
    summary: BuildSummary,
}

impl TreeBuilder {
    pub fn new(output_dir: impl Into<PathBuf>, extractor: Extractor) -> Self {
        Self {
            extractor,
            output_dir: output_dir.into(),
            written: HashSet::new(),
            summary: BuildSummary::default(),
        }
    }

    /// Builds the entries for `dir`, writing a payload for every document
    /// found at or below it.
    pub fn build(&mut self, dir: &Path, namespace: &str) -> Result<Vec<Entry>> {
        let mut files = Vec::new();
        let mut subdirs = Vec::new();
        for entry in fs::read_dir(dir).at(dir)? {
            let path = entry.at(dir)?.path();
            if path.is_dir() {
                subdirs.push(path);
            } else {
                files.push(path);
            }
        }

        let mut children = Vec::new();
        for path in files.iter().filter(|p| is_markdown(p)) {
            children.push(Entry::Document(self.document(path, namespace)?));
        }
        for path in &subdirs {
            children.push(Entry::Directory(self.directory(path, namespace)?));
        }
        Ok(children)
    }

    /// Writes `entries` as the map file and returns its path.
    pub fn write_map(&self, entries: &[Entry], map_file: &str) -> Result<PathBuf> {
        let target = self.output_dir.join(map_file);
        let json = serde_json::to_string(entries).map_err(|source| Error::Json {
            path: target.clone(),
            source,
        })?;
        fs::write(&target, json).at(&target)?;
        Ok(target)
    }

    pub fn summary(&self) -> BuildSummary {
        self.summary
    }

    fn document(&mut self, path: &Path, namespace: &str) -> Result<DocumentEntry> {
        let name = file_name(path);
        let text = fs::read_to_string(path).at(path)?;
        let metadata = fs::metadata(path).at(path)?;
        let summary = self.extractor.extract(&text);

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let payload = format!("{namespace}_{}.json", sanitize(&stem));
        debug!("{} -> {payload}", path.display());
        self.write_payload(&payload, &text)?;
        self.summary.documents += 1;

        Ok(DocumentEntry {
            name,
            path: payload,
            last_edit_time: modified_secs(&metadata).at(path)?,
            title: summary.title,
            abstract_text: summary.abstract_text,
            size: metadata.len(),
        })
    }

    fn directory(&mut self, path: &Path, namespace: &str) -> Result<DirectoryEntry> {
        let name = file_name(path);
        let metadata = fs::metadata(path).at(path)?;
        let last_edit_time = modified_secs(&metadata).at(path)?;
        self.summary.directories += 1;

        let children = self.build(path, &format!("{namespace}_{}", sanitize(&name)))?;
        Ok(DirectoryEntry {
            name,
            path: String::new(),
            last_edit_time,
            size: DIRECTORY_SIZE,
            children,
        })
    }

    fn write_payload(&mut self, payload: &str, text: &str) -> Result<()> {
        if !self.written.insert(payload.to_string()) {
            self.summary.collisions += 1;
            warn!("payload name {payload} produced twice, keeping the later document");
        }
        let target = self.output_dir.join(payload);
        let json = serde_json::to_string(&Payload { data: text }).map_err(|source| Error::Json {
            path: target.clone(),
            source,
        })?;
        fs::write(&target, &json).at(&target)?;
        self.summary.payload_bytes += json.len() as u64;
        Ok(())
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == MARKDOWN_EXTENSION)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Replaces spaces with underscores.
pub fn sanitize(name: &str) -> String {
    name.replace(' ', "_")
}
