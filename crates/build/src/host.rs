//! Seams between the build pipeline and whatever hosts it.
//!
//! A host supplies the modules of a build, receives each rewritten module and
//! collects named assets. [`MemoryHost`] drives the pipeline from a synthetic
//! module list; [`DirectoryAssets`] writes assets below an output directory.

use crate::error::{BuildError, BuildResult};
use ecss_rewriter::Manifest;
use log::trace;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Receives the named text assets of one build.
pub trait AssetSink {
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateAssetName`] when `name` was already
    /// emitted into this output set, or an I/O error from the sink.
    fn emit(&mut self, name: &str, contents: String) -> BuildResult<()>;
}

/// Source of modules and destination of their rewritten form.
pub trait BuildHost: AssetSink {
    /// Modules of the current build, in processing order.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot enumerate or read its modules.
    fn modules(&mut self) -> BuildResult<Vec<ModuleInput>>;

    /// # Errors
    ///
    /// Returns an error when the host cannot store the module.
    fn write_module(&mut self, output: &ModuleOutput) -> BuildResult<()>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleInput {
    /// Host-chosen identifier, used in diagnostics and as the output name.
    pub id: String,
    pub source: String,
}

impl ModuleInput {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleOutput {
    pub id: String,
    pub code: String,
    pub manifest: Manifest,
}

/// Assets kept in memory, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssets {
    assets: BTreeMap<String, String>,
}

impl MemoryAssets {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.assets.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetSink for MemoryAssets {
    fn emit(&mut self, name: &str, contents: String) -> BuildResult<()> {
        if self.assets.contains_key(name) {
            return Err(BuildError::DuplicateAssetName(name.to_owned()));
        }
        self.assets.insert(name.to_owned(), contents);
        Ok(())
    }
}

/// Writes each asset to `root/<name>`, creating parent directories.
#[derive(Debug)]
pub struct DirectoryAssets {
    root: PathBuf,
    emitted: FxHashSet<String>,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            emitted: FxHashSet::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `name` was emitted through this sink.
    pub fn contains(&self, name: &str) -> bool {
        self.emitted.contains(name)
    }
}

impl AssetSink for DirectoryAssets {
    fn emit(&mut self, name: &str, contents: String) -> BuildResult<()> {
        if !self.emitted.insert(name.to_owned()) {
            return Err(BuildError::DuplicateAssetName(name.to_owned()));
        }
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| BuildError::io(parent, err))?;
        }
        trace!("writing {} ({} bytes)", path.display(), contents.len());
        fs::write(&path, contents).map_err(|err| BuildError::io(&path, err))
    }
}

/// Host backed by a fixed module list. Rewritten modules are kept by id and
/// assets go to a [`MemoryAssets`].
#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    inputs: Vec<ModuleInput>,
    outputs: BTreeMap<String, ModuleOutput>,
    assets: MemoryAssets,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_module(mut self, id: impl Into<String>, source: impl Into<String>) -> Self {
        self.inputs.push(ModuleInput::new(id, source));
        self
    }

    pub fn output(&self, id: &str) -> Option<&ModuleOutput> {
        self.outputs.get(id)
    }

    pub const fn assets(&self) -> &MemoryAssets {
        &self.assets
    }

    pub fn asset(&self, name: &str) -> Option<&str> {
        self.assets.get(name)
    }
}

impl AssetSink for MemoryHost {
    fn emit(&mut self, name: &str, contents: String) -> BuildResult<()> {
        self.assets.emit(name, contents)
    }
}

impl BuildHost for MemoryHost {
    fn modules(&mut self) -> BuildResult<Vec<ModuleInput>> {
        Ok(self.inputs.clone())
    }

    fn write_module(&mut self, output: &ModuleOutput) -> BuildResult<()> {
        self.outputs.insert(output.id.clone(), output.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_assets_reject_second_emit() {
        let mut assets = MemoryAssets::default();
        assets.emit("ecss.css", String::new()).unwrap();
        let err = assets.emit("ecss.css", String::from("x")).unwrap_err();
        assert!(matches!(err, BuildError::DuplicateAssetName(name) if name == "ecss.css"));
        assert_eq!(assets.get("ecss.css"), Some(""));
    }

    #[test]
    fn directory_assets_create_parents() {
        let dir = tempfile::tempdir().unwrap();
        let mut assets = DirectoryAssets::new(dir.path());
        assets
            .emit("styles/site.css", String::from(".a{}\n"))
            .unwrap();
        let written = fs::read_to_string(dir.path().join("styles/site.css")).unwrap();
        assert_eq!(written, ".a{}\n");
        assert!(assets.contains("styles/site.css"));
        assert!(assets.emit("styles/site.css", String::new()).is_err());
    }
}
