//! Build host over a directory of source modules.

use ecss_build::{
    AssetSink, BuildError, BuildHost, BuildResult, DirectoryAssets, EcssConfig, ModuleInput,
    ModuleOutput,
};
use log::{debug, trace};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Reads eligible modules below `root` and writes their rewritten form, plus
/// the stylesheet, to the same relative paths below `out`.
///
/// Files whose extension is not configured are not copied. An output
/// directory nested inside `root` is never scanned.
pub struct SourceTree {
    root: PathBuf,
    out: PathBuf,
    config: EcssConfig,
    assets: DirectoryAssets,
}

impl SourceTree {
    /// Creates `out` if needed.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Io`] when either directory cannot be resolved.
    pub fn new(root: &Path, out: &Path, config: &EcssConfig) -> BuildResult<Self> {
        fs::create_dir_all(out).map_err(|err| BuildError::io(out, err))?;
        let root = fs::canonicalize(root).map_err(|err| BuildError::io(root, err))?;
        let out = fs::canonicalize(out).map_err(|err| BuildError::io(out, err))?;
        Ok(Self {
            assets: DirectoryAssets::new(&out),
            root,
            out,
            config: config.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn out(&self) -> &Path {
        &self.out
    }
}

/// `/`-separated module id of `path` relative to the root.
fn module_id(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

impl AssetSink for SourceTree {
    fn emit(&mut self, name: &str, contents: String) -> BuildResult<()> {
        self.assets.emit(name, contents)
    }
}

impl BuildHost for SourceTree {
    fn modules(&mut self) -> BuildResult<Vec<ModuleInput>> {
        let out = self.out.clone();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !entry.path().starts_with(&out));

        let mut inputs = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|err| {
                let path = err
                    .path()
                    .map_or_else(|| self.root.clone(), Path::to_path_buf);
                BuildError::io(path, err.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !self.config.accepts(path) {
                trace!("skipping {}", path.display());
                continue;
            }
            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            let source = fs::read_to_string(path).map_err(|err| BuildError::io(path, err))?;
            inputs.push(ModuleInput::new(module_id(relative), source));
        }
        debug!("found {} modules below {}", inputs.len(), self.root.display());
        Ok(inputs)
    }

    fn write_module(&mut self, output: &ModuleOutput) -> BuildResult<()> {
        self.assets.emit(&output.id, output.code.clone())
    }
}
