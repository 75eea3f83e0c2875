//! The hooks a host calls: transform per module, register per module, and
//! finalize once per build.

use crate::aggregator::Aggregator;
use crate::config::EcssConfig;
use crate::error::{BuildError, BuildResult};
use crate::host::AssetSink;
use ecss_rewriter::{Manifest, Rewriter, Rewritten};
use log::{debug, info};
use std::path::Path;

/// Configured entry point for hosts.
#[derive(Clone, Debug)]
pub struct EcssPlugin {
    config: EcssConfig,
    rewriter: Rewriter,
}

/// What the finalization hook produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildSummary {
    /// Name the stylesheet was emitted under.
    pub asset: String,
    pub rules: usize,
    pub modules: usize,
    pub bytes: usize,
}

impl EcssPlugin {
    /// # Errors
    ///
    /// Returns [`BuildError::Config`] when `config` does not validate.
    pub fn new(config: EcssConfig) -> BuildResult<Self> {
        config.validate()?;
        let rewriter = config.rewriter();
        Ok(Self { config, rewriter })
    }

    pub const fn config(&self) -> &EcssConfig {
        &self.config
    }

    pub fn accepts(&self, path: &Path) -> bool {
        self.config.accepts(path)
    }

    /// Module transform hook. Holds no build state, so any number of modules
    /// may be transformed at once.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Rewrite`] naming `module` when the rewriter fails.
    pub fn transform(&self, module: &str, source: &str) -> BuildResult<Rewritten> {
        self.rewriter
            .rewrite(source)
            .map_err(|source| BuildError::Rewrite {
                module: module.to_owned(),
                source,
            })
    }

    /// Start a build with an empty aggregator.
    pub fn begin_build(&self) -> BuildSession<'_> {
        BuildSession {
            config: &self.config,
            aggregator: Aggregator::new(),
        }
    }
}

/// State of one build. Dropping a session without finalizing discards
/// everything registered into it.
pub struct BuildSession<'cfg> {
    config: &'cfg EcssConfig,
    aggregator: Aggregator,
}

impl BuildSession<'_> {
    /// Registration hook. Safe to call from several threads.
    ///
    /// # Errors
    ///
    /// See [`Aggregator::register`].
    pub fn register(&self, module: &str, manifest: &Manifest) -> BuildResult<usize> {
        self.aggregator.register(module, manifest)
    }

    pub const fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Finalization hook: render every registered utility and emit the
    /// stylesheet under the configured name. Taking `self` means no
    /// registration can still be in flight.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error, notably [`BuildError::DuplicateAssetName`].
    pub fn finalize<S: AssetSink + ?Sized>(self, sink: &mut S) -> BuildResult<BuildSummary> {
        let modules = self.aggregator.module_count();
        let stylesheet = self.aggregator.finish();
        let css = stylesheet.render(self.config.minify);
        let summary = BuildSummary {
            asset: self.config.output_name.clone(),
            rules: stylesheet.len(),
            modules,
            bytes: css.len(),
        };
        debug!("emitting `{}`", summary.asset);
        sink.emit(&summary.asset, css)?;
        info!(
            "{}: {} rules from {} modules ({} bytes)",
            summary.asset, summary.rules, summary.modules, summary.bytes
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryAssets;

    #[test]
    fn empty_build_emits_empty_asset() {
        let plugin = EcssPlugin::new(EcssConfig::default()).unwrap();
        let mut assets = MemoryAssets::default();
        let summary = plugin.begin_build().finalize(&mut assets).unwrap();
        assert_eq!(summary.rules, 0);
        assert_eq!(assets.get("ecss.css"), Some(""));
    }

    #[test]
    fn transform_errors_name_the_module() {
        let plugin = EcssPlugin::new(EcssConfig::default()).unwrap();
        let err = plugin.transform("src/app.js", "ecss`p=1").unwrap_err();
        assert!(matches!(&err, BuildError::Rewrite { module, .. } if module == "src/app.js"));
        assert!(err.to_string().starts_with("src/app.js:1:1: "));
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = EcssConfig {
            output_name: String::new(),
            ..EcssConfig::default()
        };
        assert!(EcssPlugin::new(config).is_err());
    }

    #[test]
    fn minify_follows_config() {
        let config = EcssConfig {
            minify: true,
            output_name: String::from("app.css"),
            ..EcssConfig::default()
        };
        let plugin = EcssPlugin::new(config).unwrap();
        let session = plugin.begin_build();
        let rewritten = plugin.transform("a.js", "ecss`p=4`").unwrap();
        session.register("a.js", &rewritten.manifest).unwrap();
        let mut assets = MemoryAssets::default();
        session.finalize(&mut assets).unwrap();
        let id = &rewritten.manifest.rules()[0].id;
        assert_eq!(assets.get("app.css"), Some(format!(".{id}{{padding:1rem}}\n").as_str()));
    }
}
