//! Build configuration.
//!
//! Values come from [`EcssConfig::default`], optionally overridden by a JSON
//! file (`ecss.json`), then by `ECSS_*` environment variables.

use crate::error::{BuildError, BuildResult};
use ecss_compiler::{CompileOptions, DEFAULT_CLASS_PREFIX};
use ecss_rewriter::{DEFAULT_MARKER, Rewriter};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Component, Path};

/// Conventional configuration file name.
pub const CONFIG_FILE: &str = "ecss.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EcssConfig {
    /// Name of the emitted stylesheet asset
    pub output_name: String,
    /// Tag token in front of the back-tick delimited invocation
    pub marker: String,
    /// File extensions (without dot) of modules that are transformed
    pub extensions: Vec<String>,
    /// Worker threads for module transforms; `None` lets rayon decide
    pub threads: Option<usize>,
    /// Prefix of every utility class name
    pub class_prefix: String,
    /// Render the stylesheet without optional whitespace
    pub minify: bool,
}

impl Default for EcssConfig {
    fn default() -> Self {
        Self {
            output_name: String::from("ecss.css"),
            marker: DEFAULT_MARKER.to_owned(),
            extensions: ["js", "jsx", "ts", "tsx", "mjs"]
                .map(str::to_owned)
                .to_vec(),
            threads: None,
            class_prefix: DEFAULT_CLASS_PREFIX.to_owned(),
            minify: false,
        }
    }
}

fn is_truthy(val: &str) -> bool {
    matches!(val, "1" | "true" | "yes")
}

impl EcssConfig {
    /// Defaults overridden by environment variables.
    ///
    /// Reads the following environment variables:
    /// - `ECSS_OUTPUT`: stylesheet asset name
    /// - `ECSS_MARKER`: invocation marker
    /// - `ECSS_EXTENSIONS`: comma-separated extensions
    /// - `ECSS_THREADS`: worker thread count (0 lets rayon decide)
    /// - `ECSS_CLASS_PREFIX`: identifier prefix
    /// - `ECSS_MINIFY`: `1`/`true`/`yes` to minify
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_vars(|key| env::var(key).ok())
    }

    /// Read a JSON configuration file. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Io`] if the file cannot be read and
    /// [`BuildError::Config`] if it is not valid configuration JSON.
    pub fn from_file(path: &Path) -> BuildResult<Self> {
        let data = fs::read(path).map_err(|err| BuildError::io(path, err))?;
        serde_json::from_slice(&data)
            .map_err(|err| BuildError::Config(format!("{}: {err}", path.display())))
    }

    /// File (when given) then environment, validated.
    ///
    /// # Errors
    ///
    /// Propagates [`EcssConfig::from_file`] and [`EcssConfig::validate`] errors.
    pub fn load(path: Option<&Path>) -> BuildResult<Self> {
        let base = match path {
            Some(file) => Self::from_file(file)?,
            None => Self::default(),
        };
        let config = base.with_vars(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `ECSS_*` overrides looked up through `var`.
    #[must_use]
    pub fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(name) = var("ECSS_OUTPUT") {
            self.output_name = name;
        }
        if let Some(marker) = var("ECSS_MARKER") {
            self.marker = marker;
        }
        if let Some(list) = var("ECSS_EXTENSIONS") {
            self.extensions = list
                .split(',')
                .map(|ext| ext.trim().trim_start_matches('.').to_owned())
                .filter(|ext| !ext.is_empty())
                .collect();
        }
        if let Some(threads) = var("ECSS_THREADS").and_then(|val| val.parse::<usize>().ok()) {
            self.threads = (threads > 0).then_some(threads);
        }
        if let Some(prefix) = var("ECSS_CLASS_PREFIX") {
            self.class_prefix = prefix;
        }
        if let Some(minify) = var("ECSS_MINIFY") {
            self.minify = is_truthy(&minify);
        }
        self
    }

    /// Check values that would otherwise produce broken output.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Config`] describing the first bad value.
    pub fn validate(&self) -> BuildResult<()> {
        if self.output_name.trim().is_empty() {
            return Err(BuildError::Config(String::from("output_name is empty")));
        }
        let escapes = Path::new(&self.output_name).components().any(|component| {
            matches!(
                component,
                Component::Prefix(_) | Component::RootDir | Component::ParentDir
            )
        });
        if escapes
            || self.output_name.starts_with(['/', '\\'])
            || self.output_name.split(['/', '\\']).any(|part| part == "..")
        {
            return Err(BuildError::Config(format!(
                "output_name `{}` leaves the output directory",
                self.output_name
            )));
        }
        if self.marker.is_empty()
            || !self
                .marker
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '$'))
        {
            return Err(BuildError::Config(format!(
                "marker `{}` is not an identifier",
                self.marker
            )));
        }
        let starts_class = self
            .class_prefix
            .chars()
            .next()
            .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_');
        if !starts_class
            || !self
                .class_prefix
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-'))
        {
            return Err(BuildError::Config(format!(
                "class_prefix `{}` cannot start a class name",
                self.class_prefix
            )));
        }
        if self.extensions.is_empty() {
            return Err(BuildError::Config(String::from("extensions is empty")));
        }
        Ok(())
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            class_prefix: self.class_prefix.clone(),
        }
    }

    pub fn rewriter(&self) -> Rewriter {
        Rewriter::new(self.compile_options(), self.marker.clone())
    }

    /// Whether a module at `path` is transformed.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|known| known == ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: FxHashMap<String, String> = pairs
            .iter()
            .map(|(key, val)| ((*key).to_owned(), (*val).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = EcssConfig::default();
        assert_eq!(config.output_name, "ecss.css");
        assert_eq!(config.marker, "ecss");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn variables_override() {
        let config = EcssConfig::default().with_vars(vars(&[
            ("ECSS_OUTPUT", "assets/site.css"),
            ("ECSS_EXTENSIONS", ".js, svelte"),
            ("ECSS_THREADS", "3"),
            ("ECSS_MINIFY", "true"),
        ]));
        assert_eq!(config.output_name, "assets/site.css");
        assert_eq!(config.extensions, ["js", "svelte"]);
        assert_eq!(config.threads, Some(3));
        assert!(config.minify);
    }

    #[test]
    fn zero_threads_means_automatic() {
        let config = EcssConfig::default().with_vars(vars(&[("ECSS_THREADS", "0")]));
        assert_eq!(config.threads, None);
    }

    #[test]
    fn json_fields_are_optional() {
        let config: EcssConfig = serde_json::from_str(r#"{ "class_prefix": "u-" }"#).unwrap();
        assert_eq!(config.class_prefix, "u-");
        assert_eq!(config.output_name, "ecss.css");
        assert!(serde_json::from_str::<EcssConfig>(r#"{ "colour": 1 }"#).is_err());
    }

    #[test]
    fn bad_values_are_rejected() {
        let bad_prefix = EcssConfig {
            class_prefix: String::from("9x"),
            ..EcssConfig::default()
        };
        assert!(matches!(bad_prefix.validate(), Err(BuildError::Config(_))));

        let bad_output = EcssConfig {
            output_name: String::from("../escape.css"),
            ..EcssConfig::default()
        };
        assert!(bad_output.validate().is_err());

        for absolute in ["/tmp/escape.css", "\\escape.css"] {
            let config = EcssConfig {
                output_name: absolute.to_owned(),
                ..EcssConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(BuildError::Config(_))),
                "{absolute} accepted"
            );
        }
        let nested = EcssConfig {
            output_name: String::from("assets/site.css"),
            ..EcssConfig::default()
        };
        assert!(nested.validate().is_ok());

        let bad_marker = EcssConfig {
            marker: String::from("e`"),
            ..EcssConfig::default()
        };
        assert!(bad_marker.validate().is_err());
    }

    #[test]
    fn extension_filter() {
        let config = EcssConfig::default();
        assert!(config.accepts(Path::new("src/app.tsx")));
        assert!(!config.accepts(Path::new("src/app.css")));
        assert!(!config.accepts(Path::new("Makefile")));
    }
}
