//! Module rewriter: replaces every `` ecss`...` `` invocation in a module with
//! a string literal of its class names and records the module's manifest.
//!
//! The rewriter keeps no state between calls and can run on any number of
//! modules concurrently.

pub mod error;
pub mod manifest;
pub mod scan;

pub use error::{Location, RewriteError, SyntaxError};
pub use manifest::{Manifest, parse_annotation};

use ecss_compiler::{CompileOptions, Compiler};
use log::debug;

/// Marker used when none is configured.
pub const DEFAULT_MARKER: &str = "ecss";

/// Output of one module transform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rewritten {
    /// Rewritten source, annotation first when the manifest is non-empty.
    pub code: String,
    pub manifest: Manifest,
}

#[derive(Clone, Debug)]
pub struct Rewriter {
    compiler: Compiler,
    marker: String,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new(CompileOptions::default(), DEFAULT_MARKER)
    }
}

impl Rewriter {
    pub fn new(options: CompileOptions, marker: impl Into<String>) -> Self {
        Self {
            compiler: Compiler::new(options),
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Rewrite one module.
    ///
    /// A module without invocations comes back unchanged with an empty manifest.
    ///
    /// # Errors
    ///
    /// [`RewriteError::Syntax`] for an unterminated invocation and
    /// [`RewriteError::Grammar`] for invocation text that does not compile,
    /// both located in module coordinates.
    pub fn rewrite(&self, source: &str) -> Result<Rewritten, RewriteError> {
        let invocations = scan::find_invocations(source, &self.marker)?;
        if invocations.is_empty() {
            return Ok(Rewritten {
                code: source.to_owned(),
                manifest: Manifest::default(),
            });
        }

        let mut body = String::with_capacity(source.len());
        let mut rules = Vec::new();
        let mut copied = 0;
        for invocation in &invocations {
            let compilation = self
                .compiler
                .compile(invocation.text(source))
                .map_err(|err| {
                    let error = err.shifted(invocation.text_start);
                    RewriteError::Grammar {
                        location: Location::of(source, error.span.start),
                        error,
                    }
                })?;
            body.push_str(source.get(copied..invocation.start).unwrap_or_default());
            body.push('"');
            body.push_str(&compilation.class_list());
            body.push('"');
            copied = invocation.end;
            rules.extend(compilation.rules);
        }
        body.push_str(source.get(copied..).unwrap_or_default());

        let manifest = Manifest::from_rules(rules);
        debug!(
            "rewrote {} invocation(s) into {} utilities",
            invocations.len(),
            manifest.len()
        );
        let code = match manifest.annotation() {
            Some(annotation) => annotation + &body,
            None => body,
        };
        Ok(Rewritten { code, manifest })
    }
}

/// Rewrite with the default marker and options.
///
/// # Errors
///
/// See [`Rewriter::rewrite`].
pub fn rewrite(source: &str) -> Result<Rewritten, RewriteError> {
    Rewriter::default().rewrite(source)
}
