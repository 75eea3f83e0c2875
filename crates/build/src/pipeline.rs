//! One complete build against a [`BuildHost`].

use crate::error::{BuildError, BuildResult};
use crate::host::{BuildHost, ModuleOutput};
use crate::parallel::ParallelRuntime;
use crate::plugin::{BuildSummary, EcssPlugin};
use log::{debug, info};
use std::time::Instant;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildReport {
    /// Modules handed over by the host.
    pub modules: usize,
    /// Modules that contained at least one invocation.
    pub rewritten: usize,
    pub stylesheet: BuildSummary,
}

/// Transform every module on `runtime`, register the manifests in the host's
/// module order, write the modules back and emit the stylesheet.
///
/// Registration follows input order rather than completion order, so the
/// stylesheet is identical for identical inputs whatever the thread count.
///
/// # Errors
///
/// The first failing module in input order aborts the build before anything
/// is written, as does a module whose id is the stylesheet name
/// ([`BuildError::DuplicateAssetName`]). Errors raised by the host while
/// writing, or by the sink when the stylesheet is emitted, are propagated as
/// they happen, so modules written before them stay written.
pub fn run_build(
    plugin: &EcssPlugin,
    host: &mut dyn BuildHost,
    runtime: &ParallelRuntime,
) -> BuildResult<BuildReport> {
    let started = Instant::now();
    let inputs = host.modules()?;
    debug!(
        "transforming {} modules on {} threads",
        inputs.len(),
        runtime.threads()
    );

    let outputs = runtime
        .map_ordered(&inputs, |input| {
            plugin
                .transform(&input.id, &input.source)
                .map(|rewritten| ModuleOutput {
                    id: input.id.clone(),
                    code: rewritten.code,
                    manifest: rewritten.manifest,
                })
        })
        .into_iter()
        .collect::<BuildResult<Vec<_>>>()?;

    let asset = &plugin.config().output_name;
    if outputs.iter().any(|output| output.id == *asset) {
        return Err(BuildError::DuplicateAssetName(asset.clone()));
    }

    let session = plugin.begin_build();
    for output in &outputs {
        session.register(&output.id, &output.manifest)?;
    }
    for output in &outputs {
        host.write_module(output)?;
    }
    let stylesheet = session.finalize(host)?;

    let report = BuildReport {
        modules: outputs.len(),
        rewritten: outputs
            .iter()
            .filter(|output| !output.manifest.is_empty())
            .count(),
        stylesheet,
    };
    info!(
        "build finished in {:?}: {} modules, {} rewritten",
        started.elapsed(),
        report.modules,
        report.rewritten
    );
    Ok(report)
}
