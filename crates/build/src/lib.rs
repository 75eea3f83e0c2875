//! Build-wide side of ecss.
//!
//! Hosts transform each module through [`EcssPlugin::transform`], register the
//! resulting manifests with a [`BuildSession`] and finalize the session once
//! all modules are in, which renders the stylesheet and emits it as an asset.
//! [`run_build`] strings these hooks together for any [`BuildHost`].

pub mod aggregator;
pub mod config;
pub mod error;
pub mod host;
pub mod parallel;
pub mod pipeline;
pub mod plugin;
pub mod stylesheet;

pub use aggregator::Aggregator;
pub use config::{CONFIG_FILE, EcssConfig};
pub use error::{BuildError, BuildResult};
pub use host::{
    AssetSink, BuildHost, DirectoryAssets, MemoryAssets, MemoryHost, ModuleInput, ModuleOutput,
};
pub use parallel::ParallelRuntime;
pub use pipeline::{BuildReport, run_build};
pub use plugin::{BuildSession, BuildSummary, EcssPlugin};
pub use stylesheet::BuildStylesheet;
