//! `ecss` command-line tool.

use anyhow::{Result, anyhow};
use env_logger::{Builder, Env};
use log::{error, info};
use std::env;
use std::io::{Write as _, stderr, stdout};
use std::path::PathBuf;
use std::process::exit;

fn print_usage() {
    drop(writeln!(
        stderr(),
        "Usage:\n  ecss build <SRC> <OUT> [--config <FILE>]\n  ecss compile <TEXT> [--config <FILE>]\n  ecss reference [<UTILITY>]"
    ));
}

/// Positional arguments plus the value of `--config`, if given.
fn split_args(args: Vec<String>) -> Result<(Vec<String>, Option<PathBuf>)> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let value = iter.next().ok_or_else(|| anyhow!("--config needs a file"))?;
            config = Some(PathBuf::from(value));
        } else if let Some(value) = arg.strip_prefix("--config=") {
            config = Some(PathBuf::from(value));
        } else {
            positional.push(arg);
        }
    }
    Ok((positional, config))
}

fn run(mut args: Vec<String>) -> Result<()> {
    if args.is_empty() {
        print_usage();
        return Err(anyhow!("missing command"));
    }
    let cmd = args.remove(0);
    let (positional, config_path) = split_args(args)?;
    match (cmd.as_str(), positional.as_slice()) {
        ("build", [src, out]) => {
            let src = PathBuf::from(src);
            let config = ecss::load_config(Some(&src), config_path.as_deref())?;
            let report = ecss::build_tree(&src, &PathBuf::from(out), config)?;
            info!(
                "{} modules ({} rewritten), {} rules in {}",
                report.modules, report.rewritten, report.stylesheet.rules, report.stylesheet.asset
            );
            Ok(())
        }
        ("compile", [text]) => {
            let config = ecss::load_config(None, config_path.as_deref())?;
            write!(stdout(), "{}", ecss::compile_text(text, &config)?)?;
            Ok(())
        }
        ("reference", [name]) => {
            write!(stdout(), "{}", ecss::reference_text(Some(name.as_str()))?)?;
            Ok(())
        }
        ("reference", []) => {
            write!(stdout(), "{}", ecss::reference_text(None)?)?;
            Ok(())
        }
        _ => {
            print_usage();
            Err(anyhow!("unrecognised command line for `{cmd}`"))
        }
    }
}

fn main() {
    let _log_init: Result<(), _> =
        Builder::from_env(Env::default().filter_or("RUST_LOG", "warn")).try_init();
    if let Err(err) = run(env::args().skip(1).collect()) {
        error!("{err:#}");
        exit(1);
    }
}
