use crate::cli::{Args, ColorChoice};
use std::path::PathBuf;

pub struct AppConfig {
    pub script: Option<PathBuf>,
    pub color_enabled: bool,
    pub verbose: bool,
    pub dump_tokens: bool,
    pub dump_ast: bool,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Self {
        let color_enabled = match args.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => atty::is(atty::Stream::Stderr) && atty::is(atty::Stream::Stdout),
        };

        AppConfig {
            script: args.script.clone(),
            color_enabled,
            verbose: args.verbose,
            dump_tokens: args.dump_tokens,
            dump_ast: args.dump_ast,
        }
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "rlox=debug"
        } else {
            "warn"
        }
    }
}
