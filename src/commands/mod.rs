//! Subcommand implementations.
//! Each subcommand receives the parsed global flags as an explicit
//! [`Context`] instead of reading process-wide state.

use std::fmt::Display;
use std::path::PathBuf;

use crate::cli::{Args, Command};
use crate::error::Result;

pub mod apply;
pub mod init;
pub mod list;
pub mod new;
pub mod validate;

/// Global flags shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Context {
    pub verbose: bool,
    pub config_path: PathBuf,
}

impl Context {
    /// Prints `message` only in verbose mode.
    pub fn detail<D: Display>(&self, message: D) {
        if self.verbose {
            println!("{message}");
        }
    }
}

/// Dispatches parsed arguments to the matching subcommand.
pub fn run(args: Args) -> Result<()> {
    let ctx = Context { verbose: args.verbose, config_path: args.config };

    match args.command {
        Command::Init(init_args) => init::run(&ctx, init_args),
        Command::List(list_args) => list::run(&ctx, list_args),
        Command::Apply(apply_args) => apply::run(&ctx, apply_args).map(|_| ()),
        Command::New(new_args) => new::run(&ctx, new_args),
        Command::Validate(validate_args) => validate::run(&ctx, validate_args),
    }
}
