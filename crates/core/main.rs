#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::process;

mod app;
mod commands;
mod interact;
mod render;

use app::ProviderOpts;
use commands::Commands;

use clap::{Args, Parser};
use eyre::Context;
use log::{error, trace};

fn main() {
    if let Err(err) = try_main() {
        error!("{:?}", err);
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    let Cli {
        command,
        global_opts:
            GlobalOpts {
                interact,
                verbosity,
                quiet,
            },
        provider_opts,
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    let interact = interact_mode(interact, quiet);

    if interact {
        trace!("Interact mode enabled");
    }

    let output = command.execute(&provider_opts, interact)?;

    if !quiet {
        println!("{output}");
    }
    Ok(())
}

// `quiet` wins over `interact`, a quiet run never prompts
const fn interact_mode(interact: bool, quiet: bool) -> bool {
    interact && !quiet
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new()
        .verbosity(verbosity)
        .init()
        .wrap_err("Cannot set up logging")?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "bookrec")]
#[clap(about = "Search public book catalogues and recommend a handful of books in the terminal")]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[clap(flatten)]
    provider_opts: ProviderOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Enables interactive mode, which asks for the topics and preferences in a form.
    #[clap(short, long, global = true)]
    interact: bool,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Prevents the program from writing to stdout, errors will still be printed to stderr.
    #[clap(short, long, global = true)]
    quiet: bool,
}

#[test]
fn quiet_never_enables_interact_mode() {
    assert!(!interact_mode(false, true));
    assert!(!interact_mode(true, true));
    assert!(interact_mode(true, false));
    assert!(!interact_mode(false, false));
}
