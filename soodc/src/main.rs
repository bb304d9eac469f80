//! `soodc` — compiler CLI for the Sood programming language.

use clap::Parser;

use soodc::{pipeline, tracing_setup, Cli};

fn main() {
    let cli = Cli::parse();
    tracing_setup::init(cli.debug);

    if let Err(err) = pipeline::run(&cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
