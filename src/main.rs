use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use ular::clock::StopSignal;
use ular::config::{version_line, Args, Config};
use ular::session::Session;

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("{}", version_line());
        return Ok(());
    }

    init_logging(args.log_file.as_deref())?;

    // The session takes care of putting the terminal back, even on errors
    let mut session = Session::new(Config::from(&args), StopSignal::new())?;
    session.run()
}

// The screen is ours while the game runs, so logs only ever go to a file.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("could not create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}
