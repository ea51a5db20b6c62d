use anyhow::Result;
use clap::{CommandFactory, Parser};
use retriever::{run, Args, RunConfig};
use tracing_subscriber::{fmt, EnvFilter};

// Configuration problems print usage and exit with status 0.
fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            err.print()?;
            return Ok(());
        }
    };
    let config = match RunConfig::from_args(args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("*** ERROR: {err} ***");
            Args::command().print_help()?;
            return Ok(());
        }
    };

    let summary = run(&config)?;
    println!("Avg runtime: {:.3}", summary.elapsed.as_secs_f64());
    Ok(())
}
