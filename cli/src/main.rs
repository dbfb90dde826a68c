use anyhow::Context;
use cinante::config::Config;
use cinante::format_error;
use cinante_cli::{cli_main, Opt};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging(verbose: bool) -> Result<(), anyhow::Error> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .finish(),
    )
    .context("setting tracing default failed")?;
    tracing_log::LogTracer::init().context("Unable to forward log records")?;
    Ok(())
}

fn run(opt: Opt) -> Result<(), anyhow::Error> {
    init_logging(opt.verbose)?;
    let config = Config::parse(&opt.config)?;
    let stdout = std::io::stdout();
    cli_main(opt, config, &mut stdout.lock())
}

fn main() {
    if let Err(e) = run(Opt::parse()) {
        eprintln!("{}", format_error(e));
        std::process::exit(1);
    }
}
