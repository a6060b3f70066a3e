use clap::Parser;
use weft_cli::args::Cli;
use weft_logger::{LevelFilter, Logger};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.options.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let _log = Logger::builder(env!("CARGO_PKG_NAME")).level(level).init()?;

    weft_cli::run(&cli, std::io::stdin().lock(), std::io::stdout().lock())
        .map_err(|err| anyhow::anyhow!("[{}] {err}", err.diagnostic_code()))
}
