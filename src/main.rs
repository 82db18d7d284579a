use std::io::{self, BufWriter, Write};
use std::process;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use graphconvert::Config;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("convert");

    let config = match Config::from_args(args.get(1..).unwrap_or(&[])) {
        Ok(Some(config)) => config,
        Ok(None) => {
            print!("{}", Config::usage(program));
            return Ok(());
        }
        Err(err) => {
            eprintln!("{}\n\n{}", err, Config::usage(program));
            process::exit(2);
        }
    };

    let graph = graphconvert::convert(&config)
        .with_context(|| format!("converting {}", config.input.display()))?;

    if config.display {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        graph.display(&mut out).context("writing text dump")?;
        out.flush().context("writing text dump")?;
    }

    Ok(())
}
