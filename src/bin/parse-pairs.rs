use std::fs::File;
use std::io::{self, BufRead, BufWriter};

use anyhow::{bail, Context};
use getopts::Options;
use tracing::info;

use graphconvert::{Edge, EdgeWriter, Endian, Mode};

// reads `src dst [weight]` lines from stdin and writes binary edge records to <target>.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).with_target(false).init();

    let mut opts = Options::new();
    opts.optflag("w", "weighted", "expect a weight column and write weighted records");
    opts.optopt("e", "endian", "byte order of the records [default: native]", "little|big|native");
    opts.optflag("h", "help", "print this help");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let matches = opts.parse(&args)?;
    if matches.opt_present("h") || matches.free.len() != 1 {
        let brief = "Usage: parse-pairs [options] <target> < edges.txt\nwill overwrite <target>";
        print!("{}", opts.usage(brief));
        return Ok(());
    }

    let target = &matches.free[0];
    let mode = if matches.opt_present("w") { Mode::Weighted } else { Mode::Unweighted };
    let endian = match matches.opt_str("e") {
        Some(name) => match Endian::parse(&name) {
            Some(endian) => endian,
            None => bail!("invalid setting for --endian: {}", name),
        },
        None => Endian::default(),
    };

    let file = File::create(target).with_context(|| format!("creating {}", target))?;
    let mut writer = EdgeWriter::new(BufWriter::new(file), mode, endian);

    let input = io::stdin();
    let mut count = 0u64;
    for (number, line) in input.lock().lines().enumerate() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let edge = parse_line(line, mode)
            .with_context(|| format!("line {}: {:?}", number + 1, line))?;
        writer.write(&edge).with_context(|| format!("writing {}", target))?;
        count += 1;
    }
    writer.flush().with_context(|| format!("writing {}", target))?;

    info!(edges = count, target = %target, "edge records written");
    Ok(())
}

fn parse_line(line: &str, mode: Mode) -> anyhow::Result<Edge> {
    let mut fields = line.split_whitespace();
    let src: u32 = fields.next().context("missing source")?.parse().context("malformed source")?;
    let dst: u32 = fields.next().context("missing target")?.parse().context("malformed target")?;
    let weight: f64 = match mode {
        Mode::Weighted => {
            fields.next().context("missing weight")?.parse().context("malformed weight")?
        }
        Mode::Unweighted => 1.0,
    };
    Ok(Edge::weighted(src, dst, weight))
}
