use std::path::PathBuf;

use getopts::Options;

use crate::endian::Endian;
use crate::error::{Error, Result};

/// Whether edge records carry a weight, and whether a weight file is written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Unweighted,
    Weighted,
}

impl Mode {
    pub fn is_weighted(self) -> bool { self == Mode::Weighted }

    /// Size in bytes of one input edge record.
    pub fn record_len(self) -> usize {
        match self {
            Mode::Unweighted => 8,
            Mode::Weighted => 16,
        }
    }
}

/// Settings for one conversion run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub weights_output: Option<PathBuf>,
    pub mode: Mode,
    pub endian: Endian,
    pub renumber: bool,
    pub display: bool,
}

impl Config {
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input: I, output: O, mode: Mode) -> Config {
        Config {
            input: input.into(),
            output: output.into(),
            weights_output: None,
            mode,
            endian: Endian::default(),
            renumber: true,
            display: false,
        }
    }

    /// Where weights go in weighted mode: the explicit path, or `<output>.weights`.
    pub fn weights_path(&self) -> PathBuf {
        match &self.weights_output {
            Some(path) => path.clone(),
            None => {
                let mut name = self.output.clone().into_os_string();
                name.push(".weights");
                PathBuf::from(name)
            }
        }
    }

    fn options() -> Options {
        let mut opts = Options::new();
        opts.reqopt("i", "input", "binary edge list to read", "FILE");
        opts.reqopt("o", "output", "binary graph to write", "FILE");
        opts.optopt("w", "weights", "read weighted records and write weights to FILE", "FILE");
        opts.optopt(
            "e",
            "endian",
            "byte order of input and output [default: native]",
            "little|big|native",
        );
        opts.optflag("n", "no-renumber", "keep the input node ids");
        opts.optflag("d", "display", "print the cleaned edges to stdout");
        opts.optflag("h", "help", "print this help");
        opts
    }

    pub fn usage(program: &str) -> String {
        let brief = format!("Usage: {} -i <input> -o <output> [options]", program);
        Config::options().usage(&brief)
    }

    /// Parses command-line arguments, program name excluded. `Ok(None)` means help was requested.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Option<Config>> {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
        if args.iter().any(|a| *a == "-h" || *a == "--help") {
            return Ok(None);
        }

        let matches = Config::options()
            .parse(&args)
            .map_err(|fail| Error::Usage(fail.to_string()))?;

        if !matches.free.is_empty() {
            return Err(Error::Usage(format!("unexpected argument: {}", matches.free[0])));
        }

        let endian = match matches.opt_str("e") {
            Some(name) => Endian::parse(&name)
                .ok_or_else(|| Error::Usage(format!("invalid setting for --endian: {}", name)))?,
            None => Endian::default(),
        };

        let weights_output = matches.opt_str("w").map(PathBuf::from);
        let mode = if weights_output.is_some() { Mode::Weighted } else { Mode::Unweighted };

        // reqopt guarantees both are present once parse succeeded
        let input = matches.opt_str("i").unwrap_or_default();
        let output = matches.opt_str("o").unwrap_or_default();

        Ok(Some(Config {
            input: input.into(),
            output: output.into(),
            weights_output,
            mode,
            endian,
            renumber: !matches.opt_present("n"),
            display: matches.opt_present("d"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_arguments() {
        let config = Config::from_args(&["-i", "edges.bin", "-o", "graph.bin"]).unwrap().unwrap();
        assert_eq!(config, Config::new("edges.bin", "graph.bin", Mode::Unweighted));
    }

    #[test]
    fn weights_flag_selects_weighted_mode() {
        let args = ["-i", "a", "-o", "b", "-w", "b.w", "-e", "big", "-n", "-d"];
        let config = Config::from_args(&args).unwrap().unwrap();
        assert_eq!(config.mode, Mode::Weighted);
        assert_eq!(config.weights_path(), PathBuf::from("b.w"));
        assert_eq!(config.endian, Endian::Big);
        assert!(!config.renumber);
        assert!(config.display);
    }

    #[test]
    fn default_weights_path() {
        let config = Config::new("in", "out/graph.bin", Mode::Weighted);
        assert_eq!(config.weights_path(), PathBuf::from("out/graph.bin.weights"));
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(Config::from_args(&["--help"]).unwrap(), None);
    }

    #[test]
    fn missing_output_is_usage_error() {
        let err = Config::from_args(&["-i", "edges.bin"]).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
    }

    #[test]
    fn bad_endian_is_usage_error() {
        let err = Config::from_args(&["-i", "a", "-o", "b", "-e", "pdp"]).unwrap_err();
        assert!(matches!(err, Error::Usage(ref msg) if msg.contains("pdp")));
    }

    #[test]
    fn record_lengths() {
        assert_eq!(Mode::Unweighted.record_len(), 8);
        assert_eq!(Mode::Weighted.record_len(), 16);
    }
}
