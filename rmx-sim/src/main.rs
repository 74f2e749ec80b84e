//! Bench harness for the RMX chain engine.
//!
//! Reads clock edges (`A+`, `A-`, `B+`, `B-`, one per line) from a file or
//! stdin, runs them through the configured chain, and prints every channel's
//! output after each edge.

mod report;
mod script;

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use rmx_core::chain::ChainDispatcher;
use rmx_core::config::Config;
use rmx_core::output::LatchOutput;
use rmx_core::random::{Lcg, RandomSource, ScriptedRandom};
use rmx_types::ChainSeed;

use report::Format;

struct Options {
    log_level: log::LevelFilter,
    format: Format,
    config_path: Option<PathBuf>,
    input_path: Option<PathBuf>,
    random_seed: Option<u64>,
    draws: Option<Vec<u8>>,
    chain_seed: Option<ChainSeed>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options {
        log_level: log::LevelFilter::Warn,
        format: Format::Text,
        config_path: None,
        input_path: None,
        random_seed: None,
        draws: None,
        chain_seed: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} needs a value", name))
        };
        match arg.as_str() {
            "--verbose" | "-v" => opts.log_level = log::LevelFilter::Debug,
            "--trace" => opts.log_level = log::LevelFilter::Trace,
            "--json" => opts.format = Format::Json,
            "--config" => opts.config_path = Some(PathBuf::from(value("--config")?)),
            "--seed" => {
                let v = value("--seed")?;
                opts.random_seed = Some(v.parse().map_err(|_| format!("bad --seed '{}'", v))?);
            }
            "--draws" => opts.draws = Some(script::parse_draws(&value("--draws")?)?),
            "--prev-high" => opts.chain_seed = Some(ChainSeed::High),
            "--prev-low" => opts.chain_seed = Some(ChainSeed::Low),
            other if other.starts_with('-') && other != "-" => {
                return Err(format!("unknown option '{}'", other))
            }
            path => {
                if path != "-" {
                    opts.input_path = Some(PathBuf::from(path));
                }
            }
        }
    }
    Ok(opts)
}

fn init_logging(level: log::LevelFilter) {
    use simplelog::WriteLogger;

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rmx")
        .join("rmx.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path).or_else(|_| File::create("/tmp/rmx.log")) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("logging disabled: {}", e);
            return;
        }
    };

    if let Err(e) = WriteLogger::init(level, simplelog::Config::default(), log_file) {
        eprintln!("logging disabled: {}", e);
        return;
    }

    log::info!(target: "sim", "rmx-sim starting (log level: {:?})", level);
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = match parse_args(&args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("rmx-sim: {}", e);
            eprintln!(
                "usage: rmx-sim [--config FILE] [--seed N | --draws 0,50,99] \
                 [--prev-high] [--json] [-v] [EDGES_FILE]"
            );
            std::process::exit(2);
        }
    };
    init_logging(opts.log_level);

    let source = match &opts.input_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(opts, &source, &mut out)?;
    out.flush()
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

fn run<W: Write>(opts: Options, source: &str, out: &mut W) -> io::Result<()> {
    let config = match &opts.config_path {
        Some(path) => Config::load_from(path).map_err(invalid_data)?,
        None => Config::load(),
    };
    let mut chain_cfg = config.chain_config();
    if let Some(seed) = opts.chain_seed {
        chain_cfg.seed = seed;
    }

    let rng: Box<dyn RandomSource> = match opts.draws {
        Some(draws) => Box::new(ScriptedRandom::new(draws)),
        None => Box::new(Lcg::new(opts.random_seed.unwrap_or_else(|| config.random_seed()))),
    };

    let events = script::parse_edges(source).map_err(invalid_data)?;
    log::debug!(target: "sim", "{} channels, {} edges", chain_cfg.len(), events.len());

    let mut chain = ChainDispatcher::from_config(&chain_cfg, |_| LatchOutput::new(), rng);

    report::write_header(out, opts.format, &chain.snapshot())?;
    for (step, event) in events.iter().enumerate() {
        chain.on_edge(*event);
        report::write_step(out, opts.format, step + 1, event, &chain.outputs())?;
    }
    report::write_summary(out, opts.format, chain.channels())
}
