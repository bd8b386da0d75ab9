mod config;
mod server;

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use encoding_rs::Encoding;
use tracing::Level;
use yacht_engine::api::decide_json;
use yacht_engine::play::{play_turn, TurnConfig};
use yacht_engine::{Category, Dice};

use crate::config::ServeConfig;

#[derive(Subcommand)]
enum Cmd {
    /// Decide on one request (JSON from a file or stdin)
    Decide {
        /// Request JSON file; reads stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
        /// Pretty-print the response
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Run the HTTP decision service (POST /decide)
    Serve {
        /// YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the bind address
        #[arg(long)]
        bind: Option<String>,
        /// Override the worker count
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Play one seeded turn with the heuristic and print what it did
    Play {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Open categories (comma separated); all when omitted
        #[arg(long, value_delimiter = ',')]
        open: Vec<Category>,
        /// Print the trace as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Parser)]
#[command(name = "yacht")]
#[command(about = "Yacht dice decision engine")]
struct Cli {
    /// Log level for stderr output (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<Level>,
    #[command(subcommand)]
    cmd: Cmd,
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    decode_text(bytes)
}

fn decode_text(bytes: Vec<u8>) -> anyhow::Result<String> {
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Decide { file, pretty } => {
            init_logging(cli.log_level.unwrap_or(Level::WARN));
            let text = match file {
                Some(path) => read_text_auto(&path)?,
                None => {
                    let mut bytes = Vec::new();
                    io::stdin().read_to_end(&mut bytes)?;
                    decode_text(bytes)?
                }
            };
            let out = decide_json(&text)?;
            if pretty {
                let value: serde_json::Value = serde_json::from_str(&out)?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", out);
            }
        }
        Cmd::Serve {
            config,
            bind,
            workers,
        } => {
            let mut cfg = match config {
                Some(path) => ServeConfig::load(&path)?,
                None => ServeConfig::default(),
            };
            if let Some(bind) = bind {
                cfg.bind = bind;
            }
            if let Some(workers) = workers {
                cfg.workers = workers.max(1);
            }
            let level = match cli.log_level {
                Some(level) => level,
                None => cfg
                    .log_level
                    .parse()
                    .with_context(|| format!("invalid log_level '{}'", cfg.log_level))?,
            };
            init_logging(level);
            server::serve(&cfg)?;
        }
        Cmd::Play { seed, open, json } => {
            init_logging(cli.log_level.unwrap_or(Level::WARN));
            let cfg = TurnConfig { seed, open };
            let mut dice = Dice::from_seed(cfg.seed);
            let trace = play_turn(&mut dice, &cfg.open_categories())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&trace)?);
            } else {
                for line in &trace.log {
                    println!("{}", line);
                }
            }
        }
    }
    Ok(())
}
