use clap::Parser;
use yacht_engine::play::{simulate_turns, TurnConfig};
use yacht_engine::Category;

#[derive(Parser)]
#[command(name = "simulate")]
#[command(about = "Monte Carlo sim: which category the heuristic settles on")]
struct Args {
    /// Number of turns to sample
    #[arg(long, default_value_t = 1000)]
    samples: u32,

    /// RNG base seed (turn i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Open categories (comma separated); all when omitted
    #[arg(long, value_delimiter = ',')]
    open: Vec<Category>,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn pct(n: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        n as f64 * 100.0 / total as f64
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = TurnConfig {
        seed: args.seed,
        open: args.open,
    };
    let stats = simulate_turns(&cfg, args.samples)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("simulate results");
    println!("----------------");
    println!("turns:              {}", stats.samples);
    println!(
        "committed early:    {} ({:.1}%)",
        stats.committed_early,
        pct(stats.committed_early, stats.samples)
    );
    println!("avg rolls per turn: {:.2}", stats.avg_rolls);
    println!();
    for (category, count) in &stats.choices {
        println!(
            "{:<15} {:>6}  {:>5.1}%",
            category.name(),
            count,
            pct(*count, stats.samples)
        );
    }

    Ok(())
}
