use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use dashboard::{
    config::DashboardConfig,
    input::{load_bars, load_words},
    logging::init_tracing,
    views::{
        bubbles::{BubbleView, bubble_graph, build_simulation},
        comparison::comparison_view,
        performance::performance_view,
        price::price_view,
    },
};
use keyword_layout::{simulation::RunSummary, sink::JsonLinesSink};
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::info;

#[derive(Parser)]
#[command(version, about = "Price, performance and keyword-bubble data for the dashboard")]
struct Cli {
    /// TOML config file; defaults to $DASHBOARD_CONFIG, then built-in values.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Log as JSON regardless of the config file.
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Args)]
struct BarsArgs {
    /// JSON file of daily bars keyed by ticker.
    #[arg(long, value_name = "FILE")]
    bars: PathBuf,
    #[arg(long)]
    symbol: String,
}

#[derive(Subcommand)]
enum Cmd {
    /// Weekly candles with moving-average overlays.
    Prices(BarsArgs),
    /// Two tickers rebased to 100 over a range of weeks.
    Compare {
        #[command(flatten)]
        bars: BarsArgs,
        #[arg(long)]
        peer: String,
        #[arg(long)]
        start_index: usize,
        #[arg(long)]
        end_index: usize,
    },
    /// Alpha, beta, Sharpe and Treynor with peer ranks and correlations.
    Performance {
        #[command(flatten)]
        bars: BarsArgs,
        /// Defaults to the display window start.
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Defaults to the display window end.
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Keyword bubble layout; one JSON frame per line.
    Bubbles {
        /// Sentiment payload with top_words, bottom_words and adj_matrix.
        #[arg(long, value_name = "FILE")]
        words: PathBuf,
        #[arg(long, default_value_t = 1000)]
        steps: usize,
        /// Print only the settled layout.
        #[arg(long)]
        final_only: bool,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = DashboardConfig::load(cli.config)?;
    cfg.logging.json |= cli.json_logs;
    init_tracing(&cfg.logging)?;

    match cli.cmd {
        Cmd::Prices(BarsArgs { bars, symbol }) => {
            let source = load_bars(&bars)?;
            print_json(&price_view(&source, &symbol, &cfg.series).await?)?;
        }
        Cmd::Compare {
            bars: BarsArgs { bars, symbol },
            peer,
            start_index,
            end_index,
        } => {
            let source = load_bars(&bars)?;
            let view =
                comparison_view(&source, &symbol, &peer, start_index, end_index, &cfg.series)
                    .await?;
            print_json(&view)?;
        }
        Cmd::Performance {
            bars: BarsArgs { bars, symbol },
            start,
            end,
        } => {
            let source = load_bars(&bars)?;
            let start = start.unwrap_or(cfg.series.display.start);
            let end = end.unwrap_or(cfg.series.display.end);
            print_json(&performance_view(&source, &symbol, start, end, &cfg.series).await?)?;
        }
        Cmd::Bubbles {
            words,
            steps,
            final_only,
        } => {
            let payload = load_words(&words)?;
            let mut sim = build_simulation(&payload, &cfg.layout)?;
            if final_only {
                let taken = sim.settle(steps);
                info!(steps = taken, converged = sim.is_converged(), "Layout settled");
                let view = BubbleView {
                    graph: bubble_graph(&sim),
                    frame: sim.frame(),
                    summary: RunSummary {
                        steps: taken,
                        converged: sim.is_converged(),
                        alpha: sim.alpha(),
                    },
                };
                print_json(&view)?;
            } else {
                let mut stdout = tokio::io::stdout();
                let mut header = serde_json::to_vec(&bubble_graph(&sim))?;
                header.push(b'\n');
                stdout.write_all(&header).await?;
                let mut sink = JsonLinesSink::new(stdout);
                sim.run(steps, &mut sink).await?;
            }
        }
    }

    Ok(())
}
