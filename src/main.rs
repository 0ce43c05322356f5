use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cut_list::planner::validate_stock_length;
use cut_list::render::{export_report, render_bar, render_report};
use cut_list::types::{DemandList, PieceDemand, WasteFigure};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cut_list",
    about = "One-dimensional bar cutting list optimizer"
)]
struct Cli {
    /// Stock bar length in mm (e.g. 6000)
    #[arg(long, allow_negative_numbers = true)]
    stock: i64,

    /// Cut pieces as LENGTH:QTY (e.g. 1200:2 800:3)
    #[arg(long = "cuts", num_args = 1.., required = true, allow_negative_numbers = true)]
    cuts: Vec<String>,

    /// Leave out the N-th cut (1-based) from --cuts
    #[arg(long, num_args = 1..)]
    skip: Vec<usize>,

    /// Waste figure to report: last, total, or both
    #[arg(long, default_value = "both", value_parser = parse_waste_figure)]
    waste: WasteFigure,

    /// Show an ASCII strip of each pattern
    #[arg(long)]
    layout: bool,

    /// Print the plan as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Also write the text report to this file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_waste_figure(s: &str) -> Result<WasteFigure, String> {
    match s {
        "last" => Ok(WasteFigure::Last),
        "total" => Ok(WasteFigure::Total),
        "both" => Ok(WasteFigure::Both),
        _ => Err(format!(
            "invalid waste figure '{}', expected: last, total, or both",
            s
        )),
    }
}

fn parse_cut(s: &str) -> Result<PieceDemand, String> {
    let (length, qty) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid cut '{}', expected LENGTH:QTY", s))?;
    let length = length
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid length in '{}'", s))?;
    let qty = qty
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    Ok(PieceDemand::new(length, qty))
}

/// Drops the 1-based positions in `skip`, highest first so earlier removals
/// don't shift later ones.
fn skip_cuts(demands: &mut DemandList, skip: &[usize]) -> Result<(), String> {
    let mut positions = skip.to_vec();
    positions.sort_unstable_by(|a, b| b.cmp(a));
    positions.dedup();
    for position in positions {
        position
            .checked_sub(1)
            .and_then(|index| demands.remove(index))
            .ok_or_else(|| format!("no cut #{} to skip", position))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let stock_length = validate_stock_length(cli.stock).context("invalid --stock")?;

    let mut demands = DemandList::new();
    for cut in &cli.cuts {
        let demand = parse_cut(cut).map_err(anyhow::Error::msg)?;
        demands
            .add(demand)
            .with_context(|| format!("rejected cut '{}'", cut))?;
    }

    skip_cuts(&mut demands, &cli.skip).map_err(anyhow::Error::msg)?;
    for demand in demands.iter() {
        debug!(%demand, "requested");
    }
    info!(
        stock_length,
        entries = demands.len(),
        requested_mm = demands.total_length(),
        "planning"
    );

    let plan = cut_list::plan(demands.as_slice(), cli.stock)
        .context("failed to compute cutting plan")?;
    info!(
        bars = plan.total_bars,
        patterns = plan.entries.len(),
        "cutting plan ready"
    );

    let report = render_report(demands.as_slice(), &plan, cli.waste);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", report);
        if cli.layout {
            for (i, entry) in plan.entries.iter().enumerate() {
                println!("\nPattern {} x {}:", i + 1, entry.repeat_count);
                print!("{}", render_bar(plan.stock_length, &entry.pattern));
            }
        }
    }

    if let Some(path) = &cli.export {
        export_report(path, &report)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Exported report to {}", path.display());
    }

    Ok(())
}
