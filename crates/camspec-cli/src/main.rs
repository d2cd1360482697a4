use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use camspec_core::catalog::InMemoryCatalog;
use camspec_core::geometry::EngineGeometry;
use camspec_core::performance::{recompute_with, Calibration, FuelType, PerformanceInputs};
use camspec_core::recommend::{
    recommend_from_catalog, IdlePreference, Induction, RecommendationRequest, Usage,
    DEFAULT_LIMIT,
};
use camspec_core::tune::IntakeManifold;
use camspec_core::unit_conversion::{kw_to_hp, liters_to_cid};
use camspec_core::valvetrain::HeadFlowCurve;

mod output;

#[derive(Parser, Debug)]
#[command(author, version, about = "Engine performance estimates and cam matching")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate compression, peak power and the dyno curve for a combination.
    Estimate(EstimateArgs),
    /// Rank catalog cams for a power goal.
    Recommend(RecommendArgs),
}

#[derive(clap::Args, Debug)]
struct EstimateArgs {
    /// JSON document with geometry, cam and tune; missing fields keep defaults.
    #[arg(long)]
    input: Option<PathBuf>,
    /// JSON list of flow-bench readings ({ lift, intake_cfm, exhaust_cfm }).
    #[arg(long = "head-flow")]
    head_flow: Option<PathBuf>,
    /// JSON calibration table overriding the model constants.
    #[arg(long)]
    calibration: Option<PathBuf>,
    /// Geometry lengths are millimeters; report kW and N·m.
    #[arg(long)]
    metric: bool,
    /// Fuel (91, 93, race_gas, e85).
    #[arg(long)]
    fuel: Option<FuelType>,
    /// Intake manifold (dual_plane, single_plane, tunnel_ram, boosted).
    #[arg(long)]
    intake: Option<IntakeManifold>,
    /// Boost pressure (psi).
    #[arg(long)]
    boost: Option<f64>,
    /// Target air/fuel ratio.
    #[arg(long)]
    afr: Option<f64>,
    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct RecommendArgs {
    /// Saved catalog payload ({ ok, cams, heads }).
    #[arg(long)]
    catalog: PathBuf,
    /// Engine make, e.g. "Ford".
    #[arg(long)]
    make: String,
    /// Engine family, e.g. "SBF Windsor".
    #[arg(long)]
    family: String,
    /// Displacement in cubic inches.
    #[arg(long, conflicts_with = "liters", required_unless_present = "liters")]
    cid: Option<f64>,
    /// Displacement in liters.
    #[arg(long)]
    liters: Option<f64>,
    /// Target horsepower.
    #[arg(long, conflicts_with = "kw", required_unless_present = "kw")]
    hp: Option<f64>,
    /// Target power in kilowatts.
    #[arg(long)]
    kw: Option<f64>,
    /// Where peak power should land.
    #[arg(long = "peak-rpm")]
    peak_rpm: f64,
    /// na or boost.
    #[arg(long, default_value_t = Induction::NaturallyAspirated)]
    induction: Induction,
    /// street, strip or truck.
    #[arg(long, default_value_t = Usage::Street)]
    usage: Usage,
    /// smooth, choppy or dont_care.
    #[arg(long, default_value_t = IdlePreference::Choppy)]
    idle: IdlePreference,
    /// Most candidates to list.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,
    /// Pad short results with synthesized grinds.
    #[arg(long = "auto-fill")]
    auto_fill: bool,
    /// Print the recommendation as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Estimate(args) => handle_estimate(&args),
        Command::Recommend(args) => handle_recommend(&args).await,
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {what} in {}", path.display()))
}

fn handle_estimate(args: &EstimateArgs) -> Result<()> {
    let mut inputs: PerformanceInputs = match &args.input {
        Some(path) => read_json(path, "inputs")?,
        None => PerformanceInputs::default(),
    };
    if args.metric && args.input.is_some() {
        inputs.geometry = EngineGeometry::from_metric(&inputs.geometry);
    }
    if let Some(path) = &args.head_flow {
        let curve: HeadFlowCurve = read_json(path, "head flow")?;
        inputs.head_flow = Some(curve);
    }
    if let Some(fuel) = args.fuel {
        inputs.tune.fuel = fuel;
    }
    if let Some(intake) = args.intake {
        inputs.tune.intake = intake;
    }
    if let Some(boost) = args.boost {
        inputs.tune.boost_psi = boost;
    }
    if let Some(afr) = args.afr {
        inputs.tune.afr = afr;
    }

    let calibration: Calibration = match &args.calibration {
        Some(path) => read_json(path, "calibration")?,
        None => Calibration::default(),
    };

    let report = recompute_with(&inputs, &calibration);

    if args.json {
        let json = if args.metric {
            serde_json::to_string_pretty(&report.to_metric())
        } else {
            serde_json::to_string_pretty(&report)
        }
        .context("failed to serialize report")?;
        println!("{json}");
    } else if args.metric {
        output::print_metric_report(&report);
    } else {
        output::print_report(&report);
    }
    Ok(())
}

async fn handle_recommend(args: &RecommendArgs) -> Result<()> {
    let catalog = InMemoryCatalog::from_path(&args.catalog)
        .with_context(|| format!("failed to load catalog from {}", args.catalog.display()))?;

    let displacement_cid = match (args.cid, args.liters) {
        (Some(cid), _) => cid,
        (None, Some(liters)) => liters_to_cid(liters),
        (None, None) => 0.0,
    };
    let target_hp = match (args.hp, args.kw) {
        (Some(hp), _) => hp,
        (None, Some(kw)) => kw_to_hp(kw),
        (None, None) => 0.0,
    };

    let request = RecommendationRequest {
        make: args.make.clone(),
        family: args.family.clone(),
        displacement_cid,
        target_hp,
        peak_rpm: args.peak_rpm,
        induction: args.induction,
        usage: args.usage,
        idle: args.idle,
        limit: args.limit,
        fill_with_auto_grinds: args.auto_fill,
    };

    let recommendation = recommend_from_catalog(&catalog, &request)
        .await
        .context("catalog query failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&recommendation)
            .context("failed to serialize recommendation")?;
        println!("{json}");
    } else {
        output::print_recommendation(&recommendation);
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
