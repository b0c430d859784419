//! Planetary gear train synthesis CLI.
//!
//! Provides three modes of operation:
//! - `search`: Search tooth counts for a spec built from a TOML file and flags
//! - `reference`: Run the 2AA sun-to-carrier reference scenario
//! - `info`: Print crate version and the supported tags

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use planetgear_core::prelude::*;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Tooth-count synthesis for planetary gear trains.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search tooth combinations and report every accepted design.
    Search {
        #[command(flatten)]
        spec: SpecArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run the 2AA sun-to-carrier reference scenario.
    Reference {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print crate information.
    Info,
}

/// Spec source and per-field overrides. Flags win over the file.
#[derive(Args)]
struct SpecArgs {
    /// TOML file with a gear train spec.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target ratio.
    #[arg(short, long)]
    ratio: Option<f64>,

    /// Accepted percentage error.
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Annular gear pitch diameter (mm).
    #[arg(short = 'd', long)]
    annular_diameter: Option<f64>,

    /// Minimum tooth count of sun and planet gears.
    #[arg(long)]
    min_teeth: Option<u32>,

    /// Minimum tooth count of the annular gear.
    #[arg(long)]
    z3_min: Option<u32>,

    /// Smallest allowed modulus (mm).
    #[arg(long)]
    min_modulus: Option<f64>,

    /// Largest allowed modulus (mm).
    #[arg(long)]
    max_modulus: Option<f64>,

    /// Efficiency of a single mesh, in (0, 1].
    #[arg(long)]
    mesh_efficiency: Option<f64>,

    /// Member function: 13, 31, 1v, v1, 3v or v3.
    #[arg(short, long)]
    member_function: Option<String>,

    /// Configuration: 1AI, 2AI, 2AA or 2II.
    #[arg(short = 'g', long)]
    configuration: Option<String>,

    /// Take the 2II annular modulus from the pitch diameter.
    #[arg(long)]
    two_ii_from_diameter: bool,
}

#[derive(Args)]
struct OutputArgs {
    /// Report format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Search annular tooth counts on the rayon thread pool.
    #[arg(short, long)]
    parallel: bool,

    /// Worker threads for --parallel (default: one per core).
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Spec assembly
// ---------------------------------------------------------------------------

fn build_spec(args: &SpecArgs) -> Result<GearTrainSpec, SynthError> {
    let mut spec = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading spec");
            GearTrainSpec::from_file(path)?
        }
        None => GearTrainSpec::default(),
    };

    if let Some(ratio) = args.ratio {
        spec.ratio = ratio;
    }
    if let Some(tolerance) = args.tolerance {
        spec.tolerance = tolerance;
    }
    if let Some(diameter) = args.annular_diameter {
        spec.annular_gear_pitch_diameter = diameter;
    }
    if let Some(min_teeth) = args.min_teeth {
        spec.min_gear_teeth = min_teeth;
    }
    if let Some(z3_min) = args.z3_min {
        spec.z3_min = z3_min;
    }
    if let Some(min) = args.min_modulus {
        spec.min_gear_modulus = min;
    }
    if let Some(max) = args.max_modulus {
        spec.max_gear_modulus = max;
    }
    if let Some(efficiency) = args.mesh_efficiency {
        spec.mesh_efficiency = efficiency;
    }
    if let Some(tag) = &args.member_function {
        spec.member_function = tag.parse().map_err(SynthError::from)?;
    }
    if let Some(tag) = &args.configuration {
        spec.configuration = tag.parse().map_err(SynthError::from)?;
    }
    if args.two_ii_from_diameter {
        spec.two_ii_modulus = ModulusZ3Source::AnnularDiameter;
    }

    Ok(spec)
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn run_search(
    spec: GearTrainSpec,
    output: &OutputArgs,
) -> Result<SearchSummary, Box<dyn std::error::Error>> {
    let synth = Synthesizer::new(spec)?;
    let spec = synth.spec();
    info!(
        configuration = %spec.configuration,
        member_function = %spec.member_function,
        ratio = spec.ratio,
        tolerance = spec.tolerance,
        candidates = synth.candidate_space().len(),
        "searching"
    );
    let cancel = CancelToken::new();
    let stdout = io::BufWriter::new(io::stdout());

    let summary = match output.format {
        Format::Text => {
            let mut report = TextReport::new(stdout);
            let summary = search_with(&synth, &mut report, &cancel, output)?;
            report.finish()?;
            summary
        }
        Format::Json => {
            let mut report = JsonLinesReport::new(stdout);
            let summary = search_with(&synth, &mut report, &cancel, output)?;
            report.finish()?;
            summary
        }
    };

    Ok(summary)
}

fn search_with(
    synth: &Synthesizer,
    sink: &mut (impl SearchSink + Send),
    cancel: &CancelToken,
    output: &OutputArgs,
) -> Result<SearchSummary, rayon::ThreadPoolBuildError> {
    if !output.parallel {
        return Ok(synth.run(sink, cancel));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = output.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;
    Ok(pool.install(|| synth.run_parallel(sink, cancel)))
}

fn run_info() {
    println!("planetgear v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("configurations:");
    for c in Configuration::ALL {
        println!("  {:<4} {}", c.tag(), c.label());
    }
    println!();
    println!("member functions:");
    for m in MemberFunction::ALL {
        println!("  {:<4} {}", m.tag(), m.label());
    }
    println!();
    println!("planets: {PLANET_COUNT}, clearance: {PLANET_CLEARANCE_MM} mm");
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("planetgear=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn finish(result: Result<SearchSummary, Box<dyn std::error::Error>>) -> ExitCode {
    match result {
        Ok(summary) => {
            info!(
                visited = summary.candidates_visited,
                accepted = summary.accepted,
                rejected = summary.rejections.total(),
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Search { spec, output }) => {
            let result = build_spec(&spec)
                .map_err(Into::into)
                .and_then(|spec| run_search(spec, &output));
            finish(result)
        }
        Some(Commands::Reference { output }) => {
            finish(run_search(presets::reference_2aa_sun_to_carrier(), &output))
        }
        Some(Commands::Info) => {
            run_info();
            ExitCode::SUCCESS
        }
        None => {
            // Default: run the reference scenario as text
            let output = OutputArgs {
                format: Format::Text,
                parallel: false,
                threads: None,
            };
            finish(run_search(presets::reference_2aa_sun_to_carrier(), &output))
        }
    }
}
