use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use env_logger::Builder;
use log::{LevelFilter, info};

use wsn_lifetime::analysis::{RobustnessReport, analyze_robustness};
use wsn_lifetime::network::instance::{generate_instance, load_instance, write_instance};
use wsn_lifetime::simulation::run_label;
use wsn_lifetime::{ComparisonReport, SimulationConfig, TreeBuilder, compare_builders, run_simulation};

#[derive(Parser)]
#[command(name = "wsn-lifetime")]
#[command(about = "Energy-aware routing tree simulator for wireless sensor networks")]
struct Cli {
    /// Debug-level logging for this crate
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare greedy and frontier builders with and without cluster heads
    Compare {
        /// Instance file
        instance: PathBuf,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Write the full report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Run a single simulation
    Run {
        /// Instance file
        instance: PathBuf,
        /// Tree builder
        #[arg(long, value_enum, default_value_t = TreeBuilder::Greedy)]
        builder: TreeBuilder,
        /// Disable cluster-head rotation
        #[arg(long)]
        no_heads: bool,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Record per-round battery snapshots and write them as JSON
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// List critical motes of a deployment
    Critical {
        /// Instance file
        instance: PathBuf,
    },
    /// Generate a random instance file
    Generate {
        /// Number of motes
        #[arg(long)]
        motes: usize,
        /// Field width
        #[arg(long, default_value_t = 500.0)]
        width: f64,
        /// Field height
        #[arg(long, default_value_t = 500.0)]
        height: f64,
        /// Random seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Output instance file
        #[arg(long, short)]
        output: PathBuf,
    },
}

/// Simulation settings; flags override the config file.
#[derive(Args)]
struct SettingsArgs {
    /// Config file (defaults to config.toml next to the instance, if present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of rounds
    #[arg(long)]
    max_rounds: Option<usize>,
    /// Distance/energy weight in [0, 1]
    #[arg(long)]
    beta: Option<f64>,
    /// Share of active motes acting as cluster heads
    #[arg(long)]
    head_fraction: Option<f64>,
}

impl SettingsArgs {
    fn resolve(&self, instance: &Path) -> anyhow::Result<SimulationConfig> {
        let derived = SimulationConfig::config_path_from_instance(instance);
        let path = match &self.config {
            Some(path) => Some(path.clone()),
            None if derived.is_file() => Some(derived),
            None => None,
        };

        let mut config = match path {
            Some(path) => {
                info!("Using config file {}", path.display());
                SimulationConfig::load(&path).with_context(|| format!("Failed to load config: {}", path.display()))?
            }
            None => SimulationConfig::default(),
        };

        if let Some(max_rounds) = self.max_rounds {
            config.max_rounds = max_rounds;
        }
        if let Some(beta) = self.beta {
            config.beta = beta;
        }
        if let Some(head_fraction) = self.head_fraction {
            config.head_fraction = head_fraction;
        }
        config.validate().context("Invalid simulation settings")?;
        Ok(config)
    }
}

fn print_robustness(report: &RobustnessReport) {
    println!("Network robustness ({} nodes)", report.node_count);
    println!("  failure simulation : {:?}", report.by_simulation);
    println!("  articulation points: {:?}", report.by_articulation);
    if report.agree {
        if report.is_robust() {
            println!("  both methods agree: no critical mote");
        } else {
            println!("  both methods agree: {} critical motes", report.by_simulation.len());
        }
    } else {
        println!("  methods diverge: station reachability and graph connectivity differ");
    }
}

fn print_comparison(report: &ComparisonReport) {
    println!();
    println!("{:<16} {:>8} {:>14} {:>16}  {}", "run", "rounds", "active motes", "battery left", "termination");
    println!("{}", "-".repeat(78));
    for run in &report.runs {
        println!(
            "{:<16} {:>8} {:>9}/{:<4} {:>16.2}  {}",
            run.label, run.rounds, run.active_motes, report.mote_count, run.remaining_battery, run.termination
        );
    }
    println!("{}", "-".repeat(78));
    if let Some(best) = &report.best {
        println!("Best lifetime: {}", best);
    }
}

fn write_json(path: &Path, json: &str) -> anyhow::Result<()> {
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("wsn_lifetime"), if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Compare { instance, settings, json } => {
            let config = settings.resolve(&instance)?;
            let network = load_instance(&instance).with_context(|| format!("Failed to load instance: {}", instance.display()))?;

            let report = compare_builders(&network, &config);
            print_robustness(&report.robustness);
            print_comparison(&report);

            if let Some(path) = json {
                write_json(&path, &report.to_json()?)?;
            }
        }
        Commands::Run {
            instance,
            builder,
            no_heads,
            settings,
            history,
        } => {
            let mut config = settings.resolve(&instance)?;
            if history.is_some() {
                config.record_history = true;
            }
            let mut network = load_instance(&instance).with_context(|| format!("Failed to load instance: {}", instance.display()))?;

            let outcome = run_simulation(&mut network, &config, builder, !no_heads);
            println!(
                "{}: {} rounds ({}), {}/{} motes active, {:.2} battery left",
                run_label(builder, !no_heads),
                outcome.rounds_executed,
                outcome.termination,
                outcome.active_motes,
                outcome.mote_count,
                outcome.total_battery
            );

            if let Some(path) = history {
                let json = serde_json::to_string_pretty(&outcome).context("Failed to serialize simulation history")?;
                write_json(&path, &json)?;
            }
        }
        Commands::Critical { instance } => {
            let network = load_instance(&instance).with_context(|| format!("Failed to load instance: {}", instance.display()))?;
            print_robustness(&analyze_robustness(network.nodes()));
        }
        Commands::Generate {
            motes,
            width,
            height,
            seed,
            output,
        } => {
            let network = generate_instance(motes, width, height, seed).context("Invalid field")?;
            write_instance(&network, &output).with_context(|| format!("Failed to write instance: {}", output.display()))?;
            info!("Generated {} motes into {}", motes, output.display());
        }
    }

    Ok(())
}
