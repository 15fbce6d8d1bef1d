use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use eco_core::{ForestParams, ProfileRegistry};
use eco_trainer::{dataset, synth, train};
use tracing_subscriber::EnvFilter;

/// Generate synthetic trips and fit the EcoRoute fuel/CO2 model
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct TrainerApp {
    #[command(subcommand)]
    op: TrainerOperation,
}

#[derive(Debug, Clone, Subcommand)]
enum TrainerOperation {
    /// write a synthetic training dataset as CSV
    Generate {
        /// number of rows to generate
        #[arg(short, long, default_value_t = 10_000)]
        rows: usize,

        /// RNG seed; the same seed always yields the same rows
        #[arg(short, long, default_value_t = synth::DEFAULT_SEED)]
        seed: u64,

        /// CSV file to write
        #[arg(short, long, default_value = "data/synthetic.csv")]
        output: PathBuf,
    },
    /// fit the model and save it as a JSON artifact
    Train {
        /// number of synthetic rows, ignored when --dataset is given
        #[arg(short, long, default_value_t = 10_000)]
        rows: usize,

        /// seed for generation and for the train/test shuffle
        #[arg(short, long, default_value_t = synth::DEFAULT_SEED)]
        seed: u64,

        /// share of rows held out for scoring
        #[arg(short, long, default_value_t = 0.2)]
        test_fraction: f64,

        /// number of trees in each forest
        #[arg(long, default_value_t = ForestParams::default().n_trees)]
        trees: usize,

        /// depth limit for every tree
        #[arg(long, default_value_t = ForestParams::default().max_depth)]
        max_depth: u16,

        /// smallest number of rows a leaf may hold
        #[arg(long, default_value_t = ForestParams::default().min_samples_leaf)]
        min_samples_leaf: usize,

        /// train on an existing CSV written by `generate`
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// where to write the model artifact
        #[arg(short, long, default_value = "models/eco_model.json")]
        output: PathBuf,
    },
}

impl TrainerOperation {
    fn run(&self) -> anyhow::Result<()> {
        match self {
            TrainerOperation::Generate { rows, seed, output } => {
                anyhow::ensure!(*rows > 0, "--rows must be positive");
                tracing::info!("generating {} synthetic rows (seed {})", rows, seed);
                let data = synth::SyntheticGenerator::new(*seed, ProfileRegistry::builtin())
                    .generate(*rows);
                create_parent(output)?;
                dataset::write_csv(output, &data)
                    .with_context(|| format!("failed to write {}", output.display()))?;
                tracing::info!("dataset saved to {}", output.display());
            }
            TrainerOperation::Train {
                rows,
                seed,
                test_fraction,
                trees,
                max_depth,
                min_samples_leaf,
                dataset: source,
                output,
            } => {
                anyhow::ensure!(*trees > 0, "--trees must be positive");
                anyhow::ensure!(*min_samples_leaf > 0, "--min-samples-leaf must be positive");
                let params = ForestParams {
                    n_trees: *trees,
                    max_depth: *max_depth,
                    min_samples_leaf: *min_samples_leaf,
                    seed: *seed,
                };
                let data = match source {
                    Some(path) => {
                        tracing::info!("reading dataset {}", path.display());
                        dataset::read_csv(path)
                            .with_context(|| format!("failed to read {}", path.display()))?
                    }
                    None => {
                        anyhow::ensure!(*rows > 0, "--rows must be positive");
                        tracing::info!("generating {} synthetic rows (seed {})", rows, seed);
                        synth::SyntheticGenerator::new(*seed, ProfileRegistry::builtin())
                            .generate(*rows)
                    }
                };

                tracing::info!(
                    "fitting random forest on {} rows ({} trees, depth {}, leaf {})",
                    data.len(),
                    params.n_trees,
                    params.max_depth,
                    params.min_samples_leaf
                );
                let (model, report) = train::train(data, *test_fraction, *seed, params)?;
                tracing::info!(
                    "model R^2 score: {:.4} (train={}, test={})",
                    report.r2,
                    report.train_rows,
                    report.test_rows
                );

                create_parent(output)?;
                model
                    .save(output)
                    .with_context(|| format!("failed to save model to {}", output.display()))?;
                tracing::info!("model saved to {}", output.display());
            }
        }
        Ok(())
    }
}

fn create_parent(path: &std::path::Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = TrainerApp::parse();
    args.op.run()
}
