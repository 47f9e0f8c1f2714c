use anyhow::Context;
use clap::{Parser, Subcommand};
use generator::dataset::{build_dataset, DatasetConfig};
use generator::profile::GeneratorConfig;
use isarcore::pipeline::form_from_file;
use isarcore::{render, ExpectedLayout, ImageFormer, NoiseSpec};
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::{write_report, Runner};

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "ISAR imaging batch driver")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Image every class/sample/step of a dataset at every noise level
    Batch {
        /// Dataset root holding one directory per class
        #[arg(long, env = "ISAR_DATA_DIR")]
        root: Option<PathBuf>,
        /// Load a workflow config from YAML; flags override its values
        #[arg(long)]
        workflow: Option<PathBuf>,
        #[arg(long)]
        steps: Option<usize>,
        #[arg(long)]
        fft_size: Option<usize>,
        /// Expected frequency blocks per file
        #[arg(long)]
        frequencies: Option<usize>,
        /// Expected angle samples per frequency block
        #[arg(long)]
        angles: Option<usize>,
        /// Write image directories here instead of inside each sample
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        /// Write the run summary as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Form a single image and print its calibration
    Form {
        input: PathBuf,
        #[arg(long, default_value_t = ImageFormer::DEFAULT_SIZE)]
        fft_size: usize,
        #[arg(long, default_value_t = 0.0)]
        noise: f64,
        #[arg(long)]
        seed: Option<u64>,
        /// Save a grayscale PNG preview
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write a synthetic point-scatterer dataset
    Synth {
        #[arg(long)]
        output: PathBuf,
        #[arg(long, value_delimiter = ',', default_value = "Caja,Cilindro,Esfera")]
        classes: Vec<String>,
        #[arg(long, default_value_t = 2)]
        samples: usize,
        #[arg(long, default_value_t = 4)]
        steps: usize,
        #[arg(long, default_value_t = 64)]
        frequencies: usize,
        #[arg(long, default_value_t = 64)]
        angles: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Batch {
            root,
            workflow,
            steps,
            fft_size,
            frequencies,
            angles,
            output,
            seed,
            report,
        } => {
            let mut config = match workflow {
                Some(path) => WorkflowConfig::load(path)?,
                None => WorkflowConfig::default(),
            };
            config.root = root.or(config.root);
            config.num_steps = steps.unwrap_or(config.num_steps);
            config.fft_size = fft_size.unwrap_or(config.fft_size);
            config.frequencies = frequencies.or(config.frequencies);
            config.angles = angles.or(config.angles);
            config.output_root = output.or(config.output_root);
            config.noise_seed = seed.or(config.noise_seed);

            let run = Runner::new(config).execute()?;
            println!(
                "Batch run over {} -> {}",
                run.root.display(),
                run.summary
            );
            if let Some(path) = report {
                write_report(&run, &path)?;
            }
        }
        Command::Form {
            input,
            fft_size,
            noise,
            seed,
            output,
        } => {
            let spec = NoiseSpec::new(noise).context("invalid --noise")?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let image = form_from_file(
                &input,
                ExpectedLayout::default(),
                &ImageFormer::new(fft_size),
                &spec,
                &mut rng,
            )
            .with_context(|| format!("forming image from {}", input.display()))?;

            let range = image.range_axis();
            let cross = image.cross_range_axis();
            println!(
                "{}x{} image, range [{:.3}, {:.3}] m, cross-range [{:.3}, {:.3}] m, peak {:.4e}",
                image.size(),
                image.size(),
                range.first().copied().unwrap_or_default(),
                range.last().copied().unwrap_or_default(),
                cross.first().copied().unwrap_or_default(),
                cross.last().copied().unwrap_or_default(),
                image.peak_magnitude()
            );
            if let Some(path) = output {
                render::save_png(&image, &path)
                    .with_context(|| format!("saving preview {}", path.display()))?;
            }
        }
        Command::Synth {
            output,
            classes,
            samples,
            steps,
            frequencies,
            angles,
            seed,
        } => {
            let dataset = DatasetConfig {
                classes,
                samples_per_class: samples,
                steps,
                target: GeneratorConfig {
                    frequency_count: frequencies,
                    angle_count: angles,
                    seed,
                    ..Default::default()
                },
            };
            let written = build_dataset(&output, &dataset)
                .with_context(|| format!("building dataset under {}", output.display()))?;
            println!("Wrote {} scattering files under {}", written, output.display());
        }
    }

    Ok(())
}
