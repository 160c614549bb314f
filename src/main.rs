// External crates
use anyhow::{Context, Result};
use burn_autodiff::Autodiff;
use burn_ndarray::NdArray;
use burn::tensor::backend::Backend as BurnBackendTrait;
use log::info;
use tracing_subscriber::EnvFilter;

// Local modules
use solar_forecast::cli::{self, CliOptions, Command};
use solar_forecast::config::PipelineConfig;
use solar_forecast::pipeline;

type BurnBackend = Autodiff<NdArray<f32>>;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(opts: &CliOptions) -> Result<PipelineConfig> {
    let mut config = match &opts.config {
        Some(path) => PipelineConfig::from_toml_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(dir) = &opts.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(path) = &opts.readings_out {
        config.output.readings_path = Some(path.clone());
    }
    Ok(config)
}

fn run(opts: CliOptions) -> Result<()> {
    let config = load_config(&opts)?;
    let device = <BurnBackend as BurnBackendTrait>::Device::default();

    let report = pipeline::run::<BurnBackend>(&opts.csv_path, &config, &device)
        .with_context(|| format!("forecasting run on {}", opts.csv_path.display()))?;
    let artifacts = pipeline::write_artifacts(&report, &config)?;

    info!("Loss chart: {}", artifacts.loss_chart.display());
    info!("Prediction chart: {}", artifacts.prediction_chart.display());
    for path in &artifacts.experiments {
        info!("Experiment record: {}", path.display());
    }
    Ok(())
}

fn main() {
    let command = match cli::parse_args() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}\n\n{}", cli::usage());
            std::process::exit(2);
        }
    };

    let opts = match command {
        Command::Help => {
            println!("{}", cli::usage());
            return;
        }
        Command::Run(opts) => opts,
    };

    init_logging();
    if let Err(e) = run(opts) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
