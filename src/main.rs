use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use duotone::dither::matrix::BAYER8;
use punkdither::models::{AppConfig, ParamOverrides, PresetConfig, CONFIG_ENV, EMBEDDED_CONFIG};
use punkdither::services::FrameRenderer;

#[derive(Parser)]
#[command(name = "punkdither")]
#[command(about = "Punk Dither - two-color dithering for PNG frames")]
struct Cli {
    /// YAML config file with presets (overrides PUNKDITHER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dither a single PNG frame
    Render {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        params: ParamArgs,
    },
    /// Dither every PNG frame of a directory, in file name order
    Batch {
        /// Directory of input frames
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for output frames (created if missing)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        params: ParamArgs,
    },
    /// List the configured presets
    Presets,
    /// Print the 8x8 ordered dithering matrix
    Matrix,
    /// Write the embedded config.yaml for customization
    Init {
        /// Destination path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// Dither parameters; each flag overrides the preset value
#[derive(Args, Debug, Default)]
struct ParamArgs {
    /// Preset name from the config file
    #[arg(short, long)]
    preset: Option<String>,

    /// Dither strength, 0.0 to 1.0
    #[arg(short, long)]
    strength: Option<f64>,

    /// Dark output color as hex (e.g. "#000000")
    #[arg(long)]
    color_dark: Option<String>,

    /// Bright output color as hex (e.g. "#FFFFFE")
    #[arg(long)]
    color_bright: Option<String>,

    /// Error diffusion direction: up, down, left or right
    #[arg(short, long)]
    direction: Option<String>,

    /// Algorithm: error-diffusion, ordered or blue-noise
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Pixelation block size (1 = off)
    #[arg(long)]
    downscale: Option<u32>,

    /// Fixed blue-noise seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Skip lane-final pixels like the classic plugin;
    /// `--legacy-edges=false` forces full edges over the preset
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    legacy_edges: Option<bool>,

    /// Re-compress output PNGs with oxipng
    #[arg(long)]
    optimize: bool,
}

impl ParamArgs {
    fn overrides(&self) -> ParamOverrides {
        ParamOverrides {
            preset: self.preset.clone(),
            values: PresetConfig {
                description: None,
                strength: self.strength,
                color_dark: self.color_dark.clone(),
                color_bright: self.color_bright.clone(),
                algorithm: self.algorithm.clone(),
                direction: self.direction.clone(),
                downscale: self.downscale,
                seed: self.seed,
                legacy_edges: self.legacy_edges,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            params,
        }) => {
            let renderer = build_renderer(cli.config.as_deref(), &params)?;
            let report = renderer.render_file(&input, &output)?;
            println!(
                "Rendered {} ({})",
                output.display(),
                report.dithered.map_or("not dithered", |a| a.name())
            );
            Ok(())
        }
        Some(Commands::Batch {
            input,
            output,
            params,
        }) => {
            let renderer = build_renderer(cli.config.as_deref(), &params)?;
            let report = renderer.render_directory(&input, &output)?;
            println!(
                "Rendered {} frames into {}",
                report.rendered.len(),
                output.display()
            );
            Ok(())
        }
        Some(Commands::Presets) => run_presets_command(cli.config.as_deref()),
        Some(Commands::Matrix) => {
            run_matrix_command();
            Ok(())
        }
        Some(Commands::Init { output, force }) => run_init_command(&output, force),
        None => run_status_command(cli.config.as_deref()),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "punkdither=info,duotone=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn build_renderer(config: Option<&Path>, params: &ParamArgs) -> anyhow::Result<FrameRenderer> {
    let config = AppConfig::load(config)?;
    let settings = config.resolve(&params.overrides())?;
    let renderer = FrameRenderer::new(&settings).optimize(params.optimize);
    tracing::debug!(
        source = %config.source,
        params = ?renderer.params(),
        edges = ?settings.edge_policy,
        "Renderer ready"
    );
    Ok(renderer)
}

/// List presets, marking the default
fn run_presets_command(config: Option<&Path>) -> anyhow::Result<()> {
    let config = AppConfig::load(config)?;
    let default = config.default_preset.as_deref();

    println!("Presets ({}):", config.source);
    for name in config.preset_names() {
        let marker = if Some(name) == default { "*" } else { " " };
        let description = config
            .presets
            .get(name)
            .and_then(|p| p.description.as_deref())
            .unwrap_or("");
        println!(" {marker} {name:<12} {description}");
    }
    Ok(())
}

fn run_matrix_command() {
    println!("8x8 ordered dithering matrix (threshold = entry * strength * 4):");
    for row in BAYER8 {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>2}")).collect();
        println!("  {}", cells.join(" "));
    }
}

fn run_init_command(output: &Path, force: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }
    std::fs::write(output, EMBEDDED_CONFIG)?;
    println!("Wrote {}", output.display());
    Ok(())
}

/// Display status and configuration information
fn run_status_command(config: Option<&Path>) -> anyhow::Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_env = std::env::var(CONFIG_ENV).ok();
    let config = AppConfig::load(config)?;

    // Header
    println!("Punk Dither v{VERSION}");
    println!("Two-color dithering for PNG frames\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_env.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG         = {}",
        std::env::var("RUST_LOG")
            .as_deref()
            .unwrap_or("punkdither=info,duotone=warn (default)")
    );

    println!("\nConfiguration:");
    println!("  Config:  {}", config.source);
    println!(
        "  Presets: {} (default: {})",
        config.presets.len(),
        config.default_preset.as_deref().unwrap_or("none")
    );

    println!("\nCommands:");
    println!("  punkdither render -i IN -o OUT   Dither one PNG frame");
    println!("  punkdither batch -i DIR -o DIR   Dither a directory of frames");
    println!("  punkdither presets               List presets");
    println!("  punkdither matrix                Print the ordered dithering matrix");
    println!("  punkdither init                  Write the embedded config.yaml");
    println!("\nRun 'punkdither --help' for more details.");
    Ok(())
}
