mod gemini;
mod raster;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use prop_blueprint_core::{
    AnalysisProvider, BlueprintConfig, BlueprintError, BlueprintSession, ImageInput,
    PropAnalysis, ProviderError, SvgSurface, ViewportSize, classify, mime_for_extension,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::gemini::{DEFAULT_MODEL, GeminiProvider};
use crate::raster::{RasterError, RasterOptions};

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Blueprint(#[from] BlueprintError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Raster(#[from] RasterError),
}

type Result<T> = std::result::Result<T, CliError>;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> CliError + '_ {
    move |source| CliError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Engineering blueprints for jewelry display props.
#[derive(Parser, Debug)]
#[command(name = "prop-blueprint", version)]
#[command(about = "Turn prop analysis records into annotated orthographic blueprints")]
struct Cli {
    /// Debug logging on stderr (overrides RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an analysis record to SVG, PNG or PDF
    Render {
        /// Analysis record (JSON)
        input: PathBuf,

        /// Output file; the extension picks the format
        #[arg(long, short = 'o')]
        out: PathBuf,

        /// Replace the structural description used for classification
        #[arg(long)]
        description: Option<String>,

        /// Edit a parameter before drawing, e.g. `--set 1=75`
        #[arg(long = "set", value_name = "INDEX=VALUE", value_parser = parse_edit)]
        edits: Vec<(usize, f64)>,

        /// Viewport width in px
        #[arg(long)]
        width: Option<f64>,

        /// Viewport height in px
        #[arg(long)]
        height: Option<f64>,

        /// Output pixels per viewport pixel (PNG only)
        #[arg(long, default_value_t = 1.0)]
        scale: f32,

        /// Layout config (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Font file for label text (PNG / PDF)
        #[arg(long)]
        font: Option<String>,
    },
    /// Print the template a structural description maps to
    Classify {
        /// Description text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List the parameters and display notes of an analysis record
    Params {
        /// Analysis record (JSON)
        input: PathBuf,
    },
    /// Send a prop drawing to the analysis provider
    Analyze {
        /// Image file (png, jpeg, webp, gif)
        image: PathBuf,

        /// Where to write the analysis record
        #[arg(long, short = 'o')]
        out: PathBuf,

        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,
    },
}

fn parse_edit(s: &str) -> std::result::Result<(usize, f64), String> {
    let (i, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=VALUE, got `{s}`"))?;
    let index = i
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad index `{i}`: {e}"))?;
    let value = v
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad value `{v}`: {e}"))?;
    if !value.is_finite() {
        return Err(format!("value `{v}` is not finite"));
    }
    Ok((index, value))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Svg,
    Png,
    Pdf,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("svg") => Ok(OutputFormat::Svg),
            Some("png") => Ok(OutputFormat::Png),
            Some("pdf") => Ok(OutputFormat::Pdf),
            _ => Err(CliError::Usage(format!(
                "cannot infer output format from {} (use .svg, .png or .pdf)",
                path.display()
            ))),
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_analysis(path: &Path) -> Result<PropAnalysis> {
    let txt = fs::read_to_string(path).map_err(io_err(path))?;
    Ok(PropAnalysis::from_json(&txt)?)
}

#[allow(clippy::too_many_arguments)]
fn render(
    input: &Path,
    out: &Path,
    description: Option<String>,
    edits: &[(usize, f64)],
    width: Option<f64>,
    height: Option<f64>,
    raster_opts: RasterOptions,
    config: Option<&Path>,
) -> Result<()> {
    let format = OutputFormat::from_path(out)?;
    let mut cfg = match config {
        Some(p) => BlueprintConfig::load(p).map_err(BlueprintError::from)?,
        None => BlueprintConfig::default(),
    };
    cfg.viewport = ViewportSize::new(
        width.unwrap_or(cfg.viewport.width),
        height.unwrap_or(cfg.viewport.height),
    );
    cfg.validate().map_err(|e| CliError::Usage(e.to_string()))?;

    let mut analysis = load_analysis(input)?;
    if let Some(d) = description {
        analysis.optimized_prompt = d;
    }

    let mut session = BlueprintSession::new(SvgSurface::new(cfg.viewport), cfg);
    // A degenerate first build may be repaired by the edits that follow.
    let mut outcome = session.ingest(&analysis).map(|_| ());
    for &(index, value) in edits {
        let Some(param) = session.parameters().get(index) else {
            return Err(BlueprintError::ParameterIndex {
                index,
                len: session.parameters().len(),
            }
            .into());
        };
        let clamped = param.clamp(value);
        if clamped != value {
            warn!(
                index,
                name = %param.name,
                requested = value,
                applied = clamped,
                "value outside [{}, {}], clamped",
                param.min,
                param.max
            );
        }
        outcome = session.update_parameter(index, clamped).map(|_| ());
    }
    outcome?;

    if let Some(bp) = session.blueprint() {
        info!(template = %bp.template, scale = bp.scale, "rendered blueprint");
    }
    let svg = session
        .dispose()
        .map(|s| s.to_svg())
        .ok_or(BlueprintError::Disposed)?;

    let bytes = match format {
        OutputFormat::Svg => svg.into_bytes(),
        OutputFormat::Png => raster::svg_to_png(&svg, &raster_opts)?,
        OutputFormat::Pdf => raster::svg_to_pdf(&svg, &raster_opts)?,
    };
    fs::write(out, &bytes).map_err(io_err(out))?;
    debug!(path = %out.display(), bytes = bytes.len(), "wrote output");
    Ok(())
}

fn print_params(input: &Path) -> Result<()> {
    let analysis = load_analysis(input)?;
    let params = analysis.parameters();
    if params.is_empty() {
        println!("(no parameters)");
    }
    for (i, p) in params.iter().enumerate() {
        println!(
            "{i}\t{}\t{} {}\t[{}, {}]",
            p.name, p.value, p.unit, p.min, p.max
        );
    }
    let info = &analysis.basic_info;
    let cues = &analysis.visual_cues;
    println!("material: {}", info.material);
    println!("colorway: {}", info.color);
    println!("lighting: {}", cues.lighting);
    println!("focal point: {}", cues.focal_point);
    Ok(())
}

fn api_key() -> Result<String> {
    std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("API_KEY"))
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or(CliError::Provider(ProviderError::MissingCredentials))
}

fn analyze(image: &Path, out: &Path, model: String) -> Result<()> {
    let bytes = fs::read(image).map_err(io_err(image))?;
    let ext = image
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let input = ImageInput::new(bytes, mime_for_extension(ext.as_deref()));
    let provider = GeminiProvider::new(api_key()?, model);
    info!(model = provider.model(), image = %image.display(), "analyzing drawing");
    let analysis = provider.analyze(&input).inspect_err(|e| {
        warn!(error = %e, "analysis failed");
    })?;
    let json = serde_json::to_string_pretty(&analysis)?;
    fs::write(out, json).map_err(io_err(out))?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render {
            input,
            out,
            description,
            edits,
            width,
            height,
            scale,
            config,
            font,
        } => render(
            &input,
            &out,
            description,
            &edits,
            width,
            height,
            RasterOptions { scale, font },
            config.as_deref(),
        ),
        Command::Classify { text } => {
            println!("{}", classify(text.join(" ").as_str()));
            Ok(())
        }
        Command::Params { input } => print_params(&input),
        Command::Analyze { image, out, model } => analyze(&image, &out, model),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli) {
        Ok(()) => {}
        Err(err @ CliError::Usage(_)) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
