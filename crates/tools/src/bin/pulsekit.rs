//! pulsekit - evaluate pulse-shaping kernels from the command line

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use pulsekit_tools::{
    format_taps, generate, init_logging, write_output, KernelArgs, ResponseSummary, ShapeKind,
};

/// pulsekit pulse-shaping kernels
#[derive(Parser)]
#[command(name = "pulsekit")]
#[command(about = "Sinc, raised cosine and root raised cosine filter taps")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalized sinc, sin(pi x) / (pi x)
    Sinc(KernelArgs),
    /// Raised cosine impulse response
    Rcosine(KernelArgs),
    /// Square-root raised cosine impulse response
    Sqrtrcosine(KernelArgs),
    /// Summarize the frequency response of a kernel
    Response(ResponseArgs),
    /// Show supported kernels
    Info,
}

#[derive(Args, Clone)]
struct ResponseArgs {
    /// Kernel to analyze
    #[arg(long, value_enum)]
    shape: Option<ShapeKind>,

    /// Minimum FFT size
    #[arg(long, default_value = "1024")]
    fft_size: usize,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    kernel: KernelArgs,
}

fn run_kernel(args: &KernelArgs, shape: ShapeKind) -> Result<()> {
    let config = args.to_config(Some(shape))?;
    let generated = generate(&config)?;
    let content = format_taps(&generated, config.format)?;

    write_output(&content, args.output.as_deref())
}

fn run_response(args: &ResponseArgs) -> Result<()> {
    let config = args.kernel.to_config(args.shape)?;
    let sps = config.pulse_shape()?.samples_per_symbol();
    let generated = generate(&config)?;
    let summary = ResponseSummary::analyze(&generated, sps, args.fft_size)?;

    let content = if args.json {
        serde_json::to_string_pretty(&summary)? + "\n"
    } else {
        format!("Kernel:         {}\n{}", config.shape.name(), summary)
    };

    write_output(&content, args.kernel.output.as_deref())
}

/// Show supported kernels
fn show_info() {
    println!("\n=== pulsekit ===");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));

    println!("\n=== Kernels ===");
    println!("  • sinc         - sin(pi x) / (pi x), 1 at x = 0");
    println!("  • rcosine      - raised cosine, rolloff B in [0, 1], Ns samples/symbol");
    println!("  • sqrtrcosine  - square-root raised cosine, scaled by 1/Ns");

    println!("\n=== Example Usage ===");
    println!("  Offsets:  pulsekit sinc -x 0,1,2,0.5");
    println!("  Span:     pulsekit sqrtrcosine -r 0.35 -n 4 -s 8 -f csv");
    println!("  Config:   pulsekit rcosine --config pulse.toml -o taps.json");
    println!("  Response: pulsekit response --shape rcosine -r 0.5 -n 8 -s 16");
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.debug);

    info!("pulsekit starting");

    match &cli.command {
        Commands::Sinc(args) => run_kernel(args, ShapeKind::Sinc)?,
        Commands::Rcosine(args) => run_kernel(args, ShapeKind::RaisedCosine)?,
        Commands::Sqrtrcosine(args) => run_kernel(args, ShapeKind::RootRaisedCosine)?,
        Commands::Response(args) => run_response(args)?,
        Commands::Info => show_info(),
    }

    Ok(())
}
