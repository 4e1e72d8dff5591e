//! `polar-image` - assemble the container image for one platform.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use polar_image::{
    verify, ArtifactMatrix, ImageBuilder, DEFAULT_BINARY, DEFAULT_CONTEXT, DEFAULT_OUTPUT,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "polar-image", version, about = "Fail-closed multi-arch image assembly")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Promote the artifact for one platform into a fresh image directory
    Assemble(AssembleCmd),
    /// List supported platforms and their target triples
    Platforms,
    /// Re-check an assembled image directory
    Verify {
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct AssembleCmd {
    /// Platform identifier, e.g. linux/arm64
    #[arg(long, env = "TARGETPLATFORM")]
    platform: String,
    /// Directory holding <triple>/release/<binary>
    #[arg(long, default_value = DEFAULT_CONTEXT)]
    context: PathBuf,
    /// Output directory (must be absent or empty)
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Binary to promote
    #[arg(long, default_value = DEFAULT_BINARY)]
    binary: String,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Assemble(args) => cmd_assemble(args),
        Cmd::Platforms => {
            cmd_platforms();
            Ok(())
        }
        Cmd::Verify { output } => cmd_verify(output),
    }
}

fn cmd_assemble(args: AssembleCmd) -> Result<()> {
    let image = ImageBuilder::new()
        .context(&args.context)
        .output(&args.output)
        .binary(&args.binary)
        .build_for(&args.platform)
        .with_context(|| format!("Failed to assemble image for {:?}", args.platform))?;

    println!("{} {}", image.platform, image.entrypoint.display());
    Ok(())
}

fn cmd_platforms() {
    for (platform, triple) in ArtifactMatrix::default().entries() {
        println!("{platform}\t{triple}");
    }
}

fn cmd_verify(output: PathBuf) -> Result<()> {
    let image = verify(&output)
        .with_context(|| format!("Image at {} failed verification", output.display()))?;
    println!("{} ok: {}", image.platform, image.entrypoint.display());
    Ok(())
}
