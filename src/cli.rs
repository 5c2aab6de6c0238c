// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: A single default action with tag, context, and output overrides.

use clap::Parser;
use dockutil::output::OutputMode;
use dockutil::resolve::Overrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dockutil")]
#[command(about = "Build the current project's container image and push it to a private registry")]
#[command(version)]
pub struct Cli {
    /// Tag the image with this version instead of the manifest's
    #[arg(short = 't', long)]
    pub tag: Option<String>,

    /// Docker build context (defaults to the current directory)
    #[arg(short = 'x', long)]
    pub context: Option<PathBuf>,

    /// Roll the Kubernetes deployment to the pushed image
    #[arg(long)]
    pub deploy: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print final results
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            tag: self.tag.clone(),
            context: self.context.clone(),
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}
