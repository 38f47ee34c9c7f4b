mod platform;

use std::path::PathBuf;

use clap::Parser;

/// Tailor a resume to a job description with a generation service.
#[derive(Parser, Debug)]
#[command(name = "tailor", version, about)]
struct Cli {
    /// Base URL of the generation service.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    service_url: String,

    /// Directory that receives downloaded artifacts.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    platform::run_app(cli.service_url, cli.output_dir)
}
