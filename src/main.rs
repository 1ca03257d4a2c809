use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hotwire::{init_logging, Config, FormatterKind, BUILD_DATE, VERSION};

#[derive(Parser)]
#[command(name = "hotwire")]
#[command(about = "Generate four-axis hot-wire G-code for an airfoil panel", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Cut configuration (.toml or .json)
    config: PathBuf,

    /// Write G-code here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (generic, debug); overrides the configuration
    #[arg(short, long)]
    formatter: Option<String>,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    tracing::debug!("hotwire {} built {}", VERSION, BUILD_DATE);

    let mut config = Config::load_from_file(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(name) = &cli.formatter {
        config.machine.formatter = FormatterKind::from_name(name);
    }

    let base_dir = cli.config.parent();
    let machine = config.build_machine(base_dir)?;
    let program = machine.generate()?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &program)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {} lines to {}", program.lines().count(), path.display());
        }
        None => print!("{}", program),
    }

    Ok(())
}
