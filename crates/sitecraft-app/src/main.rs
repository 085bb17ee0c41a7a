//! Sitecraft command-line entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sitecraft_app::{PreviewOptions, create_document, load_config, load_session, render_preview, shortcut_table};
use sitecraft_core::ProjectId;
use sitecraft_render::DeviceKind;
use std::path::PathBuf;

/// Sitecraft - build and preview pages from site documents
#[derive(Parser)]
#[command(name = "sitecraft")]
#[command(about = "Command-line shell for the Sitecraft page builder")]
struct Cli {
    /// Editor config JSON (snap tolerance, grid size, ...)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page of a site document inside a device frame
    Preview {
        /// Site document JSON
        document: PathBuf,
        /// Project id (default: first project)
        #[arg(long)]
        project: Option<ProjectId>,
        /// Page slug (default: home page)
        #[arg(long)]
        page: Option<String>,
        #[arg(long, value_enum, default_value_t = Device::Desktop)]
        device: Device,
        /// Named device preset, e.g. "iPhone SE"
        #[arg(long)]
        preset: Option<String>,
        #[arg(long)]
        landscape: bool,
        /// Output HTML file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the keyboard shortcuts
    Shortcuts,

    /// Create a site document with one project and its home page
    New {
        document: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Device {
    Mobile,
    Tablet,
    Laptop,
    Desktop,
}

impl From<Device> for DeviceKind {
    fn from(device: Device) -> Self {
        match device {
            Device::Mobile => DeviceKind::Mobile,
            Device::Tablet => DeviceKind::Tablet,
            Device::Laptop => DeviceKind::Laptop,
            Device::Desktop => DeviceKind::Desktop,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Preview {
            document,
            project,
            page,
            device,
            preset,
            landscape,
            output,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let mut session = load_session(&document, config)?;
            let options = PreviewOptions {
                project,
                page,
                device: device.into(),
                landscape,
                preset,
            };
            let html = render_preview(&mut session, &options)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Wrote preview to {}", path.display());
                }
                None => print!("{html}"),
            }
        }
        Commands::Shortcuts => print!("{}", shortcut_table()),
        Commands::New {
            document,
            name,
            description,
        } => {
            let created = create_document(&document, &name, &description)?;
            println!(
                "Created {} with project \"{}\"",
                document.display(),
                created.projects.first().map(|p| p.name.as_str()).unwrap_or_default()
            );
        }
    }
    Ok(())
}
