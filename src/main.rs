use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use manifest_sync::config::{self, QueryBackend};
use manifest_sync::domain::QueryFields;
use manifest_sync::ui;
use manifest_sync::ManifestUpdater;

#[derive(clap::Parser)]
#[command(
    name = "manifest-sync",
    about = "Sync a vendored checkout's latest commit into its README.chromium manifest"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Vendored source checkout [default: src]")]
    source_dir: Option<PathBuf>,

    #[arg(short, long, help = "Manifest file to update [default: README.chromium]")]
    manifest: Option<PathBuf>,

    #[arg(long, help = "Only update the Commit/Revision line")]
    hash_only: bool,

    #[arg(long, value_enum, help = "How to query the latest commit")]
    backend: Option<QueryBackend>,

    #[arg(long, help = "Show the rewritten lines without changing the manifest")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("manifest-sync {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if let Some(source_dir) = args.source_dir {
        config.paths.source_dir = source_dir;
    }
    if let Some(manifest) = args.manifest {
        config.paths.manifest = manifest;
    }
    if let Some(backend) = args.backend {
        config.query.backend = backend;
    }
    if args.hash_only {
        config.query.fields = QueryFields::HashOnly;
    }

    if let Err(e) = config.validate() {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    let updater = ManifestUpdater::from_config(&config);
    let source_dir = &config.paths.source_dir;
    let manifest = &config.paths.manifest;
    let manifest_name = manifest.display().to_string();

    ui::display_status(&format!(
        "Querying latest commit in {} ({})",
        source_dir.display(),
        updater.query_name()
    ));

    if args.dry_run {
        let preview = match updater.preview(source_dir, manifest) {
            Ok(preview) => preview,
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        };
        ui::display_commit_info(&preview.report.commit);
        ui::display_preview(&preview, &manifest_name);
        return Ok(());
    }

    match updater.update_manifest(source_dir, manifest) {
        Ok(report) => {
            ui::display_commit_info(&report.commit);
            ui::display_report(&report, &manifest_name);
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }

    Ok(())
}
