//! GPX Normalizer.
//!
//! Kommandozeilen-Tool zum Normalisieren von GPX-Tracks auf eine feste
//! Anzahl gleichmäßig verteilter Punkte. Mehrere Eingabedateien werden
//! parallel verarbeitet.

use clap::Parser;
use gpx_normalizer::batch;
use gpx_normalizer::options::NormalizerOptions;
use std::path::PathBuf;

/// Kommandozeilenargumente
#[derive(Parser, Debug)]
#[command(
    name = "gpx-normalizer",
    version,
    about = "Normalisiert GPX-Tracks auf eine feste Anzahl gleichmaessig verteilter Wegpunkte"
)]
struct Cli {
    /// Zu normalisierende GPX-Dateien
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Anzahl der Zielpunkte (überschreibt die Options-Datei)
    #[arg(short = 'n', long)]
    points: Option<usize>,

    /// Präfix für Ausgabedateien (überschreibt die Options-Datei)
    #[arg(long)]
    prefix: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    log::info!("GPX Normalizer v{} startet...", env!("CARGO_PKG_VERSION"));

    // Optionen aus TOML laden (oder Standardwerte); CLI-Flags haben Vorrang
    let mut options = NormalizerOptions::load_from_file(&NormalizerOptions::config_path());
    if let Some(points) = cli.points {
        options.target_points = points;
    }
    if let Some(prefix) = cli.prefix {
        options.output_prefix = prefix;
    }

    if options.target_points < 2 {
        anyhow::bail!(
            "Zielpunktanzahl {} ist ungueltig (mindestens 2 benoetigt)",
            options.target_points
        );
    }

    log::info!(
        "Starte Normalisierung fuer {} GPX-Datei(en) auf {} Punkte...",
        cli.inputs.len(),
        options.target_points
    );

    let summary = batch::run_batch(&cli.inputs, &options);

    log::info!(
        "Alle GPX-Dateien verarbeitet ({} ok, {} fehlgeschlagen).",
        summary.succeeded,
        summary.failed
    );

    if summary.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
