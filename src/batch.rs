//! Batch-Verarbeitung: Laden, Resampeln und Schreiben einzelner GPX-Dateien.
//!
//! Jede Datei wird von einem eigenen Worker verarbeitet; Fehler einer
//! Datei brechen den Lauf nicht ab, sondern werden einzeln gemeldet.

use crate::core::{resample_track, GpxTrack};
use crate::options::NormalizerOptions;
use crate::xml::{parse_gpx, write_gpx};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Ergebnis eines Batch-Laufs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Erfolgreich normalisierte Dateien
    pub succeeded: usize,
    /// Fehlgeschlagene Dateien
    pub failed: usize,
}

/// Ausgabepfad: gleicher Ordner, Präfix vor dem Dateinamen.
pub fn output_path_for(input: &Path, prefix: &str) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.gpx".to_string());

    input.with_file_name(format!("{}{}", prefix, file_name))
}

/// Normalisiert eine einzelne GPX-Datei: Laden, Resampeln, Schreiben.
///
/// Gibt den Pfad der geschriebenen Ausgabedatei zurück.
pub fn normalize_file(input: &Path, options: &NormalizerOptions) -> Result<PathBuf> {
    let xml_content = fs::read_to_string(input)
        .with_context(|| format!("GPX-Datei {} konnte nicht gelesen werden", input.display()))?;

    let source = parse_gpx(&xml_content)
        .with_context(|| format!("Fehler beim Parsen von {}", input.display()))?;

    log::debug!(
        "{}: {} Punkte, GPX-Version {}, Tracklaenge {:.6}",
        input.display(),
        source.point_count(),
        source.version.as_deref().unwrap_or("?"),
        source.length_2d(),
    );

    let resampled = resample_track(&source.points, options.target_points)
        .with_context(|| format!("Resampling von {} fehlgeschlagen", input.display()))?;

    // Metadaten der Quelle unverändert an den Ausgabe-Container hängen
    let normalized = GpxTrack {
        points: resampled,
        meta: source.meta,
        version: source.version,
        creator: source.creator,
    };

    let output = write_gpx(&normalized)?;
    let output_path = output_path_for(input, &options.output_prefix);
    fs::write(&output_path, output).with_context(|| {
        format!(
            "Ausgabedatei {} konnte nicht geschrieben werden",
            output_path.display()
        )
    })?;

    Ok(output_path)
}

/// Verarbeitet alle Dateien parallel (ein Worker pro Datei, Join am Ende).
pub fn run_batch(files: &[PathBuf], options: &NormalizerOptions) -> BatchSummary {
    let results: Vec<bool> = files
        .par_iter()
        .map(|file| {
            log::info!("Verarbeite {}...", file.display());

            match normalize_file(file, options) {
                Ok(output_path) => {
                    log::info!(
                        "{} normalisiert nach {}",
                        file.display(),
                        output_path.display()
                    );
                    true
                }
                Err(e) => {
                    log::error!("Normalisierung von {} fehlgeschlagen: {:#}", file.display(), e);
                    false
                }
            }
        })
        .collect();

    let succeeded = results.iter().filter(|ok| **ok).count();
    BatchSummary {
        succeeded,
        failed: results.len() - succeeded,
    }
}
