//! Zentrale Konfiguration für den GPX-Normalizer.
//!
//! `NormalizerOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

/// Anzahl der Zielpunkte pro normalisiertem Track.
pub const TARGET_POINT_COUNT: usize = 1000;
/// Präfix für Ausgabedateien (wird vor den Quelldateinamen gesetzt).
pub const OUTPUT_PREFIX: &str = "normalized-";

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `gpx_normalizer.toml` neben der Binary gespeichert;
/// CLI-Flags haben Vorrang vor der Datei.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizerOptions {
    /// Anzahl der Zielpunkte (gleichmäßig über die Tracklänge verteilt)
    #[serde(default = "default_target_points")]
    pub target_points: usize,
    /// Präfix für Ausgabedateinamen
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            target_points: TARGET_POINT_COUNT,
            output_prefix: OUTPUT_PREFIX.to_string(),
        }
    }
}

/// Serde-Default für `target_points` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_target_points() -> usize {
    TARGET_POINT_COUNT
}

/// Serde-Default für `output_prefix`.
fn default_output_prefix() -> String {
    OUTPUT_PREFIX.to_string()
}

impl NormalizerOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(options) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    options
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("gpx-normalizer"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("gpx_normalizer.toml")
    }
}
