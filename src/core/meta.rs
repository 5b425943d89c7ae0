//! Nicht-resamplingrelevante Metadaten aus der GPX-Datei.

use chrono::{DateTime, Utc};

/// Bounding-Box aus dem `<bounds>`-Element der Quelldatei.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpxBounds {
    /// Minimale Breite in Grad
    pub min_lat: f64,
    /// Minimale Länge in Grad
    pub min_lon: f64,
    /// Maximale Breite in Grad
    pub max_lat: f64,
    /// Maximale Länge in Grad
    pub max_lon: f64,
}

/// Container für GPX-Metadaten.
///
/// Der Resampler fasst diese Felder nie an; der Writer hängt sie
/// unverändert an die Ausgabedatei.
#[derive(Debug, Clone, Default)]
pub struct GpxMeta {
    /// Name der Datei bzw. der Aufzeichnung
    pub name: Option<String>,
    /// Beschreibung
    pub description: Option<String>,
    /// Name des Autors
    pub author_name: Option<String>,
    /// Copyright-Inhaber
    pub copyright_author: Option<String>,
    /// Copyright-Jahr
    pub copyright_year: Option<String>,
    /// Copyright-Lizenz (URL)
    pub copyright_license: Option<String>,
    /// Link zur Quelle (href)
    pub link: Option<String>,
    /// Anzeigetext des Links
    pub link_text: Option<String>,
    /// Erstellungszeitpunkt der Datei
    pub time: Option<DateTime<Utc>>,
    /// Stichwörter
    pub keywords: Option<String>,
    /// Bounding-Box der Originaldatei
    pub bounds: Option<GpxBounds>,
}
