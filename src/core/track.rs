//! Die zentrale Track-Datenstruktur: Punktfolge plus Datei-Metadaten.

use super::{polyline_length_2d, GpxMeta, TrackPoint};

/// In-Memory-Repräsentation einer GPX-Datei.
///
/// Enthält nur das erste Segment des ersten Tracks; weitere Tracks und
/// Segmente werden beim Laden übersprungen. Die Metadaten der Quelldatei
/// bleiben für den Writer erhalten.
#[derive(Debug, Clone, Default)]
pub struct GpxTrack {
    /// Punkte des ersten Segments des ersten Tracks
    pub points: Vec<TrackPoint>,
    /// Metadaten der Quelldatei
    pub meta: GpxMeta,
    /// GPX-Version der Quelldatei (z.B. "1.1")
    pub version: Option<String>,
    /// Creator-Attribut der Quelldatei
    pub creator: Option<String>,
}

impl GpxTrack {
    /// Erstellt einen leeren Track
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl der Punkte
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Planare Gesamtlänge des Tracks (Summe der 2D-Segmentlängen)
    pub fn length_2d(&self) -> f64 {
        polyline_length_2d(&self.points)
    }
}
