//! Repräsentiert einen einzelnen Wegpunkt eines GPX-Tracks.

use chrono::{DateTime, Utc};
use glam::DVec2;

/// Ein Trackpunkt mit Position, optionaler Höhe und optionalem Zeitstempel.
///
/// `position.x` ist die geographische Breite, `position.y` die Länge,
/// beide in Grad. Distanzen werden planar-euklidisch berechnet (keine
/// geodätische Korrektur), numerisch kompatibel zu den bestehenden
/// normalisierten Ausgaben.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    /// Position in Grad (x = Breite, y = Länge)
    pub position: DVec2,
    /// Höhe in Metern; `None` = keine Höhenangabe in der Quelle.
    /// `Some(0.0)` und `None` sind verschiedene Zustände.
    pub elevation: Option<f64>,
    /// Zeitstempel des Punkts; wird nie interpoliert, nur kopiert
    pub time: Option<DateTime<Utc>>,
}

impl TrackPoint {
    /// Erstellt einen Punkt ohne Höhe und Zeitstempel
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            position: DVec2::new(latitude, longitude),
            elevation: None,
            time: None,
        }
    }

    /// Geographische Breite in Grad
    pub fn latitude(&self) -> f64 {
        self.position.x
    }

    /// Geographische Länge in Grad
    pub fn longitude(&self) -> f64 {
        self.position.y
    }

    /// Planare 2D-Distanz zu einem anderen Punkt (Höhe ausgenommen)
    pub fn distance_2d(&self, other: &TrackPoint) -> f64 {
        self.position.distance(other.position)
    }
}
