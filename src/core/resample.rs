//! Arc-Length-Resampling eines Tracks auf eine feste Punktanzahl.
//!
//! Reine Geometrie-Funktionen ohne I/O und ohne geteilten Zustand:
//! beliebig viele parallele Aufrufe benötigen keine Synchronisation.

use super::TrackPoint;
use thiserror::Error;

/// Fehler des Resamplers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResampleError {
    /// Weniger als 2 Punkte im Eingabe-Track
    #[error("zu wenige Punkte im Track ({found} gefunden, mindestens 2 benoetigt)")]
    InsufficientPoints {
        /// Tatsächlich vorgefundene Punktanzahl
        found: usize,
    },
    /// Zielpunktanzahl unter 2 (Konfigurationsfehler des Aufrufers)
    #[error("ungueltige Zielpunktanzahl {requested} (mindestens 2 benoetigt)")]
    InvalidTargetCount {
        /// Angeforderte Zielpunktanzahl
        requested: usize,
    },
}

/// Planare Gesamtlänge einer Punktfolge (2D, Höhe ausgenommen).
pub fn polyline_length_2d(points: &[TrackPoint]) -> f64 {
    points.windows(2).map(|w| w[0].distance_2d(&w[1])).sum()
}

/// Verteilt exakt `target_count` Punkte gleichmäßig (Arc-Length) entlang
/// des Tracks.
///
/// Erster und letzter Ausgabepunkt sind unveränderte Kopien der
/// Eingabe-Endpunkte. Innere Punkte liegen auf der Eingabe-Polyline bei
/// kumulativer Distanz `i * (gesamtlaenge / (target_count - 1))`.
///
/// Höhen-Interpolation: haben beide Nachbarpunkte eine Höhe, wird linear
/// interpoliert; hat nur einer eine, wird dessen Wert unverändert
/// übernommen; hat keiner eine, bleibt die Höhe leer. Zeitstempel werden
/// nicht interpoliert, sondern vom jeweiligen Segment-Startpunkt kopiert.
///
/// Hat der Track die Gesamtlänge 0 (alle Punkte identisch), besteht die
/// Ausgabe aus `target_count` Kopien des ersten Punkts.
pub fn resample_track(
    points: &[TrackPoint],
    target_count: usize,
) -> Result<Vec<TrackPoint>, ResampleError> {
    if target_count < 2 {
        return Err(ResampleError::InvalidTargetCount {
            requested: target_count,
        });
    }
    if points.len() < 2 {
        return Err(ResampleError::InsufficientPoints {
            found: points.len(),
        });
    }

    let total_distance = polyline_length_2d(points);

    let mut resampled: Vec<TrackPoint> = Vec::with_capacity(target_count);

    if total_distance == 0.0 {
        // Kollabierter Track: keine Interpolation, nur Kopien des ersten Punkts
        let first = points[0].clone();
        resampled.resize(target_count, first);
    } else {
        let interval_distance = total_distance / (target_count - 1) as f64;

        // Monoton wachsender Cursor über die Quellsegmente; läuft nie
        // über den vorletzten Quellpunkt hinaus, damit p2 immer existiert.
        let mut segment_index = 0usize;
        let mut cumulative_distance = 0.0f64;

        for i in 0..target_count {
            if i == 0 {
                resampled.push(points[0].clone());
                continue;
            }
            if i == target_count - 1 {
                resampled.push(points[points.len() - 1].clone());
                continue;
            }

            let target_distance = i as f64 * interval_distance;

            while segment_index < points.len() - 2 {
                let step = points[segment_index].distance_2d(&points[segment_index + 1]);
                if cumulative_distance + step >= target_distance {
                    break;
                }
                cumulative_distance += step;
                segment_index += 1;
            }

            let p1 = &points[segment_index];
            let p2 = &points[segment_index + 1];
            let segment_length = p1.distance_2d(p2);

            // Anteil von target_distance innerhalb des Segments p1..p2,
            // geklemmt auf [0, 1] gegen Float-Drift
            let ratio = if segment_length > 0.0 {
                ((target_distance - cumulative_distance) / segment_length).clamp(0.0, 1.0)
            } else {
                0.0
            };

            let mut position = p1.position.lerp(p2.position, ratio);
            if position.x.is_nan() || position.y.is_nan() {
                // Kompatibilitäts-Fallback bei degenerierten Segmenten
                log::debug!(
                    "Interpolation ergab NaN bei Ausgabeindex {}, uebernehme Position von p1",
                    i
                );
                position = p1.position;
            }

            let elevation = match (p1.elevation, p2.elevation) {
                (Some(e1), Some(e2)) => Some(e1 + ratio * (e2 - e1)),
                (Some(e1), None) => Some(e1),
                (None, Some(e2)) => Some(e2),
                (None, None) => None,
            };

            resampled.push(TrackPoint {
                position,
                elevation,
                time: p1.time,
            });
        }
    }

    // Invariante absichern: exakt target_count Punkte
    if resampled.len() < target_count {
        if let Some(last) = resampled.last().cloned() {
            resampled.resize(target_count, last);
        }
    } else if resampled.len() > target_count {
        resampled.truncate(target_count);
    }

    Ok(resampled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn point(lat: f64, lon: f64) -> TrackPoint {
        TrackPoint::new(lat, lon)
    }

    fn point_with_elevation(lat: f64, lon: f64, elevation: f64) -> TrackPoint {
        let mut p = TrackPoint::new(lat, lon);
        p.elevation = Some(elevation);
        p
    }

    // ─── Fehlerfälle ─────────────────────────────────────────────────────────

    #[test]
    fn test_leerer_track_liefert_insufficient_points() {
        let result = resample_track(&[], 1000);
        assert_eq!(
            result.unwrap_err(),
            ResampleError::InsufficientPoints { found: 0 }
        );
    }

    #[test]
    fn test_einzelpunkt_liefert_insufficient_points() {
        let result = resample_track(&[point(1.0, 2.0)], 1000);
        assert_eq!(
            result.unwrap_err(),
            ResampleError::InsufficientPoints { found: 1 }
        );
    }

    #[test]
    fn test_zwei_punkte_genuegen() {
        let result = resample_track(&[point(0.0, 0.0), point(0.0, 1.0)], 5);
        assert_eq!(result.unwrap().len(), 5);
    }

    #[test]
    fn test_zielanzahl_unter_zwei_ist_konfigurationsfehler() {
        let points = [point(0.0, 0.0), point(0.0, 1.0)];
        assert_eq!(
            resample_track(&points, 1).unwrap_err(),
            ResampleError::InvalidTargetCount { requested: 1 }
        );
        assert_eq!(
            resample_track(&points, 0).unwrap_err(),
            ResampleError::InvalidTargetCount { requested: 0 }
        );
    }

    // ─── Punktanzahl und Endpunkte ───────────────────────────────────────────

    #[test]
    fn test_exakte_punktanzahl_fuer_verschiedene_ziele() {
        let points = [point(0.0, 0.0), point(0.3, 1.7), point(2.0, 2.0)];
        for target in [2usize, 3, 10, 1000] {
            let resampled = resample_track(&points, target).unwrap();
            assert_eq!(resampled.len(), target, "Zielanzahl {} verfehlt", target);
        }
    }

    #[test]
    fn test_endpunkte_bitidentisch_uebernommen() {
        // Krumme Werte, die bei Interpolation Rundungsfehler zeigen würden
        let first = point_with_elevation(48.137_154_3, 11.576_124_9, 519.3);
        let last = point_with_elevation(48.208_674_1, 11.628_332_7, 488.1);
        let points = [first.clone(), point(48.15, 11.59), last.clone()];

        let resampled = resample_track(&points, 100).unwrap();

        assert_eq!(resampled[0].position, first.position);
        assert_eq!(resampled[99].position, last.position);
        assert_eq!(resampled[0].elevation, first.elevation);
        assert_eq!(resampled[99].elevation, last.elevation);
    }

    #[test]
    fn test_innere_punkte_liegen_auf_der_polyline() {
        // L-förmiger Track: alle inneren Punkte müssen auf einem der
        // beiden Schenkel liegen
        let points = [point(0.0, 0.0), point(0.0, 10.0), point(10.0, 10.0)];
        let resampled = resample_track(&points, 21).unwrap();

        for p in &resampled {
            let on_first_leg = p.latitude() == 0.0 && (0.0..=10.0).contains(&p.longitude());
            let on_second_leg = p.longitude() == 10.0 && (0.0..=10.0).contains(&p.latitude());
            assert!(
                on_first_leg || on_second_leg,
                "Punkt ({}, {}) liegt nicht auf der Eingabe-Polyline",
                p.latitude(),
                p.longitude()
            );
        }
    }

    // ─── Degenerierte Tracks ─────────────────────────────────────────────────

    #[test]
    fn test_kollabierter_track_liefert_kopien_des_ersten_punkts() {
        // Szenario aus der Vorlage: [(5,5), (5,5), (5,5)], Ziel 4
        let mut first = point_with_elevation(5.0, 5.0, 42.0);
        first.time = Some(Utc.with_ymd_and_hms(2023, 6, 1, 10, 0, 0).unwrap());
        let points = [first.clone(), point(5.0, 5.0), point(5.0, 5.0)];

        let resampled = resample_track(&points, 4).unwrap();

        assert_eq!(resampled.len(), 4);
        for p in &resampled {
            assert_eq!(p.position, first.position);
            assert_eq!(p.elevation, first.elevation);
            assert_eq!(p.time, first.time);
        }
    }

    #[test]
    fn test_cursor_ueberspringt_nullsegmente_in_der_mitte() {
        // Doppelter Punkt bei (5,0): das Nullsegment darf den Cursor
        // nicht aus dem Tritt bringen
        let points = [
            point(0.0, 0.0),
            point(5.0, 0.0),
            point(5.0, 0.0),
            point(10.0, 0.0),
        ];
        let resampled = resample_track(&points, 5).unwrap();

        let expected_lats = [0.0, 2.5, 5.0, 7.5, 10.0];
        for (p, expected) in resampled.iter().zip(expected_lats) {
            assert_relative_eq!(p.latitude(), expected, max_relative = 1e-12);
            assert_eq!(p.longitude(), 0.0);
        }
    }

    // ─── Gleichverteilung ────────────────────────────────────────────────────

    #[test]
    fn test_gerade_linie_mit_hoehe() {
        // Szenario aus der Vorlage: 10 Einheiten Linie, Ziel 3,
        // Mittelpunkt bei halber Distanz und halber Höhe
        let points = [
            point_with_elevation(0.0, 0.0, 0.0),
            point_with_elevation(0.0, 10.0, 10.0),
        ];
        let resampled = resample_track(&points, 3).unwrap();

        assert_eq!(resampled[0].position.x, 0.0);
        assert_eq!(resampled[0].position.y, 0.0);
        assert_eq!(resampled[0].elevation, Some(0.0));

        assert_relative_eq!(resampled[1].longitude(), 5.0);
        assert_relative_eq!(resampled[1].elevation.unwrap(), 5.0);

        assert_eq!(resampled[2].position.y, 10.0);
        assert_eq!(resampled[2].elevation, Some(10.0));
    }

    #[test]
    fn test_equidistanz_am_anfang_in_der_mitte_und_am_ende() {
        // Unregelmäßig verteilte Quellpunkte auf einem Bogen
        let points: Vec<TrackPoint> = (0..50)
            .map(|i| {
                let t = (i * i) as f64 / 2500.0;
                point(t * 10.0, (t * std::f64::consts::PI).sin() * 3.0)
            })
            .collect();

        let target = 200usize;
        let resampled = resample_track(&points, target).unwrap();
        let total = polyline_length_2d(&resampled);
        let expected_interval = total / (target - 1) as f64;

        for window_start in [0usize, target / 2 - 1, target - 2] {
            let dist = resampled[window_start].distance_2d(&resampled[window_start + 1]);
            assert_relative_eq!(dist, expected_interval, max_relative = 0.01);
        }
    }

    // ─── Höhen-Politik ───────────────────────────────────────────────────────

    #[test]
    fn test_hoehe_beide_gueltig_wird_interpoliert() {
        let points = [
            point_with_elevation(0.0, 0.0, 100.0),
            point_with_elevation(0.0, 10.0, 200.0),
        ];
        let resampled = resample_track(&points, 5).unwrap();

        assert_relative_eq!(resampled[1].elevation.unwrap(), 125.0);
        assert_relative_eq!(resampled[2].elevation.unwrap(), 150.0);
        assert_relative_eq!(resampled[3].elevation.unwrap(), 175.0);
    }

    #[test]
    fn test_hoehe_nur_p1_gueltig_wird_unveraendert_uebernommen() {
        let points = [point_with_elevation(0.0, 0.0, 100.0), point(0.0, 10.0)];
        let resampled = resample_track(&points, 5).unwrap();

        assert_eq!(resampled[1].elevation, Some(100.0));
        assert_eq!(resampled[2].elevation, Some(100.0));
        assert_eq!(resampled[3].elevation, Some(100.0));
    }

    #[test]
    fn test_hoehe_nur_p2_gueltig_wird_unveraendert_uebernommen() {
        let points = [point(0.0, 0.0), point_with_elevation(0.0, 10.0, 200.0)];
        let resampled = resample_track(&points, 5).unwrap();

        assert_eq!(resampled[1].elevation, Some(200.0));
        assert_eq!(resampled[2].elevation, Some(200.0));
        assert_eq!(resampled[3].elevation, Some(200.0));
    }

    #[test]
    fn test_hoehe_keine_gueltig_bleibt_leer() {
        let points = [point(0.0, 0.0), point(0.0, 10.0)];
        let resampled = resample_track(&points, 5).unwrap();

        assert_eq!(resampled[1].elevation, None);
        assert_eq!(resampled[2].elevation, None);
        assert_eq!(resampled[3].elevation, None);
    }

    // ─── Zeitstempel ─────────────────────────────────────────────────────────

    #[test]
    fn test_zeitstempel_wird_vom_segment_startpunkt_kopiert() {
        let t0 = Utc.with_ymd_and_hms(2023, 6, 1, 10, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2023, 6, 1, 10, 5, 0).unwrap();

        let mut a = point(0.0, 0.0);
        a.time = Some(t0);
        let mut b = point(0.0, 10.0);
        b.time = Some(t1);

        let resampled = resample_track(&[a, b], 5).unwrap();

        // Innere Punkte tragen den Zeitstempel von p1, keine Interpolation
        assert_eq!(resampled[0].time, Some(t0));
        assert_eq!(resampled[1].time, Some(t0));
        assert_eq!(resampled[2].time, Some(t0));
        assert_eq!(resampled[3].time, Some(t0));
        assert_eq!(resampled[4].time, Some(t1));
    }

    #[test]
    fn test_polyline_length_2d() {
        let points = [point(0.0, 0.0), point(0.0, 3.0), point(4.0, 3.0)];
        assert_relative_eq!(polyline_length_2d(&points), 7.0);
        assert_eq!(polyline_length_2d(&points[..1]), 0.0);
        assert_eq!(polyline_length_2d(&[]), 0.0);
    }
}
