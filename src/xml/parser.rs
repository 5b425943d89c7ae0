//! Parser für GPX-Dateien.
//!
//! Liest GPX 1.0 und 1.1: Metadaten stehen je nach Version direkt unter
//! `<gpx>` oder im `<metadata>`-Block. Verarbeitet wird nur das erste
//! Segment des ersten Tracks; weitere Tracks, Routen und Wegpunkte
//! werden übersprungen.

use crate::core::{GpxBounds, GpxMeta, GpxTrack, TrackPoint};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parsed einen GPX-Track aus einem XML-String
pub fn parse_gpx(xml_content: &str) -> Result<GpxTrack> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();

    let mut track = GpxTrack::new();
    let mut meta = GpxMeta::default();

    let mut track_count = 0usize;
    let mut segment_count = 0usize;
    let mut in_track = false;
    let mut collecting = false;
    let mut in_author = false;
    let mut in_copyright = false;
    let mut in_link = false;
    // Tiefe innerhalb ignorierter Teilbäume (wpt, rte, extensions)
    let mut skip_depth = 0usize;
    let mut current_point: Option<TrackPoint> = None;
    let mut current_tag: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?.into_owned();

                if skip_depth > 0 {
                    skip_depth += 1;
                } else if is_skipped_subtree(&tag) {
                    skip_depth = 1;
                } else if tag == "gpx" {
                    track.version = find_attribute(&reader, e, "version")?;
                    track.creator = find_attribute(&reader, e, "creator")?;
                } else if tag == "trk" {
                    track_count += 1;
                    in_track = true;
                } else if tag == "trkseg" && in_track {
                    if track_count == 1 {
                        segment_count += 1;
                    }
                    collecting = track_count == 1 && segment_count == 1;
                } else if tag == "trkpt" && collecting {
                    current_point = Some(parse_track_point(&reader, e)?);
                } else if tag == "author" && !in_track {
                    in_author = true;
                    current_tag = None;
                } else if tag == "copyright" && !in_track {
                    in_copyright = true;
                    meta.copyright_author = find_attribute(&reader, e, "author")?;
                } else if tag == "link" && !in_track && !in_author {
                    in_link = true;
                    meta.link = find_attribute(&reader, e, "href")?;
                } else if tag == "bounds" && !in_track {
                    meta.bounds = parse_bounds(&reader, e)?;
                } else {
                    current_tag = Some(tag);
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?.into_owned();

                if skip_depth > 0 || is_skipped_subtree(&tag) {
                    // Leere Elemente ändern die Skip-Tiefe nicht
                } else if tag == "trkseg" && in_track && track_count == 1 {
                    // Leeres Segment zählt als Segment (scheitert erst am Resampler)
                    segment_count += 1;
                } else if tag == "bounds" && !in_track {
                    meta.bounds = parse_bounds(&reader, e)?;
                } else if tag == "link" && !in_track && !in_author {
                    meta.link = find_attribute(&reader, e, "href")?;
                } else if tag == "trkpt" && collecting {
                    // Punkt ohne Kind-Elemente (weder ele noch time)
                    track.points.push(parse_track_point(&reader, e)?);
                }
            }
            Ok(Event::Text(e)) => {
                if skip_depth > 0 {
                    buffer.clear();
                    continue;
                }
                let text = e.xml_content()?.into_owned();

                if let Some(ref mut point) = current_point {
                    match current_tag.as_deref() {
                        Some("ele") => {
                            let elevation = text.trim().parse::<f64>().with_context(|| {
                                format!("Hoehenwert '{}' konnte nicht geparst werden", text)
                            })?;
                            point.elevation = Some(elevation);
                        }
                        Some("time") => point.time = parse_timestamp(&text),
                        _ => {}
                    }
                } else if in_copyright {
                    match current_tag.as_deref() {
                        Some("year") => meta.copyright_year = Some(text),
                        Some("license") => meta.copyright_license = Some(text),
                        _ => {}
                    }
                } else if in_author {
                    match current_tag.as_deref() {
                        // GPX 1.1: <author><name>...</name></author>
                        Some("name") => meta.author_name = Some(text),
                        // GPX 1.0: <author>Text</author>
                        None => meta.author_name = Some(text),
                        _ => {}
                    }
                } else if in_link {
                    if current_tag.as_deref() == Some("text") {
                        meta.link_text = Some(text);
                    }
                } else if !in_track {
                    match current_tag.as_deref() {
                        Some("name") => meta.name = Some(text),
                        Some("desc") => meta.description = Some(text),
                        Some("time") => meta.time = parse_timestamp(&text),
                        Some("keywords") => meta.keywords = Some(text),
                        // GPX 1.0: Link als url/urlname-Paar
                        Some("url") => meta.link = Some(text),
                        Some("urlname") => meta.link_text = Some(text),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let tag = reader.decoder().decode(name.as_ref())?;

                if skip_depth > 0 {
                    skip_depth -= 1;
                } else if tag == "trkpt" {
                    if let Some(point) = current_point.take() {
                        track.points.push(point);
                    }
                } else if tag == "trk" {
                    in_track = false;
                } else if tag == "trkseg" {
                    collecting = false;
                } else if tag == "author" {
                    in_author = false;
                } else if tag == "copyright" {
                    in_copyright = false;
                } else if tag == "link" {
                    in_link = false;
                } else if current_tag.as_deref() == Some(tag.as_ref()) {
                    current_tag = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    if track_count == 0 {
        bail!("keine Tracks in der GPX-Datei gefunden");
    }
    if segment_count == 0 {
        bail!("keine Segmente im ersten Track gefunden");
    }

    track.meta = meta;
    Ok(track)
}

/// Teilbäume, deren Inhalt den Parser-Zustand nicht berühren darf
fn is_skipped_subtree(tag: &str) -> bool {
    matches!(tag, "wpt" | "rte" | "extensions")
}

/// Liest ein Attribut eines Elements (dekodiert und entescaped)
fn find_attribute(
    reader: &Reader<&[u8]>,
    element: &BytesStart,
    attribute_name: &str,
) -> Result<Option<String>> {
    for attr in element.attributes().with_checks(false) {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?;
        if key == attribute_name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Parsed ein `<trkpt>`-Element aus seinen lat/lon-Attributen
fn parse_track_point(reader: &Reader<&[u8]>, element: &BytesStart) -> Result<TrackPoint> {
    let latitude = parse_coordinate_attribute(reader, element, "lat")?;
    let longitude = parse_coordinate_attribute(reader, element, "lon")?;
    Ok(TrackPoint::new(latitude, longitude))
}

/// Liest ein Pflicht-Koordinatenattribut als f64
fn parse_coordinate_attribute(
    reader: &Reader<&[u8]>,
    element: &BytesStart,
    attribute_name: &str,
) -> Result<f64> {
    let value = find_attribute(reader, element, attribute_name)?
        .with_context(|| format!("trkpt ohne {}-Attribut", attribute_name))?;

    value.trim().parse::<f64>().with_context(|| {
        format!(
            "Koordinate {}='{}' konnte nicht geparst werden",
            attribute_name, value
        )
    })
}

/// Parsed das `<bounds>`-Element; unvollständige Attribute ergeben `None`
fn parse_bounds(reader: &Reader<&[u8]>, element: &BytesStart) -> Result<Option<GpxBounds>> {
    let min_lat = find_attribute(reader, element, "minlat")?;
    let min_lon = find_attribute(reader, element, "minlon")?;
    let max_lat = find_attribute(reader, element, "maxlat")?;
    let max_lon = find_attribute(reader, element, "maxlon")?;

    let (Some(min_lat), Some(min_lon), Some(max_lat), Some(max_lon)) =
        (min_lat, min_lon, max_lat, max_lon)
    else {
        return Ok(None);
    };

    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .with_context(|| format!("bounds-Wert '{}' konnte nicht geparst werden", value))
    };

    Ok(Some(GpxBounds {
        min_lat: parse(&min_lat)?,
        min_lon: parse(&min_lon)?,
        max_lat: parse(&max_lat)?,
        max_lon: parse(&max_lon)?,
    }))
}

/// Parsed einen RFC-3339-Zeitstempel; unlesbare Werte werden verworfen
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(text.trim()) {
        Ok(timestamp) => Some(timestamp.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Zeitstempel '{}' wird ignoriert: {}", text, e);
            None
        }
    }
}
