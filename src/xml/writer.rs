//! Writer für normalisierte GPX-Dateien.

use crate::core::{GpxBounds, GpxMeta, GpxTrack};
use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};

/// Creator-Attribut der erzeugten Dateien
pub const GPX_CREATOR: &str = "gpx-normalizer";

/// Schreibt einen Track als GPX-1.1-Dokument.
///
/// Die Ausgabe trägt immer Version 1.1 und das eigene Creator-Attribut;
/// die Metadaten der Quelldatei werden unverändert wieder angehängt.
pub fn write_gpx(track: &GpxTrack) -> Result<String> {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str(&format!(
        "<gpx xmlns=\"http://www.topografix.com/GPX/1/1\" version=\"1.1\" creator=\"{}\">\n",
        GPX_CREATOR
    ));

    write_metadata(&mut output, &track.meta);

    output.push_str("    <trk>\n");
    output.push_str("        <trkseg>\n");

    for point in &track.points {
        output.push_str(&format!(
            "            <trkpt lat=\"{}\" lon=\"{}\">\n",
            format_coordinate(point.latitude()),
            format_coordinate(point.longitude())
        ));
        if let Some(elevation) = point.elevation {
            output.push_str(&format!(
                "                <ele>{}</ele>\n",
                format_coordinate(elevation)
            ));
        }
        if let Some(time) = point.time {
            output.push_str(&format!(
                "                <time>{}</time>\n",
                format_timestamp(&time)
            ));
        }
        output.push_str("            </trkpt>\n");
    }

    output.push_str("        </trkseg>\n");
    output.push_str("    </trk>\n");
    output.push_str("</gpx>\n");

    Ok(output)
}

/// Schreibt den `<metadata>`-Block; entfällt wenn keine Felder gesetzt sind
fn write_metadata(output: &mut String, meta: &GpxMeta) {
    let mut lines = String::new();

    if let Some(ref name) = meta.name {
        lines.push_str(&format!("        <name>{}</name>\n", escape_xml(name)));
    }
    if let Some(ref description) = meta.description {
        lines.push_str(&format!(
            "        <desc>{}</desc>\n",
            escape_xml(description)
        ));
    }
    if let Some(ref author_name) = meta.author_name {
        lines.push_str("        <author>\n");
        lines.push_str(&format!(
            "            <name>{}</name>\n",
            escape_xml(author_name)
        ));
        lines.push_str("        </author>\n");
    }
    if meta.copyright_author.is_some()
        || meta.copyright_year.is_some()
        || meta.copyright_license.is_some()
    {
        lines.push_str(&format!(
            "        <copyright author=\"{}\">\n",
            escape_xml(meta.copyright_author.as_deref().unwrap_or(""))
        ));
        if let Some(ref year) = meta.copyright_year {
            lines.push_str(&format!("            <year>{}</year>\n", escape_xml(year)));
        }
        if let Some(ref license) = meta.copyright_license {
            lines.push_str(&format!(
                "            <license>{}</license>\n",
                escape_xml(license)
            ));
        }
        lines.push_str("        </copyright>\n");
    }
    if let Some(ref link) = meta.link {
        lines.push_str(&format!("        <link href=\"{}\">\n", escape_xml(link)));
        if let Some(ref link_text) = meta.link_text {
            lines.push_str(&format!(
                "            <text>{}</text>\n",
                escape_xml(link_text)
            ));
        }
        lines.push_str("        </link>\n");
    }
    if let Some(ref time) = meta.time {
        lines.push_str(&format!("        <time>{}</time>\n", format_timestamp(time)));
    }
    if let Some(ref keywords) = meta.keywords {
        lines.push_str(&format!(
            "        <keywords>{}</keywords>\n",
            escape_xml(keywords)
        ));
    }
    if let Some(bounds) = meta.bounds {
        lines.push_str(&format_bounds(&bounds));
    }

    if !lines.is_empty() {
        output.push_str("    <metadata>\n");
        output.push_str(&lines);
        output.push_str("    </metadata>\n");
    }
}

fn format_bounds(bounds: &GpxBounds) -> String {
    format!(
        "        <bounds minlat=\"{}\" minlon=\"{}\" maxlat=\"{}\" maxlon=\"{}\"/>\n",
        format_coordinate(bounds.min_lat),
        format_coordinate(bounds.min_lon),
        format_coordinate(bounds.max_lat),
        format_coordinate(bounds.max_lon)
    )
}

/// Serialisiert eine Koordinate über die Display-Darstellung von f64.
/// Die kürzeste exakte Darstellung erhält Endpunkte bit-identisch über
/// einen Schreib/Lese-Roundtrip.
fn format_coordinate(value: f64) -> String {
    format!("{}", value)
}

/// RFC 3339 mit Sekunden-Genauigkeit und Z-Suffix
fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
