//! GPX Import/Export.
//!
//! Dieses Modul implementiert das Parsen und Schreiben von GPX-Dateien
//! (1.0 und 1.1 beim Lesen, 1.1 beim Schreiben).

pub mod parser;
pub mod writer;

pub use parser::parse_gpx;
pub use writer::{write_gpx, GPX_CREATOR};
