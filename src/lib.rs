//! GPX Normalizer Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod batch;
pub mod core;
pub mod options;
pub mod xml;

pub use batch::{normalize_file, output_path_for, run_batch, BatchSummary};
pub use core::{
    polyline_length_2d, resample_track, GpxBounds, GpxMeta, GpxTrack, ResampleError, TrackPoint,
};
pub use options::NormalizerOptions;
pub use xml::{parse_gpx, write_gpx, GPX_CREATOR};
