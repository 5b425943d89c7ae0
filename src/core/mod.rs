//! Core-Domänentypen: Trackpunkte, Track-Container, Metadaten, Resampler.

pub mod meta;
pub mod point;
pub mod resample;
pub mod track;

pub use meta::{GpxBounds, GpxMeta};
pub use point::TrackPoint;
pub use resample::{polyline_length_2d, resample_track, ResampleError};
pub use track::GpxTrack;
