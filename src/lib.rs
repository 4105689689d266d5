//! strava2gpx library
//!
//! Converts the activities of a Strava export (zip file or unzipped
//! directory) into GPX files, transcoding FIT and TCX sources with
//! gpsbabel.

pub mod cli;
pub mod convert;
pub mod driver;
pub mod export;
pub mod filter;
pub mod manifest;
pub mod naming;
pub mod transcode;

pub use convert::{ConversionOutcome, TrackFormat};
pub use driver::RunConfig;
pub use export::ExportSource;
pub use filter::FilterConfig;
pub use manifest::ActivityRecord;
