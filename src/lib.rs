//! gprkit: microarray GPR report analysis and per-spot scan extraction
//!
//! The GPR reader turns GenePix result files into spot records that can be
//! sorted, averaged per identifier and exported. The extractor uses the spot
//! geometry to cut one image per identifier and channel out of the matching
//! multi-page TIFF scan.

pub mod errors;
pub mod gpr;
pub mod channel;
pub mod tiff;
pub mod compression;
pub mod io;
pub mod settings;
pub mod extractor;
pub mod config;
pub mod utils;
pub mod commands;
pub mod api;

pub use api::GprKit;
pub use errors::{GprError, GprResult};
