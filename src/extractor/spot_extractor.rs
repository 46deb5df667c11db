//! Paired-spot crop extraction
//!
//! For every identifier with exactly two spots the pair spans a rectangle
//! on the scan. The rectangle is padded, clamped to the page, cut out of the
//! channel-isolated page, tone adjusted and written as
//! `<out>/<label>/<identifier>.png`.

use image::{imageops, DynamicImage, RgbaImage};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::channel::ChannelModel;
use crate::config::{ChannelSpec, ExtractionConfig};
use crate::errors::GprResult;
use crate::gpr::{require_pair, IdentifierFilter, PairViolation, SpotGeometry, SpotSet};
use crate::settings::ToneSettings;
use crate::tiff::{PageDecoder, PageImage, TiffReader};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;
use crate::utils::write_utils::write_png_atomic;

use super::adjust::ToneAdjustment;
use super::geometry::{order_pair, spot_rect};
use super::region::CropRect;
use super::summary::{sanitize_file_name, ExtractionSummary};

/// Extracts per-identifier crops from a multi-page scan
pub struct SpotExtractor<'a> {
    logger: &'a Logger,
    config: &'a ExtractionConfig,
    tone: ToneAdjustment,
}

impl<'a> SpotExtractor<'a> {
    pub fn new(logger: &'a Logger, config: &'a ExtractionConfig, settings: Option<ToneSettings>) -> Self {
        SpotExtractor {
            logger,
            config,
            tone: ToneAdjustment::new(config.gamma, settings),
        }
    }

    /// Padded, unclamped crop rectangle for one identifier's spots
    pub fn crop_rect(&self, identifier: &str, spots: &[SpotGeometry]) -> Result<CropRect, PairViolation> {
        let (first, second) = require_pair(identifier, spots)?;
        let (top_left, bottom_right) = order_pair(first, second);
        Ok(spot_rect(&top_left, &bottom_right, self.config.scale).padded(self.config.padding))
    }

    /// Number of progress ticks a full run over `spots` produces
    pub fn work_units(&self, spots: &SpotSet, filter: &IdentifierFilter) -> u64 {
        let selected = spots.identifiers().into_iter().filter(|id| filter.accepts(id)).count();
        (selected * self.config.channels.len()) as u64
    }

    /// Crops one channel-isolated page
    ///
    /// `identifiers` fixes the processing order; identifiers rejected by the
    /// filter are ignored, unpaired or off-page identifiers are counted as
    /// skipped.
    #[allow(clippy::too_many_arguments)]
    pub fn extract_channel(
        &self,
        page: PageImage,
        spec: &ChannelSpec,
        geometry: &HashMap<String, Vec<SpotGeometry>>,
        identifiers: &[&str],
        filter: &IdentifierFilter,
        out_dir: &Path,
        progress: &ProgressTracker,
    ) -> GprResult<ExtractionSummary> {
        let mut rgba: RgbaImage = DynamicImage::ImageRgba16(page).to_rgba8();
        ChannelModel::for_channel(spec.channel).apply_in_place(&mut rgba);
        let (width, height) = rgba.dimensions();

        let label_dir = out_dir.join(&spec.label);
        let mut summary = ExtractionSummary::default();

        for &identifier in identifiers.iter().filter(|id| filter.accepts(id)) {
            progress.increment(1);
            let spots = geometry.get(identifier).map(Vec::as_slice).unwrap_or(&[]);

            let rect = match self.crop_rect(identifier, spots) {
                Ok(rect) => rect,
                Err(violation) => {
                    warn!("Skipping {}: {}", identifier, violation);
                    summary.skipped += 1;
                    continue;
                }
            };

            if !rect.fits_within(width, height) {
                debug!("Crop for {} ({:?}) exceeds page {}x{}, clamping", identifier, rect, width, height);
            }
            let region = match rect.clamp_to(width, height) {
                Some(region) => region,
                None => {
                    warn!("Skipping {}: crop {:?} lies outside the {}x{} page", identifier, rect, width, height);
                    summary.skipped += 1;
                    continue;
                }
            };

            let crop = imageops::crop_imm(&rgba, region.x, region.y, region.width, region.height).to_image();
            let adjusted = self.tone.apply(crop);

            let path = label_dir.join(format!("{}.png", sanitize_file_name(identifier)));
            write_png_atomic(&path, &DynamicImage::ImageRgba8(adjusted))?;
            debug!("Wrote {}", path.display());
            summary.written += 1;
        }

        Ok(summary)
    }

    /// Runs every configured channel of a scan against parsed spots
    ///
    /// Returns one summary per channel label. Configured pages missing from
    /// the scan are logged and left out.
    pub fn extract_scan<P: AsRef<Path>>(
        &self,
        scan_path: P,
        spots: &SpotSet,
        filter: &IdentifierFilter,
        out_dir: &Path,
        progress: &ProgressTracker,
    ) -> GprResult<Vec<(String, ExtractionSummary)>> {
        let scan_path = scan_path.as_ref();
        info!("Extracting spots from {} into {}", scan_path.display(), out_dir.display());

        let file = File::open(scan_path)?;
        let mut reader = BufReader::with_capacity(1024 * 1024, file);
        let mut tiff_reader = TiffReader::new(self.logger);
        let tiff = tiff_reader.read(&mut reader)?;
        let decoder = PageDecoder::new(&tiff_reader, &tiff);

        let geometry = spots.geometry_by_identifier();
        let identifiers = spots.identifiers();
        let mut results = Vec::new();

        for spec in &self.config.channels {
            if spec.page >= tiff.page_count() {
                warn!("{} has {} pages, no page {} for channel {}",
                      scan_path.display(), tiff.page_count(), spec.page, spec.label);
                continue;
            }

            let page = decoder.decode(&mut reader, spec.page)?;
            progress.set_message(&format!("{} {}", spots.source(), spec.label));
            let summary = self.extract_channel(page, spec, &geometry, &identifiers, filter, out_dir, progress)?;

            info!("Channel {} ({}): {}", spec.label, spec.channel, summary);
            self.logger.log_summary(&scan_path.display().to_string(), &[
                ("channel", spec.label.clone()),
                ("written", summary.written.to_string()),
                ("skipped", summary.skipped.to_string()),
            ])?;
            results.push((spec.label.clone(), summary));
        }

        Ok(results)
    }
}
