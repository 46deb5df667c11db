//! CSV summaries of parsed and aggregated spots

use log::info;
use std::path::{Path, PathBuf};

use crate::channel::Channel;
use crate::config::ChannelSpec;
use crate::errors::{GprError, GprResult};
use crate::gpr::aggregate::AggregateSet;
use crate::gpr::filter::IdentifierFilter;
use crate::gpr::record::{SpotStatistics, Statistic};
use crate::gpr::spot_set::SpotSet;
use crate::utils::write_utils;

/// Median statistic reported per channel
pub fn channel_median(channel: Channel) -> Statistic {
    match channel {
        Channel::A => Statistic::AMedian,
        Channel::B => Statistic::BMedian,
    }
}

/// Writes `ID,<median - background>` for every spot of one channel,
/// sorted by identifier
///
/// # Arguments
/// * `set` - Parsed spots; re-sorted by identifier
/// * `channel` - Channel whose median is exported
/// * `filter` - Identifiers to include
/// * `path` - Output CSV path
pub fn write_channel_csv(
    set: &mut SpotSet,
    channel: Channel,
    filter: &IdentifierFilter,
    path: &Path
) -> GprResult<usize> {
    let statistic = channel_median(channel);
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut rows = 0;

    writer.write_record(["ID", statistic.label()])?;
    for record in set.sort_by_identifier().records() {
        if !filter.accepts(&record.identifier) {
            continue;
        }
        writer.write_record([record.identifier.clone(), record.statistic(statistic).to_string()])?;
        rows += 1;
    }

    finish(writer, path)?;
    info!("Wrote {} rows to {}", rows, path.display());
    Ok(rows)
}

/// Writes aggregated records ranked by one statistic, highest first
///
/// Median rankings carry the channel SNR as a third column.
pub fn write_ranking_csv(
    aggregates: &mut AggregateSet,
    statistic: Statistic,
    filter: &IdentifierFilter,
    path: &Path
) -> GprResult<usize> {
    let channel = statistic.channel();
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut rows = 0;

    let mut header = vec!["ID".to_string(), statistic.label().to_string()];
    if statistic.is_median() {
        header.push(format!("SNR {}", channel.wavelength()));
    }
    writer.write_record(&header)?;

    for record in aggregates.sort_by_statistic_descending(statistic).records() {
        if !filter.accepts(&record.identifier) {
            continue;
        }
        let mut row = vec![record.identifier.clone(), record.statistic(statistic).to_string()];
        if statistic.is_median() {
            row.push(record.snr(channel).to_string());
        }
        writer.write_record(&row)?;
        rows += 1;
    }

    finish(writer, path)?;
    info!("Wrote {} ranked rows to {}", rows, path.display());
    Ok(rows)
}

/// Writes every summary of one GPR file
///
/// Layout under `out_dir`:
/// * `<label>/<stem>.csv` per configured channel
/// * `rankings/<stem>_<statistic>.csv` per rankable statistic
///
/// # Returns
/// Paths of the files written
pub fn write_reports(
    set: &mut SpotSet,
    channels: &[ChannelSpec],
    filter: &IdentifierFilter,
    out_dir: &Path,
    stem: &str
) -> GprResult<Vec<PathBuf>> {
    let mut written = Vec::new();
    let mut aggregates = set.aggregate();

    for spec in channels {
        let path = out_dir.join(&spec.label).join(format!("{}.csv", stem));
        write_channel_csv(set, spec.channel, filter, &path)?;
        written.push(path);
    }

    for statistic in Statistic::ALL {
        let path = out_dir.join("rankings").join(format!("{}_{}.csv", stem, statistic.short_name()));
        write_ranking_csv(&mut aggregates, statistic, filter, &path)?;
        written.push(path);
    }

    Ok(written)
}

fn finish(writer: csv::Writer<Vec<u8>>, path: &Path) -> GprResult<()> {
    let buffer = writer.into_inner()
        .map_err(|e| GprError::IoError(e.into_error()))?;
    write_utils::write_atomic(path, &buffer)
}
