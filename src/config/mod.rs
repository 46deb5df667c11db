//! Extraction configuration
//!
//! Defaults are embedded from `gprkit_defaults.toml` and parsed once at
//! first use. A user file can override any subset of the keys.

use lazy_static::lazy_static;
use log::debug;
use std::fs;
use std::path::Path;

use crate::channel::Channel;
use crate::errors::{GprError, GprResult};
use crate::gpr::constants;


lazy_static! {
    static ref DEFAULT_CONFIG: ExtractionConfig = {
        let content = include_str!("../../gprkit_defaults.toml");
        ExtractionConfig::builtin().merged_with_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse default configuration: {}", e);
            ExtractionConfig::builtin()
        })
    };
}

/// Margin added around a crop, in image pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub horizontal: i64,
    pub vertical: i64,
}

impl Padding {
    pub fn uniform(margin: i64) -> Self {
        Padding { horizontal: margin, vertical: margin }
    }
}

/// Assignment of one scan page to a channel and an output label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    pub page: usize,
    pub channel: Channel,
    pub label: String,
}

/// Cell layout for uniform grid splitting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub cell_width: u32,
    pub cell_height: u32,
    pub padding: u32,
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// Layout rules of the GPR report
#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    pub header_lines: usize,
    pub field_count: usize,
    pub reserved_rows: Vec<i64>,
    pub blank_identifiers: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            header_lines: constants::HEADER_LINES,
            field_count: constants::FIELD_COUNT,
            reserved_rows: constants::RESERVED_ROWS.to_vec(),
            blank_identifiers: constants::BLANK_IDENTIFIERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// All tunables of the extraction engine
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// Scanner units per image pixel
    pub scale: i64,
    pub padding: Padding,
    pub gamma: f64,
    pub channels: Vec<ChannelSpec>,
    pub grid: GridLayout,
    pub parser: ParserConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

impl ExtractionConfig {
    /// Hard-coded fallback used when the embedded defaults cannot be parsed
    fn builtin() -> Self {
        ExtractionConfig {
            scale: constants::SCANNER_SCALE,
            padding: Padding::uniform(50),
            gamma: 1.5,
            channels: vec![
                ChannelSpec { page: 0, channel: Channel::A, label: "IgM".to_string() },
                ChannelSpec { page: 1, channel: Channel::B, label: "IgG".to_string() },
            ],
            grid: GridLayout {
                cell_width: 150,
                cell_height: 72,
                padding: 1,
                left: 15,
                top: 9,
                right: 8,
                bottom: 14,
            },
            parser: ParserConfig::default(),
        }
    }

    /// Loads a configuration file on top of the defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> GprResult<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML on top of the defaults
    pub fn from_toml_str(content: &str) -> GprResult<Self> {
        Self::default().merged_with_str(content)
    }

    /// Returns a copy with every key present in `content` overridden
    fn merged_with_str(&self, content: &str) -> GprResult<Self> {
        let value: toml::Value = content.parse()
            .map_err(|e| GprError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        let mut config = self.clone();

        if let Some(table) = value.get("extraction").and_then(|v| v.as_table()) {
            if let Some(scale) = get_int(table, "scale")? {
                config.scale = scale;
            }
            if let Some(gamma) = get_float(table, "gamma")? {
                config.gamma = gamma;
            }
            if let Some(margin) = get_int(table, "padding")? {
                config.padding = Padding::uniform(margin);
            }
            if let Some(horizontal) = get_int(table, "padding_horizontal")? {
                config.padding.horizontal = horizontal;
            }
            if let Some(vertical) = get_int(table, "padding_vertical")? {
                config.padding.vertical = vertical;
            }
        }

        if let Some(entries) = value.get("channels").and_then(|v| v.as_array()) {
            config.channels = entries.iter()
                .map(parse_channel_spec)
                .collect::<GprResult<Vec<_>>>()?;
        }

        if let Some(table) = value.get("grid").and_then(|v| v.as_table()) {
            let grid = &mut config.grid;
            for (key, target) in [
                ("cell_width", &mut grid.cell_width),
                ("cell_height", &mut grid.cell_height),
                ("padding", &mut grid.padding),
                ("left", &mut grid.left),
                ("top", &mut grid.top),
                ("right", &mut grid.right),
                ("bottom", &mut grid.bottom),
            ] {
                if let Some(v) = get_int(table, key)? {
                    *target = u32::try_from(v)
                        .map_err(|_| GprError::ConfigError(format!("grid.{} out of range: {}", key, v)))?;
                }
            }
        }

        if let Some(table) = value.get("parser").and_then(|v| v.as_table()) {
            if let Some(lines) = get_int(table, "header_lines")? {
                config.parser.header_lines = usize::try_from(lines)
                    .map_err(|_| GprError::ConfigError(format!("parser.header_lines out of range: {}", lines)))?;
            }
            if let Some(count) = get_int(table, "field_count")? {
                config.parser.field_count = usize::try_from(count)
                    .map_err(|_| GprError::ConfigError(format!("parser.field_count out of range: {}", count)))?;
            }
            if let Some(rows) = table.get("reserved_rows").and_then(|v| v.as_array()) {
                config.parser.reserved_rows = rows.iter()
                    .map(|v| v.as_integer()
                        .ok_or_else(|| GprError::ConfigError("parser.reserved_rows must be integers".to_string())))
                    .collect::<GprResult<Vec<_>>>()?;
            }
            if let Some(ids) = table.get("blank_identifiers").and_then(|v| v.as_array()) {
                config.parser.blank_identifiers = ids.iter()
                    .map(|v| v.as_str().map(str::to_string)
                        .ok_or_else(|| GprError::ConfigError("parser.blank_identifiers must be strings".to_string())))
                    .collect::<GprResult<Vec<_>>>()?;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges
    pub fn validate(&self) -> GprResult<()> {
        if self.scale <= 0 {
            return Err(GprError::ConfigError(format!("scale must be positive, got {}", self.scale)));
        }
        if self.gamma.is_nan() || self.gamma <= 0.0 {
            return Err(GprError::ConfigError(format!("gamma must be positive, got {}", self.gamma)));
        }
        if self.padding.horizontal < 0 || self.padding.vertical < 0 {
            return Err(GprError::ConfigError("padding must not be negative".to_string()));
        }
        if self.grid.cell_width == 0 || self.grid.cell_height == 0 {
            return Err(GprError::ConfigError("grid cell size must be non-zero".to_string()));
        }
        if self.parser.field_count == 0 {
            return Err(GprError::ConfigError("parser.field_count must be non-zero".to_string()));
        }
        Ok(())
    }
}

fn get_int(table: &toml::value::Table, key: &str) -> GprResult<Option<i64>> {
    match table.get(key) {
        None => Ok(None),
        Some(v) => v.as_integer()
            .map(Some)
            .ok_or_else(|| GprError::ConfigError(format!("'{}' must be an integer", key))),
    }
}

fn get_float(table: &toml::value::Table, key: &str) -> GprResult<Option<f64>> {
    match table.get(key) {
        None => Ok(None),
        Some(v) => v.as_float()
            .or_else(|| v.as_integer().map(|i| i as f64))
            .map(Some)
            .ok_or_else(|| GprError::ConfigError(format!("'{}' must be a number", key))),
    }
}

fn parse_channel_spec(value: &toml::Value) -> GprResult<ChannelSpec> {
    let table = value.as_table()
        .ok_or_else(|| GprError::ConfigError("channel entries must be tables".to_string()))?;

    let page = get_int(table, "page")?
        .ok_or_else(|| GprError::ConfigError("channel entry missing 'page'".to_string()))?;
    let page = usize::try_from(page)
        .map_err(|_| GprError::ConfigError(format!("invalid page index: {}", page)))?;

    let channel_name = table.get("channel").and_then(|v| v.as_str())
        .ok_or_else(|| GprError::ConfigError("channel entry missing 'channel'".to_string()))?;
    let channel = Channel::parse(channel_name)
        .ok_or_else(|| GprError::ConfigError(format!("unknown channel: {}", channel_name)))?;

    let label = table.get("label").and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| channel.wavelength().to_string());

    Ok(ChannelSpec { page, channel, label })
}
