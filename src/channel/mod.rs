//! Fluorescence channels and single-channel pixel models
//!
//! Each page of a multi-page scan holds one dye. `ChannelModel` renders a
//! page so that only the colour assigned to its dye is lit.

mod model;
#[cfg(test)]
mod tests;

pub use model::ChannelModel;

use std::fmt;

/// Fluorescence measurement channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// 650 nm channel, rendered red
    A,
    /// 550 nm channel, rendered green
    B,
}

impl Channel {
    /// Scanner wavelength label
    pub fn wavelength(&self) -> &'static str {
        match self {
            Channel::A => "650",
            Channel::B => "550",
        }
    }

    /// Index of the RGBA sample this channel is rendered into
    pub fn sample_index(&self) -> usize {
        match self {
            Channel::A => 0,
            Channel::B => 1,
        }
    }

    /// Parses `a`, `b`, `650` or `550`
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "a" | "650" | "red" => Some(Channel::A),
            "b" | "550" | "green" => Some(Channel::B),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wavelength())
    }
}
