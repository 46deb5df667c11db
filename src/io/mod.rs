//! I/O helpers shared by the scan decoder and the settings reader

pub mod seekable;
pub mod byte_order;
