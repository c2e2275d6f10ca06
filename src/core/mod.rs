//! IEPG parsing and record model.

pub mod frame_parser;
pub mod header_map;
pub mod record;
pub mod timestamp;
