//! Utility modules for character set conversion.

pub mod encoding;
