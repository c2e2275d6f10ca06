//! Parser for IEPG, the SHIFT-JIS encoded TV program metadata format.
//!
//! An IEPG message is a block of `Key: Value` header lines, a blank line,
//! and a free-text body:
//!
//! ```no_run
//! let file = std::fs::File::open("program.tvpi")?;
//! let record = iepg::parse(file)?;
//! println!("{} starts at {}", record.program_title(), record.start());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::config::{ConfigManager, ParserConfig};
pub use crate::core::frame_parser::{parse, Parser};
pub use crate::core::header_map::HeaderMap;
pub use crate::core::record::Record;
pub use crate::error::{FieldError, FramingError, ParseError, Result};
