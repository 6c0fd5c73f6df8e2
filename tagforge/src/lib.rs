//! Zone-based, in-place metadata tag rewriting for audio containers.
//!
//! Tags are modeled as a set of named byte ranges (*zones*) discovered by a format
//! codec. To change a tag, the engine re-reads the file's current structure, merges the
//! caller's changes into the existing content, serializes each zone, and splices the
//! new bytes into the file with block copies, patching every dependent size and counter
//! header the resize invalidates. Unrelated bytes, and unrelated tags, are never
//! rewritten.
//!
//! # Examples
//!
//! ```rust,no_run
//! # fn main() -> tagforge::error::Result<()> {
//! use tagforge::config::{ParseOptions, WriteOptions};
//! use tagforge::file::TaggedFile;
//! use tagforge::formats::RiffCodec;
//! use tagforge::tag::{TagData, TagField, TagType};
//!
//! let mut file = std::fs::OpenOptions::new()
//! 	.read(true)
//! 	.write(true)
//! 	.open("test.wav")?;
//!
//! let mut tagged = TaggedFile::new(RiffCodec::default());
//! tagged.read_from(&mut file, ParseOptions::new())?;
//!
//! let mut changes = TagData::new();
//! changes.set(TagField::Title, "A Better Title");
//! tagged.save_tag_to(&mut file, TagType::Native, &changes, WriteOptions::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! Single tag systems can also be driven directly through
//! [`TagEngine`](engine::TagEngine) when whole-file orchestration is not needed.

pub mod config;
pub mod engine;
pub mod error;
pub mod file;
pub mod formats;
pub(crate) mod macros;
pub mod structure;
pub mod tag;
mod util;

pub use util::io;

pub mod prelude {
	//! A prelude for commonly used items in the library.
	//!
	//! This module is intended to be wildcard imported.
	//!
	//! ```rust
	//! use tagforge::prelude::*;
	//! ```

	pub use crate::engine::{Embedder, TagCodec, TagEngine};
	pub use crate::file::TaggedFile;
	pub use crate::io::FileLike;
	pub use crate::tag::{TagData, TagField, TagType};
}
