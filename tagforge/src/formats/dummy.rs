//! A no-op native codec for containers without their own metadata
//!
//! Raw streams like MPEG audio carry no native tag system; everything they hold is
//! ID3v1, ID3v2 or APE. [`DummyCodec`] fills the native slot of a
//! [`TaggedFile`](crate::file::TaggedFile) for such formats.

use crate::config::{ParseOptions, WriteOptions};
use crate::engine::{TagCodec, ZoneAnchor};
use crate::error::Result;
use crate::structure::FileStructure;
use crate::tag::{TagData, TagType};

use std::io::{Read, Seek};

/// Codec for formats with no native metadata of their own
#[derive(Default)]
pub struct DummyCodec;

impl TagCodec for DummyCodec {
	const DEFAULT_ZONE: &'static str = "native";
	const TAG_TYPE: TagType = TagType::Native;

	fn read<R: Read + Seek>(
		&mut self,
		_reader: &mut R,
		_structure: &mut FileStructure,
		_data: &mut TagData,
		_options: ParseOptions,
	) -> Result<bool> {
		Ok(false)
	}

	fn write_zone(
		&mut self,
		_data: &TagData,
		_zone_name: &str,
		_options: WriteOptions,
	) -> Result<Vec<u8>> {
		Ok(Vec::new())
	}

	fn default_anchor(&self) -> ZoneAnchor {
		ZoneAnchor::EndOfFile
	}
}
