//! The zone model: named byte ranges and the headers that depend on them
//!
//! Every tag instance tracks its on-disk layout as a set of [`Zone`]s, registered by the
//! format reader as it walks the file. A zone may have *dependent headers*: size or count
//! fields located elsewhere in the file that quote the zone's size (e.g. the global RIFF
//! chunk size) and must be patched whenever the zone resizes.

use crate::error::Result;
use crate::macros::err;

use std::io::{Read, Seek, SeekFrom, Write};

/// How an edit changed a zone, for dependent header patching
///
/// Size headers move by the byte delta for every action. Count headers (e.g. "number of
/// chunks") only change when a zone appears or disappears.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ZoneAction {
	/// The zone transitioned from empty to non-empty
	Add,
	/// The zone was resized in place
	Edit,
	/// The zone transitioned from non-empty to empty
	Delete,
}

/// What a dependent header field encodes
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HeaderRole {
	/// A byte size that includes the owning zone
	Size,
	/// A count of elements, one of which is the owning zone
	Counter,
}

/// The binary encoding of a dependent header field
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum HeaderEncoding {
	U16Le,
	U16Be,
	U32Le,
	U32Be,
	U64Le,
	U64Be,
}

impl HeaderEncoding {
	pub(crate) fn width(self) -> usize {
		match self {
			Self::U16Le | Self::U16Be => 2,
			Self::U32Le | Self::U32Be => 4,
			Self::U64Le | Self::U64Be => 8,
		}
	}

	fn max_value(self) -> u64 {
		match self {
			Self::U16Le | Self::U16Be => u64::from(u16::MAX),
			Self::U32Le | Self::U32Be => u64::from(u32::MAX),
			Self::U64Le | Self::U64Be => u64::MAX,
		}
	}

	fn decode(self, bytes: &[u8]) -> u64 {
		match self {
			Self::U16Le => u64::from(u16::from_le_bytes([bytes[0], bytes[1]])),
			Self::U16Be => u64::from(u16::from_be_bytes([bytes[0], bytes[1]])),
			Self::U32Le => u64::from(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
			Self::U32Be => u64::from(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
			Self::U64Le => u64::from_le_bytes(bytes[..8].try_into().unwrap()),
			Self::U64Be => u64::from_be_bytes(bytes[..8].try_into().unwrap()),
		}
	}

	fn encode(self, value: u64, out: &mut Vec<u8>) {
		match self {
			Self::U16Le => out.extend_from_slice(&(value as u16).to_le_bytes()),
			Self::U16Be => out.extend_from_slice(&(value as u16).to_be_bytes()),
			Self::U32Le => out.extend_from_slice(&(value as u32).to_le_bytes()),
			Self::U32Be => out.extend_from_slice(&(value as u32).to_be_bytes()),
			Self::U64Le => out.extend_from_slice(&value.to_le_bytes()),
			Self::U64Be => out.extend_from_slice(&value.to_be_bytes()),
		}
	}
}

/// A size or count field, located outside a zone, that depends on it
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeaderField {
	position: u64,
	encoding: HeaderEncoding,
	role: HeaderRole,
}

impl HeaderField {
	/// Create a new `HeaderField` at an absolute file position
	#[must_use]
	pub const fn new(position: u64, encoding: HeaderEncoding, role: HeaderRole) -> Self {
		Self {
			position,
			encoding,
			role,
		}
	}

	/// The absolute file position of the encoded value
	pub fn position(&self) -> u64 {
		self.position
	}
}

/// A named, offset/size-tracked byte range holding one tag's serialized content
///
/// `size == 0` means the tag is absent; the zone then only records the insertion point.
#[derive(Clone, Debug)]
pub struct Zone {
	name: String,
	offset: u64,
	size: u64,
	core_signature: Vec<u8>,
	headers: Vec<HeaderField>,
}

impl Zone {
	/// Create a new `Zone`
	///
	/// `core_signature` is the minimal byte run left in place of the zone when its tag is
	/// deleted, keeping the surrounding container structurally valid. Most zones use an
	/// empty signature, meaning deletion removes the zone entirely.
	#[must_use]
	pub fn new(name: impl Into<String>, offset: u64, size: u64, core_signature: Vec<u8>) -> Self {
		Self {
			name: name.into(),
			offset,
			size,
			core_signature,
			headers: Vec::new(),
		}
	}

	/// Attach a dependent header to this zone
	pub fn push_header(&mut self, header: HeaderField) {
		self.headers.push(header);
	}

	/// Builder-style counterpart of [`Zone::push_header`]
	#[must_use]
	pub fn with_header(mut self, header: HeaderField) -> Self {
		self.headers.push(header);
		self
	}

	/// The zone's unique name within its tag instance
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The current file-relative start of the zone
	pub fn offset(&self) -> u64 {
		self.offset
	}

	/// The current byte length of the zone (0 = tag absent)
	pub fn size(&self) -> u64 {
		self.size
	}

	/// The bytes left behind when the zone's tag is deleted
	pub fn core_signature(&self) -> &[u8] {
		&self.core_signature
	}

	/// The headers registered as dependent on this zone
	pub fn headers(&self) -> &[HeaderField] {
		&self.headers
	}

	/// Whether the zone currently holds anything beyond its core signature
	pub fn is_empty(&self) -> bool {
		self.size <= self.core_signature.len() as u64
	}

	pub(crate) fn set_size(&mut self, size: u64) {
		self.size = size;
	}
}

/// Per-tag-instance registry of zones
///
/// Zones are kept in stable registration order. That order is also the processing order
/// during a write, so a header located after an edited zone observes the correct
/// cumulative delta from all earlier edits in the same pass.
#[derive(Debug, Default)]
pub struct FileStructure {
	zones: Vec<Zone>,
}

impl FileStructure {
	/// Create an empty `FileStructure`
	#[must_use]
	pub fn new() -> Self {
		Self { zones: Vec::new() }
	}

	/// Register a zone, replacing any existing zone with the same name
	///
	/// Replacement keeps the original registration position, supporting repeated parses
	/// of the same file.
	pub fn add_zone(&mut self, zone: Zone) {
		if let Some(existing) = self.zones.iter_mut().find(|z| z.name == zone.name) {
			*existing = zone;
			return;
		}

		self.zones.push(zone);
	}

	/// Drop all registrations
	///
	/// Called at the start of every read, and at the start of every write's internal
	/// re-read.
	pub fn clear(&mut self) {
		self.zones.clear();
	}

	/// Whether any zone is registered
	pub fn is_empty(&self) -> bool {
		self.zones.is_empty()
	}

	/// All zones, in registration order
	pub fn zones(&self) -> &[Zone] {
		&self.zones
	}

	/// Find a zone by name
	pub fn zone(&self, name: &str) -> Option<&Zone> {
		self.zones.iter().find(|z| z.name == name)
	}

	/// Find a zone by name, mutably
	pub fn zone_mut(&mut self, name: &str) -> Option<&mut Zone> {
		self.zones.iter_mut().find(|z| z.name == name)
	}

	/// Attach a size header to a registered zone
	///
	/// Returns `false` if no zone with that name exists.
	pub fn declare_size_header(
		&mut self,
		zone_name: &str,
		position: u64,
		encoding: HeaderEncoding,
	) -> bool {
		self.declare_header(zone_name, position, encoding, HeaderRole::Size)
	}

	/// Attach a counter header to a registered zone
	///
	/// Returns `false` if no zone with that name exists.
	pub fn declare_counter_header(
		&mut self,
		zone_name: &str,
		position: u64,
		encoding: HeaderEncoding,
	) -> bool {
		self.declare_header(zone_name, position, encoding, HeaderRole::Counter)
	}

	fn declare_header(
		&mut self,
		zone_name: &str,
		position: u64,
		encoding: HeaderEncoding,
		role: HeaderRole,
	) -> bool {
		match self.zone_mut(zone_name) {
			Some(zone) => {
				zone.push_header(HeaderField::new(position, encoding, role));
				true
			},
			None => false,
		}
	}

	pub(crate) fn zone_count(&self) -> usize {
		self.zones.len()
	}

	pub(crate) fn zone_at(&self, index: usize) -> &Zone {
		&self.zones[index]
	}

	pub(crate) fn zone_at_mut(&mut self, index: usize) -> &mut Zone {
		&mut self.zones[index]
	}

	/// Patch every header registered as dependent on `zone_name`
	///
	/// Size headers receive `delta`; count headers are incremented/decremented on
	/// [`ZoneAction::Add`]/[`ZoneAction::Delete`] and untouched on [`ZoneAction::Edit`].
	pub fn rewrite_headers<F>(
		&self,
		file: &mut F,
		zone_name: &str,
		delta: i64,
		action: ZoneAction,
	) -> Result<()>
	where
		F: Read + Write + Seek,
	{
		let Some(zone) = self.zone(zone_name) else {
			return Ok(());
		};

		for header in &zone.headers {
			let header_delta = match header.role {
				HeaderRole::Size => delta,
				HeaderRole::Counter => match action {
					ZoneAction::Add => 1,
					ZoneAction::Delete => -1,
					ZoneAction::Edit => continue,
				},
			};

			if header_delta == 0 {
				continue;
			}

			let width = header.encoding.width();
			let mut bytes = [0u8; 8];

			file.seek(SeekFrom::Start(header.position))?;
			file.read_exact(&mut bytes[..width])?;

			let current = header.encoding.decode(&bytes[..width]);
			let Some(patched) = current.checked_add_signed(header_delta) else {
				err!(HeaderUnderflow);
			};
			if patched > header.encoding.max_value() {
				err!(SizeMismatch);
			}

			log::debug!(
				"Patching {:?} header at {}: {} -> {}",
				header.role,
				header.position,
				current,
				patched
			);

			let mut encoded = Vec::with_capacity(width);
			header.encoding.encode(patched, &mut encoded);

			file.seek(SeekFrom::Start(header.position))?;
			file.write_all(&encoded)?;
		}

		Ok(())
	}

	/// Cascade a splice's delta to every zone and header position at/after `pivot`
	///
	/// The edited zone itself keeps its offset (`exclude` names it); everything recorded
	/// further down the file moves by `delta`.
	pub(crate) fn shift_after(&mut self, exclude: &str, pivot: u64, delta: i64) {
		for zone in &mut self.zones {
			if zone.name != exclude && zone.offset >= pivot {
				zone.offset = zone.offset.saturating_add_signed(delta);
			}

			for header in &mut zone.headers {
				if header.position >= pivot {
					header.position = header.position.saturating_add_signed(delta);
				}
			}
		}
	}
}
