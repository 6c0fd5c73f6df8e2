//! The canonical, format-agnostic tag representation and its merge semantics

mod additional;
mod chapter;
pub(crate) mod cross;
mod field;
mod lyrics;
pub(crate) mod picture;

pub use additional::AdditionalField;
pub use chapter::Chapter;
pub use cross::CrossTagReader;
pub use field::TagField;
pub use lyrics::{Lyrics, SyncedPhrase};
pub use picture::{APE_PICTURE_TYPES, MimeType, Picture, PictureType};

use crate::config::WriteOptions;

use std::collections::HashMap;

macro_rules! impl_accessor {
	($($name:ident => $field:ident;)+) => {
		paste::paste! {
			$(
				#[doc = "Get the " $name]
				pub fn $name(&self) -> Option<&str> {
					self.get(TagField::$field)
				}

				#[doc = "Set the " $name]
				pub fn [<set_ $name>](&mut self, value: impl Into<String>) {
					self.set(TagField::$field, value)
				}

				#[doc = "Mark the " $name " for deletion on the next merge"]
				pub fn [<remove_ $name>](&mut self) {
					self.mark_field_for_deletion(TagField::$field)
				}
			)+
		}
	}
}

/// The tag systems the engine can drive
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum TagType {
	/// The fixed 128-byte trailer tag
	Id3v1,
	/// An ID3v2 tag, standalone or embedded in a foreign container
	Id3v2,
	/// An APEv2 tag
	Ape,
	/// The container's own native tagging system
	Native,
}

/// Canonical in-memory representation of one tag's content
///
/// `TagData` is rebuilt from scratch on every read, merged in place during a write
/// (existing plus incoming, incoming taking precedence), and wiped on removal.
///
/// Canonical fields and [`AdditionalField`]s are disjoint keyspaces. A field absent
/// from the canonical map reads as empty, never as an error.
#[derive(Clone, Debug, Default)]
pub struct TagData {
	// `None` is an explicit deletion marker, only meaningful in a merge payload
	fields: HashMap<TagField, Option<String>>,
	pictures: Vec<Picture>,
	chapters: Option<Vec<Chapter>>,
	lyrics: Option<Vec<Lyrics>>,
	additional: Vec<AdditionalField>,
}

impl TagData {
	impl_accessor!(
		title    => Title;
		artist   => Artist;
		album    => Album;
		genre    => Genre;
		comment  => Comment;
	);

	/// Create an empty `TagData`
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Wipe all content
	pub fn clear(&mut self) {
		self.fields.clear();
		self.pictures.clear();
		self.chapters = None;
		self.lyrics = None;
		self.additional.clear();
	}

	/// Whether the tag carries no live content
	pub fn is_empty(&self) -> bool {
		self.fields
			.values()
			.all(|v| v.as_ref().is_none_or(|v| v.is_empty()))
			&& !self.pictures.iter().any(|p| !p.marked_for_deletion())
			&& self.chapters.as_ref().is_none_or(Vec::is_empty)
			&& self
				.lyrics
				.as_ref()
				.is_none_or(|l| l.iter().all(Lyrics::is_empty))
			&& !self.additional.iter().any(|f| !f.marked_for_deletion())
	}

	/// Get a canonical field's value
	///
	/// The composite [`TagField::RecordingDateOrYear`] reads through to the more
	/// specific slot that is populated, date first.
	pub fn get(&self, field: TagField) -> Option<&str> {
		if field == TagField::RecordingDateOrYear {
			return self
				.get(TagField::RecordingDate)
				.or_else(|| self.get(TagField::RecordingYear));
		}

		self.fields.get(&field).and_then(|v| v.as_deref())
	}

	/// Set a canonical field's value
	///
	/// Composite fields decompose immediately, so `get` with the specific slot sees
	/// the value.
	pub fn set(&mut self, field: TagField, value: impl Into<String>) {
		let value = value.into();
		self.integrate_field(field, Some(&value), WriteOptions::new());
	}

	/// Mark a canonical field for deletion on the next merge
	///
	/// On a standalone `TagData` this is *intent*, not an immediate removal: the marker
	/// survives until the merge applies it to the existing tag content.
	pub fn mark_field_for_deletion(&mut self, field: TagField) {
		self.fields.insert(field, None);
	}

	/// Iterate over populated canonical fields
	pub fn fields(&self) -> impl Iterator<Item = (TagField, &str)> {
		self.fields
			.iter()
			.filter_map(|(k, v)| v.as_deref().map(|v| (*k, v)))
	}

	/// The tag's pictures
	pub fn pictures(&self) -> &[Picture] {
		&self.pictures
	}

	/// Add a picture, assigning it the next free position within its identity group
	///
	/// A picture arriving with an explicit position keeps it.
	pub fn add_picture(&mut self, mut picture: Picture) {
		if picture.position() == 0 {
			let next = self
				.pictures
				.iter()
				.filter(|p| p.same_group(&picture))
				.map(Picture::position)
				.max()
				.unwrap_or(0) + 1;
			picture.set_position(next);
		}

		self.pictures.push(picture);
	}

	/// Remove all pictures
	pub fn clear_pictures(&mut self) {
		self.pictures.clear();
	}

	/// The tag's chapters, if any list was ever recorded
	pub fn chapters(&self) -> Option<&[Chapter]> {
		self.chapters.as_deref()
	}

	/// Replace the chapter list
	///
	/// Setting an empty list is distinct from never setting one: during a merge, an
	/// empty incoming list wipes the existing chapters, while an absent list leaves
	/// them untouched.
	pub fn set_chapters(&mut self, chapters: Vec<Chapter>) {
		self.chapters = Some(chapters);
	}

	/// The tag's lyrics blocks, if any list was ever recorded
	pub fn lyrics(&self) -> Option<&[Lyrics]> {
		self.lyrics.as_deref()
	}

	/// Replace the lyrics list
	///
	/// Same absent-vs-empty distinction as [`TagData::set_chapters`].
	pub fn set_lyrics(&mut self, lyrics: Vec<Lyrics>) {
		self.lyrics = Some(lyrics);
	}

	/// Append a synchronized phrase to the most recently added lyrics block
	///
	/// Creates a block when none exists yet.
	pub fn add_synced_phrase(&mut self, phrase: SyncedPhrase) {
		let lyrics = self.lyrics.get_or_insert_with(Vec::new);
		if lyrics.is_empty() {
			lyrics.push(Lyrics::default());
		}

		// Append, never replace: consecutive phrases accumulate in one block
		lyrics
			.last_mut()
			.expect("list was just made non-empty")
			.synchronized
			.push(phrase);
	}

	/// The tag's additional (non-canonical) fields
	pub fn additional_fields(&self) -> &[AdditionalField] {
		&self.additional
	}

	/// Add an additional field
	pub fn add_additional_field(&mut self, field: AdditionalField) {
		self.additional.push(field);
	}

	/// Integrate one canonical field value, `None` meaning deletion
	///
	/// Numeric fields normalize `"0"`/empty values according to
	/// [`WriteOptions::null_absent_values`]; the composite
	/// [`TagField::RecordingDateOrYear`] decomposes into the specific slot it
	/// overlaps with.
	pub(crate) fn integrate_field(
		&mut self,
		field: TagField,
		value: Option<&str>,
		options: WriteOptions,
	) {
		if field == TagField::RecordingDateOrYear {
			self.fields.remove(&TagField::RecordingDateOrYear);
			match value {
				None => {
					self.fields.remove(&TagField::RecordingDate);
					self.fields.remove(&TagField::RecordingYear);
				},
				Some(value) if value.len() > 4 => {
					self.integrate_field(TagField::RecordingDate, Some(value), options);
				},
				Some(value) => {
					self.integrate_field(TagField::RecordingYear, Some(value), options);
				},
			}
			return;
		}

		let Some(value) = value else {
			self.fields.remove(&field);
			return;
		};

		if field.is_numeric() {
			let trimmed = value.trim();
			if trimmed.is_empty() || trimmed == "0" {
				if options.null_absent_values {
					self.fields.remove(&field);
				} else {
					self.fields.insert(field, Some(String::from("0")));
				}
				return;
			}
		}

		self.fields.insert(field, Some(value.to_owned()));
	}

	/// Merge `incoming` into the existing content, incoming taking precedence
	///
	/// This is the write-time merge step: canonical fields overwrite or delete,
	/// additional fields match by identity, chapter/lyrics lists replace wholesale,
	/// and pictures follow the delete-set/match/append protocol described on
	/// [`Picture`].
	pub(crate) fn integrate(&mut self, incoming: &TagData, options: WriteOptions) {
		for (field, value) in &incoming.fields {
			self.integrate_field(*field, value.as_deref(), options);
		}

		self.integrate_additional(incoming);

		if let Some(chapters) = &incoming.chapters {
			self.chapters = Some(chapters.clone());
		}
		if let Some(lyrics) = &incoming.lyrics {
			self.lyrics = Some(lyrics.clone());
		}

		self.integrate_pictures(&incoming.pictures);
	}

	fn integrate_additional(&mut self, incoming: &TagData) {
		for field in &incoming.additional {
			let existing = self
				.additional
				.iter()
				.position(|f| f.same_identity(field));

			if field.marked_for_deletion() {
				match existing {
					Some(i) => {
						self.additional.remove(i);
					},
					None => {
						log::warn!(
							"Deletion requested for additional field {:?} with no match",
							field.native_code()
						);
					},
				}
				continue;
			}

			match existing {
				Some(i) => self.additional[i].set_value(field.value().to_owned()),
				None => self.additional.push(field.clone()),
			}
		}
	}

	fn integrate_pictures(&mut self, incoming: &[Picture]) {
		// Step 1+2: apply the delete set; each delete entry is usable once
		let mut delete_used = vec![false; incoming.len()];
		let mut survivors: Vec<Picture> = Vec::new();

		'existing: for existing in self.pictures.drain(..) {
			for (i, inc) in incoming.iter().enumerate() {
				if inc.marked_for_deletion() && !delete_used[i] && inc.same_identity(&existing) {
					delete_used[i] = true;
					continue 'existing;
				}
			}

			survivors.push(existing);
		}

		// Step 3: match survivors against live incoming pictures by group,
		// each incoming entry consumable once
		let mut inc_consumed = vec![false; incoming.len()];
		let mut matched_by: Vec<Option<usize>> = vec![None; survivors.len()];

		for (si, existing) in survivors.iter_mut().enumerate() {
			let candidate = incoming.iter().enumerate().position(|(i, inc)| {
				!inc.marked_for_deletion() && !inc_consumed[i] && inc.same_group(existing)
			});

			if let Some(i) = candidate {
				let inc = &incoming[i];
				if inc.content_hash() == existing.content_hash() {
					existing.set_description(inc.description());
				} else {
					existing.replace_content(inc);
				}

				inc_consumed[i] = true;
				matched_by[si] = Some(i);
			}
		}

		// Step 4: append the rest, continuing each identity group's position sequence
		let mut appended: Vec<(usize, Picture)> = Vec::new();
		for (i, inc) in incoming.iter().enumerate() {
			if inc.marked_for_deletion() || inc_consumed[i] {
				continue;
			}

			let highest = survivors
				.iter()
				.chain(appended.iter().map(|(_, p)| p))
				.filter(|p| p.same_group(inc))
				.map(Picture::position)
				.max()
				.unwrap_or(0);

			let mut picture = inc.clone();
			picture.set_position(highest + 1);
			appended.push((i, picture));
		}

		// Step 5: caller-supplied order first, untouched leftovers last
		let mut survivor_slots: Vec<Option<Picture>> = survivors.into_iter().map(Some).collect();
		let mut result = Vec::with_capacity(survivor_slots.len() + appended.len());

		for (i, inc) in incoming.iter().enumerate() {
			if inc.marked_for_deletion() {
				continue;
			}

			if let Some(si) = matched_by.iter().position(|m| *m == Some(i)) {
				result.push(survivor_slots[si].take().expect("matched slot taken once"));
			} else if let Some(pos) = appended.iter().position(|(ai, _)| *ai == i) {
				result.push(appended.remove(pos).1);
			}
		}

		result.extend(survivor_slots.into_iter().flatten());
		self.pictures = result;
	}
}
