//! In-place growth and shrinkage of a byte range within a live stream
//!
//! These primitives shift every byte outside the edited range bit-for-bit, working in
//! bounded-size blocks so the whole file never has to be held in memory.

use crate::error::Result;
use crate::util::io::{FileLike, Length, Truncate};

use std::io::SeekFrom;

const COPY_BLOCK_SIZE: usize = 8 * 1024;

/// Grow the stream by `extra` bytes at `from`
///
/// Every byte at/after `from` is shifted forward by `extra`; the resulting gap is
/// zero-filled when `fill` is set. Copying starts from the stream's end moving
/// backward, so the shifted region never overwrites itself.
pub(crate) fn lengthen<F>(file: &mut F, from: u64, extra: u64, fill: bool) -> Result<()>
where
	F: FileLike,
	crate::error::TagForgeError: From<<F as Truncate>::Error>,
	crate::error::TagForgeError: From<<F as Length>::Error>,
{
	if extra == 0 {
		return Ok(());
	}

	let old_len = file.len()?;
	debug_assert!(from <= old_len);

	let mut buf = [0u8; COPY_BLOCK_SIZE];
	let mut remaining = old_len.saturating_sub(from);

	while remaining > 0 {
		let block = std::cmp::min(remaining, COPY_BLOCK_SIZE as u64);
		let src = from + remaining - block;

		file.seek(SeekFrom::Start(src))?;
		file.read_exact(&mut buf[..block as usize])?;

		file.seek(SeekFrom::Start(src + extra))?;
		file.write_all(&buf[..block as usize])?;

		remaining -= block;
	}

	if fill {
		file.seek(SeekFrom::Start(from))?;

		let zeroes = [0u8; COPY_BLOCK_SIZE];
		let mut left = extra;
		while left > 0 {
			let block = std::cmp::min(left, COPY_BLOCK_SIZE as u64);
			file.write_all(&zeroes[..block as usize])?;
			left -= block;
		}
	}

	Ok(())
}

/// Shrink the stream by `removed` bytes, discarding the range `[upto - removed, upto)`
///
/// Every byte at/after `upto` is shifted backward by `removed` (copying forward from
/// the lowest address), then the stream is truncated.
pub(crate) fn shorten<F>(file: &mut F, upto: u64, removed: u64) -> Result<()>
where
	F: FileLike,
	crate::error::TagForgeError: From<<F as Truncate>::Error>,
	crate::error::TagForgeError: From<<F as Length>::Error>,
{
	if removed == 0 {
		return Ok(());
	}

	let old_len = file.len()?;
	debug_assert!(upto >= removed);
	debug_assert!(upto <= old_len);

	let mut buf = [0u8; COPY_BLOCK_SIZE];
	let mut read_pos = upto;
	let mut write_pos = upto - removed;

	while read_pos < old_len {
		let block = std::cmp::min(old_len - read_pos, COPY_BLOCK_SIZE as u64);

		file.seek(SeekFrom::Start(read_pos))?;
		file.read_exact(&mut buf[..block as usize])?;

		file.seek(SeekFrom::Start(write_pos))?;
		file.write_all(&buf[..block as usize])?;

		read_pos += block;
		write_pos += block;
	}

	file.truncate(old_len - removed)?;

	Ok(())
}
