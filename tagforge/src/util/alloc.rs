use crate::error::Result;
use crate::macros::err;

// A length prefix read out of a corrupt file can be absurd. Anything above this is
// rejected before we attempt the allocation.
const ALLOCATION_LIMIT: usize = 64 * 1024 * 1024;

/// **DO NOT USE DIRECTLY**
///
/// Creates a `Vec` of the specified length, containing copies of `element`.
///
/// This should be used through [`try_vec!`](crate::macros::try_vec)
pub(crate) fn fallible_vec_from_element<T>(element: T, expected_size: usize) -> Result<Vec<T>>
where
	T: Clone,
{
	if expected_size > ALLOCATION_LIMIT {
		err!(TooMuchData);
	}

	let mut v = Vec::new();
	v.try_reserve_exact(expected_size)?;
	v.resize(expected_size, element);

	Ok(v)
}

#[cfg(test)]
mod tests {
	use super::fallible_vec_from_element;

	#[test_log::test]
	fn vec_fallible_repeat() {
		let u8_vec_len_20 = fallible_vec_from_element(0u8, 20).unwrap();
		assert_eq!(u8_vec_len_20.len(), 20);
		assert!(u8_vec_len_20.iter().all(|e| *e == 0));

		let u8_large_vec = fallible_vec_from_element(0u8, u32::MAX as usize);
		assert!(u8_large_vec.is_err());
	}
}
