macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Shorthand for return Err(TagForgeError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(TagForgeError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(TagForgeError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::TagForgeError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::TagForgeError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for StructuralParseError::new(TagType::Foo, "Message")
//
// Usage:
//
// - parse_err!(Variant, Message)
// - parse_err!(Message)
//
// or bail:
//
// - parse_err!(@BAIL Variant, Message)
// - parse_err!(@BAIL Message)
macro_rules! parse_err {
	($tag_ty:ident, $reason:literal) => {
		Into::<crate::error::TagForgeError>::into(crate::error::StructuralParseError::new(
			crate::tag::TagType::$tag_ty,
			$reason,
		))
	};
	($reason:literal) => {
		Into::<crate::error::TagForgeError>::into(
			crate::error::StructuralParseError::from_description($reason),
		)
	};
	(@BAIL $($tag_ty:ident,)? $reason:literal) => {
		return Err(parse_err!($($tag_ty,)? $reason))
	};
}

// Shorthand for ValidationError::new(TagType::Foo, "Message"), always bailing,
// since validation failures abort the write before any mutation
//
// Usage:
//
// - validation_err!(@BAIL Variant, Message)
// - validation_err!(@BAIL Message)
macro_rules! validation_err {
	($tag_ty:ident, $reason:literal) => {
		Into::<crate::error::TagForgeError>::into(crate::error::ValidationError::new(
			crate::tag::TagType::$tag_ty,
			$reason,
		))
	};
	($reason:literal) => {
		Into::<crate::error::TagForgeError>::into(
			crate::error::ValidationError::from_description($reason),
		)
	};
	(@BAIL $($tag_ty:ident,)? $reason:literal) => {
		return Err(validation_err!($($tag_ty,)? $reason))
	};
}

pub(crate) use {err, parse_err, try_vec, validation_err};
