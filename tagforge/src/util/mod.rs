pub(crate) mod alloc;
pub mod io;
pub(crate) mod splice;
pub(crate) mod text;
