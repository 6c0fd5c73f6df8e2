//! Concrete tag format codecs
//!
//! Each submodule implements [`TagCodec`](crate::engine::TagCodec) for one byte grammar.
//! The codecs only discover structure and serialize zones; splicing and header patching
//! stay in the engine.

pub mod ape;
pub mod dummy;
pub mod id3v1;
pub mod id3v2;
pub mod riff;

pub use ape::ApeCodec;
pub use dummy::DummyCodec;
pub use id3v1::Id3v1Codec;
pub use id3v2::Id3v2Codec;
pub use riff::RiffCodec;
