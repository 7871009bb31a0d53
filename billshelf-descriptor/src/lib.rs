//! # billshelf-descriptor
//!
//! Descriptor synthesis and metadata extraction for text-version
//! directories.
//!
//! A version directory normally carries a `data.json` descriptor. When it
//! does not, [`synth`] builds one from whatever MODS source document is
//! discoverable (directly, nested, recursively, or inside a zip archive) and
//! writes it back so later stages have a uniform input. [`extract`] turns a
//! descriptor into a [`billshelf_core::CandidateRecord`], degrading to the
//! file's modification time whenever metadata is missing or malformed.

pub mod error;
pub mod extract;
pub mod mods;
pub mod source;
pub mod synth;

pub use error::SynthError;
pub use extract::{extract_candidate, unwritten_candidate};
pub use mods::ModsRecord;
pub use synth::{synthesize, synthesize_into};
