//! Line-oriented readers for the four radiosity scene-file formats:
//! `.obj`, `.pat`, `.los`, `.for`. Pure parsing — bytes in,
//! [`radiosity_core::Quad`]/[`radiosity_core::Patch`]/
//! [`radiosity_core::PatchSet`] out. No rendering, no CLI.
//!
//! Each reader is a thin hand-rolled tokenizer (`#`-comments, whitespace
//! tokens) rather than a parser-combinator crate — the grammar is five
//! line kinds per format at most and needs no extra dependency.

mod common;
mod error;
mod for_format;
mod los;
mod obj;
mod pat;

pub use error::FormatError;
pub use for_format::read_for;
pub use los::read_los;
pub use obj::read_obj;
pub use pat::read_pat;
