//! High-level operations behind the CLI.
//!
//! Each operation takes its collaborators (store, editor, extractor, image
//! synthesizer, random source) as arguments so it can run against fakes in
//! tests.

pub mod compose;
pub mod export;
pub mod generate;
pub mod write;

pub use compose::{compose_manual, parse_line_indices};
pub use export::{export_svg, require_variant};
pub use generate::generate_collage;
pub use write::{save_text, write_entry, EntryLock};
