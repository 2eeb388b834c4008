//! URL modeling and filename derivation.
//!
//! Derives a filename hint from whatever the user typed into the URL field.
//! Works on the raw text, not on a parsed URL, so partial input still yields
//! a hint while the user is typing.

mod path;

pub use path::extract_filename;
