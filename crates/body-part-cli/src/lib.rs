//! # body-part-cli
//!
//! Report rendering for the `body-part-index` command line tool.
//!
//! The binary builds a [`BodyPartIndex`](body_part_index::BodyPartIndex)
//! from a local document and prints either one body part with its direct
//! children, or every search hit.

#![warn(missing_docs)]

mod report;

pub use report::{render_json, render_lookup, render_search, summary};
