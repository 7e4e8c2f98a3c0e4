//! EXIF tag decoding and numeric coercion.
//!
//! - [`read_tags`]: decode a file's EXIF block into a stringified [`RawTagMap`]
//! - [`TagValue`] / [`coerce`]: typed tag values and their float coercion
//!
//! Everything downstream of the raw map (field selection, GPS recovery)
//! works on strings only, see [`crate::friendly`] and [`crate::gps`].

mod reader;
#[cfg(test)]
pub(crate) mod testkit;
mod value;

pub use reader::{RawTagMap, TagGroup, read_tags, tag_key};
pub use value::{Numeric, TagValue, coerce};
