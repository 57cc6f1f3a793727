//! smssplit-core
//!
//! Splits text messages into SMS parts. Each part fits one 140-byte transport
//! unit once encoded, with room for the concatenation header when the message
//! needs more than one part.
//!
//! Public API:
//! - `Encoding` - GSM 7-bit or UTF-16, with its single/multi-part capacities
//! - `char_width` / `message_units` - cost of characters in encoding units
//! - `Segmenter` - greedy splitter returning borrowed parts or a `Segmentation`
//! - `split_into_parts` - owned convenience wrapper around `Segmenter::split`
//!
//! ```rust
//! use smssplit_core::{split_into_parts, Encoding};
//!
//! let long = "€".repeat(81);
//! let parts = split_into_parts(&long, Encoding::Gsm);
//! assert_eq!(parts.len(), 2);
//! assert_eq!(parts.concat(), long);
//! ```

pub mod encoding;
pub use encoding::{Encoding, EncodingSpec, CONCAT_HEADER_BYTES, PAYLOAD_BYTES};

pub mod width;
pub use width::{char_width, is_gsm_extended, message_units};

pub mod segmenter;
pub use segmenter::{split_into_parts, Part, Segmentation, Segmenter};
