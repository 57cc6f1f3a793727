//! Greedy SMS segmentation.
//!
//! A message whose total cost fits the encoding's single-part capacity is
//! sent as-is. Otherwise it is cut left to right into parts of at most the
//! multi-part capacity. A part is closed as soon as the next logical
//! character would overflow it, so boundaries only ever fall between logical
//! characters: an escaped GSM symbol or a UTF-16 surrogate pair always lands
//! whole in one part. Earlier parts are never back-filled.

use serde::Serialize;
use tracing::{debug, trace};

use crate::encoding::Encoding;
use crate::width::char_width;

/// One logical character located in the caller's storage.
#[derive(Debug, Clone, Copy)]
struct Measured {
    /// Start offset in storage units (bytes for `str`, code units for UTF-16).
    offset: usize,
    /// Cost in encoding units.
    width: usize,
}

/// Storage range of a closed part and the units it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    units: usize,
}

/// One part of a segmented message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part<'a> {
    pub text: &'a str,
    /// Encoding units this part consumes.
    pub units: usize,
}

/// Result of segmenting a message, with the unit accounting per part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segmentation<'a> {
    pub encoding: Encoding,
    pub total_units: usize,
    pub parts: Vec<Part<'a>>,
}

impl<'a> Segmentation<'a> {
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// True if the message needs a concatenation header.
    pub fn is_concatenated(&self) -> bool {
        self.parts.len() > 1
    }

    /// Capacity that applies to every part of this message.
    pub fn capacity_per_part(&self) -> usize {
        if self.is_concatenated() {
            self.encoding.multi_part_capacity()
        } else {
            self.encoding.single_part_capacity()
        }
    }

    /// Units still free in the last part before another part is needed.
    ///
    /// For a single-part message this is measured against the single-part
    /// capacity, so crossing it adds a header to every part.
    pub fn remaining_units(&self) -> usize {
        let used = self.parts.last().map_or(0, |p| p.units);
        self.capacity_per_part().saturating_sub(used)
    }

    pub fn texts(&self) -> Vec<&'a str> {
        self.parts.iter().map(|p| p.text).collect()
    }
}

/// Splits messages for one encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Segmenter {
    encoding: Encoding,
}

impl Segmenter {
    pub fn new(encoding: Encoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Split `message` into parts borrowed from it.
    ///
    /// An empty message yields a single empty part.
    pub fn split<'a>(&self, message: &'a str) -> Vec<&'a str> {
        self.segment(message).texts()
    }

    /// Split `message` and report the units used by each part.
    pub fn segment<'a>(&self, message: &'a str) -> Segmentation<'a> {
        let chars: Vec<Measured> = message
            .char_indices()
            .map(|(offset, ch)| Measured {
                offset,
                width: char_width(ch, self.encoding),
            })
            .collect();
        let spans = self.plan(&chars, message.len());
        let parts = spans
            .iter()
            .map(|s| Part {
                text: &message[s.start..s.end],
                units: s.units,
            })
            .collect();
        Segmentation {
            encoding: self.encoding,
            total_units: spans.iter().map(|s| s.units).sum(),
            parts,
        }
    }

    /// Split raw UTF-16 code units.
    ///
    /// Surrogate pairs are kept together. An unpaired surrogate is accepted
    /// and counted as a single character of width one.
    pub fn split_utf16<'a>(&self, units: &'a [u16]) -> Vec<&'a [u16]> {
        let mut chars = Vec::with_capacity(units.len());
        let mut offset = 0;
        for decoded in char::decode_utf16(units.iter().copied()) {
            let (storage, width) = match decoded {
                Ok(ch) => (ch.len_utf16(), char_width(ch, self.encoding)),
                Err(_) => (1, 1),
            };
            chars.push(Measured { offset, width });
            offset += storage;
        }
        self.plan(&chars, units.len())
            .into_iter()
            .map(|s| &units[s.start..s.end])
            .collect()
    }

    fn plan(&self, chars: &[Measured], len: usize) -> Vec<Span> {
        let total_units: usize = chars.iter().map(|c| c.width).sum();

        if total_units <= self.encoding.single_part_capacity() {
            debug!(encoding = %self.encoding, total_units, parts = 1, "message fits a single part");
            return vec![Span {
                start: 0,
                end: len,
                units: total_units,
            }];
        }

        let capacity = self.encoding.multi_part_capacity();
        let mut spans = Vec::with_capacity(total_units.div_ceil(capacity));
        let mut start = 0;
        let mut used = 0;
        for c in chars {
            // `used > 0` keeps parts non-empty even for a character wider than
            // a whole part.
            if used > 0 && used + c.width > capacity {
                trace!(start, end = c.offset, units = used, "closing part");
                spans.push(Span {
                    start,
                    end: c.offset,
                    units: used,
                });
                start = c.offset;
                used = 0;
            }
            used += c.width;
        }
        trace!(start, end = len, units = used, "closing last part");
        spans.push(Span {
            start,
            end: len,
            units: used,
        });

        debug!(encoding = %self.encoding, total_units, parts = spans.len(), "segmented message");
        spans
    }
}

/// Split `message` into the smallest ordered list of SMS parts for
/// `encoding`. Concatenating the result reproduces `message`.
pub fn split_into_parts(message: &str, encoding: Encoding) -> Vec<String> {
    Segmenter::new(encoding)
        .split(message)
        .into_iter()
        .map(str::to_owned)
        .collect()
}
