//! Character encodings supported for SMS payloads and their part budgets.
//!
//! An SMS transport unit carries `PAYLOAD_BYTES` of user data. Once a message
//! no longer fits in one unit, every part reserves `CONCAT_HEADER_BYTES` for
//! the concatenation header that lets the handset reassemble the parts in
//! order. Capacities below are expressed in encoding units (GSM septets or
//! UTF-16 code units), never in bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User-data bytes available in one transport unit.
pub const PAYLOAD_BYTES: usize = 140;

/// Bytes reserved in each part of a concatenated message.
pub const CONCAT_HEADER_BYTES: usize = 6;

/// Budget table entry for one encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingSpec {
    /// Lowercase name used in config files and on the command line.
    pub name: &'static str,
    /// Width of one encoding unit in bits.
    pub bits_per_unit: usize,
    /// Units that fit when the message is sent as a single part.
    pub single_part: usize,
    /// Units that fit in each part once the header is present.
    pub multi_part: usize,
}

impl EncodingSpec {
    const fn new(name: &'static str, bits_per_unit: usize) -> Self {
        Self {
            name,
            bits_per_unit,
            single_part: PAYLOAD_BYTES * 8 / bits_per_unit,
            multi_part: (PAYLOAD_BYTES - CONCAT_HEADER_BYTES) * 8 / bits_per_unit,
        }
    }
}

const GSM_SPEC: EncodingSpec = EncodingSpec::new("gsm", 7);
const UNICODE_SPEC: EncodingSpec = EncodingSpec::new("unicode", 16);

/// Encoding a message is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// GSM 03.38 default alphabet, 7 bits per septet. Extended symbols are
    /// sent as an escape septet followed by the symbol's code.
    #[default]
    #[serde(alias = "gsm7")]
    Gsm,
    /// UCS-2 / UTF-16, 16 bits per code unit. Characters outside the BMP are
    /// surrogate pairs.
    #[serde(alias = "ucs2", alias = "utf16")]
    Unicode,
}

impl Encoding {
    pub const ALL: [Encoding; 2] = [Encoding::Gsm, Encoding::Unicode];

    /// Budget table entry for this encoding.
    pub const fn spec(self) -> EncodingSpec {
        match self {
            Encoding::Gsm => GSM_SPEC,
            Encoding::Unicode => UNICODE_SPEC,
        }
    }

    pub const fn name(self) -> &'static str {
        self.spec().name
    }

    /// Maximum units for a message that is sent without a concatenation header.
    pub const fn single_part_capacity(self) -> usize {
        self.spec().single_part
    }

    /// Maximum units per part of a concatenated message.
    pub const fn multi_part_capacity(self) -> usize {
        self.spec().multi_part
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
