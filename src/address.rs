//! Address type and normalization.
//!
//! An [`Address`] is an immutable 160-bit value. The canonical textual form
//! is `0x` followed by 40 lowercase hex characters; all set, equality, and
//! distance operations work on the canonical value, so two inputs that
//! differ only in casing or in the presence of the `0x` marker are the same
//! address.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// A 160-bit address in canonical form.
///
/// Stored as raw bytes; ordering and hashing follow the bytes, which is
/// identical to lexicographic ordering of the canonical lowercase hex form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    bytes: [u8; 20],
}

impl Address {
    /// Parse a candidate string into a canonical address.
    ///
    /// A candidate is valid iff, after trimming surrounding whitespace and
    /// stripping an optional `0x`/`0X` marker, exactly 40 case-insensitive
    /// hex characters remain. Returns `None` for anything else; malformed
    /// entries are expected noise in real-world lists, so rejection is
    /// silent rather than an error.
    pub fn parse(candidate: &str) -> Option<Self> {
        let payload = strip_marker(candidate.trim());
        if payload.len() != 40 || !payload.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let raw = payload.as_bytes();
        let mut bytes = [0u8; 20];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = (nibble_value(raw[2 * i]) << 4) | nibble_value(raw[2 * i + 1]);
        }
        Some(Self { bytes })
    }

    /// Build an address from its raw 160-bit value.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self { bytes }
    }

    /// The raw 160-bit value.
    pub fn bytes(&self) -> &[u8; 20] {
        &self.bytes
    }

    /// The canonical 40-character lowercase hex payload (no marker).
    pub fn payload(&self) -> String {
        let mut out = String::with_capacity(40);
        for byte in &self.bytes {
            out.push(hex_digit(byte >> 4));
            out.push(hex_digit(byte & 0x0f));
        }
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.payload())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Casing pattern of a user-supplied address string.
///
/// A weak signal of tooling provenance: mixed case suggests deliberate
/// EIP-55-style checksumming, while uniform casing is typical of scripted
/// output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumStyle {
    Lower,
    Upper,
    Mixed,
}

impl ChecksumStyle {
    /// Classify the casing of a raw (pre-normalization) candidate string.
    ///
    /// Only letters carry case; a payload with no letters at all classifies
    /// as `Mixed`, matching the reference behavior.
    pub fn classify(candidate: &str) -> Self {
        let payload = strip_marker(candidate.trim());
        let has_lower = payload.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = payload.bytes().any(|b| b.is_ascii_uppercase());
        match (has_lower, has_upper) {
            (true, false) => ChecksumStyle::Lower,
            (false, true) => ChecksumStyle::Upper,
            _ => ChecksumStyle::Mixed,
        }
    }
}

impl fmt::Display for ChecksumStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChecksumStyle::Lower => "lower",
            ChecksumStyle::Upper => "upper",
            ChecksumStyle::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

/// Deduplicated view of a raw input list.
///
/// `unique` is sorted by canonical form; `styles` records, for each unique
/// address, the checksum style of its first valid occurrence in input order
/// (first-seen casing wins when duplicates disagree).
#[derive(Debug)]
pub struct DedupedInput {
    /// Sorted unique canonical addresses
    pub unique: Vec<Address>,
    /// First-seen checksum style per unique address
    pub styles: HashMap<Address, ChecksumStyle>,
    /// Count of valid inputs, duplicates included
    pub total_valid: usize,
}

impl DedupedInput {
    /// Number of valid inputs collapsed as duplicates.
    pub fn duplicates(&self) -> usize {
        self.total_valid - self.unique.len()
    }
}

/// Validate, canonicalize, and deduplicate a batch of candidate strings.
///
/// Invalid candidates are dropped. Duplicate canonical addresses collapse
/// to one entry, keeping the casing style of the first occurrence.
pub fn dedupe_first_seen<I, S>(candidates: I) -> DedupedInput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut styles: HashMap<Address, ChecksumStyle> = HashMap::new();
    let mut total_valid = 0;

    for candidate in candidates {
        let candidate = candidate.as_ref();
        if let Some(addr) = Address::parse(candidate) {
            total_valid += 1;
            styles
                .entry(addr)
                .or_insert_with(|| ChecksumStyle::classify(candidate));
        }
    }

    let mut unique: Vec<Address> = styles.keys().copied().collect();
    unique.sort_unstable();

    DedupedInput {
        unique,
        styles,
        total_valid,
    }
}

fn strip_marker(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

fn nibble_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => unreachable!("validated hex digit"),
    }
}

fn hex_digit(v: u8) -> char {
    match v {
        0..=9 => (b'0' + v) as char,
        _ => (b'a' + v - 10) as char,
    }
}
