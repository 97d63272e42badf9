//! Structural features of a single address.
//!
//! Pure functions over the canonical 40-nibble payload. None of these look
//! at more than one address except [`hamming`], and none fail: feature
//! extraction is total over canonical addresses.

use crate::address::Address;

/// Hamming distance between two 160-bit addresses.
///
/// Computed as the popcount of the byte-wise XOR. Symmetric, and
/// `hamming(a, a) == 0`.
pub fn hamming(a: &Address, b: &Address) -> u32 {
    a.bytes()
        .iter()
        .zip(b.bytes().iter())
        .map(|(&x, &y)| (x ^ y).count_ones())
        .sum()
}

/// Longest run of identical consecutive nibbles in the payload.
///
/// Single left-to-right scan; always at least 1 for a non-empty payload.
pub fn max_run(payload: &str) -> usize {
    let bytes = payload.as_bytes();
    let mut max = 1;
    let mut cur = 1;
    for i in 1..bytes.len() {
        if bytes[i] == bytes[i - 1] {
            cur += 1;
            max = max.max(cur);
        } else {
            cur = 1;
        }
    }
    max
}

/// Shannon entropy of the payload in bits per nibble.
///
/// Uses a fixed 16-bucket frequency array over the nibble alphabet and the
/// standard `−Σ p·log2(p)`. Ranges over [0, 4.0]: a payload using a single
/// nibble value scores exactly 0, and 4.0 is the (unreachable in 40
/// symbols) uniform maximum.
pub fn shannon_entropy(payload: &str) -> f64 {
    let mut freq = [0usize; 16];
    for b in payload.bytes() {
        freq[nibble_value(b) as usize] += 1;
    }

    let n = payload.len() as f64;
    let mut entropy = 0.0;
    for &count in &freq {
        if count > 0 {
            let p = count as f64 / n;
            entropy -= p * p.log2();
        }
    }
    entropy
}

/// Whether the payload reads identically reversed.
pub fn is_palindrome(payload: &str) -> bool {
    let bytes = payload.as_bytes();
    bytes.iter().eq(bytes.iter().rev())
}

/// First four nibbles of the payload.
pub fn prefix4(payload: &str) -> &str {
    &payload[..4]
}

/// Last four nibbles of the payload.
pub fn suffix4(payload: &str) -> &str {
    &payload[payload.len() - 4..]
}

fn nibble_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}
