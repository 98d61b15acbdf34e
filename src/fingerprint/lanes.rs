//! Lane arithmetic for the movie hash.
//!
//! A window is folded into eight lanes, one per byte position modulo 8.
//! Lanes are plain `u64` sums while folding; they are only brought back to
//! byte range by the carry pass in [`combine`]. A 64 KiB window can add at
//! most `8192 * 255` to a lane, so `u64` never overflows here.

use super::Fingerprint;

/// Number of accumulator lanes (one per byte of a little-endian u64).
pub const LANES: usize = 8;

/// Eight accumulator lanes, lane 0 being the least significant byte.
pub type Lanes = [u64; LANES];

/// Fold a window of raw bytes into eight lanes.
///
/// Lane `i` is the sum of every byte at a position `p` with `p % 8 == i`.
/// An empty window folds to all zeros.
pub fn fold_window(bytes: &[u8]) -> Lanes {
    let mut lanes = [0u64; LANES];
    for (position, &byte) in bytes.iter().enumerate() {
        lanes[position % LANES] += u64::from(byte);
    }
    lanes
}

/// Seed lanes derived from the file size (little-endian bytes).
pub fn seed_lanes(size: u64) -> Lanes {
    size.to_le_bytes().map(u64::from)
}

/// Combine the size seed with the head and tail folds and serialize.
///
/// Both windows are always added, even when they cover the same bytes.
pub fn combine(size: u64, head: &Lanes, tail: &Lanes) -> Fingerprint {
    let mut lanes = seed_lanes(size);
    for (lane, (h, t)) in lanes.iter_mut().zip(head.iter().zip(tail)) {
        *lane += h + t;
    }
    propagate_carries(&mut lanes);
    Fingerprint(to_hex(&lanes))
}

/// Carry overflow upwards in increasing lane order, then mask every lane
/// to a byte. Lane 7's overflow is dropped.
fn propagate_carries(lanes: &mut Lanes) {
    for i in 0..LANES - 1 {
        lanes[i + 1] += lanes[i] / 256;
        lanes[i] %= 256;
    }
    lanes[LANES - 1] %= 256;
}

/// Lowercase hex, highest lane first.
fn to_hex(lanes: &Lanes) -> String {
    lanes.iter().rev().map(|lane| format!("{:02x}", lane)).collect()
}
