//! Philox4x32-10 counter-based cipher
//!
//! 10-round Feistel-like bijection from Salmon et al. "Parallel Random Numbers:
//! As Easy as 1, 2, 3" (2011). A draw is a pure function of (key, counter), so
//! any element can be generated without touching the state of any other.

const PHILOX_M4X32_0: u32 = 0xD2511F53;
const PHILOX_M4X32_1: u32 = 0xCD9E8D57;
const PHILOX_W32_0: u32 = 0x9E3779B9;
const PHILOX_W32_1: u32 = 0xBB67AE85;

/// Philox4x32 round function
#[inline(always)]
fn philox_round(ctr: [u32; 4], key: [u32; 2]) -> [u32; 4] {
    let prod0 = (ctr[0] as u64).wrapping_mul(PHILOX_M4X32_0 as u64);
    let prod1 = (ctr[2] as u64).wrapping_mul(PHILOX_M4X32_1 as u64);

    [
        ((prod1 >> 32) as u32) ^ ctr[1] ^ key[0],
        prod1 as u32,
        ((prod0 >> 32) as u32) ^ ctr[3] ^ key[1],
        prod0 as u32,
    ]
}

/// Philox4x32-10: 10 rounds with a Weyl key schedule
#[inline(always)]
pub fn philox4x32_10(ctr: [u32; 4], key: [u32; 2]) -> [u32; 4] {
    let mut c = ctr;
    let mut k = key;

    for _ in 0..10 {
        c = philox_round(c, k);
        k[0] = k[0].wrapping_add(PHILOX_W32_0);
        k[1] = k[1].wrapping_add(PHILOX_W32_1);
    }

    c
}

/// Four random words for draw `local` of launch `epoch` on the stream keyed by `key`
///
/// Counter layout: words 0-1 hold the local index, words 2-3 the launch epoch.
#[inline(always)]
pub fn block(key: u64, local: u64, epoch: u64) -> [u32; 4] {
    let ctr = [
        local as u32,
        (local >> 32) as u32,
        epoch as u32,
        (epoch >> 32) as u32,
    ];
    philox4x32_10(ctr, [key as u32, (key >> 32) as u32])
}

#[cfg(test)]
mod tests {
    use super::*;

    // Known-answer vectors published with the Random123 library.
    #[test]
    fn test_known_answer_zero() {
        let out = philox4x32_10([0; 4], [0; 2]);
        assert_eq!(out, [0x6627e8d5, 0xe169c58d, 0xbc57ac4c, 0x9b00dbd8]);
    }

    #[test]
    fn test_known_answer_ones() {
        let out = philox4x32_10([u32::MAX; 4], [u32::MAX; 2]);
        assert_eq!(out, [0x408f276d, 0x41c83b0e, 0xa20bc7c6, 0x6d5451fd]);
    }

    #[test]
    fn test_block_is_pure() {
        assert_eq!(block(42, 7, 3), block(42, 7, 3));
    }

    #[test]
    fn test_block_separates_counter_fields() {
        let base = block(42, 0, 0);
        assert_ne!(base, block(42, 1, 0));
        assert_ne!(base, block(42, 0, 1));
        assert_ne!(base, block(43, 0, 0));
        // High halves of the 64-bit fields take part too.
        assert_ne!(base, block(42, 1 << 32, 0));
        assert_ne!(base, block(42, 0, 1 << 32));
        assert_ne!(base, block(1 << 32, 0, 0));
    }
}
