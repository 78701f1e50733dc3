use subtle::{Choice, ConstantTimeEq};

/// Compare two byte strings without leaking where they first differ.
///
/// Returns `true` iff both have the same length and identical contents. The
/// length difference is folded into the same accumulator as the byte
/// differences, and the loop covers `min(a.len(), b.len())` bytes without
/// branching on the accumulator.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    !bool::from(fold_diff(a, b, |_| {}))
}

fn fold_diff(a: &[u8], b: &[u8], mut on_round: impl FnMut(usize)) -> Choice {
    let mut diff = Choice::from(u8::from(a.len() != b.len()));

    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        on_round(i);
        diff |= !x.ct_eq(y);
    }

    diff
}
