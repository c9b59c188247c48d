//! Case-insensitive line comparison used by the merge step.
//!
//! Folding is ASCII only: each byte is lowered with `to_ascii_lowercase`
//! and the folded byte strings are compared lexicographically, with a
//! shorter string ordering before any longer string it prefixes. Non-ASCII
//! bytes compare by their raw value.

use std::cmp::Ordering;

/// Compare two lines ignoring ASCII case
#[inline]
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();

    // Identical bytes are equal under any folding
    if a == b {
        return Ordering::Equal;
    }

    for (&a_byte, &b_byte) in a.iter().zip(b) {
        match a_byte.to_ascii_lowercase().cmp(&b_byte.to_ascii_lowercase()) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// True when `a` sorts strictly before `b` ignoring case.
///
/// Equal lines are not "before" each other, which is what hands ties to the
/// right-hand run during a merge.
#[inline]
pub fn sorts_before(a: &str, b: &str) -> bool {
    compare_ignore_case(a, b) == Ordering::Less
}

/// Check that no adjacent pair of lines is out of order
pub fn is_sorted_ignore_case<S: AsRef<str>>(lines: &[S]) -> bool {
    lines
        .windows(2)
        .all(|pair| compare_ignore_case(pair[0].as_ref(), pair[1].as_ref()) != Ordering::Greater)
}
