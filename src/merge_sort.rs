//! Top-down merge sort over owned lines
//!
//! The input is split by ownership (`Vec::split_off`) rather than copied,
//! the left half taking `ceil(n / 2)` elements. Every merge reports its
//! output size to the progress reporter once it completes, so reports
//! follow post-order completion of the split tree.
//!
//! Two traversals are provided. [`Traversal::Recursive`] uses the call
//! stack; [`Traversal::WorkStack`] keeps the pending splits and merges on a
//! heap-allocated stack instead. Both visit the split tree in the same
//! order and therefore produce the same lines and the same log.

use crate::compare::sorts_before;
use crate::config::Traversal;
use crate::progress::{Clock, ProgressReporter};
use tracing::debug;

/// Sort `input` case-insensitively with the chosen traversal
pub fn merge_sort<C: Clock>(
    input: Vec<String>,
    traversal: Traversal,
    reporter: &mut ProgressReporter<C>,
) -> Vec<String> {
    debug!(lines = input.len(), ?traversal, "starting merge sort");
    match traversal {
        Traversal::Recursive => sort_recursive(input, reporter),
        Traversal::WorkStack => sort_with_work_stack(input, reporter),
    }
}

/// Number of elements that go to the left half
#[inline]
fn left_len(len: usize) -> usize {
    len - len / 2
}

fn sort_recursive<C: Clock>(mut input: Vec<String>, reporter: &mut ProgressReporter<C>) -> Vec<String> {
    if input.len() <= 1 {
        return input;
    }

    let right = input.split_off(left_len(input.len()));
    let left = sort_recursive(input, reporter);
    let right = sort_recursive(right, reporter);
    merge(left, right, reporter)
}

/// Pending work for the explicit-stack traversal
enum Frame {
    /// Sort this run and push the result
    Split(Vec<String>),
    /// Pop two sorted runs (right on top) and push their merge
    Merge,
}

fn sort_with_work_stack<C: Clock>(input: Vec<String>, reporter: &mut ProgressReporter<C>) -> Vec<String> {
    let mut frames = vec![Frame::Split(input)];
    let mut sorted: Vec<Vec<String>> = Vec::new();

    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Split(mut run) => {
                if run.len() <= 1 {
                    sorted.push(run);
                    continue;
                }
                let right = run.split_off(left_len(run.len()));
                // Left is pushed last so it is sorted first, as in the recursion
                frames.push(Frame::Merge);
                frames.push(Frame::Split(right));
                frames.push(Frame::Split(run));
            }
            Frame::Merge => {
                // Both Split frames above this Merge have already pushed their runs
                debug_assert!(sorted.len() >= 2, "merge frame without two sorted runs");
                let right = sorted.pop().unwrap_or_default();
                let left = sorted.pop().unwrap_or_default();
                sorted.push(merge(left, right, reporter));
            }
        }
    }

    debug_assert_eq!(sorted.len(), 1, "work stack must leave exactly one run");
    sorted.pop().unwrap_or_default()
}

/// Merge two sorted runs.
///
/// The left element is taken only when it sorts strictly before the right
/// one, so lines that compare equal come out right-run first. This is the
/// ordering the tool has always produced; callers should not treat the
/// relative order of case variants as meaningful beyond being repeatable.
pub fn merge<C: Clock>(
    left: Vec<String>,
    right: Vec<String>,
    reporter: &mut ProgressReporter<C>,
) -> Vec<String> {
    let mut output = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (None, None) => break,
            (None, Some(_)) => false,
            (Some(_), None) => true,
            (Some(l), Some(r)) => sorts_before(l, r),
        };
        let next = if take_left { left.next() } else { right.next() };
        output.extend(next);
    }

    reporter.observe_merge(output.len());
    output
}
