//! Stack growth for recursive tree walks.
//!
//! Parsing nested brackets and parens, reordering infix operands and
//! exporting deep trees all recurse on the host stack. Wrapping the
//! recursive step in [`ensure_sufficient_stack`] moves it onto a freshly
//! allocated segment when the current one runs low.
//!
//! Evaluation does not need this: user-level recursion is driven by the
//! trampoline and never grows the host stack.
//!
//! On wasm32 the guard is a plain call.

/// Grow when less than this much stack is left.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
