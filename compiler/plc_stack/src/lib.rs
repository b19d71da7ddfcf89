//! Stack growth for deeply nested programs.
//!
//! The parser, analyzer and interpreter all recurse over the expression
//! tree. A program such as `((((...1...))))` or a long chain of recursive
//! calls can exhaust the native stack long before anything else goes wrong,
//! so each recursive entry point runs through [`ensure_sufficient_stack`].
//!
//! On wasm targets the guard is a plain call.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
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
