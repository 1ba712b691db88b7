//! Stack safety for deep tree traversals.
//!
//! Expression trees produced by query providers are frequently right-nested
//! (`a && (b && (c && ...))`), so a recursive visitor's stack depth grows
//! with the length of the chain. Every recursive entry point in the slim
//! crates goes through [`ensure_sufficient_stack`].
//!
//! # Platform Support
//!
//! - **Native targets**: grows the stack on demand with `stacker`.
//! - **WASM targets**: plain call; the host manages the stack.

/// Remaining stack below which we grow (128KB).
///
/// Visitor frames are larger than a parser's because each `walk_*` keeps
/// the visited children of the current node alive across the recursion.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (1MB).
pub const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than [`RED_ZONE`] remains.
///
/// ```text
/// fn visit(&mut self, node: &ExpressionSlim) -> Result<ExpressionSlim, Self::Error> {
///     ensure_sufficient_stack(|| dispatch(self, node))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
