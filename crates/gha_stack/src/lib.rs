//! Stack growth for recursive walks over untrusted input.
//!
//! Event documents arrive from the CI runner and scripts arrive from users, so
//! neither the depth of a JSON tree nor the nesting of an expression is under
//! our control. Every recursive walk (the marshaller, the parser, the
//! evaluator) wraps its recursive step in [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand with `stacker`. On WASM the
//! closure is called directly.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn marshal(value: &Json) -> Result<Value, MarshalError> {
///     ensure_sufficient_stack(|| match value {
///         Json::Array(items) => items.iter().map(marshal).collect(),
///         ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// WASM version, calls `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
