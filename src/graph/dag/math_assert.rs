//! Debug-only mathematical assertion helpers.
//!
//! The graph modules use these helpers to keep ordering invariants explicit
//! while ensuring release builds remain unaffected.

/// Debug-asserts a mathematical invariant with a message.
#[inline(always)]
pub(crate) fn math_assert_msg(condition: bool, message: &str) {
    debug_assert!(condition, "Mathematical invariant violated: {}", message);
}
