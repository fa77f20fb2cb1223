//! Native stack headroom for nested method dispatch.
//!
//! Every language-level call runs through several Rust frames, so the
//! configured call depth alone cannot keep a thread's default stack from
//! running out. Dispatch grows the stack on demand instead.

/// Minimum stack space to keep available before entering a method body.
const RED_ZONE: usize = 128 * 1024;

/// Stack space allocated each time the red zone is reached.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
