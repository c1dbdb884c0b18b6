//! 弹性模块：请求重试所用的指数退避计时器。
//!
//! # Resilience Module
//!
//! Backoff state for the retry loop in [`crate::client::dispatch`].
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`backoff`] | Exponential backoff with jitter and per-attempt deadlines |
//!
//! Constants are module-level; the state (`retry_count`, deadline) lives in one
//! [`backoff::BackoffTimer`] per logical request and is never shared.

pub mod backoff;

pub use backoff::BackoffTimer;
