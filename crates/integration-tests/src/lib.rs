//! # integration-tests
//!
//! Cross-crate test suites live under `tests/`; this library target is
//! intentionally empty.
