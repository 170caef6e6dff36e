//! Engine behavior contract tests
//!
//! Each test pins the display produced by a canonical key sequence.
//! Scripts use `n` for +/-, `c` for C, `e` for CE and DEL (0x7f) for delete.
