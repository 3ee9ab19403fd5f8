//! CLI integration tests for tunimake.
//!
//! The fake toolchain is `/bin/sh`, so these only run on unix.

#![cfg(unix)]

mod build_tests;
mod common;
