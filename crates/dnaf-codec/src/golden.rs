//! Golden vector tests for the fountain codec.
//!
//! These pin the deterministic behavior every transmitted stream depends on:
//! the PRNG sequence, the selector, and the full encode path for a reference
//! message. The vectors were cross-checked against an independent
//! implementation of the same pinned algorithms; a change here is a wire
//! format break.
