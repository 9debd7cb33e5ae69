//! Precomputed jump tables, generated at build time (see `build.rs` and
//! `SPEC_FULL.md` §7b) rather than hand-transcribed: `TABLE[i][j]` holds
//! `t^(g * 8^i) mod phi(t)` for `g = j + 1`, as a 624-word polynomial.
//! `PHI_TERMS` holds the sorted nonzero term positions of `phi` itself
//! (including its leading term at degree 19937), as derived by
//! Berlekamp-Massey from the generator's own output sequence.

use super::poly::N_WORDS;

include!(concat!(env!("OUT_DIR"), "/mt19937_tables.rs"));
