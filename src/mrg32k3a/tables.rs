//! Precomputed jump tables, generated at build time (see `build.rs` and
//! `SPEC_FULL.md` §7b) rather than hand-transcribed: `TABLE_K[i][j]` holds
//! `A_k^(g * 8^i) mod m_k` for `g = j + 1`.

use super::matrix::Matrix3;

include!(concat!(env!("OUT_DIR"), "/mrg32k3a_tables.rs"));
