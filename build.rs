//! Derives the precomputed jump tables numerically instead of
//! hand-transcribing them (see `SPEC_FULL.md` §7b), emitting generated
//! Rust source consumed via `include!` from `src/mrg32k3a/tables.rs` and
//! `src/mt19937/tables.rs`.
//!
//! The MT19937 minimal polynomial phi is not copied from a table of magic
//! constants; it is derived here via Berlekamp-Massey over GF(2) from a bit
//! sequence extracted from the generator's own untempered output, the same
//! mathematical object a hand-transcribed `phi_bit_pos` table would encode.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

#[path = "src/mrg32k3a/matrix.rs"]
mod mrg32k3a_matrix;

#[path = "src/mt19937/twist.rs"]
mod mt19937_twist;

#[path = "src/mt19937/poly.rs"]
mod mt19937_poly;

const BASE8_LEVELS: usize = 21;

fn main() {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR set by cargo");

    let mrg32k3a_src = generate_mrg32k3a_tables();
    fs::write(
        Path::new(&out_dir).join("mrg32k3a_tables.rs"),
        mrg32k3a_src,
    )
    .expect("write mrg32k3a_tables.rs");

    let mt19937_src = generate_mt19937_tables();
    fs::write(Path::new(&out_dir).join("mt19937_tables.rs"), mt19937_src).expect("write mt19937_tables.rs");

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/mrg32k3a/matrix.rs");
    println!("cargo:rerun-if-changed=src/mt19937/twist.rs");
    println!("cargo:rerun-if-changed=src/mt19937/poly.rs");
}

fn generate_mrg32k3a_tables() -> String {
    use mrg32k3a_matrix::companion_matrix;

    const M1: u64 = 4_294_967_087;
    const M2: u64 = 4_294_944_443;
    const A12: i64 = 1_403_580;
    const A13: i64 = -810_728;
    const A21: i64 = 527_612;
    const A23: i64 = -1_370_589;

    // Component 1: p1 = a12*s11 + a13*s10, a_near (a12) multiplies v[1].
    // Component 2: p2 = a21*s22 + a23*s20, a_near (a21) multiplies v[2]
    // instead — the two components are not the same shape.
    let base1 = companion_matrix(A12, A13, M1, 1);
    let base2 = companion_matrix(A21, A23, M2, 2);

    let table1 = build_matrix_table(&base1, M1);
    let table2 = build_matrix_table(&base2, M2);

    let mut out = String::new();
    out.push_str("pub(crate) static TABLE_1: [[Matrix3; 7]; 21] = ");
    write_matrix_table(&mut out, &table1);
    out.push_str(";\n");
    out.push_str("pub(crate) static TABLE_2: [[Matrix3; 7]; 21] = ");
    write_matrix_table(&mut out, &table2);
    out.push_str(";\n");
    out
}

fn build_matrix_table(
    base: &mrg32k3a_matrix::Matrix3,
    m: u64,
) -> Vec<[mrg32k3a_matrix::Matrix3; 7]> {
    use mrg32k3a_matrix::{mat_mul_mod, mat_pow_mod};

    let mut levels = Vec::with_capacity(BASE8_LEVELS);
    let mut base_pow = *base; // base^(8^0) = base^1

    for _ in 0..BASE8_LEVELS {
        let mut row = [mrg32k3a_matrix::identity(); 7];
        let mut cur = mrg32k3a_matrix::identity();
        for g in 0..7 {
            cur = mat_mul_mod(&cur, &base_pow, m);
            row[g] = cur;
        }
        levels.push(row);
        base_pow = mat_pow_mod(&base_pow, 8, m);
    }

    levels
}

fn write_matrix_table(out: &mut String, table: &[[mrg32k3a_matrix::Matrix3; 7]]) {
    out.push('[');
    for row in table {
        out.push('[');
        for m in row {
            write!(out, "[[{},{},{}],[{},{},{}],[{},{},{}]],",
                m[0][0], m[0][1], m[0][2],
                m[1][0], m[1][1], m[1][2],
                m[2][0], m[2][1], m[2][2],
            )
            .unwrap();
        }
        out.push_str("],");
    }
    out.push(']');
}

fn generate_mt19937_tables() -> String {
    let phi_terms = derive_phi_terms();

    let n_words = mt19937_poly::N_WORDS;
    let mut base_pow = vec![0u32; n_words];
    base_pow[0] = 0b10; // t^1

    let mut levels: Vec<[Vec<u32>; 7]> = Vec::with_capacity(BASE8_LEVELS);

    for _ in 0..BASE8_LEVELS {
        let mut row: [Vec<u32>; 7] = [
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        ];
        let mut cur = {
            let mut one = vec![0u32; n_words];
            one[0] = 1;
            one
        };
        for g in 0..7 {
            let wide = mt19937_poly::mul_balanced(&cur, &base_pow);
            cur = mt19937_poly::reduce_mod_phi(&wide, &phi_terms).to_vec();
            row[g] = cur.clone();
        }
        levels.push(row);

        // base_pow <- base_pow^8 mod phi, via three successive squarings.
        for _ in 0..3 {
            let wide = mt19937_poly::mul_balanced(&base_pow, &base_pow);
            base_pow = mt19937_poly::reduce_mod_phi(&wide, &phi_terms).to_vec();
        }
    }

    let mut out = String::new();
    writeln!(out, "pub(crate) const PHI_TERM_COUNT: usize = {};", phi_terms.len()).unwrap();
    out.push_str("pub(crate) static PHI_TERMS: [u32; PHI_TERM_COUNT] = [");
    for t in &phi_terms {
        write!(out, "{},", t).unwrap();
    }
    out.push_str("];\n");

    out.push_str("pub(crate) static TABLE: [[[u32; N_WORDS]; 7]; 21] = [");
    for row in &levels {
        out.push('[');
        for poly in row {
            out.push('[');
            for w in poly {
                write!(out, "{},", w).unwrap();
            }
            out.push_str("],");
        }
        out.push_str("],");
    }
    out.push_str("];\n");

    out
}

/// Runs the untempered MT19937 recurrence and extracts a bit sequence long
/// enough for Berlekamp-Massey to recover the degree-19937 minimal
/// polynomial, then converts the recurrence coefficients into phi's sparse
/// term positions (see `SPEC_FULL.md` §4.3/§7b).
fn derive_phi_terms() -> Vec<u32> {
    use mt19937_twist::{seed_state, twist, N};

    const DEGREE: usize = 19_937;
    const SEQ_LEN: usize = 2 * DEGREE + 64;

    let mut mt = seed_state(1);
    let mut idx = N;
    let mut bits = Vec::with_capacity(SEQ_LEN);

    for _ in 0..SEQ_LEN {
        if idx == N {
            twist(&mut mt);
            idx = 0;
        }
        bits.push((mt[idx] & 1) as u8);
        idx += 1;
    }

    let c = berlekamp_massey_gf2(&bits);
    let l = c.len() - 1; // c[0] == 1, c has length l + 1

    let mut terms = Vec::new();
    terms.push(l as u32); // leading term of phi, at degree l
    for (j, &bit) in c.iter().enumerate().skip(1) {
        if bit == 1 {
            terms.push((l - j) as u32);
        }
    }
    terms.sort_unstable();
    terms
}

/// Classic Berlekamp-Massey over GF(2): finds the shortest linear recurrence
/// `s_i = c_1 s_{i-1} + ... + c_L s_{i-L}` generating `s`, returned as
/// `[1, c_1, ..., c_L]`.
fn berlekamp_massey_gf2(s: &[u8]) -> Vec<u8> {
    let n = s.len();
    let mut c = vec![0u8; n + 1];
    let mut b = vec![0u8; n + 1];
    c[0] = 1;
    b[0] = 1;
    let mut l = 0usize;
    let mut m = 1usize;

    for i in 0..n {
        let mut d = s[i];
        for j in 1..=l {
            d ^= c[j] & s[i - j];
        }

        if d == 0 {
            m += 1;
        } else if 2 * l <= i {
            let t = c.clone();
            for j in 0..b.len() {
                if j + m < c.len() {
                    c[j + m] ^= b[j];
                }
            }
            l = i + 1 - l;
            b = t;
            m = 1;
        } else {
            for j in 0..b.len() {
                if j + m < c.len() {
                    c[j + m] ^= b[j];
                }
            }
            m += 1;
        }
    }

    c.truncate(l + 1);
    c
}
