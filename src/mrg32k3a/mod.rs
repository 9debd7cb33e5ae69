//! MRG32k3a: a combined multiple-recursive generator over two prime moduli,
//! with matrix-exponentiation jump-ahead.

mod matrix;
mod tables;

use matrix::{identity, mat_mul_mod, mat_vec_mod, Matrix3};

pub(crate) const M1: u64 = 4_294_967_087;
pub(crate) const M2: u64 = 4_294_944_443;

const A12: u64 = 1_403_580;
const A13_ABS: u64 = 810_728;
const A21: u64 = 527_612;
const A23_ABS: u64 = 1_370_589;

const ADD1: u64 = M1 * A13_ABS;
const ADD2: u64 = M2 * A23_ABS;

const BASE8_LEVELS: usize = 21;

pub(crate) const MIN: u32 = 0;
pub(crate) const MAX: u32 = (M1 - 1) as u32;

/// `1 / (m1 + 2)`, used by `get_double_pos`.
pub(crate) const POS_SCALE: f64 = 1.0 / (M1 as f64 + 2.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct State {
    s10: u64,
    s11: u64,
    s12: u64,
    s20: u64,
    s21: u64,
    s22: u64,
}

impl State {
    /// Seeds via six iterations of `x <- 69069*x + 1 mod 2^32`, the first
    /// three outputs reduced mod `m1`, the last three mod `m2`.
    pub(crate) fn seeded(seed: u64) -> Self {
        let mut x = seed & 0xFFFF_FFFF;
        let mut lcg_next = move || {
            x = (x.wrapping_mul(69_069).wrapping_add(1)) & 0xFFFF_FFFF;
            x
        };

        let x1 = lcg_next();
        let x2 = lcg_next();
        let x3 = lcg_next();
        let x4 = lcg_next();
        let x5 = lcg_next();
        let x6 = lcg_next();

        State {
            s10: x1 % M1,
            s11: x2 % M1,
            s12: x3 % M1,
            s20: x4 % M2,
            s21: x5 % M2,
            s22: x6 % M2,
        }
    }

    /// Advances the state by one step and returns the combined output.
    pub(crate) fn next_u32(&mut self) -> u32 {
        let p1 = (A12 * self.s11 + ADD1 - A13_ABS * self.s10) % M1;
        let p2 = (A21 * self.s22 + ADD2 - A23_ABS * self.s20) % M2;

        self.s10 = self.s11;
        self.s11 = self.s12;
        self.s12 = p1;

        self.s20 = self.s21;
        self.s21 = self.s22;
        self.s22 = p2;

        (if p1 <= p2 { p1 + M1 - p2 } else { p1 - p2 }) as u32
    }

    pub(crate) fn get_double(&mut self) -> f64 {
        f64::from(self.next_u32()) * (1.0 / 4_294_967_296.0)
    }

    pub(crate) fn get_double_pos(&mut self) -> f64 {
        (f64::from(self.next_u32()) + 1.0) * POS_SCALE
    }

    /// Advances the state by `step` positions via matrix exponentiation.
    /// `step == 0` is a no-op, matching the zero-step idempotence
    /// invariant.
    pub(crate) fn jump(&mut self, step: u64) {
        if step == 0 {
            return;
        }

        let m1_matrix = jump_matrix(&tables::TABLE_1, step, M1);
        let m2_matrix = jump_matrix(&tables::TABLE_2, step, M2);

        let v1 = mat_vec_mod(&m1_matrix, [self.s10, self.s11, self.s12], M1);
        let v2 = mat_vec_mod(&m2_matrix, [self.s20, self.s21, self.s22], M2);

        self.s10 = v1[0];
        self.s11 = v1[1];
        self.s12 = v1[2];
        self.s20 = v2[0];
        self.s21 = v2[1];
        self.s22 = v2[2];
    }

    pub(crate) fn reset(&mut self, seed: u64, step: u64) {
        *self = State::seeded(seed);
        self.jump(step);
    }
}

impl rand_core::RngCore for State {
    fn next_u32(&mut self) -> u32 {
        State::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Composes the base-8 digits of `step` into `A^step mod m`, looking up
/// each nonzero digit's precomputed power. All factors are powers of the
/// same base matrix, so they commute and can be multiplied in any order.
fn jump_matrix(table: &[[Matrix3; 7]; BASE8_LEVELS], step: u64, m: u64) -> Matrix3 {
    let mut result = identity();
    let mut remaining = step;
    let mut level = 0;

    while remaining > 0 {
        let digit = (remaining & 7) as usize;
        if digit > 0 {
            debug_assert!(level < BASE8_LEVELS, "step exceeds the precomputed table range");
            result = mat_mul_mod(&result, &table[level][digit - 1], m);
        }
        remaining >>= 3;
        level += 1;
    }

    result
}
