//! MT19937: the Mersenne Twister, with GF(2) polynomial jump-ahead.

mod poly;
mod tables;
mod twist;

pub(crate) const MIN: u32 = 0;
pub(crate) const MAX: u32 = u32::MAX;

/// `1 / (2^32 + 1)`, used by `get_double_pos`.
pub(crate) const POS_SCALE: f64 = 1.0 / 4_294_967_297.0;

const BASE8_LEVELS: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct State {
    mt: [u32; twist::N],
    idx: usize,
}

impl State {
    pub(crate) fn seeded(seed: u32) -> Self {
        State {
            mt: twist::seed_state(seed),
            idx: twist::N,
        }
    }

    pub(crate) fn next_u32(&mut self) -> u32 {
        if self.idx == twist::N {
            twist::twist(&mut self.mt);
            self.idx = 0;
        }
        let y = self.mt[self.idx];
        self.idx += 1;
        twist::temper(y)
    }

    pub(crate) fn get_double(&mut self) -> f64 {
        f64::from(self.next_u32()) * (1.0 / 4_294_967_296.0)
    }

    pub(crate) fn get_double_pos(&mut self) -> f64 {
        (f64::from(self.next_u32()) + 1.0) * POS_SCALE
    }

    /// Advances the state by `step` positions via GF(2) polynomial
    /// jump-ahead. `step == 0` is a no-op, matching the zero-step
    /// idempotence invariant.
    pub(crate) fn jump(&mut self, step: u64) {
        if step == 0 {
            return;
        }
        let g = build_jump_polynomial(step);
        self.apply_polynomial(&g);
    }

    pub(crate) fn reset(&mut self, seed: u32, step: u64) {
        self.mt = twist::seed_state(seed);
        self.idx = twist::N;
        self.jump(step);
    }

    /// Applies `g(t)`, the jump-ahead operator for some step count, to the
    /// current state via the Horner-style reconstruction of
    /// Haramoto-Matsumoto-L'Ecuyer (2008): advance `2*DEGREE` raw output
    /// bits, multiply by `g`, and rebuild the 624-word array from the
    /// resulting bit window.
    fn apply_polynomial(&mut self, g: &[u32; poly::N_WORDS]) {
        const K: usize = poly::DEGREE;

        let mut pm = vec![0u32; 2 * poly::N_WORDS];
        let mut mt_sim = self.mt;
        let mut idx_sim = self.idx;
        for k in 0..2 * K {
            if idx_sim == twist::N {
                twist::twist(&mut mt_sim);
                idx_sim = 0;
            }
            if mt_sim[idx_sim] & 1 == 1 {
                pm[k / 32] |= 1 << (k % 32);
            }
            idx_sim += 1;
        }

        let ph = poly::mul_unbalanced_2n_n(&pm, g);
        let r = extract_window(&ph, K, poly::N_WORDS);

        let n = twist::N as i64;
        let m = twist::M as i64;
        let mut mt = self.mt;
        let mut y0: u32 = 0;

        let mut i = (K + 1) as i64;
        while i >= n {
            let idx_a = i.rem_euclid(n) as usize;
            let idx_b = (i + m).rem_euclid(n) as usize;
            let mut y1 = mt[idx_a] ^ mt[idx_b];

            let coeff_idx = (i - n + 1) as usize;
            let coeff_bit = (r[coeff_idx / 32] >> (coeff_idx % 32)) & 1;
            y1 = if coeff_bit == 1 {
                ((y1 ^ twist::MATRIX_A) << 1) | 1
            } else {
                y1 << 1
            };

            let write_idx = (i + 1).rem_euclid(n) as usize;
            mt[write_idx] = (y0 & twist::UPPER_MASK) | (y1 & twist::LOWER_MASK);

            y0 = y1;
            i -= 1;
        }

        self.mt = mt;
        self.idx = 0;
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

/// Extracts an `n_words`-word window of `src` starting at bit `start_bit`,
/// handling the sub-word alignment shift.
fn extract_window(src: &[u32], start_bit: usize, n_words: usize) -> Vec<u32> {
    let word_offset = start_bit / 32;
    let shift = start_bit % 32;
    let mut out = vec![0u32; n_words];

    for i in 0..n_words {
        let lo = src.get(word_offset + i).copied().unwrap_or(0);
        let hi = src.get(word_offset + i + 1).copied().unwrap_or(0);
        out[i] = if shift == 0 {
            lo
        } else {
            (lo >> shift) | (hi << (32 - shift))
        };
    }

    out
}

/// Composes `t^step mod phi` via base-8 decomposition, exactly mirroring
/// the MRG32k3a matrix jump: every table factor is a power of the same
/// base polynomial, and `GF(2)[t]` is commutative, so factors combine in
/// any order.
fn build_jump_polynomial(step: u64) -> [u32; poly::N_WORDS] {
    let mut result = {
        let mut one = [0u32; poly::N_WORDS];
        one[0] = 1;
        one
    };

    let mut remaining = step;
    let mut level = 0;
    while remaining > 0 {
        let digit = (remaining & 7) as usize;
        if digit > 0 {
            debug_assert!(level < BASE8_LEVELS, "step exceeds the precomputed table range");
            let wide = poly::mul_balanced(&result, &tables::TABLE[level][digit - 1]);
            result = poly::reduce_mod_phi(&wide, &tables::PHI_TERMS);
        }
        remaining >>= 3;
        level += 1;
    }

    result
}
