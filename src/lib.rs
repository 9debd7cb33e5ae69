//! Multi-stream pseudo-random number generation with deterministic
//! jump-ahead, for bit-exact reproducibility of parallel Monte-Carlo runs
//! independent of thread count.
//!
//! Two backends are provided: [`Backend::Mrg32k3a`], a combined
//! multiple-recursive generator advanced via 3×3 matrix exponentiation
//! modulo two primes, and [`Backend::Mt19937`], the Mersenne Twister
//! advanced via GF(2) polynomial arithmetic modulo its degree-19937
//! minimal polynomial. Both support jumping a stream ahead by an
//! arbitrary number of steps in time logarithmic in the step count,
//! without generating the intervening outputs.
//!
//! # Examples
//!
//! ```
//! use jumpstream::{Backend, ErrorSlot, Generator};
//!
//! let mut err = ErrorSlot::new();
//! let mut gen = Generator::init(Backend::Mrg32k3a, 42, 4, 1_000_000, &mut err)
//!     .expect("init should not fail with a valid step");
//!
//! // Stream 2 starts 2_000_000 outputs into the base sequence.
//! let _first_output_of_stream_two = gen.get(2);
//! ```

#![deny(clippy::correctness)]
#![warn(clippy::style)]
#![warn(clippy::complexity)]
#![warn(clippy::perf)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::use_self)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
mod generator;
mod mrg32k3a;
mod mt19937;

pub use error::{ErrorCode, ErrorSlot};
pub use generator::{destroy, Backend, Generator};

/// Largest step a single jump may advance by. `step` is carried as `u64`
/// specifically so that values above this bound are representable and
/// therefore checkable; a `u63` domain could not express an out-of-range
/// step at all.
pub const MAX_STEP: u64 = (1u64 << 63) - 1;

/// Creates a generator handle. Thin wrapper over [`Generator::init`] kept
/// as a free function to mirror the documented external surface.
///
/// # Errors
///
/// See [`Generator::init`].
#[must_use]
pub fn init(backend: Backend, seed: u64, nstream: usize, step: u64, err: &mut ErrorSlot) -> Option<Generator> {
    Generator::init(backend, seed, nstream, step, err)
}
