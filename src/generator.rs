//! The uniform façade: a backend-erased handle over either core generator,
//! built from a capability trait plus a tagged-union dispatcher (§9 of the
//! design notes sanctions doing both together rather than picking one).

use crate::error::{ErrorCode, ErrorSlot};
use crate::{mrg32k3a, mt19937, MAX_STEP};

/// A zero seed is substituted with this fixed value and a
/// [`ErrorCode::SeedDefaulted`] warning.
const DEFAULT_SEED: u64 = 1;

/// Selects which core generator a [`Generator`] is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Mrg32k3a,
    Mt19937,
}

/// The operation set every backend's stream state exposes.
trait Stream {
    fn get(&mut self) -> u32;
    fn get_double(&mut self) -> f64;
    fn get_double_pos(&mut self) -> f64;
    fn jump(&mut self, step: u64);
    fn reset(&mut self, seed: u64, step: u64);
}

/// A single stream's state, tagged by backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamState {
    Mrg32k3a(mrg32k3a::State),
    Mt19937(mt19937::State),
}

impl StreamState {
    fn new(backend: Backend, seed: u64) -> Self {
        match backend {
            Backend::Mrg32k3a => StreamState::Mrg32k3a(mrg32k3a::State::seeded(seed)),
            Backend::Mt19937 => StreamState::Mt19937(mt19937::State::seeded(seed as u32)),
        }
    }
}

impl Stream for StreamState {
    fn get(&mut self) -> u32 {
        match self {
            StreamState::Mrg32k3a(s) => s.next_u32(),
            StreamState::Mt19937(s) => s.next_u32(),
        }
    }

    fn get_double(&mut self) -> f64 {
        match self {
            StreamState::Mrg32k3a(s) => s.get_double(),
            StreamState::Mt19937(s) => s.get_double(),
        }
    }

    fn get_double_pos(&mut self) -> f64 {
        match self {
            StreamState::Mrg32k3a(s) => s.get_double_pos(),
            StreamState::Mt19937(s) => s.get_double_pos(),
        }
    }

    fn jump(&mut self, step: u64) {
        match self {
            StreamState::Mrg32k3a(s) => s.jump(step),
            StreamState::Mt19937(s) => s.jump(step),
        }
    }

    fn reset(&mut self, seed: u64, step: u64) {
        match self {
            StreamState::Mrg32k3a(s) => s.reset(seed, step),
            StreamState::Mt19937(s) => s.reset(seed as u32, step),
        }
    }
}

/// A generator handle: a backend choice, its output range, and the owned
/// array of per-stream states. Destruction is ordinary `Drop`; [`destroy`]
/// is exposed only to keep the documented external surface intact.
#[derive(Debug)]
pub struct Generator {
    backend: Backend,
    min: u32,
    max: u32,
    streams: Vec<StreamState>,
}

impl Generator {
    /// Creates `max(nstream, 1)` streams of `backend`, seeded from `seed`
    /// (or a fixed default if `seed == 0`, with a [`ErrorCode::SeedDefaulted`]
    /// warning), with stream `i` starting `i * step` positions ahead of
    /// stream 0.
    ///
    /// # Errors
    ///
    /// Returns `None` and sets `err` to [`ErrorCode::StepTooLarge`] if
    /// `step` exceeds [`MAX_STEP`]. Short-circuits (returns `None` without
    /// touching `err`) if `err` already holds an error on entry.
    #[must_use]
    pub fn init(backend: Backend, seed: u64, nstream: usize, step: u64, err: &mut ErrorSlot) -> Option<Generator> {
        if err.should_short_circuit() {
            return None;
        }
        if step > MAX_STEP {
            err.set(ErrorCode::StepTooLarge);
            return None;
        }

        let (effective_seed, defaulted) = default_if_zero(seed);

        let (min, max) = match backend {
            Backend::Mrg32k3a => (mrg32k3a::MIN, mrg32k3a::MAX),
            Backend::Mt19937 => (mt19937::MIN, mt19937::MAX),
        };

        let mut streams = vec![StreamState::new(backend, effective_seed); nstream.max(1)];
        chain_from_first(&mut streams, step);

        if defaulted {
            err.set(ErrorCode::SeedDefaulted);
        }

        Some(Generator {
            backend,
            min,
            max,
            streams,
        })
    }

    #[must_use]
    pub const fn backend(&self) -> Backend {
        self.backend
    }

    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    /// The next integer output of `stream`, in `[min, max]`.
    pub fn get(&mut self, stream: usize) -> u32 {
        self.streams[stream].get()
    }

    /// The next output of `stream` as a double in `[0, 1)`.
    pub fn get_double(&mut self, stream: usize) -> f64 {
        self.streams[stream].get_double()
    }

    /// The next output of `stream` as a double in `(0, 1)`.
    pub fn get_double_pos(&mut self, stream: usize) -> f64 {
        self.streams[stream].get_double_pos()
    }

    /// Advances `stream` by `step` positions.
    ///
    /// # Errors
    ///
    /// Sets `err` to [`ErrorCode::StepTooLarge`] and leaves `stream`
    /// unchanged if `step` exceeds [`MAX_STEP`]. Short-circuits if `err`
    /// already holds an error on entry.
    pub fn jump(&mut self, stream: usize, step: u64, err: &mut ErrorSlot) {
        if err.should_short_circuit() {
            return;
        }
        if step > MAX_STEP {
            err.set(ErrorCode::StepTooLarge);
            return;
        }
        self.streams[stream].jump(step);
    }

    /// Advances every stream by the same `step`.
    ///
    /// # Errors
    ///
    /// Same as [`Generator::jump`], applied to every stream.
    pub fn jump_all(&mut self, step: u64, err: &mut ErrorSlot) {
        if err.should_short_circuit() {
            return;
        }
        if step > MAX_STEP {
            err.set(ErrorCode::StepTooLarge);
            return;
        }
        for s in &mut self.streams {
            s.jump(step);
        }
    }

    /// Re-seeds `stream` with `seed` (or the default if zero) and advances
    /// it by `step` from that freshly seeded position.
    ///
    /// # Errors
    ///
    /// Same as [`Generator::jump`]; also sets [`ErrorCode::SeedDefaulted`]
    /// if `seed == 0`.
    pub fn reset(&mut self, stream: usize, seed: u64, step: u64, err: &mut ErrorSlot) {
        if err.should_short_circuit() {
            return;
        }
        if step > MAX_STEP {
            err.set(ErrorCode::StepTooLarge);
            return;
        }

        let (effective_seed, defaulted) = default_if_zero(seed);
        self.streams[stream].reset(effective_seed, step);

        if defaulted {
            err.set(ErrorCode::SeedDefaulted);
        }
    }

    /// Re-seeds stream 0 with `seed` (or the default if zero), then
    /// rebuilds every other stream as at init: advancing each from the
    /// previous by `step`. Does not change the stream count or backend.
    ///
    /// # Errors
    ///
    /// Same as [`Generator::reset`].
    pub fn reset_all(&mut self, seed: u64, step: u64, err: &mut ErrorSlot) {
        if err.should_short_circuit() {
            return;
        }
        if step > MAX_STEP {
            err.set(ErrorCode::StepTooLarge);
            return;
        }

        let (effective_seed, defaulted) = default_if_zero(seed);
        self.streams[0].reset(effective_seed, 0);
        chain_from_first(&mut self.streams, step);

        if defaulted {
            err.set(ErrorCode::SeedDefaulted);
        }
    }
}

/// Releases `generator`. Ordinary `Drop` does the same; this free function
/// exists only to mirror the documented external surface.
pub fn destroy(generator: Generator) {
    drop(generator);
}

fn default_if_zero(seed: u64) -> (u64, bool) {
    if seed == 0 {
        (DEFAULT_SEED, true)
    } else {
        (seed, false)
    }
}

/// Rebuilds `streams[1..]` by advancing each from the previous by `step`,
/// leaving `streams[0]` as already seeded.
fn chain_from_first(streams: &mut [StreamState], step: u64) {
    for i in 1..streams.len() {
        let mut next = streams[i - 1];
        next.jump(step);
        streams[i] = next;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_nstream_is_unified_with_one() {
        let mut err = ErrorSlot::new();
        let g0 = Generator::init(Backend::Mrg32k3a, 7, 0, 100, &mut err).unwrap();
        let mut err = ErrorSlot::new();
        let g1 = Generator::init(Backend::Mrg32k3a, 7, 1, 100, &mut err).unwrap();
        assert_eq!(g0.stream_count(), g1.stream_count());
        assert_eq!(g0.stream_count(), 1);
    }

    #[test]
    fn zero_seed_is_defaulted_with_warning_and_handle_stays_valid() {
        let mut err = ErrorSlot::new();
        let defaulted = Generator::init(Backend::Mt19937, 0, 1, 0, &mut err);
        assert!(defaulted.is_some());
        assert_eq!(err.get(), Some(ErrorCode::SeedDefaulted));
        assert!(!err.should_short_circuit());

        let mut err2 = ErrorSlot::new();
        let explicit = Generator::init(Backend::Mt19937, DEFAULT_SEED, 1, 0, &mut err2);
        assert_eq!(err2.get(), None);

        let (mut defaulted, mut explicit) = (defaulted.unwrap(), explicit.unwrap());
        assert_eq!(defaulted.get(0), explicit.get(0));
    }

    #[test]
    fn step_too_large_leaves_handle_uncreated_and_sets_error() {
        let mut err = ErrorSlot::new();
        let g = Generator::init(Backend::Mrg32k3a, 1, 1, MAX_STEP + 1, &mut err);
        assert!(g.is_none());
        assert_eq!(err.get(), Some(ErrorCode::StepTooLarge));
    }

    #[test]
    fn error_slot_short_circuits_jump() {
        let mut err = ErrorSlot::new();
        let mut g = Generator::init(Backend::Mrg32k3a, 1, 1, 0, &mut err).unwrap();
        let before = g.get(0);

        err.set(ErrorCode::StepTooLarge);
        g.jump(0, 5, &mut err);

        // Jump was a no-op: the next output is still the one that would
        // have followed `before` with no intervening jump.
        let mut reference = Generator::init(Backend::Mrg32k3a, 1, 1, 0, &mut ErrorSlot::new()).unwrap();
        assert_eq!(reference.get(0), before);
        assert_eq!(g.get(0), reference.get(0));
    }

    #[test]
    fn jump_all_advances_every_stream_by_the_same_step() {
        let mut err = ErrorSlot::new();
        let mut g = Generator::init(Backend::Mt19937, 5, 3, 10, &mut err).unwrap();
        let mut reference = Generator::init(Backend::Mt19937, 5, 3, 10, &mut ErrorSlot::new()).unwrap();

        g.jump_all(20, &mut err);
        for i in 0..3 {
            reference.jump(i, 20, &mut ErrorSlot::new());
        }

        for i in 0..3 {
            assert_eq!(g.get(i), reference.get(i));
        }
    }

    #[test]
    fn multi_stream_concordance_against_single_stream_brute_force() {
        let n = 4usize;
        let step = 50u64;
        let mut multi = Generator::init(Backend::Mrg32k3a, 123, n, step, &mut ErrorSlot::new()).unwrap();
        let mut single = Generator::init(Backend::Mrg32k3a, 123, 1, 0, &mut ErrorSlot::new()).unwrap();

        let mut single_outputs = Vec::new();
        for _ in 0..(n as u64 * step) {
            single_outputs.push(single.get(0));
        }

        for i in 0..n {
            for j in 0..step as usize {
                let expected = single_outputs[i * step as usize + j];
                assert_eq!(multi.get(i), expected);
            }
        }
    }

    #[test]
    fn reset_all_rebuilds_the_chain_from_a_new_seed() {
        let mut err = ErrorSlot::new();
        let mut g = Generator::init(Backend::Mt19937, 1, 3, 30, &mut err).unwrap();
        g.reset_all(99, 30, &mut err);

        let mut reference = Generator::init(Backend::Mt19937, 99, 3, 30, &mut ErrorSlot::new()).unwrap();
        for i in 0..3 {
            assert_eq!(g.get(i), reference.get(i));
        }
    }
}
