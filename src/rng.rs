//! # Rng
//!
//! $$
//! s_{k+1}=s_k+\gamma,\quad u_k=\mathrm{splitmix64}(s_k)
//! $$
//!
//! Explicit random source handed to every generator. Seeded handles give
//! bit-identical paths; unseeded handles draw their seed from a process-wide
//! counter so two handles created back to back never share a stream.
//!
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::OnceLock;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use rand::rngs::StdRng;
use rand::RngCore;
use rand::SeedableRng;

const SEED_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

#[inline(always)]
fn splitmix64_next(state: &mut u64) -> u64 {
  *state = state.wrapping_add(SEED_GAMMA);
  let mut z = *state;
  z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
  z ^ (z >> 31)
}

#[inline]
fn global_seed_counter() -> &'static AtomicU64 {
  static SEED_COUNTER: OnceLock<AtomicU64> = OnceLock::new();
  SEED_COUNTER.get_or_init(|| AtomicU64::new(initial_seed()))
}

#[inline]
fn next_global_seed() -> u64 {
  let mut seed = global_seed_counter().fetch_add(SEED_GAMMA, Ordering::Relaxed);
  splitmix64_next(&mut seed)
}

fn initial_seed() -> u64 {
  let t = SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_nanos())
    .unwrap_or(0);
  let t_lo = t as u64;
  let t_hi = (t >> 64) as u64;
  let pid = std::process::id() as u64;
  let mut seed = t_lo ^ t_hi.rotate_left(23) ^ pid.rotate_left(11);
  splitmix64_next(&mut seed)
}

/// Seedable pseudorandom source used by all path generators.
#[derive(Clone, Debug)]
pub struct PathRng {
  inner: StdRng,
  seed: u64,
}

impl PathRng {
  /// Same seed, same sequence.
  pub fn from_seed(seed: u64) -> Self {
    Self {
      inner: StdRng::seed_from_u64(seed),
      seed,
    }
  }

  /// Unseeded handle. The seed is still recorded so a run can be replayed.
  pub fn from_entropy() -> Self {
    Self::from_seed(next_global_seed())
  }

  pub fn seed(&self) -> u64 {
    self.seed
  }

  /// Splits off `n` independent child streams for parallel sampling.
  ///
  /// Child seeds are derived from one draw of the parent, so a seeded parent
  /// forks into the same children every time and the parent stream advances
  /// exactly once.
  pub fn fork(&mut self, n: usize) -> Vec<PathRng> {
    let mut state = self.inner.next_u64();
    (0..n)
      .map(|_| PathRng::from_seed(splitmix64_next(&mut state)))
      .collect()
  }
}

impl Default for PathRng {
  fn default() -> Self {
    Self::from_entropy()
  }
}

impl RngCore for PathRng {
  #[inline]
  fn next_u32(&mut self) -> u32 {
    self.inner.next_u32()
  }

  #[inline]
  fn next_u64(&mut self) -> u64 {
    self.inner.next_u64()
  }

  #[inline]
  fn fill_bytes(&mut self, dest: &mut [u8]) {
    self.inner.fill_bytes(dest)
  }

  #[inline]
  fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
    self.inner.try_fill_bytes(dest)
  }
}
