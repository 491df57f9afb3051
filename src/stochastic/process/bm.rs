use ndarray::s;
use ndarray::Array2;
use tracing::debug;

use crate::error::Result;
use crate::rng::PathRng;
use crate::stochastic::noise::gn::Gn;
use crate::stochastic::process::check_dt;
use crate::stochastic::process::cumsum_time;
use crate::traits::FloatExt;
use crate::traits::ProcessExt;

/// Standard (driftless, unit variance) Brownian motion, `m` independent rows.
///
/// Column `k` holds `W(t_{k+1})`: the first column is already the first
/// increment, no `W(0) = 0` column is prepended. Use [`with_origin`] when the
/// starting point is needed.
pub struct BM<T: FloatExt> {
  /// Number of simulated paths.
  m: usize,
  /// Number of time steps per path.
  n: usize,
  dt: T,
  gn: Gn<T>,
}

impl<T: FloatExt> BM<T> {
  pub fn new(m: usize, n: usize, dt: T) -> Result<Self> {
    check_dt("dt", dt)?;
    debug!(m, n, "brownian motion configured");
    Ok(Self {
      m,
      n,
      dt,
      gn: Gn::new(m, n, dt),
    })
  }

  pub fn m(&self) -> usize {
    self.m
  }

  pub fn n(&self) -> usize {
    self.n
  }

  pub fn dt(&self) -> T {
    self.dt
  }
}

impl<T: FloatExt> ProcessExt<T> for BM<T> {
  type Output = Array2<T>;

  fn sample(&self, rng: &mut PathRng) -> Result<Self::Output> {
    let increments = self.gn.sample(rng)?;
    Ok(cumsum_time(increments))
  }
}

/// Copy of `paths` with a zero column in front, i.e. `W(0) = 0`.
pub fn with_origin<T: FloatExt>(paths: &Array2<T>) -> Array2<T> {
  let (rows, cols) = paths.dim();
  let mut out = Array2::<T>::zeros((rows, cols + 1));
  out.slice_mut(s![.., 1..]).assign(paths);
  out
}
