//! # Cbms
//!
//! $$
//! dW_t=L\,dB_t,\quad LL^\top=\Sigma
//! $$
//!
use ndarray::Array2;
use tracing::debug;

use crate::error::PathError;
use crate::error::Result;
use crate::rng::PathRng;
use crate::stochastic::noise::cgns::CGNS;
use crate::stochastic::process::check_dt;
use crate::stochastic::process::cumsum_time;
use crate::traits::FloatExt;
use crate::traits::ProcessExt;

/// Brownian motions whose increments are correlated through `Σ`.
///
/// Row `i` of the output follows row/column `i` of the correlation matrix,
/// so `m` must equal its dimension. Like [`BM`](super::bm::BM), column 0 is
/// the first increment.
pub struct CBMS<T: FloatExt> {
  /// Number of correlated components.
  m: usize,
  /// Number of time steps per path.
  n: usize,
  dt: T,
  cgns: CGNS<T>,
}

impl<T: FloatExt> CBMS<T> {
  pub fn new(m: usize, n: usize, dt: T, corr: &Array2<T>) -> Result<Self> {
    check_dt("dt", dt)?;
    if corr.nrows() != m {
      return Err(PathError::shape("correlation matrix rows vs simulations", m, corr.nrows()));
    }
    let cgns = CGNS::new(corr, n, dt)?;
    debug!(m, n, "correlated brownian motion configured");
    Ok(Self { m, n, dt, cgns })
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

impl<T: FloatExt> ProcessExt<T> for CBMS<T> {
  type Output = Array2<T>;

  fn sample(&self, rng: &mut PathRng) -> Result<Self::Output> {
    let increments = self.cgns.sample(rng)?;
    Ok(cumsum_time(increments))
  }
}
