//! # Process
//!
//! $$
//! W_{t_k}=\sum_{j\le k}\Delta W_j,\qquad
//! X_s=\tfrac{b-s}{b-a}x_0+\tfrac{s-a}{b-a}x_1+\sqrt{\tfrac{(b-s)(s-a)}{b-a}}\,Z
//! $$
//!
//! The free functions below are the short path for one-off calls; the
//! structs in the submodules are the reusable form.
//!
pub mod bm;
pub mod bridge;
pub mod cbms;

use ndarray::Array2;
use ndarray::Axis;

use crate::error::PathError;
use crate::error::Result;
use crate::rng::PathRng;
use crate::stochastic::process::bm::BM;
use crate::stochastic::process::bridge::BrownianBridge;
use crate::stochastic::process::bridge::CorrelatedBrownianBridge;
use crate::stochastic::process::cbms::CBMS;
use crate::traits::FloatExt;
use crate::traits::ProcessExt;

/// Running sum along the time axis, in place.
pub(crate) fn cumsum_time<T: FloatExt>(mut increments: Array2<T>) -> Array2<T> {
  increments.accumulate_axis_inplace(Axis(1), |&prev, curr| *curr += prev);
  increments
}

pub(crate) fn check_dt<T: FloatExt>(name: &'static str, dt: T) -> Result<()> {
  if !dt.is_finite() || dt <= T::zero() {
    return Err(PathError::invalid(name, format!("must be finite and > 0, got {dt}")));
  }
  Ok(())
}

/// `m` independent Brownian paths of `n` steps. See [`BM`].
pub fn generate_motion<T: FloatExt>(
  rng: &mut PathRng,
  m: usize,
  n: usize,
  dt: T,
) -> Result<Array2<T>> {
  BM::new(m, n, dt)?.sample(rng)
}

/// `m` Brownian paths correlated through `corr`. See [`CBMS`].
pub fn generate_correlated_motion<T: FloatExt>(
  rng: &mut PathRng,
  m: usize,
  n: usize,
  dt: T,
  corr: &Array2<T>,
) -> Result<Array2<T>> {
  CBMS::new(m, n, dt, corr)?.sample(rng)
}

/// Bridge from `x0` to `x1` on the default grid. See [`BrownianBridge`].
pub fn generate_bridge<T: FloatExt>(rng: &mut PathRng, x0: T, x1: T) -> Result<Array2<T>> {
  BrownianBridge::new(x0, x1).sample(rng)
}

/// Two correlated bridges, `x0 → x1` and `y0 → y1`. See [`CorrelatedBrownianBridge`].
pub fn generate_bivariate_bridge<T: FloatExt>(
  rng: &mut PathRng,
  x0: T,
  x1: T,
  y0: T,
  y1: T,
  corr: &Array2<T>,
) -> Result<Array2<T>> {
  CorrelatedBrownianBridge::bivariate(x0, x1, y0, y1, corr)?.sample(rng)
}
