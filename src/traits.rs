//! # Traits
//!
//! $$
//! \text{Trait contracts: }\mathcal{A}:(\text{params},\ \text{rng})\to\text{paths}
//! $$
//!
use std::fmt::Debug;
use std::fmt::Display;
use std::iter::Sum;
use std::ops::AddAssign;

use ndarray::Array2;
use ndarray::LinalgScalar;
use ndarray::ScalarOperand;
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::StandardNormal;
use rayon::prelude::*;

use crate::error::Result;
use crate::rng::PathRng;

pub trait FloatExt:
  num_traits::Float
  + num_traits::FromPrimitive
  + LinalgScalar
  + ScalarOperand
  + Sum
  + AddAssign
  + Default
  + Debug
  + Display
  + Send
  + Sync
  + 'static
{
  fn from_usize_(n: usize) -> Self;

  fn from_f64_(v: f64) -> Self;

  /// `shape` array of i.i.d. N(0, 1) draws.
  fn standard_normal_array<R: Rng + ?Sized>(shape: (usize, usize), rng: &mut R) -> Array2<Self>;
}

impl FloatExt for f64 {
  fn from_usize_(n: usize) -> Self {
    n as f64
  }

  fn from_f64_(v: f64) -> Self {
    v
  }

  fn standard_normal_array<R: Rng + ?Sized>(shape: (usize, usize), rng: &mut R) -> Array2<Self> {
    Array2::random_using(shape, StandardNormal, rng)
  }
}

impl FloatExt for f32 {
  fn from_usize_(n: usize) -> Self {
    n as f32
  }

  fn from_f64_(v: f64) -> Self {
    v as f32
  }

  fn standard_normal_array<R: Rng + ?Sized>(shape: (usize, usize), rng: &mut R) -> Array2<Self> {
    Array2::random_using(shape, StandardNormal, rng)
  }
}

pub trait ProcessExt<T: FloatExt>: Send + Sync {
  type Output: Send;

  fn sample(&self, rng: &mut PathRng) -> Result<Self::Output>;

  /// Draws `m` samples on the rayon pool. Each task owns a stream forked from
  /// `rng`, so the result is reproducible for a seeded parent.
  fn sample_par(&self, rng: &mut PathRng, m: usize) -> Result<Vec<Self::Output>> {
    rng
      .fork(m)
      .into_par_iter()
      .map(|mut child| self.sample(&mut child))
      .collect()
  }
}
