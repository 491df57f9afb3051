use ndarray::Array2;
use rand::Rng;

use crate::error::Result;
use crate::rng::PathRng;
use crate::traits::FloatExt;
use crate::traits::ProcessExt;

/// Block of i.i.d. Gaussian increments with variance `dt`.
///
/// `Gn::standard` is the plain N(0, 1) sampler; `Gn::new` scales the same
/// draws by `sqrt(dt)`.
#[derive(Copy, Clone, Debug)]
pub struct Gn<T: FloatExt> {
  pub rows: usize,
  pub cols: usize,
  pub dt: T,
}

impl<T: FloatExt> Gn<T> {
  pub fn new(rows: usize, cols: usize, dt: T) -> Self {
    Gn { rows, cols, dt }
  }

  pub fn standard(rows: usize, cols: usize) -> Self {
    Self::new(rows, cols, T::one())
  }

  pub fn shape(&self) -> (usize, usize) {
    (self.rows, self.cols)
  }

  /// Works with any `Rng`, not only [`PathRng`].
  pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Array2<T> {
    let mut out = T::standard_normal_array(self.shape(), rng);
    if self.dt != T::one() {
      let std_dev = self.dt.sqrt();
      out.mapv_inplace(|z| z * std_dev);
    }
    out
  }
}

impl<T: FloatExt> ProcessExt<T> for Gn<T> {
  type Output = Array2<T>;

  fn sample(&self, rng: &mut PathRng) -> Result<Self::Output> {
    Ok(self.sample_with(rng))
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;

  #[test]
  fn gn_has_requested_shape() {
    let mut rng = PathRng::from_seed(1);
    let z = Gn::<f64>::standard(3, 17).sample(&mut rng).unwrap();
    assert_eq!(z.dim(), (3, 17));
  }

  #[test]
  fn gn_empty_shape_is_empty() {
    let mut rng = PathRng::from_seed(1);
    let z = Gn::<f64>::standard(0, 5).sample(&mut rng).unwrap();
    assert_eq!(z.len(), 0);
  }

  #[test]
  fn gn_standard_moments() {
    let mut rng = PathRng::from_seed(11);
    let z = Gn::<f64>::standard(1, 200_000).sample(&mut rng).unwrap();
    let mean = z.mean().unwrap();
    let var = z.var(1.0);
    assert_abs_diff_eq!(mean, 0.0, epsilon = 0.01);
    assert_abs_diff_eq!(var, 1.0, epsilon = 0.02);
  }

  #[test]
  fn gn_scaled_variance_is_dt() {
    let dt = 1.0 / 252.0;
    let mut rng = PathRng::from_seed(12);
    let z = Gn::<f64>::new(4, 50_000, dt).sample(&mut rng).unwrap();
    assert_abs_diff_eq!(z.var(1.0) / dt, 1.0, epsilon = 0.02);
  }

  #[test]
  fn gn_scaling_reuses_the_same_draws() {
    let dt = 0.25f64;
    let z = Gn::<f64>::standard(2, 8).sample(&mut PathRng::from_seed(5)).unwrap();
    let w = Gn::<f64>::new(2, 8, dt).sample(&mut PathRng::from_seed(5)).unwrap();
    for (a, b) in z.iter().zip(w.iter()) {
      assert_abs_diff_eq!(a * 0.5, *b, epsilon = 1e-15);
    }
  }

  #[test]
  fn gn_f32_shape() {
    let mut rng = PathRng::from_seed(3);
    let z = Gn::<f32>::standard(2, 9).sample(&mut rng).unwrap();
    assert_eq!(z.dim(), (2, 9));
    assert!(z.iter().all(|v| v.is_finite()));
  }
}
