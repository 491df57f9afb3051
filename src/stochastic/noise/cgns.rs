//! # Cgns
//!
//! $$
//! \Delta W^{\rho}=L\,\sqrt{\Delta t}\,Z,\quad LL^\top=\Sigma
//! $$
//!
use nalgebra::DMatrix;
use ndarray::Array2;
use tracing::debug;
use tracing::warn;

use crate::error::PathError;
use crate::error::Result;
use crate::rng::PathRng;
use crate::stochastic::noise::gn::Gn;
use crate::traits::FloatExt;
use crate::traits::ProcessExt;

const DIAGONAL_TOLERANCE: f64 = 1e-6;

/// Lower-triangular factor `L` of a correlation matrix, `L L^T = Σ`.
///
/// `Σ` must have a unit diagonal; covariance matrices are rejected with
/// [`PathError::InvalidParameter`]. With a unit diagonal, positive
/// definiteness already bounds the off-diagonals to `(-1, 1)`. Only the lower
/// triangle of `Σ` is read, so symmetry is the caller's responsibility.
/// Singular and indefinite matrices are rejected with
/// [`PathError::Decomposition`]; nothing is regularised.
#[derive(Clone, Debug)]
pub struct CholeskyFactor<T: FloatExt> {
  l: Array2<T>,
}

impl<T: FloatExt> CholeskyFactor<T> {
  pub fn new(corr: &Array2<T>) -> Result<Self> {
    let dim = corr.nrows();
    if corr.ncols() != dim {
      return Err(PathError::shape("correlation matrix columns", dim, corr.ncols()));
    }
    if dim == 0 {
      return Err(PathError::invalid("correlation_matrix", "must be at least 1x1"));
    }
    if corr.iter().any(|v| !v.is_finite()) {
      return Err(PathError::invalid("correlation_matrix", "entries must be finite"));
    }
    let tol = T::from_f64_(DIAGONAL_TOLERANCE);
    if let Some(i) = (0..dim).find(|&i| (corr[[i, i]] - T::one()).abs() > tol) {
      return Err(PathError::invalid(
        "correlation_matrix",
        format!("diagonal entry {i} is {}, expected 1", corr[[i, i]]),
      ));
    }

    let sigma = DMatrix::<f64>::from_fn(dim, dim, |i, j| {
      corr[[i, j]].to_f64().unwrap_or(f64::NAN)
    });
    let chol = match sigma.cholesky() {
      Some(c) => c,
      None => {
        warn!(dim, "correlation matrix is not positive definite");
        return Err(PathError::Decomposition { dim });
      }
    };

    let l = chol.l();
    debug!(dim, "correlation factor computed");
    Ok(Self {
      l: Array2::from_shape_fn((dim, dim), |(i, j)| T::from_f64_(l[(i, j)])),
    })
  }

  pub fn dim(&self) -> usize {
    self.l.nrows()
  }

  pub fn l(&self) -> &Array2<T> {
    &self.l
  }

  /// `L · z`, one row of `z` per correlated component.
  pub fn inject(&self, z: &Array2<T>) -> Result<Array2<T>> {
    if z.nrows() != self.dim() {
      return Err(PathError::shape("correlated draw rows", self.dim(), z.nrows()));
    }
    Ok(self.l.dot(z))
  }
}

/// Correlated Gaussian block of shape `(D, cols)`.
///
/// Each column is a draw from `N(0, dt · Σ)`. Used by both the correlated
/// motion and the correlated bridge, whatever `D` is.
#[derive(Clone, Debug)]
pub struct CGNS<T: FloatExt> {
  factor: CholeskyFactor<T>,
  gn: Gn<T>,
}

impl<T: FloatExt> CGNS<T> {
  pub fn new(corr: &Array2<T>, cols: usize, dt: T) -> Result<Self> {
    let factor = CholeskyFactor::new(corr)?;
    let gn = Gn::new(factor.dim(), cols, dt);
    Ok(Self { factor, gn })
  }

  /// Unit-variance block, `dt = 1`.
  pub fn standard(corr: &Array2<T>, cols: usize) -> Result<Self> {
    Self::new(corr, cols, T::one())
  }

  pub fn dim(&self) -> usize {
    self.factor.dim()
  }

  pub fn cols(&self) -> usize {
    self.gn.cols
  }

  pub fn dt(&self) -> T {
    self.gn.dt
  }

  pub fn factor(&self) -> &CholeskyFactor<T> {
    &self.factor
  }
}

impl<T: FloatExt> ProcessExt<T> for CGNS<T> {
  type Output = Array2<T>;

  fn sample(&self, rng: &mut PathRng) -> Result<Self::Output> {
    let z = self.gn.sample(rng)?;
    self.factor.inject(&z)
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;
  use ndarray::Array1;
  use tracing_test::traced_test;

  use super::*;

  fn sample_corr(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    let (ma, mb) = (a.mean().unwrap(), b.mean().unwrap());
    let cov = a.iter().zip(b.iter()).map(|(x, y)| (x - ma) * (y - mb)).sum::<f64>();
    let va = a.iter().map(|x| (x - ma).powi(2)).sum::<f64>();
    let vb = b.iter().map(|y| (y - mb).powi(2)).sum::<f64>();
    cov / (va * vb).sqrt()
  }

  #[test]
  fn factor_reproduces_matrix() {
    let corr = array![[1.0, 0.5, 0.2], [0.5, 1.0, 0.3], [0.2, 0.3, 1.0]];
    let f = CholeskyFactor::new(&corr).unwrap();
    let l = f.l();
    for i in 0..3 {
      for j in (i + 1)..3 {
        assert_eq!(l[[i, j]], 0.0);
      }
    }
    let rebuilt = l.dot(&l.t());
    for (a, b) in rebuilt.iter().zip(corr.iter()) {
      assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
    }
  }

  #[test]
  fn identity_factor_is_identity() {
    let corr = Array2::<f64>::eye(4);
    let f = CholeskyFactor::new(&corr).unwrap();
    assert_eq!(f.l(), &corr);
  }

  #[test]
  #[traced_test]
  fn invalid_correlation_is_decomposition_error() {
    let corr = array![[1.0, 2.0], [2.0, 1.0]];
    let err = CholeskyFactor::new(&corr).unwrap_err();
    assert_eq!(err, PathError::Decomposition { dim: 2 });
    assert!(logs_contain("not positive definite"));
  }

  #[test]
  fn non_square_is_shape_error() {
    let corr = Array2::<f64>::zeros((2, 3));
    assert!(matches!(
      CholeskyFactor::new(&corr),
      Err(PathError::Shape { .. })
    ));
  }

  #[test]
  fn nan_entry_is_rejected() {
    let corr = array![[1.0, f64::NAN], [f64::NAN, 1.0]];
    assert!(matches!(
      CholeskyFactor::new(&corr),
      Err(PathError::InvalidParameter { .. })
    ));
  }

  #[test]
  fn covariance_matrix_is_rejected() {
    let cov = array![[4.0, 0.0], [0.0, 4.0]];
    assert!(matches!(
      CholeskyFactor::new(&cov),
      Err(PathError::InvalidParameter {
        name: "correlation_matrix",
        ..
      })
    ));
    assert!(CGNS::new(&cov, 10, 0.01).is_err());
  }

  #[test]
  fn inject_checks_rows() {
    let corr = array![[1.0, 0.5], [0.5, 1.0]];
    let f = CholeskyFactor::new(&corr).unwrap();
    let z = Array2::<f64>::zeros((3, 4));
    assert_eq!(
      f.inject(&z).unwrap_err(),
      PathError::shape("correlated draw rows", 2, 3)
    );
  }

  #[test]
  fn cgns_block_correlation() {
    let mut rng = PathRng::from_seed(21);
    for &rho in &[0.0, 0.5, 0.9, -0.5] {
      let corr = array![[1.0, rho], [rho, 1.0]];
      let cgns = CGNS::standard(&corr, 50_000).unwrap();
      let block = cgns.sample(&mut rng).unwrap();
      assert_eq!(block.dim(), (2, 50_000));
      let r = sample_corr(&block.row(0).to_owned(), &block.row(1).to_owned());
      assert_abs_diff_eq!(r, rho, epsilon = 0.02);
      assert_abs_diff_eq!(block.row(1).var(1.0), 1.0, epsilon = 0.03);
    }
  }

  #[test]
  fn cgns_scaled_variance() {
    let dt = 1.0 / 252.0;
    let corr = array![[1.0, 0.3], [0.3, 1.0]];
    let cgns = CGNS::new(&corr, 50_000, dt).unwrap();
    let block = cgns.sample(&mut PathRng::from_seed(8)).unwrap();
    assert_abs_diff_eq!(block.row(0).var(1.0) / dt, 1.0, epsilon = 0.03);
    assert_abs_diff_eq!(block.row(1).var(1.0) / dt, 1.0, epsilon = 0.03);
  }
}
