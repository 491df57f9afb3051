//! # Bridge
//!
//! $$
//! X_s=\frac{b-s}{b-a}x_0+\frac{s-a}{b-a}x_1+\sqrt{\frac{(b-s)(s-a)}{b-a}}\,Z_s,
//! \qquad a=0,\ s=i\,\delta
//! $$
//!
//! Brownian bridges pinned at both ends of `[a, b]`. The default grid is one
//! month (`b = 1/12`) sampled daily (`δ = 1/252`) with 20 interior points, so
//! a path has 22 columns.
//!
use ndarray::Array2;
use ndarray::ArrayView1;
use ndarray::ArrayViewMut1;
use tracing::debug;

use crate::error::PathError;
use crate::error::Result;
use crate::rng::PathRng;
use crate::stochastic::noise::cgns::CGNS;
use crate::stochastic::noise::gn::Gn;
use crate::traits::FloatExt;
use crate::traits::ProcessExt;

/// Default bridge horizon, one month.
pub const TOTAL_DURATION: f64 = 1.0 / 12.0;
/// Default interior point count.
pub const SUB_STEP_COUNT: usize = 20;
/// Default interior spacing, one trading day.
pub const SUB_DT: f64 = 1.0 / 252.0;

/// Time grid of a bridge.
///
/// Interior point `i` (1-based) sits at `s = i · sub_dt`; the bridge runs
/// from `a = 0` to `b = total_duration`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BridgeConfig<T: FloatExt> {
  pub total_duration: T,
  pub sub_step_count: usize,
  pub sub_dt: T,
}

impl<T: FloatExt> Default for BridgeConfig<T> {
  fn default() -> Self {
    Self {
      total_duration: T::from_f64_(TOTAL_DURATION),
      sub_step_count: SUB_STEP_COUNT,
      sub_dt: T::from_f64_(SUB_DT),
    }
  }
}

impl<T: FloatExt> BridgeConfig<T> {
  pub fn new(total_duration: T, sub_step_count: usize, sub_dt: T) -> Result<Self> {
    let config = Self {
      total_duration,
      sub_step_count,
      sub_dt,
    };
    config.validate()?;
    Ok(config)
  }

  /// Every interior time must fall strictly inside `(0, total_duration)`.
  pub fn validate(&self) -> Result<()> {
    if !self.total_duration.is_finite() || self.total_duration <= T::zero() {
      return Err(PathError::invalid("total_duration", "must be finite and > 0"));
    }
    if !self.sub_dt.is_finite() || self.sub_dt <= T::zero() {
      return Err(PathError::invalid("sub_dt", "must be finite and > 0"));
    }
    let last = T::from_usize_(self.sub_step_count) * self.sub_dt;
    if last >= self.total_duration {
      return Err(PathError::invalid(
        "sub_step_count",
        format!(
          "last interior time {last} must be < total_duration {}",
          self.total_duration
        ),
      ));
    }
    Ok(())
  }

  /// Columns in a bridge path: both endpoints plus the interior points.
  pub fn path_len(&self) -> usize {
    self.sub_step_count + 2
  }

  /// Conditional variance `(b - s)(s - a) / (b - a)` at interior index `i`.
  pub fn variance_at(&self, i: usize) -> T {
    let (a, b) = (T::zero(), self.total_duration);
    let s = T::from_usize_(i) * self.sub_dt;
    (b - s) * (s - a) / (b - a)
  }

  /// Conditional mean at interior index `i`.
  pub fn mean_at(&self, i: usize, x0: T, x1: T) -> T {
    let (a, b) = (T::zero(), self.total_duration);
    let s = T::from_usize_(i) * self.sub_dt;
    ((b - s) / (b - a)) * x0 + ((s - a) / (b - a)) * x1
  }

  /// Writes one bridge into `row`. `z` holds one standard draw per interior
  /// point; the endpoints are copied, never computed.
  fn fill(&self, mut row: ArrayViewMut1<T>, x0: T, x1: T, z: ArrayView1<T>) {
    let last = self.sub_step_count + 1;
    row[0] = x0;
    row[last] = x1;
    for i in 1..last {
      row[i] = self.mean_at(i, x0, x1) + self.variance_at(i).sqrt() * z[i - 1];
    }
  }
}

/// Univariate bridge from `x0` to `x1`.
///
/// Fields are fixed at construction; the interior draw is sized from `config`.
pub struct BrownianBridge<T: FloatExt> {
  x0: T,
  x1: T,
  config: BridgeConfig<T>,
  gn: Gn<T>,
}

impl<T: FloatExt> BrownianBridge<T> {
  pub fn new(x0: T, x1: T) -> Self {
    let config = BridgeConfig::default();
    Self {
      x0,
      x1,
      config,
      gn: Gn::standard(1, config.sub_step_count),
    }
  }

  pub fn with_config(x0: T, x1: T, config: BridgeConfig<T>) -> Result<Self> {
    config.validate()?;
    Ok(Self {
      x0,
      x1,
      config,
      gn: Gn::standard(1, config.sub_step_count),
    })
  }

  pub fn x0(&self) -> T {
    self.x0
  }

  pub fn x1(&self) -> T {
    self.x1
  }

  pub fn config(&self) -> &BridgeConfig<T> {
    &self.config
  }
}

impl<T: FloatExt> ProcessExt<T> for BrownianBridge<T> {
  type Output = Array2<T>;

  /// Shape `(1, sub_step_count + 2)`.
  fn sample(&self, rng: &mut PathRng) -> Result<Self::Output> {
    let z = self.gn.sample(rng)?;
    let mut path = Array2::<T>::zeros((1, self.config.path_len()));
    self
      .config
      .fill(path.row_mut(0), self.x0, self.x1, z.row(0));
    Ok(path)
  }
}

/// `D` bridges whose interior draws are correlated through `Σ`.
///
/// Row `i` runs from `boundaries[i].0` to `boundaries[i].1` and uses row `i`
/// of the correlated block.
pub struct CorrelatedBrownianBridge<T: FloatExt> {
  boundaries: Vec<(T, T)>,
  config: BridgeConfig<T>,
  cgns: CGNS<T>,
}

impl<T: FloatExt> CorrelatedBrownianBridge<T> {
  pub fn new(boundaries: Vec<(T, T)>, corr: &Array2<T>) -> Result<Self> {
    Self::with_config(boundaries, corr, BridgeConfig::default())
  }

  pub fn with_config(
    boundaries: Vec<(T, T)>,
    corr: &Array2<T>,
    config: BridgeConfig<T>,
  ) -> Result<Self> {
    config.validate()?;
    if boundaries.len() != corr.nrows() {
      return Err(PathError::shape(
        "bridge boundaries vs correlation matrix",
        corr.nrows(),
        boundaries.len(),
      ));
    }
    let cgns = CGNS::standard(corr, config.sub_step_count)?;
    debug!(dim = boundaries.len(), "correlated brownian bridge configured");
    Ok(Self {
      boundaries,
      config,
      cgns,
    })
  }

  /// Two bridges, `x0 → x1` on row 0 and `y0 → y1` on row 1.
  pub fn bivariate(x0: T, x1: T, y0: T, y1: T, corr: &Array2<T>) -> Result<Self> {
    Self::new(vec![(x0, x1), (y0, y1)], corr)
  }

  pub fn boundaries(&self) -> &[(T, T)] {
    &self.boundaries
  }

  pub fn config(&self) -> &BridgeConfig<T> {
    &self.config
  }

  pub fn dim(&self) -> usize {
    self.cgns.dim()
  }
}

impl<T: FloatExt> ProcessExt<T> for CorrelatedBrownianBridge<T> {
  type Output = Array2<T>;

  /// Shape `(D, sub_step_count + 2)`.
  fn sample(&self, rng: &mut PathRng) -> Result<Self::Output> {
    let z = self.cgns.sample(rng)?;
    let mut paths = Array2::<T>::zeros((self.boundaries.len(), self.config.path_len()));
    for (i, &(x0, x1)) in self.boundaries.iter().enumerate() {
      self.config.fill(paths.row_mut(i), x0, x1, z.row(i));
    }
    Ok(paths)
  }
}

/// Bridge whose endpoints are drawn too.
///
/// `x0 = W(b)` and `x1 = W(2b)` come from a Brownian motion stepped by
/// `b = total_duration`; the path between them is then filled as a
/// [`BrownianBridge`].
pub struct AutoBrownianBridge<T: FloatExt> {
  config: BridgeConfig<T>,
  endpoints: Gn<T>,
  interior: Gn<T>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AutoBridgeSample<T: FloatExt> {
  pub x0: T,
  pub x1: T,
  pub path: Array2<T>,
}

impl<T: FloatExt> AutoBrownianBridge<T> {
  pub fn new() -> Self {
    let config = BridgeConfig::default();
    Self {
      config,
      endpoints: Gn::new(1, 2, config.total_duration),
      interior: Gn::standard(1, config.sub_step_count),
    }
  }

  pub fn with_config(config: BridgeConfig<T>) -> Result<Self> {
    config.validate()?;
    Ok(Self {
      config,
      endpoints: Gn::new(1, 2, config.total_duration),
      interior: Gn::standard(1, config.sub_step_count),
    })
  }

  pub fn config(&self) -> &BridgeConfig<T> {
    &self.config
  }
}

impl<T: FloatExt> Default for AutoBrownianBridge<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: FloatExt> ProcessExt<T> for AutoBrownianBridge<T> {
  type Output = AutoBridgeSample<T>;

  fn sample(&self, rng: &mut PathRng) -> Result<Self::Output> {
    let w = self.endpoints.sample(rng)?;
    let x0 = w[[0, 0]];
    let x1 = x0 + w[[0, 1]];

    let z = self.interior.sample(rng)?;
    let mut path = Array2::<T>::zeros((1, self.config.path_len()));
    self.config.fill(path.row_mut(0), x0, x1, z.row(0));
    Ok(AutoBridgeSample { x0, x1, path })
  }
}
