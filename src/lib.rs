//! # brownian-paths
//!
//! $$
//! W_{t+\Delta t}-W_t\sim\mathcal N(0,\Delta t),\qquad
//! X_s\mid X_a=x_0,\,X_b=x_1\sim\mathcal N\!\left(\tfrac{b-s}{b-a}x_0+\tfrac{s-a}{b-a}x_1,\ \tfrac{(b-s)(s-a)}{b-a}\right)
//! $$
//!
//! Sample paths of standard Brownian motion and Brownian bridges, optionally
//! cross-correlated through a Cholesky factor of a correlation matrix.
//!
//! | Module            | Description                                                   |
//! |-------------------|---------------------------------------------------------------|
//! | [`stochastic`]    | Increment samplers and path generators.                       |
//! | [`rng`]           | Seedable random source passed to every generator.             |
//! | [`error`]         | [`PathError`] and the crate `Result`.                         |
//! | [`traits`]        | [`FloatExt`] and [`ProcessExt`].                              |
//! | [`visualization`] | Plotly-backed and file/no-op path renderers.                  |
//!
//! ```rust
//! use brownian_paths::rng::PathRng;
//! use brownian_paths::stochastic::process::bridge::CorrelatedBrownianBridge;
//! use brownian_paths::traits::ProcessExt;
//! use ndarray::array;
//!
//! let mut rng = PathRng::from_seed(42);
//! let corr = array![[1.0, 0.9], [0.9, 1.0]];
//! let bridge = CorrelatedBrownianBridge::bivariate(1.0, 2.0, 3.0, 1.0, &corr)?;
//! let paths = bridge.sample(&mut rng)?;
//! assert_eq!(paths.dim(), (2, 22));
//! ```

pub mod error;
pub mod rng;
pub mod stochastic;
pub mod traits;
pub mod visualization;

pub use error::PathError;
pub use error::Result;
pub use rng::PathRng;
pub use traits::FloatExt;
pub use traits::ProcessExt;
