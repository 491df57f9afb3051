//! # Stochastic Path Generation
//!
//! `stochastic` turns independent standard-normal draws into Brownian
//! increments, correlated increments, full Brownian paths and pinned
//! Brownian bridges.
//!
//! ## Modules
//!
//! | Module      | Description                                                              |
//! |-------------|--------------------------------------------------------------------------|
//! | [`noise`]   | Gaussian increment blocks, independent ([`noise::gn`]) and correlated ([`noise::cgns`]). |
//! | [`process`] | Brownian motion ([`process::bm`], [`process::cbms`]) and Brownian bridges ([`process::bridge`]). |
//!
//! ## Paths
//!
//! Every generator returns an `Array2` of shape `(rows, timesteps)`. Rows are
//! simulations (independent motion) or dimensions (correlated motion and
//! bridges); the column axis is time.
//!
//! ## Parallelism
//!
//! `sample_par()` runs on `rayon` with one forked [`PathRng`](crate::rng::PathRng)
//! per task.
//!
//! ## Example Usage
//!
//! ```rust
//! use brownian_paths::rng::PathRng;
//! use brownian_paths::stochastic::process::bm::BM;
//! use brownian_paths::traits::ProcessExt;
//!
//! let mut rng = PathRng::from_seed(1);
//! let bm = BM::<f64>::new(2, 1000, 1.0 / 252.0)?;
//! let paths = bm.sample(&mut rng)?;
//! ```

pub mod noise;
pub mod process;

pub use crate::traits::FloatExt;
pub use crate::traits::ProcessExt;

/// Default number of time steps
pub const N: usize = 1000;
/// Default step length (one trading day)
pub const DT: f64 = 1.0 / 252.0;
