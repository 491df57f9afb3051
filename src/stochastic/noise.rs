//! # Noise
//!
//! $$
//! \Delta W = \sqrt{\Delta t}\,Z,\qquad \Delta W^{\rho} = L\,\Delta W,\quad LL^\top=\Sigma
//! $$
//!
pub mod cgns;
pub mod gn;
