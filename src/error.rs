//! # Error
//!
//! $$
//! \Sigma = LL^\top \text{ undefined} \Rightarrow \texttt{Decomposition}
//! $$
//!
use thiserror::Error;

/// Failures raised by the path generators.
///
/// Every variant is a deterministic function of the inputs; nothing is
/// retried and no partial path is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
  #[error("correlation matrix ({dim}x{dim}) has no lower-triangular factor (not positive semi-definite)")]
  Decomposition { dim: usize },

  #[error("shape mismatch in {context}: expected {expected}, found {found}")]
  Shape {
    context: &'static str,
    expected: usize,
    found: usize,
  },

  #[error("invalid parameter `{name}`: {reason}")]
  InvalidParameter { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, PathError>;

impl PathError {
  pub(crate) fn shape(context: &'static str, expected: usize, found: usize) -> Self {
    PathError::Shape {
      context,
      expected,
      found,
    }
  }

  pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
    PathError::InvalidParameter {
      name,
      reason: reason.into(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn messages_name_the_failure() {
    let err = PathError::Decomposition { dim: 2 };
    assert!(err.to_string().contains("2x2"));

    let err = PathError::shape("correlated motion rows", 3, 2);
    assert_eq!(
      err.to_string(),
      "shape mismatch in correlated motion rows: expected 3, found 2"
    );

    let err = PathError::invalid("dt", "must be finite and > 0");
    assert!(err.to_string().contains("`dt`"));
  }
}
