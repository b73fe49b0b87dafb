use serde_derive::Deserialize;

/// Cost of moving an actuator between two pitch slots.
///
/// Implementations must be pure: the same pair of slots always gives the same non negative cost.
pub trait Distance {
  fn distance(&self, from: usize, to: usize) -> f64;
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistancePolicy {
  /// Absolute difference between the slots
  #[serde(rename = "linear")]
  Linear,

  /// Squared difference, penalizes long jumps harder
  #[serde(rename = "square")]
  Square,
}

impl Distance for DistancePolicy {
  fn distance(&self, from: usize, to: usize) -> f64 {
    let delta = (from as f64 - to as f64).abs();
    match self {
      DistancePolicy::Linear => delta,
      DistancePolicy::Square => delta * delta,
    }
  }
}

impl<F> Distance for F
where
  F: Fn(usize, usize) -> f64,
{
  fn distance(&self, from: usize, to: usize) -> f64 {
    (self)(from, to)
  }
}

#[cfg(test)]
mod test {

  use super::{Distance, DistancePolicy};

  #[test]
  pub fn linear() {
    assert_eq!(DistancePolicy::Linear.distance(2, 7), 5.0);
    assert_eq!(DistancePolicy::Linear.distance(7, 2), 5.0);
    assert_eq!(DistancePolicy::Linear.distance(3, 3), 0.0);
  }

  #[test]
  pub fn square() {
    assert_eq!(DistancePolicy::Square.distance(2, 7), 25.0);
    assert_eq!(DistancePolicy::Square.distance(7, 2), 25.0);
    assert_eq!(DistancePolicy::Square.distance(0, 1), 1.0);
  }

  #[test]
  /// Plain closures can be used as distances
  pub fn closure() {
    let constant = |_from: usize, _to: usize| 3.0;
    assert_eq!(constant.distance(0, 10), 3.0);
  }
}
