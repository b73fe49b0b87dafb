use crate::time::{Frames, Seconds};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRate(f64);

impl FrameRate {
  pub fn new(fps: f64) -> FrameRate {
    FrameRate(fps)
  }

  pub fn fps(&self) -> f64 {
    self.0
  }

  pub fn is_valid(&self) -> bool {
    self.0.is_finite() && self.0 > 0.0
  }

  pub fn to_frames(&self, seconds: Seconds) -> Frames {
    seconds * self.0
  }

  pub fn to_seconds(&self, frames: Frames) -> Seconds {
    frames / self.0
  }
}

impl From<FrameRate> for f64 {
  fn from(item: FrameRate) -> Self {
    item.0
  }
}
