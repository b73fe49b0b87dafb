pub mod frame_rate;
pub mod tempo;

pub use self::frame_rate::FrameRate;
pub use self::tempo::Tempo;

pub type Seconds = f64;

/// Absolute or relative time expressed in animation frames
pub type Frames = f64;
