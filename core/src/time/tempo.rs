use crate::time::Seconds;

const DEFAULT_MICROS_PER_BEAT: u32 = 500_000;

/// Tempo as carried by a MIDI file, in microseconds per quarter note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo(u32);

impl Tempo {
  pub fn new(micros_per_beat: u32) -> Tempo {
    Tempo(micros_per_beat)
  }

  pub fn get_micros_per_beat(&self) -> u32 {
    self.0
  }

  pub fn bpm(&self) -> f64 {
    60_000_000.0 / f64::from(self.0)
  }

  pub fn ticks_to_seconds(&self, ticks: u64, ticks_per_beat: u16) -> Seconds {
    ticks as f64 * f64::from(self.0) / (1_000_000.0 * f64::from(ticks_per_beat))
  }
}

impl Default for Tempo {
  fn default() -> Self {
    Tempo(DEFAULT_MICROS_PER_BEAT)
  }
}

impl From<Tempo> for u32 {
  fn from(item: Tempo) -> Self {
    item.0
  }
}

#[cfg(test)]
mod test {

  use super::Tempo;

  #[test]
  pub fn tempo_new() {
    let tempo = Tempo::new(600_000);
    assert_eq!(tempo.get_micros_per_beat(), 600_000);
    assert_eq!(u32::from(tempo), 600_000);
  }

  #[test]
  /// The default MIDI tempo is 120 beats per minute
  pub fn tempo_default() {
    let tempo = Tempo::default();
    assert_eq!(tempo.get_micros_per_beat(), 500_000);
    assert_eq!(tempo.bpm(), 120.0);
  }

  #[test]
  pub fn ticks_to_seconds() {
    let tempo = Tempo::default();
    assert_eq!(tempo.ticks_to_seconds(480, 480), 0.5);
    assert_eq!(tempo.ticks_to_seconds(960, 480), 1.0);
    assert_eq!(Tempo::new(250_000).ticks_to_seconds(480, 480), 0.25);
  }
}
