use crate::notes::Pitch;
use crate::time::Seconds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
  NoteOn,
  NoteOff,
  /// Any message that is not a note but still carries a time delta (tempo, controllers, ...)
  Other,
}

/// One entry of a chronological event stream. `delta` is the time elapsed since the previous entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
  pub kind: EventKind,
  pub pitch: Pitch,
  pub velocity: u8,
  pub delta: Seconds,
}

impl Event {
  pub fn note_on(pitch: Pitch, velocity: u8, delta: Seconds) -> Event {
    Event {
      kind: EventKind::NoteOn,
      pitch,
      velocity,
      delta,
    }
  }

  pub fn note_off(pitch: Pitch, delta: Seconds) -> Event {
    Event {
      kind: EventKind::NoteOff,
      pitch,
      velocity: 0,
      delta,
    }
  }

  pub fn other(delta: Seconds) -> Event {
    Event {
      kind: EventKind::Other,
      pitch: 0,
      velocity: 0,
      delta,
    }
  }

  pub fn is_note_start(&self) -> bool {
    self.kind == EventKind::NoteOn && self.velocity > 0
  }

  /// A note-on with zero velocity ends the note, same as a note-off
  pub fn is_note_end(&self) -> bool {
    match self.kind {
      EventKind::NoteOn => self.velocity == 0,
      EventKind::NoteOff => true,
      EventKind::Other => false,
    }
  }
}
