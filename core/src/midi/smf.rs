use std::fs;
use std::path::Path;

use failure::Fail;
use log::debug;
use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

use crate::midi::events::{Event, EventKind};
use crate::notes::Pitch;
use crate::time::{Seconds, Tempo};

#[derive(Debug, Fail)]
pub enum SmfError {
  #[fail(display = "Failed to read {}: {}", path, cause)]
  Read { path: String, cause: String },

  #[fail(display = "Failed to parse the MIDI file: {}", cause)]
  Parse { cause: String },

  #[fail(display = "Invalid MIDI timing: {}", cause)]
  Timing { cause: String },
}

pub type SmfResult<T> = Result<T, SmfError>;

enum Message {
  Note(EventKind, Pitch, u8),
  Tempo(Tempo),
  Other,
}

impl<'a> From<&TrackEventKind<'a>> for Message {
  fn from(kind: &TrackEventKind<'a>) -> Self {
    match *kind {
      TrackEventKind::Midi { message, .. } => match message {
        MidiMessage::NoteOn { key, vel } => {
          Message::Note(EventKind::NoteOn, Pitch::from(key.as_int()), vel.as_int())
        }
        MidiMessage::NoteOff { key, vel } => {
          Message::Note(EventKind::NoteOff, Pitch::from(key.as_int()), vel.as_int())
        }
        _ => Message::Other,
      },
      TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => Message::Tempo(Tempo::new(tempo.as_int())),
      _ => Message::Other,
    }
  }
}

enum Clock {
  Metrical { ticks_per_beat: u16 },
  Timecode { ticks_per_second: f64 },
}

impl Clock {
  fn from_timing(timing: Timing) -> SmfResult<Clock> {
    match timing {
      Timing::Metrical(ticks_per_beat) if ticks_per_beat.as_int() > 0 => Ok(Clock::Metrical {
        ticks_per_beat: ticks_per_beat.as_int(),
      }),
      Timing::Metrical(_) => Err(SmfError::Timing {
        cause: "zero ticks per beat".to_string(),
      }),
      Timing::Timecode(fps, subframes) if subframes > 0 => Ok(Clock::Timecode {
        ticks_per_second: f64::from(fps.as_f32()) * f64::from(subframes),
      }),
      Timing::Timecode(_, _) => Err(SmfError::Timing {
        cause: "zero subframes per frame".to_string(),
      }),
    }
  }

  fn to_seconds(&self, ticks: u64, tempo: Tempo) -> Seconds {
    match *self {
      Clock::Metrical { ticks_per_beat } => tempo.ticks_to_seconds(ticks, ticks_per_beat),
      Clock::Timecode { ticks_per_second } => ticks as f64 / ticks_per_second,
    }
  }
}

pub fn read_file<P>(path: P) -> SmfResult<Vec<Event>>
where
  P: AsRef<Path>,
{
  let path = path.as_ref();
  let bytes = fs::read(path).map_err(|cause| SmfError::Read {
    path: path.display().to_string(),
    cause: cause.to_string(),
  })?;
  read_bytes(&bytes)
}

/// Decodes a Standard MIDI File into a single chronological event stream.
///
/// All the tracks are merged by absolute tick, keeping track order for events on the same tick.
/// Tick deltas are turned into seconds with the tempo in effect before each event.
pub fn read_bytes(bytes: &[u8]) -> SmfResult<Vec<Event>> {
  let smf = Smf::parse(bytes).map_err(|cause| SmfError::Parse {
    cause: cause.to_string(),
  })?;
  let clock = Clock::from_timing(smf.header.timing)?;

  let mut merged: Vec<(u64, Message)> = Vec::new();
  for track in smf.tracks.iter() {
    let mut tick: u64 = 0;
    for event in track.iter() {
      tick += u64::from(event.delta.as_int());
      merged.push((tick, Message::from(&event.kind)));
    }
  }
  merged.sort_by_key(|(tick, _)| *tick);

  let mut tempo = Tempo::default();
  let mut last_tick: u64 = 0;
  let mut events = Vec::with_capacity(merged.len());
  for (tick, message) in merged {
    let delta = clock.to_seconds(tick - last_tick, tempo);
    last_tick = tick;
    let event = match message {
      Message::Note(EventKind::NoteOn, pitch, velocity) => Event::note_on(pitch, velocity, delta),
      Message::Note(_, pitch, _) => Event::note_off(pitch, delta),
      Message::Tempo(next_tempo) => {
        tempo = next_tempo;
        Event::other(delta)
      }
      Message::Other => Event::other(delta),
    };
    events.push(event);
  }

  debug!(
    "Read {} events from {} tracks",
    events.len(),
    smf.tracks.len()
  );

  Ok(events)
}
