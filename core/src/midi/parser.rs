use std::collections::HashMap;

use failure::Fail;
use log::{debug, warn};

use crate::config::ParserConfig;
use crate::midi::events::Event;
use crate::notes::{Note, NoteSequence, Pitch};
use crate::time::{FrameRate, Frames};

#[derive(Debug, Fail)]
pub enum ParseError {
  #[fail(display = "Invalid frame rate: {}", fps)]
  InvalidFrameRate { fps: f64 },

  #[fail(display = "Invalid frame offset: {}", offset)]
  InvalidOffset { offset: f64 },

  #[fail(
    display = "Note off for pitch {} at frame {} has no matching note on",
    pitch, frame
  )]
  UnmatchedNoteOff { pitch: Pitch, frame: Frames },

  #[fail(
    display = "Note on for pitch {} at frame {} while the one started at frame {} is still sounding",
    pitch, frame, started
  )]
  OverlappingNoteOn {
    pitch: Pitch,
    frame: Frames,
    started: Frames,
  },

  #[fail(display = "Note for pitch {} started at frame {} never ends", pitch, start)]
  UnterminatedNote { pitch: Pitch, start: Frames },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses an event stream with the default lenient settings
pub fn parse(events: &[Event], fps: f64, offset: Frames) -> ParseResult<NoteSequence> {
  let config = ParserConfig {
    fps,
    offset,
    ..ParserConfig::default()
  };
  Parser::new(&config).parse(events)
}

/// Turns a chronological stream of note on/off events into a [NoteSequence].
///
/// Times are accumulated in frames starting from the first sounding note,
/// so any leading silence is dropped. The configured offset is added to every
/// start and end.
pub struct Parser {
  rate: FrameRate,
  offset: Frames,
  strict: bool,
}

impl Parser {
  pub fn new(config: &ParserConfig) -> Parser {
    Parser {
      rate: FrameRate::new(config.fps),
      offset: config.offset,
      strict: config.strict,
    }
  }

  pub fn parse(&self, events: &[Event]) -> ParseResult<NoteSequence> {
    if !self.rate.is_valid() {
      return Err(ParseError::InvalidFrameRate {
        fps: self.rate.fps(),
      });
    }
    if !self.offset.is_finite() {
      return Err(ParseError::InvalidOffset {
        offset: self.offset,
      });
    }

    let mut pending: HashMap<Pitch, (Frames, u8)> = HashMap::new();
    let mut notes = Vec::new();
    let mut frame: Frames = 0.0;
    let mut started = false;

    for event in events {
      if started {
        frame += self.rate.to_frames(event.delta);
      }

      if event.is_note_start() {
        started = true;
        if let Some((previous_start, _)) = pending.insert(event.pitch, (frame, event.velocity)) {
          if self.strict {
            return Err(ParseError::OverlappingNoteOn {
              pitch: event.pitch,
              frame: frame + self.offset,
              started: previous_start + self.offset,
            });
          }
          warn!(
            "Restarting pitch {} at frame {}, it was already sounding since frame {}",
            event.pitch,
            frame + self.offset,
            previous_start + self.offset
          );
        }
      } else if event.is_note_end() {
        match pending.remove(&event.pitch) {
          Some((start, velocity)) => notes.push(Note::new(
            event.pitch,
            velocity,
            start + self.offset,
            frame + self.offset,
          )),
          None if self.strict => {
            return Err(ParseError::UnmatchedNoteOff {
              pitch: event.pitch,
              frame: frame + self.offset,
            });
          }
          None => warn!(
            "Ignoring note off for pitch {} at frame {} without a note on",
            event.pitch,
            frame + self.offset
          ),
        }
      }
    }

    if let Some((pitch, start)) = Self::earliest_pending(&pending) {
      if self.strict {
        return Err(ParseError::UnterminatedNote {
          pitch,
          start: start + self.offset,
        });
      }
      warn!(
        "Dropping {} notes that never end, the first one for pitch {} at frame {}",
        pending.len(),
        pitch,
        start + self.offset
      );
    }

    debug!("Parsed {} notes out of {} events", notes.len(), events.len());

    Ok(NoteSequence::new(notes))
  }

  fn earliest_pending(pending: &HashMap<Pitch, (Frames, u8)>) -> Option<(Pitch, Frames)> {
    let mut earliest: Option<(Pitch, Frames)> = None;
    for (pitch, (start, _)) in pending.iter() {
      earliest = match earliest {
        Some((p, s)) if s < *start || (s == *start && p < *pitch) => Some((p, s)),
        _ => Some((*pitch, *start)),
      };
    }
    earliest
  }
}
