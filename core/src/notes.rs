use std::collections::{HashMap, HashSet};
use std::ops::Deref;
use std::sync::Arc;

use crate::time::Frames;

pub type Pitch = u16;

/// A discrete note with absolute start and end times in frames.
///
/// `position` is the index of the note inside the sequence it was taken from,
/// it is what makes linked-list like navigation possible through [NoteSequence::next]
/// and [NoteSequence::previous].
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Note {
  pitch: Pitch,
  velocity: u8,
  start: Frames,
  end: Frames,
  position: usize,
}

impl Note {
  pub fn new(pitch: Pitch, velocity: u8, start: Frames, end: Frames) -> Note {
    Note {
      pitch,
      velocity,
      start,
      end: end.max(start),
      position: 0,
    }
  }

  pub fn pitch(&self) -> Pitch {
    self.pitch
  }

  pub fn velocity(&self) -> u8 {
    self.velocity
  }

  pub fn start(&self) -> Frames {
    self.start
  }

  pub fn end(&self) -> Frames {
    self.end
  }

  pub fn position(&self) -> usize {
    self.position
  }

  pub fn duration(&self) -> Frames {
    self.end - self.start
  }

  /// Frames between the start of this note and the start of `other`.
  /// Positive when this note starts after `other`.
  pub fn diff(&self, other: &Note) -> Frames {
    self.start - other.start
  }
}

/// Stable slot numbering for the distinct pitches of a sequence, in ascending pitch order
#[derive(Debug, PartialEq, Clone)]
pub struct PitchSlots {
  pitches: Vec<Pitch>,
  slots: HashMap<Pitch, usize>,
}

impl PitchSlots {
  fn from_notes(notes: &[Note]) -> PitchSlots {
    let mut pitches: Vec<Pitch> = notes.iter().map(|note| note.pitch).collect();
    pitches.sort_unstable();
    pitches.dedup();

    let slots = pitches
      .iter()
      .enumerate()
      .map(|(slot, pitch)| (*pitch, slot))
      .collect();

    PitchSlots { pitches, slots }
  }

  pub fn slot(&self, pitch: Pitch) -> Option<usize> {
    self.slots.get(&pitch).cloned()
  }

  pub fn pitches(&self) -> &[Pitch] {
    self.pitches.as_slice()
  }

  pub fn len(&self) -> usize {
    self.pitches.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pitches.is_empty()
  }
}

/// Immutable, start ordered collection of notes
#[derive(Debug, Clone)]
pub struct NoteSequence {
  notes: Vec<Note>,
  slots: Arc<PitchSlots>,
}

impl Default for NoteSequence {
  fn default() -> Self {
    NoteSequence::new(Vec::new())
  }
}

impl NoteSequence {
  pub fn new(notes: Vec<Note>) -> NoteSequence {
    let notes = Self::index_notes(notes);
    let slots = Arc::new(PitchSlots::from_notes(&notes));
    NoteSequence { notes, slots }
  }

  /// Builds a sequence out of a subset of the notes of this one.
  ///
  /// Positions are recomputed for the new grouping, while the pitch slots are shared
  /// so that every derived sequence agrees on the slot of a given pitch.
  pub fn derive(&self, notes: Vec<Note>) -> NoteSequence {
    NoteSequence {
      notes: Self::index_notes(notes),
      slots: self.slots.clone(),
    }
  }

  fn index_notes(mut notes: Vec<Note>) -> Vec<Note> {
    notes.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(std::cmp::Ordering::Equal));
    for (position, note) in notes.iter_mut().enumerate() {
      note.position = position;
    }
    notes
  }

  pub fn len(&self) -> usize {
    self.notes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.notes.is_empty()
  }

  pub fn get(&self, position: usize) -> Option<&Note> {
    self.notes.get(position)
  }

  pub fn first(&self) -> Option<&Note> {
    self.notes.first()
  }

  pub fn last(&self) -> Option<&Note> {
    self.notes.last()
  }

  pub fn notes(&self) -> &[Note] {
    self.notes.as_slice()
  }

  pub fn iter(&self) -> std::slice::Iter<Note> {
    self.notes.iter()
  }

  pub fn next(&self, note: &Note) -> Option<&Note> {
    self.notes.get(note.position + 1)
  }

  pub fn previous(&self, note: &Note) -> Option<&Note> {
    note
      .position
      .checked_sub(1)
      .and_then(|position| self.notes.get(position))
  }

  pub fn cursor(&self, position: usize) -> Option<NoteCursor> {
    if position < self.notes.len() {
      Some(NoteCursor {
        sequence: self,
        position,
      })
    } else {
      None
    }
  }

  pub fn cursors<'a>(&'a self) -> impl Iterator<Item = NoteCursor<'a>> + 'a {
    (0..self.notes.len()).map(move |position| NoteCursor {
      sequence: self,
      position,
    })
  }

  /// Frames between the first note's start and the last note's end
  pub fn span(&self) -> Frames {
    match (self.notes.first(), self.notes.last()) {
      (Some(first), Some(last)) => last.end - first.start,
      _ => 0.0,
    }
  }

  pub fn pitches_used(&self) -> HashSet<Pitch> {
    self.notes.iter().map(|note| note.pitch).collect()
  }

  pub fn pitch_slots(&self) -> &PitchSlots {
    &self.slots
  }

  pub fn slot_index(&self, pitch: Pitch) -> Option<usize> {
    self.slots.slot(pitch)
  }
}

impl<'a> IntoIterator for &'a NoteSequence {
  type Item = &'a Note;
  type IntoIter = std::slice::Iter<'a, Note>;

  fn into_iter(self) -> Self::IntoIter {
    self.notes.iter()
  }
}

/// A note borrowed together with its sequence, so it can walk to its neighbours
#[derive(Debug, Clone, Copy)]
pub struct NoteCursor<'a> {
  sequence: &'a NoteSequence,
  position: usize,
}

impl<'a> NoteCursor<'a> {
  pub fn note(&self) -> &'a Note {
    &self.sequence.notes[self.position]
  }

  pub fn sequence(&self) -> &'a NoteSequence {
    self.sequence
  }

  pub fn next(&self) -> Option<NoteCursor<'a>> {
    self.sequence.cursor(self.position + 1)
  }

  pub fn previous(&self) -> Option<NoteCursor<'a>> {
    self
      .position
      .checked_sub(1)
      .and_then(|position| self.sequence.cursor(position))
  }

  /// Start of the previous note, or minus infinity for the first one
  pub fn prev_start(&self) -> Frames {
    self
      .previous()
      .map_or(std::f64::NEG_INFINITY, |cursor| cursor.note().start)
  }

  /// Start of the next note, or infinity for the last one
  pub fn next_start(&self) -> Frames {
    self
      .next()
      .map_or(std::f64::INFINITY, |cursor| cursor.note().start)
  }

  pub fn slot_index(&self) -> Option<usize> {
    self.sequence.slot_index(self.note().pitch)
  }
}

impl<'a> Deref for NoteCursor<'a> {
  type Target = Note;

  fn deref(&self) -> &Note {
    self.note()
  }
}

#[cfg(test)]
mod test {

  use super::{Note, NoteSequence};

  fn sequence() -> NoteSequence {
    NoteSequence::new(vec![
      Note::new(64, 90, 48.0, 60.0),
      Note::new(60, 100, 0.0, 96.0),
      Note::new(62, 80, 24.0, 120.0),
      Note::new(60, 70, 48.0, 50.0),
    ])
  }

  #[test]
  /// Notes are ordered by start, keeping the given order between equal starts
  pub fn new_orders_by_start() {
    let sequence = sequence();
    let starts: Vec<f64> = sequence.iter().map(|note| note.start()).collect();
    assert_eq!(starts, vec![0.0, 24.0, 48.0, 48.0]);
    assert_eq!(sequence.get(2).unwrap().pitch(), 64);
    assert_eq!(sequence.get(3).unwrap().pitch(), 60);
    for (index, note) in sequence.iter().enumerate() {
      assert_eq!(note.position(), index);
    }
  }

  #[test]
  pub fn next_and_previous() {
    let sequence = sequence();
    let first = sequence.first().unwrap();
    let second = sequence.next(first).unwrap();
    assert_eq!(second.pitch(), 62);
    assert_eq!(sequence.previous(second), Some(first));
  }

  #[test]
  /// Navigation past either end yields nothing
  pub fn next_and_previous_at_boundaries() {
    let sequence = sequence();
    assert_eq!(sequence.previous(sequence.first().unwrap()), None);
    assert_eq!(sequence.next(sequence.last().unwrap()), None);
  }

  #[test]
  pub fn cursor_navigation() {
    let sequence = sequence();
    let cursor = sequence.cursor(1).unwrap();
    assert_eq!(cursor.pitch(), 62);
    assert_eq!(cursor.prev_start(), 0.0);
    assert_eq!(cursor.next_start(), 48.0);
    assert_eq!(cursor.next().unwrap().position(), 2);
    assert_eq!(cursor.previous().unwrap().position(), 0);
    assert_eq!(cursor.slot_index(), Some(1));
    assert_eq!(sequence.cursors().count(), 4);

    let first = sequence.cursor(0).unwrap();
    assert_eq!(first.prev_start(), std::f64::NEG_INFINITY);
    let last = sequence.cursor(3).unwrap();
    assert_eq!(last.next_start(), std::f64::INFINITY);
    assert!(sequence.cursor(4).is_none());
  }

  #[test]
  pub fn span() {
    let sequence = sequence();
    assert_eq!(sequence.span(), 50.0);
    assert_eq!(NoteSequence::default().span(), 0.0);
  }

  #[test]
  pub fn pitches_used() {
    let sequence = sequence();
    let mut pitches: Vec<u16> = sequence.pitches_used().into_iter().collect();
    pitches.sort();
    assert_eq!(pitches, vec![60, 62, 64]);
    assert_eq!(sequence.pitch_slots().pitches(), &[60, 62, 64]);
  }

  #[test]
  /// Derived sequences renumber positions but keep the slots of the source
  pub fn derive() {
    let sequence = sequence();
    let subset: Vec<Note> = sequence
      .iter()
      .filter(|note| note.pitch() != 62)
      .cloned()
      .collect();
    let derived = sequence.derive(subset);

    assert_eq!(derived.len(), 3);
    for (index, note) in derived.iter().enumerate() {
      assert_eq!(note.position(), index);
    }
    assert_eq!(derived.slot_index(64), Some(2));
    assert_eq!(derived.slot_index(62), Some(1));
    assert_eq!(derived.slot_index(61), None);
    assert_eq!(derived.next(derived.first().unwrap()).unwrap().pitch(), 64);
  }

  #[test]
  pub fn note_helpers() {
    let a = Note::new(60, 100, 10.0, 20.0);
    let b = Note::new(62, 100, 4.0, 30.0);
    assert_eq!(a.duration(), 10.0);
    assert_eq!(a.diff(&b), 6.0);
    assert_eq!(b.diff(&a), -6.0);
  }
}
