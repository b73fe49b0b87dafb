pub mod distance;

pub use self::distance::{Distance, DistancePolicy};

use failure::Fail;
use log::{debug, info, trace};

use crate::config::SchedulerConfig;
use crate::notes::{Note, NoteSequence, Pitch};
use crate::time::Frames;

/// Reward of an actuator that never played, wins over any finite reward
const IDLE_REWARD: f64 = std::f64::INFINITY;

#[derive(Debug, Fail)]
pub enum ScheduleError {
  #[fail(display = "At least one actuator is needed to schedule notes")]
  NoActuators,

  #[fail(
    display = "Note {} (pitch {} at frame {}) does not fit on any of the {} actuators: the best reward {} is below the floor {}. Add actuators, raise the overlap tolerance or use a cheaper distance",
    position, pitch, start, actuators, reward, floor
  )]
  InsufficientActuators {
    position: usize,
    pitch: Pitch,
    start: Frames,
    reward: f64,
    floor: f64,
    actuators: usize,
  },

  #[fail(display = "Pitch {} has no slot in the sequence", pitch)]
  UnknownPitch { pitch: Pitch },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorState {
  Idle,
  Busy { pitch_index: usize, last_start: Frames },
}

impl ActuatorState {
  /// Time the actuator has been resting minus what it costs to travel to the note
  fn reward<D>(&self, pitch_index: usize, start: Frames, distance: &D) -> f64
  where
    D: Distance,
  {
    match *self {
      ActuatorState::Idle => IDLE_REWARD,
      ActuatorState::Busy {
        pitch_index: last_pitch_index,
        last_start,
      } => (start - last_start) - distance.distance(pitch_index, last_pitch_index),
    }
  }
}

/// Notes assigned to every actuator, in actuator order
#[derive(Debug, Clone)]
pub struct Schedule {
  sequences: Vec<NoteSequence>,
  min_reward: f64,
}

impl Schedule {
  pub fn len(&self) -> usize {
    self.sequences.len()
  }

  pub fn is_empty(&self) -> bool {
    self.sequences.is_empty()
  }

  pub fn actuator(&self, index: usize) -> Option<&NoteSequence> {
    self.sequences.get(index)
  }

  pub fn sequences(&self) -> &[NoteSequence] {
    self.sequences.as_slice()
  }

  pub fn into_sequences(self) -> Vec<NoteSequence> {
    self.sequences
  }

  /// Lowest reward among all the assignments, tells how tight the schedule is.
  /// Infinite when no actuator had to play twice.
  pub fn min_reward(&self) -> f64 {
    self.min_reward
  }
}

/// Schedules `sequence` over `actuators` actuators using the default floors
pub fn schedule<D>(
  sequence: &NoteSequence,
  actuators: usize,
  distance: D,
  no_overlap: bool,
) -> ScheduleResult<Schedule>
where
  D: Distance,
{
  let config = SchedulerConfig {
    actuators,
    no_overlap,
    ..SchedulerConfig::default()
  };
  Scheduler::new(actuators, distance, config.effective_floor()).schedule(sequence)
}

/// Greedy assignment of notes to a fixed pool of actuators.
///
/// Every note goes to the actuator with the highest reward, the lowest index on ties.
/// The run fails as a whole when the best reward falls below the floor.
pub struct Scheduler<D> {
  actuators: usize,
  distance: D,
  floor: f64,
}

impl Scheduler<DistancePolicy> {
  pub fn from_config(config: &SchedulerConfig) -> Scheduler<DistancePolicy> {
    Scheduler::new(config.actuators, config.distance, config.effective_floor())
  }
}

impl<D> Scheduler<D>
where
  D: Distance,
{
  pub fn new(actuators: usize, distance: D, floor: f64) -> Scheduler<D> {
    Scheduler {
      actuators,
      distance,
      floor,
    }
  }

  pub fn actuators(&self) -> usize {
    self.actuators
  }

  pub fn floor(&self) -> f64 {
    self.floor
  }

  pub fn schedule(&self, sequence: &NoteSequence) -> ScheduleResult<Schedule> {
    if self.actuators == 0 {
      return Err(ScheduleError::NoActuators);
    }

    debug!(
      "Scheduling {} notes over {} actuators with floor {}",
      sequence.len(),
      self.actuators,
      self.floor
    );

    let mut states = vec![ActuatorState::Idle; self.actuators];
    let mut buckets: Vec<Vec<Note>> = vec![Vec::new(); self.actuators];
    let mut min_reward = IDLE_REWARD;

    for note in sequence.iter() {
      let pitch_index = sequence
        .slot_index(note.pitch())
        .ok_or(ScheduleError::UnknownPitch {
          pitch: note.pitch(),
        })?;

      let mut selected = 0;
      let mut best_reward = std::f64::NEG_INFINITY;
      for (index, state) in states.iter().enumerate() {
        let reward = state.reward(pitch_index, note.start(), &self.distance);
        if index == 0 || reward > best_reward {
          selected = index;
          best_reward = reward;
        }
      }

      if best_reward < self.floor {
        return Err(ScheduleError::InsufficientActuators {
          position: note.position(),
          pitch: note.pitch(),
          start: note.start(),
          reward: best_reward,
          floor: self.floor,
          actuators: self.actuators,
        });
      }

      trace!(
        "Note {} (pitch {} at frame {}) -> actuator {} with reward {}",
        note.position(),
        note.pitch(),
        note.start(),
        selected,
        best_reward
      );

      min_reward = min_reward.min(best_reward);
      buckets[selected].push(*note);
      states[selected] = ActuatorState::Busy {
        pitch_index,
        last_start: note.start(),
      };
    }

    info!("Scheduling: min_reward={}", min_reward);

    let sequences = buckets
      .into_iter()
      .map(|notes| sequence.derive(notes))
      .collect();

    Ok(Schedule {
      sequences,
      min_reward,
    })
  }
}
