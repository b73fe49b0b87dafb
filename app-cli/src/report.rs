use log::{debug, info};

use carillon_core::notes::NoteSequence;
use carillon_core::scheduler::Schedule;

pub fn log_schedule(schedule: &Schedule) {
  info!("Minimum reward: {}", schedule.min_reward());

  for (index, actuator) in schedule.sequences().iter().enumerate() {
    info!(
      "Actuator {}: {} notes over {} frames",
      index,
      actuator.len(),
      actuator.span()
    );
    log_actuator(actuator);
  }
}

fn log_actuator(actuator: &NoteSequence) {
  for cursor in actuator.cursors() {
    debug!(
      "  #{} pitch {} (slot {:?}) velocity {} at [{}, {}], rest before {} after {}",
      cursor.position(),
      cursor.pitch(),
      cursor.slot_index(),
      cursor.velocity(),
      cursor.start(),
      cursor.end(),
      cursor.start() - cursor.prev_start(),
      cursor.next_start() - cursor.start()
    );
  }
}
