use log::{debug, info};

use failure::{Error, Fail};

use carillon_core::{
  config::Config,
  midi::{smf, Parser},
  notes::NoteSequence,
  scheduler::{Schedule, Scheduler},
};

mod report;

const CARILLON_CONFIG: &str = "CARILLON_CONFIG";
const DEFAULT_CARILLON_CONFIG: &str = "carillon.toml";

const CARILLON_LOG_CONFIG: &str = "CARILLON_LOG_CONFIG";
const DEFAULT_CARILLON_LOG_CONFIG: &str = "log4rs.yaml";

#[derive(Debug, Fail)]
enum MainError {
  #[fail(display = "Failed to init logging: {}", cause)]
  LoggingInit { cause: String },

  #[fail(display = "Usage: app-cli <file.mid>")]
  MissingInput,
}

fn main() -> Result<(), Error> {
  init_logging()?;

  let config = init_config()?;

  let path = std::env::args().nth(1).ok_or(MainError::MissingInput)?;

  let sequence = init_sequence(&config, path.as_str())?;

  let schedule = init_schedule(&config, &sequence)?;

  report::log_schedule(&schedule);

  Ok(())
}

fn init_logging() -> Result<(), Error> {
  let log_config_path = std::env::var(CARILLON_LOG_CONFIG)
    .unwrap_or_else(|_| DEFAULT_CARILLON_LOG_CONFIG.to_string());

  log4rs::init_file(log_config_path.as_str(), Default::default()).map_err(|err| {
    MainError::LoggingInit {
      cause: err.to_string(),
    }
  })?;

  Ok(())
}

fn init_config() -> Result<Config, Error> {
  let config_path =
    std::env::var(CARILLON_CONFIG).unwrap_or_else(|_| DEFAULT_CARILLON_CONFIG.to_string());

  info!("Loading configuration from {} ...", config_path);
  let config = Config::from_file(config_path.as_str())?;
  debug!("{:#?}", config);

  Ok(config)
}

fn init_sequence(config: &Config, path: &str) -> Result<NoteSequence, Error> {
  info!("Reading notes from {} ...", path);

  let events = smf::read_file(path)?;
  let sequence = Parser::new(&config.parser).parse(&events)?;

  info!(
    "{} notes over {} frames using {} pitches",
    sequence.len(),
    sequence.span(),
    sequence.pitch_slots().len()
  );

  Ok(sequence)
}

fn init_schedule(config: &Config, sequence: &NoteSequence) -> Result<Schedule, Error> {
  info!(
    "Scheduling over {} actuators using {:?} distance ...",
    config.scheduler.actuators, config.scheduler.distance
  );

  let schedule = Scheduler::from_config(&config.scheduler).schedule(sequence)?;

  Ok(schedule)
}
