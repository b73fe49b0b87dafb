pub mod events;
pub use events::{Event, EventKind};
pub mod parser;
pub use parser::{parse, ParseError, Parser};
pub mod smf;
pub use smf::SmfError;
