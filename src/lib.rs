// Library surface for the binary, headless/integration tests and other hosts.
pub mod app;
pub mod app_dirs;
pub mod celebration;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod round;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod util;
pub mod words;

pub use error::{DataSourceError, GameError};
pub use round::{DistractorPolicy, Round};
pub use session::{Phase, Session, SessionSettings, SessionState, SessionSummary, Verdict};
pub use words::{WordEntry, WordPool};
