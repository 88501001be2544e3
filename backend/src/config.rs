//! Fixed service settings.
//!
//! The service has no configuration file and reads nothing from the
//! environment besides `RUST_LOG`; everything it needs to start lives here.

use std::time::Duration;

/// Address the HTTP server binds to.
pub const HOST: &str = "127.0.0.1";
pub const PORT: u16 = 8080;

/// SQLite file holding the `uploadedfile` and `uploadeddata` tables, relative
/// to the process working directory.
pub const DATABASE_PATH: &str = "impressions.sqlite";

/// How long a connection waits on a locked database before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
