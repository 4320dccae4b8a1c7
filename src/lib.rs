//! Reader for `key = value` properties files.
//!
//! ```no_run
//! let props = simple_props::load("app.properties")?;
//! let retries = props.get_int("retries", 3);
//! let verbose = props.get_bool("verbose", false);
//! let since = props.get_date("since")?; // since = 08/21/2023 format:MM/DD/YYYY
//! # Ok::<(), simple_props::PropsError>(())
//! ```

pub mod date_format;
pub mod error;
pub mod loader;
pub mod props;

pub use date_format::{DateFormat, DateParseError};
pub use error::{PropsError, Result};
pub use loader::{load, parse};
pub use props::{Iter, Props, TRUTH_SET};
