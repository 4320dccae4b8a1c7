use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::{PropsError, Result};
use crate::props::Props;

/// Reads a properties file into a [`Props`].
///
/// I/O failures come back as [`PropsError::Io`] untouched. A file in which no
/// line contains `=` is rejected with [`PropsError::NoMappings`].
pub fn load(path: impl AsRef<Path>) -> Result<Props> {
    let path = path.as_ref();
    // Undecodable bytes become U+FFFD; only the affected values are touched.
    let bytes = fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    let props = parse_entries(&content).ok_or_else(|| PropsError::NoMappings {
        path: path.to_path_buf(),
    })?;
    debug!(path = %path.display(), count = props.len(), "loaded properties");
    Ok(props)
}

/// Parses properties text already in memory, with the same rules as [`load`].
pub fn parse(text: &str) -> Result<Props> {
    parse_entries(text).ok_or_else(|| PropsError::NoMappings {
        path: PathBuf::new(),
    })
}

impl FromStr for Props {
    type Err = PropsError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

// Key is everything before the first '=', value everything after, both trimmed.
// An empty key is kept. Returns None when nothing matched.
fn parse_entries(text: &str) -> Option<Props> {
    let mut map = HashMap::new();
    let mut matched = 0usize;
    for (index, line) in text.split('\n').enumerate() {
        let Some(eq_pos) = line.find('=') else {
            if !line.trim().is_empty() {
                trace!(line = index + 1, "skipping line without '='");
            }
            continue;
        };
        let key = line[..eq_pos].trim().to_string();
        let value = line[eq_pos + 1..].trim().to_string();
        matched += 1;
        if let Some(previous) = map.insert(key, value) {
            debug!(line = index + 1, previous = %previous, "duplicate key overrides earlier value");
        }
    }
    (matched > 0).then(|| Props::from_entries(map))
}
