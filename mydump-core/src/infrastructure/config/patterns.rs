// mydump-core/src/infrastructure/config/patterns.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, instrument};

use crate::infrastructure::error::InfrastructureError;

/// Reads a newline-delimited table pattern file, one entry per line, in file order.
///
/// Blank lines are kept. The file is closed as soon as it has been read.
/// Table names and regexes are text: a file that is not UTF-8 is a config error.
#[instrument]
pub fn load_pattern_file(path: &Path) -> Result<Vec<String>, InfrastructureError> {
    let pattern_err = |source| InfrastructureError::PatternFile {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(pattern_err)?;
    let lines = BufReader::new(file)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(pattern_err)?;

    debug!(count = lines.len(), "Table patterns loaded");
    Ok(lines)
}
