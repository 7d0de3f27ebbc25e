use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::exit::{io_error, CliResult};

/// Open a captured stream; `-` reads stdin.
pub fn open_input(path: &Path) -> CliResult<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(std::io::stdin().lock()));
    }

    let file = File::open(path)
        .map_err(|err| io_error(&format!("cannot open {}", path.display()), err))?;
    tracing::debug!(path = %path.display(), "reading capture");
    Ok(Box::new(file))
}
