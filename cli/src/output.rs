use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::CliError;

/// `-` means stdout; anything else is created (truncated) as a plain file.
pub fn open_output(path: &str) -> Result<Box<dyn Write>, CliError> {
    if path == "-" {
        Ok(Box::new(io::stdout()))
    } else {
        Ok(Box::new(fs::File::create(path)?))
    }
}

/// `-` means stdin; anything else is read whole into memory, matching how
/// the ARFF reader already wants its input (a borrowed `&str`).
pub fn read_input(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}
