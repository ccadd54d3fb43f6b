use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};

use crate::data::model::SchoolDirectory;
use crate::data::resolver::{ResolvedSchool, resolve};

pub const PROMPT: &str = "Please enter the high school name or school code: ";
pub const INVALID_INPUT: &str = "\nYou must enter a valid school name or code.";

// ---------------------------------------------------------------------------
// Re-prompt loop
// ---------------------------------------------------------------------------

/// Ask for a school until the input resolves.
///
/// Each rejected line prints a validation message and asks again. Fails only
/// when reading fails or the input ends before a valid identifier arrives.
pub fn prompt_for_school<R, W>(
    input: &mut R,
    output: &mut W,
    directory: &SchoolDirectory,
) -> Result<ResolvedSchool>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .context("reading school name or code")?;
        if read == 0 {
            bail!("input ended before a valid school name or code was entered");
        }

        match resolve(strip_line_ending(&line), directory) {
            Ok(school) => {
                log::info!(
                    "Resolved '{}' ({}) to school index {}",
                    school.name,
                    school.code,
                    school.index
                );
                return Ok(school);
            }
            Err(e) => {
                log::warn!("{e}");
                writeln!(output, "{INVALID_INPUT}")?;
            }
        }
    }
}

/// Drop the trailing `\n` or `\r\n`; everything else is part of the input.
fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
