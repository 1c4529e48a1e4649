//! Stdin prompts for the pose and example count.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::catalog::{self, Pose, POSES};
use crate::error::CollectorError;

/// Parse a menu or count entry.
pub fn parse_number(input: &str) -> Result<i64, CollectorError> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| CollectorError::InvalidNumber(trimmed.to_string()))
}

/// The pose selection prompt, one numbered line per pose with its
/// current example count.
pub fn pose_menu(data_dir: &Path) -> Result<String, CollectorError> {
    let mut menu =
        String::from("Which pose would you like to take more examples of? (Enter the number)\n");
    for (i, pose) in POSES.iter().enumerate() {
        menu.push_str(&format!(
            "{}. {} (Existing example count: {})\n",
            i + 1,
            pose.label(),
            pose.example_count(data_dir)?
        ));
    }
    Ok(menu)
}

fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<i64, CollectorError> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    parse_number(&line)
}

/// Ask which pose to record.
pub fn prompt_pose<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    data_dir: &Path,
) -> Result<Pose, CollectorError> {
    let menu = pose_menu(data_dir)?;
    catalog::select(read_answer(input, output, &menu)?)
}

/// Ask how many examples to record. Values below one are left to the caller.
pub fn prompt_count<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<i64, CollectorError> {
    read_answer(
        input,
        output,
        "How many examples would you like to take? (Enter the number)\n",
    )
}
