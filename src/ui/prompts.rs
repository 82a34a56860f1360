//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts take their input and output streams as parameters so the same
//! code path runs against a terminal in production and against in-memory
//! buffers in tests. Reads block with no timeout.

use std::io::{BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to read operator input: {0}")]
    IoError(#[from] std::io::Error),
}

/// Ask a question and report whether the answer is exactly `token`.
///
/// The answer is trimmed before comparison; the comparison itself is
/// case-sensitive. End of input counts as an empty answer.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use tfguard::ui::prompts::confirm_token;
///
/// let mut input = Cursor::new("  yes\n");
/// let mut output = Vec::new();
/// assert!(confirm_token("Continue? ", "yes", &mut input, &mut output).unwrap());
///
/// let mut input = Cursor::new("Yes\n");
/// assert!(!confirm_token("Continue? ", "yes", &mut input, &mut output).unwrap());
/// ```
pub fn confirm_token<R, W>(
    message: &str,
    token: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool, PromptError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(output, "{message}")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(answer.trim() == token)
}
