//! Syntax repair loop: localize a parse fault to one line, ask the model for
//! a corrected replacement of that line only, splice it in, and re-check.

use super::parse::{first_fault_line, parse_python};
use crate::llm::{prompts, CodeGenerator, LlmError};

/// How many single-line localizations to run before giving up. After the
/// budget is spent the still-broken code is rejected rather than returned;
/// the one-shot substitute-and-hope behavior of earlier versions silently
/// shipped unparseable code downstream.
pub const MAX_REPAIR_ATTEMPTS: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum RepairError {
    /// The parser reported a fault but it could not be pinned to a line
    /// inside the input (line 0 means no usable location at all).
    #[error("unable to isolate faulty line (reported line {reported} of {line_count})")]
    UnlocatableFault { reported: usize, line_count: usize },

    /// The code still failed to parse after the repair budget was spent.
    #[error("code still has syntax errors after {0} repair attempts")]
    ResidualFault(usize),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Repair syntax faults in `code`, one line at a time.
///
/// Valid input is returned unchanged without touching the generator. On a
/// fault, the offending line is replaced with the generator's trimmed reply
/// and the result re-parsed, up to [`MAX_REPAIR_ATTEMPTS`] times. Whole-file
/// regeneration is deliberately avoided: it would discard correct structure
/// and make the repair prompt far larger than one line.
pub async fn repair<G: CodeGenerator>(code: &str, llm: &G) -> Result<String, RepairError> {
    let mut current = code.to_string();
    let mut attempts = 0;

    loop {
        let line_count = current.lines().count();
        let fault = match parse_python(&current) {
            Some(tree) => first_fault_line(&tree),
            None => {
                return Err(RepairError::UnlocatableFault {
                    reported: 0,
                    line_count,
                })
            }
        };

        let Some(line) = fault else {
            return Ok(current);
        };

        if attempts == MAX_REPAIR_ATTEMPTS {
            return Err(RepairError::ResidualFault(attempts));
        }

        // Bounds check happens here, before any generator call.
        let faulty = faulty_line(&current, line)?.to_string();
        log::warn!(
            "syntax fault at line {line} (attempt {}/{MAX_REPAIR_ATTEMPTS}): {faulty}",
            attempts + 1
        );

        let fixed = llm
            .generate(prompts::MANIM_SYSTEM, &prompts::repair_prompt(line, &faulty))
            .await?;
        current = splice_line(&current, line, fixed.trim());
        attempts += 1;
    }
}

/// Text of the 1-based line `line`, or `UnlocatableFault` when the reported
/// line falls outside the input.
fn faulty_line(code: &str, line: usize) -> Result<&str, RepairError> {
    let line_count = code.lines().count();
    if line == 0 || line > line_count {
        return Err(RepairError::UnlocatableFault {
            reported: line,
            line_count,
        });
    }
    Ok(code.lines().nth(line - 1).unwrap_or_default())
}

/// Replace the 1-based line `line` with `fixed`, leaving every other line
/// untouched. Callers validate bounds via [`faulty_line`] first.
fn splice_line(code: &str, line: usize, fixed: &str) -> String {
    code.lines()
        .enumerate()
        .map(|(i, text)| if i + 1 == line { fixed } else { text })
        .collect::<Vec<_>>()
        .join("\n")
}
