//! Prompt text sent to the model. Kept in one place so wording changes do not
//! touch pipeline logic.

/// System instruction for both initial generation and line repair. The repair
/// clause matters: the model must fix syntax only, never semantics.
pub const MANIM_SYSTEM: &str = "You are an expert in Python animation using the Manim library. \
Generate clean, runnable Manim code only. No extra explanations. \
Do not change the context of the code, only fix any syntax errors.";

/// User prompt asking for a corrected version of a single faulty line.
pub fn repair_prompt(line: usize, faulty: &str) -> String {
    format!(
        "You are a Python expert. The following line has a syntax error:\n\
         Line {line}: {faulty}\n\
         Fix ONLY this line and return the corrected version without explanations."
    )
}
