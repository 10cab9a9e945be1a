//! Prompt assembly for the quiz-content generator.
//!
//! The context segment depends only on the source page, so it is
//! byte-identical across the initial generation and every later revision of
//! the same page. Task segments carry the per-call instructions: item
//! count, exclusion lists and operator notes.

use crate::constants::quiz_prompt::{
    CONTEXT_TEMPLATE, CREATE_TASK_TEMPLATE, REVISE_TASK_TEMPLATE,
};

/// Stable description of the source content, shared by create and revise
/// prompts for the same webpage.
pub fn context_segment(title: &str, text: &str) -> String {
    CONTEXT_TEMPLATE
        .replace("{title}", title)
        .replace("{text}", text)
}

/// Instructions for a first-time generation of `n` items.
pub fn create_task(n: usize) -> String {
    CREATE_TASK_TEMPLATE.replace("{n}", &n.to_string())
}

/// Instructions for regenerating `n` items during an edit. `existing_stems`
/// are the kept questions the generator must not duplicate;
/// `excluded_stems` are the accumulated discards it must not resurrect.
pub fn revise_task(
    n: usize,
    existing_stems: &[String],
    excluded_stems: &[String],
    additional_instructions: &str,
) -> String {
    let instructions_block = if additional_instructions.trim().is_empty() {
        String::new()
    } else {
        format!(
            "\nAdditional instructions from the quiz owner:\n{}\n",
            additional_instructions.trim()
        )
    };

    REVISE_TASK_TEMPLATE
        .replace("{n}", &n.to_string())
        .replace("{existing_stems}", &stem_list(existing_stems))
        .replace("{excluded_stems}", &stem_list(excluded_stems))
        .replace("{additional_instructions}", &instructions_block)
}

pub fn create_prompt(title: &str, text: &str, n: usize) -> String {
    format!("{}\n\n{}", context_segment(title, text), create_task(n))
}

pub fn revise_prompt(
    title: &str,
    text: &str,
    n: usize,
    existing_stems: &[String],
    excluded_stems: &[String],
    additional_instructions: &str,
) -> String {
    format!(
        "{}\n\n{}",
        context_segment(title, text),
        revise_task(n, existing_stems, excluded_stems, additional_instructions)
    )
}

fn stem_list(stems: &[String]) -> String {
    if stems.is_empty() {
        return "(none)".to_string();
    }
    stems
        .iter()
        .map(|stem| format!("- {}", stem))
        .collect::<Vec<_>>()
        .join("\n")
}
