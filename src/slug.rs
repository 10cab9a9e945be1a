//! Public identifier allocation for quiz revisions.
//!
//! A slug is a normalized base followed by a fixed-width random hex suffix.
//! Allocation performs no uniqueness check; the store's unique index on
//! `slug` is the authoritative guard and a collision surfaces as a
//! `ConflictFailure` at insert time.

use once_cell::sync::Lazy;
use regex::Regex;

const SUFFIX_HEX_CHARS: usize = 6;

static SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-[0-9a-f]{6}$").expect("SUFFIX_RE is a valid regex pattern"));

/// Allocate a slug from a model-proposed slug or a quiz title.
pub fn allocate(base: &str) -> String {
    format!("{}-{}", normalize(base), random_suffix())
}

/// Allocate a fresh slug for a revision, keeping the parent slug's base but
/// replacing its random suffix.
pub fn reallocate(slug: &str) -> String {
    let base = SUFFIX_RE.replace(slug, "");
    allocate(&base)
}

/// Lower-case, collapse every run of non `[a-z0-9]` characters to a single
/// hyphen and trim hyphens from both ends. An input with no usable
/// characters falls back to "quiz".
fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars() {
        let lower = c.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            out.push(lower);
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }

    if out.is_empty() {
        "quiz".to_string()
    } else {
        out
    }
}

fn random_suffix() -> String {
    let bits = rand::random::<u32>() & 0xff_ffff;
    format!("{:0width$x}", bits, width = SUFFIX_HEX_CHARS)
}
