//! Prompt construction for commit-message completions.

/// Maximum characters of diff text embedded in the prompt.
const MAX_DIFF_LENGTH: usize = 30_000;

/// Build the completion prompt for a staged diff.
///
/// Fixed instructions: produce a commit message, prefixed `feat: ` for new
/// functionality or `fix: ` for a fix. The diff is capped so oversized
/// changes still fit a single request.
pub fn build_prompt(diff: &str) -> String {
    let diff = truncate_on_char_boundary(diff, MAX_DIFF_LENGTH);

    format!(
        "Given the following staged changes as a unified diff:\n\n{diff}\n\n\
         Suggest a commit message. If a new feature was added, start the \
         message with \"feat: \". If a fix was made, start it with \"fix: \".\n"
    )
}

/// Truncate to at most `max_len` bytes without splitting a UTF-8 character.
fn truncate_on_char_boundary(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }

    let mut end = max_len;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
