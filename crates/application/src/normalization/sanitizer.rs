//! Best-effort recovery of a JSON object from free-form model output
//!
//! Language models wrap the requested JSON in code fences, lead with prose
//! or trail with commentary. [`sanitize_model_output`] strips that noise
//! and never fails; anything it cannot repair is left for the itinerary
//! parser to reject.
//!
//! Whitespace runs are collapsed everywhere, including inside string
//! values, so a string spanning several lines comes back on one line.

const FENCE: &str = "```";
const FENCE_LANGUAGE: &str = "json";

/// Recover a single JSON object span from model output
///
/// 1. Remove every code fence marker, with or without a `json` tag.
/// 2. Cut from the first `{` through the `}` that closes it, skipping
///    braces inside string literals. If that object never closes, cut at
///    the last `}` instead; if there is no `}` at all, keep everything from
///    the first `{`. Without any `{` the whole text is kept.
/// 3. Collapse whitespace runs to one space and drop whitespace around
///    `,` and after `:` outside string literals.
///
/// The function is idempotent.
pub fn sanitize_model_output(model_output: &str) -> String {
    let unfenced = strip_code_fences(model_output);
    normalize_whitespace(object_span(&unfenced))
}

fn strip_code_fences(text: &str) -> String {
    let mut current = text.to_string();
    // removing one marker can expose another, e.g. "``````"
    while current.contains(FENCE) {
        current = strip_fence_pass(&current);
    }
    current
}

fn strip_fence_pass(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(position) = rest.find(FENCE) {
        out.push_str(&rest[..position]);
        rest = &rest[position + FENCE.len()..];
        if rest
            .get(..FENCE_LANGUAGE.len())
            .is_some_and(|tag| tag.eq_ignore_ascii_case(FENCE_LANGUAGE))
        {
            rest = &rest[FENCE_LANGUAGE.len()..];
        }
    }
    out.push_str(rest);
    out
}

fn object_span(text: &str) -> &str {
    let Some(start) = text.find('{') else {
        return text;
    };
    let candidate = &text[start..];

    if let Some(end) = closing_brace(candidate) {
        return &candidate[..=end];
    }
    match candidate.rfind('}') {
        Some(end) => &candidate[..=end],
        None => candidate,
    }
}

/// Byte index of the brace closing the object that opens at index 0
fn closing_brace(text: &str) -> Option<usize> {
    let mut scanner = StringScanner::default();
    let mut depth = 0usize;

    for (index, ch) in text.char_indices() {
        if scanner.advance(ch) {
            continue;
        }
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(index);
                }
            },
            _ => {},
        }
    }

    None
}

fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut scanner = StringScanner::default();
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_ascii_whitespace() {
            pending_space = true;
            continue;
        }

        if pending_space {
            pending_space = false;
            let after_separator = matches!(out.chars().last(), Some(',' | ':'));
            let drop = !scanner.in_string() && (after_separator || ch == ',');
            if !drop && !out.is_empty() {
                scanner.advance(' ');
                out.push(' ');
            }
        }

        scanner.advance(ch);
        out.push(ch);
    }

    out
}

/// Tracks whether a character stream is inside a JSON string literal
#[derive(Debug, Default)]
struct StringScanner {
    in_string: bool,
    escaped: bool,
}

impl StringScanner {
    const fn in_string(&self) -> bool {
        self.in_string
    }

    /// Feed one character, returns true if it belongs to a string literal
    fn advance(&mut self, ch: char) -> bool {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if ch == '\\' {
                self.escaped = true;
            } else if ch == '"' {
                self.in_string = false;
            }
            true
        } else if ch == '"' {
            self.in_string = true;
            true
        } else {
            false
        }
    }
}
