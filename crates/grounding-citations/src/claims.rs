//! Turning generated output into claims.

use grounding_core::models::Claim;

/// One claim per summary sentence.
pub fn summary_claims<I, S>(sentences: I) -> Vec<Claim>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    sentences.into_iter().map(Claim::summary_sentence).collect()
}

/// One claim per `(question, answer)` pair; the answer is what gets grounded.
pub fn answer_claims<I, Q, A>(pairs: I) -> Vec<Claim>
where
    I: IntoIterator<Item = (Q, A)>,
    Q: Into<String>,
    A: Into<String>,
{
    pairs
        .into_iter()
        .map(|(q, a)| Claim::answer(q, a))
        .collect()
}

/// Split a generated action-item response into one claim per section.
///
/// A section starts at a line wrapped in `**` and runs until the next such
/// line. Each claim is the header followed by its non-blank lines, joined by
/// newlines. Text before the first header and sections with no items are
/// dropped. Repeated headers yield separate claims.
pub fn parse_action_items(response: &str) -> Vec<Claim> {
    let mut claims = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in response.lines().map(str::trim) {
        if let Some(header) = section_header(line) {
            if let Some(section) = current.take() {
                push_section(&mut claims, section);
            }
            current = Some((header.to_string(), Vec::new()));
        } else if !line.is_empty() {
            if let Some((_, items)) = current.as_mut() {
                items.push(line.to_string());
            }
        }
    }
    if let Some(section) = current {
        push_section(&mut claims, section);
    }
    claims
}

fn section_header(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("**")?.strip_suffix("**")?.trim();
    (!inner.is_empty()).then_some(inner)
}

fn push_section(claims: &mut Vec<Claim>, (header, items): (String, Vec<String>)) {
    if items.is_empty() {
        return;
    }
    let mut text = header;
    for item in items {
        text.push('\n');
        text.push_str(&item);
    }
    claims.push(Claim::action_item(text));
}
