use crate::prelude::*;
use crate::word::word_at;

/// Best-effort definition lookup: scan the document for a declaring keyword
/// followed by the token. This is a heuristic over raw text, not a symbol
/// table; the checker is the real authority and no symbol index exists
/// here. First match wins.
pub(crate) fn find_definition(text: &str, word: &str) -> Option<usize> {
    let escaped = regex::escape(word);
    let patterns = [
        format!(r#"(?i)\b(start|end|task|user|service|script|xor|and)\s+"?{escaped}"?"#),
        format!(r#"(?i)\b(process|subprocess|pool|lane)\s+"?{escaped}"?\s*\{{"#),
    ];
    for pattern in patterns {
        let re = Regex::new(&pattern).ok()?;
        if let Some(found) = re.find(text) {
            return Some(found.start());
        }
    }
    None
}

/// Resolve the word under `position` to a location in the same document.
pub(crate) fn definition_at(uri: &Uri, text: &str, position: Position) -> Option<Location> {
    let line_text = text.lines().nth(position.line as usize)?;
    let (_, _, word) = word_at(line_text, position.character + 1);
    if word.is_empty() {
        return None;
    }
    let offset = find_definition(text, &word)?;
    let definition_position = offset_to_position(text, offset);
    Some(Location {
        uri: uri.clone(),
        range: Range {
            start: definition_position,
            end: definition_position,
        },
    })
}

/// Convert a character offset to a 0-based editor position.
pub(crate) fn offset_to_position(text: &str, offset: usize) -> Position {
    let mut line = 0u32;
    let mut character = 0u32;
    for (i, c) in text.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            character = 0;
        } else {
            character += 1;
        }
    }
    Position { line, character }
}
