use crate::prelude::*;
use crate::word::word_at;

/// One-line documentation for the notation's fixed vocabulary.
fn documentation_for(word: &str) -> Option<&'static str> {
    Some(match word {
        "process" => "Defines a BPMN process container",
        "subprocess" => "Embedded processes.",
        "start" => "Start event - begins the process flow",
        "end" => "End event - terminates the process flow",
        "task" => "Generic task activity",
        "user" => "User task - requires human interaction",
        "service" => "Service task - automated system call",
        "script" => "Script task - executes code",
        "xor" => "Exclusive gateway - single path selection",
        "and" => "Parallel gateway - multiple parallel paths",
        "pool" => "Process participant container",
        "lane" => "Swimlane within a pool",
        "group" => "Visual grouping of elements",
        "event" => "Intermediate events",
        "call" => "External process invocation",
        "note" => "Process documentation",
        "->" => "Sequence flow - normal process flow",
        "-->" => "Message flow - communication between pools",
        "=>" => "Default flow - fallback path from gateway",
        "..>" => "Association - documentation link",
        _ => return None,
    })
}

/// Hover for the word under the cursor, when it is part of the fixed
/// vocabulary. Position is the editor's 0-based cursor location.
pub(crate) fn hover_at(text: &str, position: Position) -> Option<Hover> {
    let line_text = text.lines().nth(position.line as usize)?;
    let (start, end, word) = word_at(line_text, position.character + 1);
    if word.is_empty() {
        return None;
    }
    let documentation = documentation_for(&word)?;
    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: documentation.to_string(),
        }),
        range: Some(Range {
            start: Position {
                line: position.line,
                character: start as u32,
            },
            end: Position {
                line: position.line,
                character: end as u32,
            },
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_a_keyword_under_the_cursor() {
        let hover = hover_at("task approve\n", Position::new(0, 2)).unwrap();
        assert_eq!(hover.range, Some(Range::new(Position::new(0, 0), Position::new(0, 4))));
        match hover.contents {
            HoverContents::Markup(content) => {
                assert_eq!(content.value, "Generic task activity");
            }
            other => panic!("unexpected hover contents: {other:?}"),
        }
    }

    #[test]
    fn unknown_words_have_no_hover() {
        assert!(hover_at("task approve\n", Position::new(0, 7)).is_none());
    }

    #[test]
    fn position_beyond_the_document_has_no_hover() {
        assert!(hover_at("task approve\n", Position::new(9, 0)).is_none());
    }
}
