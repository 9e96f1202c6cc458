use crate::prelude::*;

/// Element and structure keywords of the notation.
const KEYWORDS: &[&str] = &[
    "process",
    "start",
    "end",
    "task",
    "user",
    "service",
    "script",
    "xor",
    "and",
    "pool",
    "lane",
    "group",
    "note",
    "subprocess",
    "call",
    "event",
    "import",
    "from",
    "as",
];

const FLOW_OPERATORS: &[(&str, &str)] = &[
    ("->", "Sequence flow"),
    ("-->", "Message flow"),
    ("=>", "Default flow"),
    ("..>", "Association"),
];

/// Attribute names usable in `key=value` element attributes.
const ATTRIBUTES: &[&str] = &[
    "timeout",
    "assignee",
    "priority",
    "endpoint",
    "method",
    "version",
    "author",
    "description",
    "collapsed",
];

fn markdown(value: String) -> Documentation {
    Documentation::MarkupContent(MarkupContent {
        kind: MarkupKind::Markdown,
        value,
    })
}

/// The full, position-independent completion list. Static tables only; no
/// information flows in from the checker.
pub(crate) fn completion_items() -> Vec<CompletionItem> {
    let mut items = Vec::with_capacity(KEYWORDS.len() + FLOW_OPERATORS.len() + ATTRIBUTES.len());

    items.extend(KEYWORDS.iter().map(|keyword| CompletionItem {
        label: keyword.to_string(),
        kind: Some(CompletionItemKind::KEYWORD),
        documentation: Some(markdown(format!("BPMN keyword: `{keyword}`"))),
        ..Default::default()
    }));

    items.extend(FLOW_OPERATORS.iter().map(|(op, description)| CompletionItem {
        label: op.to_string(),
        kind: Some(CompletionItemKind::OPERATOR),
        documentation: Some(markdown(description.to_string())),
        ..Default::default()
    }));

    items.extend(ATTRIBUTES.iter().map(|attribute| CompletionItem {
        label: attribute.to_string(),
        kind: Some(CompletionItemKind::PROPERTY),
        insert_text: Some(format!("{attribute}=")),
        ..Default::default()
    }));

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_all_three_tables() {
        let items = completion_items();
        assert_eq!(
            items.len(),
            KEYWORDS.len() + FLOW_OPERATORS.len() + ATTRIBUTES.len()
        );
        assert!(items.iter().any(|item| item.label == "task"
            && item.kind == Some(CompletionItemKind::KEYWORD)));
        assert!(items.iter().any(|item| item.label == "-->"
            && item.kind == Some(CompletionItemKind::OPERATOR)));
    }

    #[test]
    fn attributes_insert_with_equals_sign() {
        let items = completion_items();
        let timeout = items.iter().find(|item| item.label == "timeout").unwrap();
        assert_eq!(timeout.kind, Some(CompletionItemKind::PROPERTY));
        assert_eq!(timeout.insert_text.as_deref(), Some("timeout="));
    }
}
