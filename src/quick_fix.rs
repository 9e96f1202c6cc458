use crate::prelude::*;

/// A single replacement edit derived from a diagnostic's suggestion text.
/// Computed on demand when fixes are requested; never persisted.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CandidateFix {
    pub(crate) title: String,
    pub(crate) range: Range,
    pub(crate) new_text: String,
}

/// Build one fix per candidate. The edit replaces the diagnostic's reported
/// range; `original_word` (from the word-boundary scan) only names the text
/// being replaced in the title. Duplicate candidates produce duplicate
/// fixes.
pub(crate) fn assemble_fixes(
    replace_range: Range,
    original_word: &str,
    candidates: &[String],
) -> Vec<CandidateFix> {
    candidates
        .iter()
        .map(|candidate| CandidateFix {
            title: format!("Replace '{original_word}' with '{candidate}'"),
            range: replace_range,
            new_text: candidate.clone(),
        })
        .collect()
}

impl CandidateFix {
    pub(crate) fn into_code_action(self, uri: &Uri, diagnostic: &Diagnostic) -> CodeAction {
        let mut changes = HashMap::new();
        changes.insert(
            uri.clone(),
            vec![TextEdit {
                range: self.range,
                new_text: self.new_text,
            }],
        );
        CodeAction {
            title: self.title,
            kind: Some(CodeActionKind::QUICKFIX),
            diagnostics: Some(vec![diagnostic.clone()]),
            edit: Some(WorkspaceEdit {
                changes: Some(changes),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}
