//! Pre-flight checks run before any request reaches the build service.

use composer_types::project::{LuFile, QnaFile, QnaSection, Severity};

fn has_empty_question_or_answer(sections: &[QnaSection]) -> bool {
    sections
        .iter()
        .any(|s| s.answer.is_empty() || s.questions.iter().any(|q| q.content.is_empty()))
}

/// One message per referenced QnA file with an empty answer or question.
pub fn qna_errors(files: &[&QnaFile]) -> Vec<String> {
    files
        .iter()
        .filter(|f| !f.qna_sections.is_empty() && has_empty_question_or_answer(&f.qna_sections))
        .map(|f| format!("{}.qna file contains empty answer or questions", f.id))
        .collect()
}

/// One message per referenced LU file carrying error diagnostics.
pub fn lu_errors(files: &[&LuFile]) -> Vec<String> {
    files
        .iter()
        .filter(|f| f.has_errors())
        .map(|f| {
            let details: Vec<&str> = f
                .diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Error)
                .map(|d| d.message.as_str())
                .collect();
            format!("{}.lu file is invalid: {}", f.id, details.join("; "))
        })
        .collect()
}
