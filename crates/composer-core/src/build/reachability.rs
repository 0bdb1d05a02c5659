//! Files referenced by a project's dialogs.
//!
//! Only referenced files are sent to the build service. A LU file counts when
//! a dialog with a recognizer names its base id as `luFile`; a QnA file counts
//! when a dialog names its base id as `qnaFile`. Locale variants of the same
//! base id are all referenced.

use composer_types::project::{DialogInfo, LuFile, QnaFile};

pub fn referred_lu_files<'a>(lu_files: &'a [LuFile], dialogs: &[DialogInfo]) -> Vec<&'a LuFile> {
    lu_files
        .iter()
        .filter(|file| {
            dialogs
                .iter()
                .any(|d| d.lu_provider.is_some() && d.lu_file == file.base_name())
        })
        .collect()
}

pub fn referred_qna_files<'a>(qna_files: &'a [QnaFile], dialogs: &[DialogInfo]) -> Vec<&'a QnaFile> {
    qna_files
        .iter()
        .filter(|file| {
            dialogs
                .iter()
                .any(|d| !d.qna_file.is_empty() && d.qna_file == file.base_name())
        })
        .collect()
}
