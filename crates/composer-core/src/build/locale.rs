//! Locales supported by the LU engine.

/// Cultures LUIS can build, lowercase.
pub const LUIS_LOCALES: &[&str] = &[
    "ar-ar", "zh-cn", "nl-nl", "en-us", "fr-ca", "fr-fr", "de-de", "gu-in", "hi-in", "it-it",
    "ja-jp", "ko-kr", "mr-in", "pt-br", "es-es", "es-mx", "ta-in", "te-in", "tr-tr",
];

/// Configured locales missing from `supported`, in configured order.
///
/// Comparison ignores ASCII case; duplicates are reported once.
pub fn unsupported_locales<S: AsRef<str>>(configured: &[String], supported: &[S]) -> Vec<String> {
    let mut unsupported: Vec<String> = Vec::new();
    for locale in configured {
        let known = supported
            .iter()
            .any(|s| s.as_ref().eq_ignore_ascii_case(locale));
        if !known && !unsupported.iter().any(|u| u.eq_ignore_ascii_case(locale)) {
            unsupported.push(locale.clone());
        }
    }
    unsupported
}
