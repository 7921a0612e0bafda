/// Canonical form for free-text labels: no BOM/zero-width, single spaces, lowercase.
pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Title-cased label, for free text with no canonical spelling ("self-assurance" becomes
/// "Self-Assurance").
pub(crate) fn title_label(value: &str) -> String {
    let mut titled = String::with_capacity(value.len());
    let mut word_start = true;
    for ch in normalize_label(value).chars() {
        if word_start {
            titled.push(ch.to_ascii_uppercase());
        } else {
            titled.push(ch);
        }
        word_start = ch == ' ' || ch == '-';
    }
    titled
}

/// Uppercase letter code (DISC letter, MBTI type) with surrounding noise removed.
pub(crate) fn normalize_code(value: &str) -> String {
    value
        .replace(['\u{feff}', '\u{200b}'], "")
        .trim()
        .to_ascii_uppercase()
}
