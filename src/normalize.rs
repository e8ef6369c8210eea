/// Canonical labels for the universities that show up under many spellings
/// and transliterations in the form responses. Rules are checked in order
/// and the first match wins, so precedence between overlapping substrings
/// is encoded by position in this list.
const CANONICAL_RULES: &[(&[&str], &str)] = &[
    (&["عين شمس", "ain shams"], "جامعة عين شمس"),
    (&["cairo", "القاهرة"], "جامعة القاهرة"),
    (&["helwan", "حلوان"], "جامعة حلوان"),
    (&["azhar", "ازهر", "أزهر"], "جامعة الأزهر"),
    (&["منصور"], "جامعة المنصورة"),
    (&["alex", "اسكندري", "إسكندري"], "جامعة الإسكندرية"),
];

/// Label for respondents still waiting on placement.
pub const PENDING_LABEL: &str = "منتظر التنسيق";

const PENDING_PHRASES: &[&str] = &["لسة", "ثانوي"];

/// Words that already mark a string as an institution name, so it should
/// not get the generic prefix.
const INSTITUTION_WORDS: &[&str] = &[
    "جامع",
    "منتظر",
    "معهد",
    "university",
    "institute",
    "pending",
];

/// Canonicalizes a free-text university name. Total function: every input,
/// including the empty string, produces some label.
///
/// Matching is substring-based, not whole-word, so short names can match an
/// unrelated rule. That is accepted behavior inherited from the form data
/// this was tuned on.
pub fn normalize(raw: &str) -> String {
    let cleaned = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    for (needles, label) in CANONICAL_RULES {
        if needles.iter().any(|needle| cleaned.contains(needle)) {
            return (*label).to_string();
        }
    }

    if cleaned == PENDING_LABEL
        || PENDING_PHRASES.iter().any(|phrase| cleaned.contains(phrase))
    {
        return PENDING_LABEL.to_string();
    }

    if !INSTITUTION_WORDS.iter().any(|word| cleaned.contains(word)) {
        return format!("جامعة {cleaned}");
    }

    capitalize_first(&cleaned)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
