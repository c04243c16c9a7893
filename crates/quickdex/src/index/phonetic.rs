//! Phonetic keys for CJK display names.
//!
//! CJK names get two auxiliary search fields: the full pinyin transliteration
//! and its first letters, both lower-cased with whitespace removed. Non-CJK
//! characters embedded in a CJK name pass through unchanged, so "QQ音乐"
//! becomes "qqyinyue" / "qqyy".

use pinyin::ToPinyin;

pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{4E00}'..='\u{9FFF}'     // CJK Unified Ideographs
        | '\u{3400}'..='\u{4DBF}'   // Extension A
        | '\u{F900}'..='\u{FAFF}'   // Compatibility Ideographs
    )
}

/// Full transliteration: every CJK character replaced by its pinyin syllable.
pub fn phonetic_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len() * 2);
    for (c, syllable) in name.chars().zip(name.to_pinyin()) {
        match syllable {
            Some(p) => out.push_str(p.plain()),
            None => out.push(c),
        }
    }
    normalize(&out)
}

/// First-letter transliteration: every CJK character reduced to the first
/// letter of its pinyin syllable.
pub fn phonetic_initials(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (c, syllable) in name.chars().zip(name.to_pinyin()) {
        match syllable {
            Some(p) => out.push_str(p.first_letter()),
            None => out.push(c),
        }
    }
    normalize(&out)
}

/// Initials fallback for non-CJK names: the first letter of each
/// whitespace-separated token.
pub fn word_initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|token| token.chars().next())
        .collect();
    normalize(&initials)
}

fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_cjk() {
        assert!(contains_cjk("苹果商店"));
        assert!(contains_cjk("QQ音乐"));
        assert!(!contains_cjk("App Store"));
    }

    #[test]
    fn full_key_for_cjk_name() {
        assert_eq!(phonetic_key("苹果商店"), "pingguoshangdian");
    }

    #[test]
    fn initials_for_cjk_name() {
        assert_eq!(phonetic_initials("苹果商店"), "pgsd");
    }

    #[test]
    fn mixed_name_keeps_latin_characters() {
        assert_eq!(phonetic_key("QQ音乐"), "qqyinyue");
        assert_eq!(phonetic_initials("QQ音乐"), "qqyy");
    }

    #[test]
    fn key_strips_whitespace_and_lowercases() {
        assert_eq!(phonetic_key("微信 输入法"), "weixinshurufa");
    }

    #[test]
    fn word_initials_for_multi_word_name() {
        assert_eq!(word_initials("Visual Studio Code"), "vsc");
    }

    #[test]
    fn word_initials_for_single_word_name() {
        assert_eq!(word_initials("Terminal"), "t");
    }
}
