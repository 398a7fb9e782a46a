//! Text clean-up for Latin-1 PDF output.

use regex::Regex;
use std::sync::OnceLock;

const PUNCTUATION: [(char, &str); 8] = [
    ('\u{2014}', "-"),   // em dash
    ('\u{2013}', "-"),   // en dash
    ('\u{2026}', "..."), // ellipsis
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{2022}', "-"),   // bullet
];

fn emoji_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            "[",
            r"\x{1F600}-\x{1F64F}",
            r"\x{1F300}-\x{1F5FF}",
            r"\x{1F680}-\x{1F6FF}",
            r"\x{1F1E0}-\x{1F1FF}",
            r"\x{2700}-\x{27BF}",
            r"\x{FE00}-\x{FE0F}",
            r"\x{1F900}-\x{1F9FF}",
            r"\x{1FA70}-\x{1FAFF}",
            "]+",
        ))
        .unwrap()
    })
}

/// Strip pictographs, fold typographic punctuation to ASCII and drop anything
/// outside Latin-1. The result is safe for the PDF's standard fonts.
pub fn sanitize(text: &str) -> String {
    let stripped = emoji_regex().replace_all(text, "");

    let mut out = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        if let Some((_, ascii)) = PUNCTUATION.iter().find(|(bad, _)| *bad == c) {
            out.push_str(ascii);
        } else if (c as u32) <= 0xFF {
            out.push(c);
        }
    }
    out
}

/// Latin-1 bytes of already sanitised text.
pub fn to_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|c| u8::try_from(c as u32).ok())
        .collect()
}
