//! Text normalization and job description cleaning

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^a-zA-Z0-9\s]").expect("Invalid character regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("Invalid whitespace regex");
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").expect("Invalid tag regex");
    static ref ENTITY: Regex =
        Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z][a-zA-Z0-9]*);").expect("Invalid entity regex");
}

/// Default display length of a cleaned job description
pub const DESCRIPTION_PREVIEW_LENGTH: usize = 500;

/// Lower-case, replace everything outside `[a-zA-Z0-9\s]` with a space,
/// collapse whitespace runs and trim.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced = NON_ALPHANUMERIC.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&replaced, " ").trim().to_string()
}

/// Strip HTML tags and entities from a scraped description and truncate it
/// for display. Not used on text that is about to be scored.
pub fn clean_description(html: &str, max_length: usize) -> String {
    let stripped = HTML_TAG.replace_all(html, "");
    let unescaped = unescape_entities(&stripped);
    let clean = unescaped.split_whitespace().collect::<Vec<_>>().join(" ");

    if clean.chars().count() > max_length {
        let truncated: String = clean.chars().take(max_length).collect();
        format!("{}...", truncated)
    } else {
        clean
    }
}

/// Decode HTML character references in one pass, so an escaped
/// reference such as `&amp;lt;` comes out as `&lt;`. Unknown named
/// entities are left as written.
pub fn unescape_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let body = &caps[1];
            let decoded = match body.strip_prefix('#') {
                Some(code) => {
                    let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => code.parse::<u32>().ok(),
                    };
                    value.and_then(char::from_u32).map(String::from)
                }
                None => named_entity(body).map(String::from),
            };
            decoded.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<&'static str> {
    let decoded = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" | "ensp" | "emsp" | "thinsp" => " ",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "minus" => "\u{2212}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "sbquo" => "\u{201A}",
        "ldquo" => "\u{201C}",
        "rdquo" => "\u{201D}",
        "bdquo" => "\u{201E}",
        "laquo" => "\u{00AB}",
        "raquo" => "\u{00BB}",
        "hellip" => "\u{2026}",
        "bull" => "\u{2022}",
        "middot" => "\u{00B7}",
        "copy" => "\u{00A9}",
        "reg" => "\u{00AE}",
        "trade" => "\u{2122}",
        "deg" => "\u{00B0}",
        "plusmn" => "\u{00B1}",
        "times" => "\u{00D7}",
        "divide" => "\u{00F7}",
        "euro" => "\u{20AC}",
        "pound" => "\u{00A3}",
        "yen" => "\u{00A5}",
        "cent" => "\u{00A2}",
        "sect" => "\u{00A7}",
        "para" => "\u{00B6}",
        "iexcl" => "\u{00A1}",
        "iquest" => "\u{00BF}",
        "agrave" => "\u{00E0}",
        "aacute" => "\u{00E1}",
        "acirc" => "\u{00E2}",
        "atilde" => "\u{00E3}",
        "auml" => "\u{00E4}",
        "aring" => "\u{00E5}",
        "aelig" => "\u{00E6}",
        "ccedil" => "\u{00E7}",
        "egrave" => "\u{00E8}",
        "eacute" => "\u{00E9}",
        "ecirc" => "\u{00EA}",
        "euml" => "\u{00EB}",
        "igrave" => "\u{00EC}",
        "iacute" => "\u{00ED}",
        "icirc" => "\u{00EE}",
        "iuml" => "\u{00EF}",
        "ntilde" => "\u{00F1}",
        "ograve" => "\u{00F2}",
        "oacute" => "\u{00F3}",
        "ocirc" => "\u{00F4}",
        "otilde" => "\u{00F5}",
        "ouml" => "\u{00F6}",
        "oslash" => "\u{00F8}",
        "ugrave" => "\u{00F9}",
        "uacute" => "\u{00FA}",
        "ucirc" => "\u{00FB}",
        "uuml" => "\u{00FC}",
        "yacute" => "\u{00FD}",
        "yuml" => "\u{00FF}",
        "szlig" => "\u{00DF}",
        "Agrave" => "\u{00C0}",
        "Aacute" => "\u{00C1}",
        "Auml" => "\u{00C4}",
        "Ccedil" => "\u{00C7}",
        "Eacute" => "\u{00C9}",
        "Egrave" => "\u{00C8}",
        "Ntilde" => "\u{00D1}",
        "Ouml" => "\u{00D6}",
        "Uuml" => "\u{00DC}",
        _ => return None,
    };
    Some(decoded)
}
