//! Author and title extraction from raw archive file names.
//!
//! File names in a typical dump look like
//! `"012 - [Circle (Author)] タイトル 第3話 [Digital] [1234567].zip"`: a list
//! index, an attribution bracket, the title itself, a chapter or volume marker
//! and a cluster of trailing tags. [`parse`] peels those layers off in a fixed
//! order and returns what is left as a [`ParsedTitle`].
//!
//! Parsing never fails. When the name does not follow the usual shape the
//! whole cleaned stem becomes the title and the author is left empty.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ParsedTitle;

static INDEX_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s*-\s*").expect("static regex"));

static CHAPTER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*第?\d+(?:\.\d+)?[巻话話章]?$").expect("static regex"));

// The numeral may not be glued to a latin letter, otherwise "PHOENIX" would lose its IX.
static ROMAN_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z])(\s*第?[IVXLCDM]+[巻话話章]?)$").expect("static regex")
});

/// Splits a file name into its author attribution and source title.
///
/// The steps, applied in order:
///
/// 1. Drop the extension.
/// 2. Drop a leading list index such as `"007 - "`.
/// 3. Drop trailing `[...]` groups, one after another.
/// 4. Drop one trailing chapter/volume number (`2`, `第3話`, `1.5巻`).
/// 5. Drop one trailing roman numeral marker (`II`, `第IV章`).
/// 6. Everything up to the first `]` is the author, the rest is the title.
///
/// Steps 2 to 5 are skipped when they would leave nothing behind, so a file
/// called `1984.zip` keeps `1984` as its title. Steps 3 to 5 are also skipped
/// when they would leave nothing after the author bracket: `[A] 1984.zip`
/// gives author `[A]` and title `1984`.
///
/// # Example
///
/// ```
/// let parsed = parse("[AuthorX] Title [9999].zip");
/// assert_eq!(parsed.author_info, "[AuthorX]");
/// assert_eq!(parsed.source_title, "Title");
/// ```
pub fn parse(raw_name: &str) -> ParsedTitle {
    let (stem, _ext) = split_extension(raw_name);

    let mut name = strip_index_prefix(stem).trim();
    name = strip_trailing_tags(name);
    name = strip_chapter_marker(name);
    name = strip_roman_marker(name);

    split_author(name.trim())
}

/// Splits off the extension the same way `Path::file_stem` does: a leading
/// dot does not start an extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        None | Some(0) => (name, ""),
        Some(pos) => (&name[..pos], &name[pos..]),
    }
}

fn strip_index_prefix(stem: &str) -> &str {
    match INDEX_PREFIX.find(stem) {
        Some(m) if m.end() < stem.len() && !stem[m.end()..].trim().is_empty() => &stem[m.end()..],
        _ => stem,
    }
}

fn strip_trailing_tags(mut name: &str) -> &str {
    while name.ends_with(']') {
        let Some(pos) = name.rfind('[') else {
            break;
        };

        let rest = name[..pos].trim();
        if !leaves_title(rest) {
            break;
        }
        name = rest;
    }
    name
}

fn strip_chapter_marker(name: &str) -> &str {
    match CHAPTER_MARKER.find(name) {
        Some(m) if leaves_title(&name[..m.start()]) => &name[..m.start()],
        _ => name,
    }
}

fn strip_roman_marker(name: &str) -> &str {
    let Some(marker) = ROMAN_MARKER.captures(name).and_then(|caps| caps.get(1)) else {
        return name;
    };

    let rest = &name[..marker.start()];
    if leaves_title(rest) { rest } else { name }
}

// Whether `candidate` still has a title once the author bracket is split off.
fn leaves_title(candidate: &str) -> bool {
    let candidate = candidate.trim();
    match candidate.find(']') {
        Some(pos) if candidate[..pos].contains('[') => !candidate[pos + 1..].trim().is_empty(),
        _ => !candidate.is_empty(),
    }
}

fn split_author(name: &str) -> ParsedTitle {
    let Some(pos) = name.find(']') else {
        return ParsedTitle {
            author_info: String::new(),
            source_title: name.to_string(),
            ambiguous: false,
        };
    };

    if !name[..pos].contains('[') {
        return ParsedTitle {
            author_info: String::new(),
            source_title: name.to_string(),
            ambiguous: true,
        };
    }

    let title = name[pos + 1..].trim();
    if title.is_empty() {
        // nothing but the attribution, e.g. "[Circle].zip"
        return ParsedTitle {
            author_info: String::new(),
            source_title: name.to_string(),
            ambiguous: false,
        };
    }

    ParsedTitle {
        author_info: name[..=pos].trim().to_string(),
        source_title: title.to_string(),
        ambiguous: false,
    }
}
