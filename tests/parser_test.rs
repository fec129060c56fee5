use mangasort::parser::{parse, split_extension};

fn assert_parsed(raw: &str, author: &str, title: &str) {
    let parsed = parse(raw);
    assert_eq!(parsed.author_info, author, "author of {:?}", raw);
    assert_eq!(parsed.source_title, title, "title of {:?}", raw);
}

#[test]
fn test_strips_single_trailing_tag() {
    assert_parsed("[AuthorX] Title [9999].zip", "[AuthorX]", "Title");
}

#[test]
fn test_strips_every_trailing_tag() {
    assert_parsed(
        "[Circle (Author)] タイトル [Digital] [1234567].zip",
        "[Circle (Author)]",
        "タイトル",
    );
}

#[test]
fn test_strips_chapter_marker() {
    assert_parsed("Title 第3話.zip", "", "Title");
    assert_parsed("[A] 标题 第12话.cbz", "[A]", "标题");
    assert_parsed("[A] 題名 第1章.zip", "[A]", "題名");
}

#[test]
fn test_strips_volume_number() {
    assert_parsed("[Studio] こんにちは 2.zip", "[Studio]", "こんにちは");
    assert_parsed("[A] Title 1.5巻.cbz", "[A]", "Title");
}

#[test]
fn test_strips_only_one_chapter_marker() {
    assert_parsed("[A] T 1 2.zip", "[A]", "T 1");
}

#[test]
fn test_strips_leading_index_before_anything_else() {
    assert_parsed("007 - [A] T.zip", "[A]", "T");
    assert_parsed("01-[A] T.zip", "[A]", "T");
}

#[test]
fn test_strips_roman_numeral_marker() {
    assert_parsed("[A] タイトル II.zip", "[A]", "タイトル");
    assert_parsed("[A] タイトル第IV章.zip", "[A]", "タイトル");
    assert_parsed("Title MIX.zip", "", "Title");
}

#[test]
fn test_keeps_roman_letters_inside_words() {
    assert_parsed("PHOENIX.zip", "", "PHOENIX");
    assert_parsed("[A] Vivid.zip", "[A]", "Vivid");
}

#[test]
fn test_full_name() {
    assert_parsed(
        "012 - [Circle (Author)] タイトル 第3話 [Digital] [1234567].zip",
        "[Circle (Author)]",
        "タイトル",
    );
}

#[test]
fn test_without_brackets_uses_whole_name() {
    let parsed = parse("Some Title.zip");
    assert_eq!(parsed.author_info, "");
    assert_eq!(parsed.source_title, "Some Title");
    assert!(!parsed.ambiguous);
}

#[test]
fn test_keeps_inner_bracket_groups_in_title() {
    assert_parsed("[A] Title [Side B] End.zip", "[A]", "Title [Side B] End");
}

#[test]
fn test_unmatched_bracket_is_ambiguous() {
    let parsed = parse("Title] Extra.zip");
    assert!(parsed.ambiguous);
    assert_eq!(parsed.author_info, "");
    assert_eq!(parsed.source_title, "Title] Extra");
}

#[test]
fn test_never_strips_everything() {
    assert_parsed("1984.zip", "", "1984");
    assert_parsed("[Circle].zip", "", "[Circle]");
    assert_parsed("II.zip", "", "II");
}

#[test]
fn test_never_strips_the_title_after_the_author() {
    assert_parsed("[A] 1.zip", "[A]", "1");
    assert_parsed("[A] 1984.zip", "[A]", "1984");
    assert_parsed("[A] 第2話.zip", "[A]", "第2話");
    assert_parsed("[A] CD.zip", "[A]", "CD");
    assert_parsed("[A] 2 [x].zip", "[A]", "2");
    assert_parsed("[A] [x].zip", "[A]", "[x]");
}

#[test]
fn test_empty_name() {
    let parsed = parse("");
    assert_eq!(parsed.author_info, "");
    assert_eq!(parsed.source_title, "");
}

#[test]
fn test_is_deterministic() {
    let raw = "[Studio] こんにちは 2 [tag].zip";
    assert_eq!(parse(raw), parse(raw));
}

#[test]
fn test_split_extension() {
    assert_eq!(split_extension("a.zip"), ("a", ".zip"));
    assert_eq!(split_extension("a.b.rar"), ("a.b", ".rar"));
    assert_eq!(split_extension(".hidden"), (".hidden", ""));
    assert_eq!(split_extension("noext"), ("noext", ""));
}
