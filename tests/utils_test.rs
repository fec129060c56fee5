use mangasort::utils::*;
use std::path::Path;

#[test]
fn test_generate_suffix() {
    let suffix = generate_suffix();

    // Should be exactly 12 characters
    assert_eq!(suffix.len(), 12);

    // Should contain only alphanumeric characters
    assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated suffixes should be different
    assert_ne!(suffix, generate_suffix());
}

#[test]
fn test_temp_sibling_stays_in_same_directory() {
    let target = Path::new("/data/cache/translation_cache.json");
    let tmp = temp_sibling(target);

    assert_eq!(tmp.parent(), target.parent());

    let name = tmp.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with(".translation_cache.json."));
    assert!(name.ends_with(".tmp"));
    assert_ne!(tmp, temp_sibling(target));
}

#[test]
fn test_parse_bool() {
    for value in ["1", "true", "TRUE", " yes ", "on"] {
        assert_eq!(parse_bool(value), Some(true), "{:?}", value);
    }
    for value in ["0", "false", "No", "off"] {
        assert_eq!(parse_bool(value), Some(false), "{:?}", value);
    }
    assert_eq!(parse_bool("maybe"), None);
    assert_eq!(parse_bool(""), None);
}

#[tokio::test]
async fn test_list_source_files_returns_sorted_regular_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b [x].zip"), b"").unwrap();
    std::fs::write(dir.path().join("a.cbz"), b"").unwrap();
    std::fs::create_dir(dir.path().join("c.zip")).unwrap();

    let files = list_source_files(dir.path()).await.unwrap();

    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a.cbz", "b [x].zip"]);
    assert_eq!(files[0].path, dir.path().join("a.cbz"));
}

#[tokio::test]
async fn test_list_source_files_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(list_source_files(&dir.path().join("missing")).await.is_err());
}
