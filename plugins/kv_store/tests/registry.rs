use kvtools_store_plugin::{KvError, NONE_SENTINEL, list_available_stores, load_store, peek, store_file_path};
use std::fs;

#[test]
fn missing_root_lists_sentinel_and_is_created() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("stores");

    assert_eq!(list_available_stores(&root), vec![NONE_SENTINEL.to_string()]);
    assert!(root.is_dir());
}

#[test]
fn lists_only_json_files_sorted() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("zeta.json"), "{}").expect("write");
    fs::write(dir.path().join("Alpha.JSON"), "{}").expect("write");
    fs::write(dir.path().join("beta.json"), "a=1").expect("write");
    fs::write(dir.path().join("notes.txt"), "a=1").expect("write");
    fs::create_dir(dir.path().join("images")).expect("mkdir");

    assert_eq!(
        list_available_stores(dir.path()),
        vec!["Alpha.JSON", "beta.json", "zeta.json"]
    );
}

#[test]
fn sentinel_and_empty_names_do_not_touch_the_filesystem() {
    let root = std::path::Path::new("/definitely/not/a/real/dir");
    for name in [NONE_SENTINEL, "", "   "] {
        let (store, path) = load_store(root, name).expect("load");
        assert!(store.is_empty());
        assert_eq!(path, "");
    }
}

#[test]
fn loads_json_and_kv_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("voices.json"), r#"{"speaker": "Tom"}"#).expect("write");
    fs::write(dir.path().join("lines.json"), "# kv in a .json file\nlang=de\n").expect("write");

    let (store, path) = load_store(dir.path(), "voices.json").expect("load json");
    assert_eq!(store.get_string("speaker").as_deref(), Some("Tom"));
    assert_eq!(path, dir.path().join("voices.json").to_string_lossy());

    let (store, _) = load_store(dir.path(), "lines.json").expect("load kv");
    assert_eq!(store.get_string("lang").as_deref(), Some("de"));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_store(dir.path(), "ghost.json").unwrap_err();
    match err {
        KvError::NotFound { path } => assert!(path.ends_with("ghost.json")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn names_are_reduced_to_their_basename() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("stores");
    fs::create_dir(&root).expect("mkdir");
    fs::write(dir.path().join("secret.json"), r#"{"k": "outside"}"#).expect("write");
    fs::write(root.join("secret.json"), r#"{"k": "inside"}"#).expect("write");

    let (store, _) = load_store(&root, "../secret.json").expect("load");
    assert_eq!(store.get_string("k").as_deref(), Some("inside"));
}

#[test]
fn only_json_names_resolve() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("notes.txt"), "a=1").expect("write");

    assert!(store_file_path(dir.path(), "notes.txt").is_none());
    assert!(store_file_path(dir.path(), "..").is_none());
    assert!(matches!(
        load_store(dir.path(), "notes.txt"),
        Err(KvError::NotFound { .. })
    ));
}

#[test]
fn malformed_file_is_a_format_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("bad.json"), "{ not json }").expect("write");
    assert!(matches!(
        load_store(dir.path(), "bad.json"),
        Err(KvError::Format(_))
    ));
}

#[test]
fn peek_reads_single_values() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("voices.json"),
        r#"{"speaker": "Tom", "tags": ["a"], "n": 3}"#,
    )
    .expect("write");

    assert_eq!(peek(dir.path(), "voices.json", "speaker").expect("peek"), "Tom");
    assert_eq!(peek(dir.path(), "voices.json", "tags").expect("peek"), r#"["a"]"#);
    assert_eq!(peek(dir.path(), "voices.json", "n").expect("peek"), "3");
    assert_eq!(peek(dir.path(), "voices.json", "missing").expect("peek"), "");
}

#[test]
fn peek_requires_file_and_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(matches!(
        peek(dir.path(), "", "k"),
        Err(KvError::InvalidRequest(_))
    ));
    assert!(matches!(
        peek(dir.path(), "voices.json", ""),
        Err(KvError::InvalidRequest(_))
    ));
    assert!(matches!(
        peek(dir.path(), "voices.json", "k"),
        Err(KvError::NotFound { .. })
    ));
}
