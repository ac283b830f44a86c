use docmap::{BuildConfig, Entry, Error};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config(src: &Path, out: &Path) -> BuildConfig {
    BuildConfig {
        source_root: src.to_path_buf(),
        output_dir: out.to_path_buf(),
        ..BuildConfig::default()
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn output_names(out: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn empty_source_writes_empty_map() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    let summary = docmap::run(&config(src.path(), out.path())).unwrap();

    assert_eq!(summary.documents, 0);
    assert_eq!(read_json(&out.path().join("map.json")), json!([]));
    assert_eq!(output_names(out.path()), vec!["map.json"]);
}

#[test]
fn nested_document_gets_namespaced_payload() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::create_dir(src.path().join("notes")).unwrap();
    fs::write(
        src.path().join("notes").join("a.md"),
        "# Hello World\n- tag list\n\nFirst real paragraph.\n",
    )
    .unwrap();

    docmap::run(&config(src.path(), out.path())).unwrap();

    let map = read_json(&out.path().join("map.json"));
    let notes = &map[0];
    assert_eq!(notes["name"], "notes");
    assert_eq!(notes["path"], "");
    assert_eq!(notes["size"], -1);
    assert_eq!(notes["children"].as_array().unwrap().len(), 1);

    let doc = &notes["children"][0];
    assert_eq!(doc["name"], "a.md");
    assert_eq!(doc["path"], "desktop_notes_a.json");
    assert_eq!(doc["title"], "Hello World");
    assert_eq!(doc["abstract"], "First real paragraph.");
    assert_eq!(doc["size"], 48);
    assert!(doc["lastedittime"].is_i64());
    assert!(doc.get("children").is_none());

    let payload = read_json(&out.path().join("desktop_notes_a.json"));
    assert_eq!(
        payload,
        json!({ "data": "# Hello World\n- tag list\n\nFirst real paragraph.\n" })
    );
}

#[test]
fn map_reads_back_as_entries() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(src.path().join("top level.md"), "no heading here\n").unwrap();

    docmap::run(&config(src.path(), out.path())).unwrap();

    let raw = fs::read_to_string(out.path().join("map.json")).unwrap();
    let entries: Vec<Entry> = serde_json::from_str(&raw).unwrap();
    let [Entry::Document(doc)] = entries.as_slice() else {
        panic!("expected one document, got {entries:?}");
    };
    assert_eq!(doc.path, "desktop_top_level.json");
    assert_eq!(doc.title, "");
    assert_eq!(doc.abstract_text, "");
}

#[test]
fn stale_output_is_removed_and_protected_kept() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(out.path().join("stale.json"), "{}").unwrap();
    fs::write(out.path().join("favicon.ico"), [1u8, 2, 3]).unwrap();
    fs::write(src.path().join("post.md"), "# Post\n").unwrap();

    docmap::run(&config(src.path(), out.path())).unwrap();

    assert_eq!(
        output_names(out.path()),
        vec!["desktop_post.json", "favicon.ico", "map.json"]
    );
    assert_eq!(fs::read(out.path().join("favicon.ico")).unwrap(), vec![1, 2, 3]);
}

#[test]
fn repeated_runs_are_identical() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::create_dir(src.path().join("sub dir")).unwrap();
    fs::write(src.path().join("one.md"), "# One\nAbstract one\n").unwrap();
    fs::write(src.path().join("sub dir").join("two.md"), "# Two\n").unwrap();
    let config = config(src.path(), out.path());

    docmap::run(&config).unwrap();
    let first_map = fs::read(out.path().join("map.json")).unwrap();
    let first_payload = fs::read(out.path().join("desktop_sub_dir_two.json")).unwrap();

    docmap::run(&config).unwrap();
    assert_eq!(fs::read(out.path().join("map.json")).unwrap(), first_map);
    assert_eq!(
        fs::read(out.path().join("desktop_sub_dir_two.json")).unwrap(),
        first_payload
    );
}

#[test]
fn custom_namespace_and_map_name() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(src.path().join("x.md"), "# X\n").unwrap();
    let config = BuildConfig {
        root_namespace: "site".into(),
        map_file: "tree.json".into(),
        ..config(src.path(), out.path())
    };

    docmap::run(&config).unwrap();

    assert_eq!(
        output_names(out.path()),
        vec!["site_x.json", "tree.json"]
    );
}

#[test]
fn missing_source_fails_without_touching_output() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(out.path().join("keep-me.json"), "{}").unwrap();

    let err = docmap::run(&config(&dir.path().join("nope"), out.path())).unwrap_err();

    assert!(matches!(err, Error::NotADirectory(_)));
    assert!(out.path().join("keep-me.json").exists());
}
