use std::sync::Arc;

#[test]
fn test_get_line_ranges() {
    let text = "Hello\nworld\r\n!\rtes";
    let ranges = super::get_line_ranges(text);
    assert_eq!(ranges, vec![0..5, 6..11, 13..14, 15..18]);
}

#[test]
fn test_get_line_ranges_trailing_terminator() {
    assert_eq!(super::get_line_ranges("fn\n"), vec![0..2]);
    assert_eq!(super::get_line_ranges("fn\n\n"), vec![0..2, 3..3]);
    assert!(super::get_line_ranges("").is_empty());
}

#[test]
fn test_mapped_file() {
    const TEST_FILE: &str = "test file";
    let source_file = super::SourceFile::temp(TEST_FILE).unwrap();
    assert_eq!(source_file.content(), TEST_FILE);
}

#[test]
fn test_empty_file() {
    let source_file = super::SourceFile::temp("").unwrap();
    assert_eq!(source_file.content(), "");
    assert_eq!(source_file.line_count(), 0);
    assert!(source_file.line(0).is_none());
}

#[test]
fn test_lines() {
    let source_file = super::SourceFile::temp("fn main\r\n  return 1;\n\n}").unwrap();

    let lines = source_file.lines().collect::<Vec<_>>();
    assert_eq!(lines, vec!["fn main", "  return 1;", "", "}"]);
    assert_eq!(source_file.line(1), Some("  return 1;"));
    assert_eq!(source_file.line_count(), 4);
}

#[test]
fn test_name_is_final_path_component() {
    let source_file = super::SourceFile::temp("").unwrap();
    let expected = source_file
        .full_path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();

    assert_eq!(source_file.name().to_string(), expected);
    assert!(expected.starts_with("vscript"));
    assert!(expected.ends_with(".vs"));
}

#[test]
fn test_position_display_is_one_based() {
    let position = super::Position::new(Arc::from("main.vs"), 0, 0);
    assert_eq!(position.to_string(), "main.vs:1:1");

    let position = super::Position::new(Arc::from("main.vs"), 7, 2);
    assert_eq!(position.to_string(), "main.vs:3:8");
}
