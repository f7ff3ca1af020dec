use super::*;

#[test]
fn fields_indices_and_keys() {
    let path = [
        PathElem::Field("graphs"),
        PathElem::Key("track:tl:v1".to_string()),
        PathElem::Field("nodes"),
        PathElem::Index(2),
    ];
    assert_eq!(format_path(&path), r#"$.graphs["track:tl:v1"].nodes[2]"#);
    assert_eq!(format_path(&[]), "$");
}

#[test]
fn quotes_and_backslashes_in_keys_are_escaped() {
    let path = [PathElem::Key(r#"a"b\c"#.to_string())];
    assert_eq!(format_path(&path), r#"$["a\"b\\c"]"#);
}
