use hotcmd_refactor::{
    apply_text_edits, initialize_field_at, swap_members, tree_edit, unified_diff, EditError,
    InitializeFieldOptions, TextEdit,
};
use hotcmd_syntax::{find_member_declaration_at, TextRange, TextSize};
use hotcmd_test_utils::parse_fixture;
use pretty_assertions::assert_eq;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

#[test]
fn applies_edits_in_any_order() {
    let edits = [
        TextEdit::replace(range(6, 11), "there"),
        TextEdit::insert(TextSize::from(0), ">> "),
        TextEdit::delete(range(5, 6)),
    ];
    assert_eq!(apply_text_edits("hello world", &edits).unwrap(), ">> hellothere");
}

#[test]
fn rejects_overlapping_and_out_of_bounds_edits() {
    let overlapping = [
        TextEdit::replace(range(0, 4), "a"),
        TextEdit::replace(range(2, 6), "b"),
    ];
    assert_eq!(
        apply_text_edits("abcdefgh", &overlapping),
        Err(EditError::OverlappingEdits {
            first: range(0, 4),
            second: range(2, 6),
        })
    );

    assert_eq!(
        apply_text_edits("abc", &[TextEdit::delete(range(1, 10))]),
        Err(EditError::OutOfBounds {
            range: range(1, 10),
            len: 3,
        })
    );
}

#[test]
fn tree_edit_is_the_minimal_replacement() {
    let text = "class C\n{\n    int a;\n    int b;\n}\n";
    let tree = parse_fixture(text);
    let a = find_member_declaration_at(&tree, TextSize::from(text.find("a;").unwrap() as u32))
        .unwrap();
    let b = find_member_declaration_at(&tree, TextSize::from(text.find("b;").unwrap() as u32))
        .unwrap();
    let swapped = swap_members(&tree, &a, &b).unwrap();

    let edit = tree_edit(&tree, &swapped).unwrap();
    assert_eq!(edit.range, range(18, 30));
    assert_eq!(edit.replacement, "b;\n    int a");
    assert_eq!(apply_text_edits(text, &[edit]).unwrap(), swapped.text());

    assert_eq!(tree_edit(&tree, &tree), None);
}

#[test]
fn preview_shows_the_generated_constructor() {
    let text = "class C\n{\n    private string _name;\n}\n";
    let tree = parse_fixture(text);
    let offset = TextSize::from(text.find("_name").unwrap() as u32);
    let edited = initialize_field_at(
        &tree,
        TextRange::empty(offset),
        &InitializeFieldOptions::default(),
    )
    .unwrap();

    let diff = unified_diff(&tree.text(), &edited.text());
    assert!(diff.starts_with("--- before\n+++ after\n"), "{diff}");
    assert!(diff.contains("+    public C(string name)\n"), "{diff}");
    assert!(diff.contains("+        this._name = name;\n"), "{diff}");
    assert!(!diff.contains("-    private string _name;"), "{diff}");
}
