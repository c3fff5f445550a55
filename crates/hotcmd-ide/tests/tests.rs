use hotcmd_config::{BraceStyle, HotcmdConfig};
use hotcmd_core::{LineIndex, Selection, TextRange, TextSize};
use hotcmd_ide::{
    assists, is_fully_commented, move_member_down, move_member_up, toggle_comment, AssistId,
    AssistKind, StaticClassifier, SyntaxClassifier, ToggleCommentAction,
};
use hotcmd_refactor::apply_text_edits;
use hotcmd_test_utils::{fixture_with_caret, parse_fixture};
use pretty_assertions::assert_eq;

const CLASS: &str = r#"class C
{
    /// Counts things.
    private int _count;

    // Says hello.
    public void Hello() { } // greeting

    public int Size { get; }
}
"#;

const SWAPPED: &str = r#"class C
{

    // Says hello.
    public void Hello() { } // greeting
    /// Counts things.
    private int _count;

    public int Size { get; }
}
"#;

fn offset_of(text: &str, needle: &str) -> TextSize {
    TextSize::from(text.find(needle).expect("needle not in text") as u32)
}

fn range_of(text: &str, needle: &str) -> TextRange {
    let start = offset_of(text, needle);
    TextRange::at(start, TextSize::from(needle.len() as u32))
}

#[test]
fn move_down_swaps_with_the_next_member() {
    let tree = parse_fixture(CLASS);
    let moved = move_member_down(&tree, offset_of(CLASS, "_count")).unwrap();
    assert_eq!(moved.text(), SWAPPED);
}

#[test]
fn move_up_swaps_with_the_previous_member() {
    let tree = parse_fixture(CLASS);
    let moved = move_member_up(&tree, offset_of(CLASS, "Hello")).unwrap();
    assert_eq!(moved.text(), SWAPPED);
}

#[test]
fn caret_in_a_doc_comment_moves_its_member() {
    let tree = parse_fixture(CLASS);
    let moved = move_member_down(&tree, offset_of(CLASS, "Counts")).unwrap();
    assert_eq!(moved.text(), SWAPPED);
}

#[test]
fn moving_down_then_up_restores_the_text() {
    let tree = parse_fixture(CLASS);
    let down = move_member_down(&tree, offset_of(CLASS, "Hello")).unwrap();
    let text = down.text();
    let up = move_member_up(&down, offset_of(&text, "Hello")).unwrap();
    assert_eq!(up.text(), CLASS);
}

#[test]
fn no_move_past_the_ends_of_a_type() {
    let tree = parse_fixture(CLASS);
    assert_eq!(move_member_down(&tree, offset_of(CLASS, "Size")), None);
    assert_eq!(move_member_up(&tree, offset_of(CLASS, "_count")), None);
}

#[test]
fn no_move_out_of_a_nested_type() {
    let text = "class A\n{\n    int a;\n    class B\n    {\n        int b;\n    }\n}\n";
    let tree = parse_fixture(text);
    assert_eq!(move_member_down(&tree, offset_of(text, "b;")), None);
    assert_eq!(move_member_up(&tree, offset_of(text, "b;")), None);

    let moved = move_member_up(&tree, offset_of(text, "class B")).unwrap();
    let moved = moved.text();
    assert!(
        moved.find("class B").unwrap() < moved.find("int a;").unwrap(),
        "{moved}"
    );
}

#[test]
fn no_move_outside_members() {
    let text = "using System;\nclass C\n{\n    int a;\n    int b;\n}\n";
    let tree = parse_fixture(text);
    assert_eq!(move_member_down(&tree, offset_of(text, "System")), None);
    assert_eq!(move_member_up(&tree, offset_of(text, "System")), None);
    assert_eq!(move_member_down(&tree, TextSize::from(text.len() as u32 + 1)), None);
}

#[test]
fn commented_lines_are_fully_commented() {
    let text = "class C\n{\n    // one\n    // two\n    int x;\n}\n";
    let tree = parse_fixture(text);
    let lines = LineIndex::new(text);
    let classifier = SyntaxClassifier::new(&tree);

    let comments = TextRange::new(
        offset_of(text, "// one"),
        range_of(text, "// two").end(),
    );
    assert!(is_fully_commented(&lines, &Selection::single(comments), &classifier));
    assert!(is_fully_commented(
        &lines,
        &Selection::caret(offset_of(text, "one")),
        &classifier
    ));
    assert_eq!(
        toggle_comment(&lines, &Selection::single(comments), &classifier),
        ToggleCommentAction::Uncomment
    );

    let with_code = TextRange::new(comments.start(), range_of(text, "int x;").end());
    assert!(!is_fully_commented(&lines, &Selection::single(with_code), &classifier));
    assert_eq!(
        toggle_comment(&lines, &Selection::single(with_code), &classifier),
        ToggleCommentAction::Comment
    );
}

#[test]
fn every_selected_range_must_be_commented() {
    let text = "class C\n{\n    // one\n    int x;\n    // two\n}\n";
    let tree = parse_fixture(text);
    let lines = LineIndex::new(text);
    let classifier = SyntaxClassifier::new(&tree);

    let both_comments = Selection::new([range_of(text, "// one"), range_of(text, "// two")]);
    assert!(is_fully_commented(&lines, &both_comments, &classifier));

    let comment_and_code = Selection::new([range_of(text, "// one"), range_of(text, "x;")]);
    assert!(!is_fully_commented(&lines, &comment_and_code, &classifier));
}

#[test]
fn blank_lines_are_not_commented() {
    let text = "// one\n\n// two\n";
    let lines = LineIndex::new(text);
    let classifier = StaticClassifier::from_tags([
        (range_of(text, "// one"), "comment"),
        (range_of(text, "// two"), "XML Doc Comment"),
    ]);

    assert!(!is_fully_commented(
        &lines,
        &Selection::caret(TextSize::from(7)),
        &classifier
    ));
    assert!(is_fully_commented(
        &lines,
        &Selection::single(TextRange::up_to(lines.text_len())),
        &classifier
    ));
}

#[test]
fn initialize_field_is_offered_on_field_variables() {
    let (tree, offset) = fixture_with_caret("class C\n{\n    private string _na$0me;\n}\n");
    let text = tree.text();
    let offered = assists(&tree, TextRange::empty(offset), &HotcmdConfig::default());

    assert_eq!(offered.len(), 1);
    let assist = &offered[0];
    assert_eq!(assist.id, AssistId::INITIALIZE_FIELD_FROM_CONSTRUCTOR);
    assert_eq!(assist.title, "Initialize field from constructor");
    assert_eq!(assist.kind, AssistKind::RefactorRewrite);
    assert_eq!(&text[std::ops::Range::<usize>::from(assist.target)], "_name");

    let expected = "class C\n{\n    private string _name;\n\n    public C(string name)\n    {\n        this._name = name;\n    }\n}\n";
    assert_eq!(assist.tree.text(), expected);
    let edit = assist.edit.clone().unwrap();
    assert_eq!(apply_text_edits(&text, &[edit]).unwrap(), expected);
}

#[test]
fn assists_follow_the_configuration() {
    let mut config = HotcmdConfig::default();
    config.formatting.brace_style = BraceStyle::SameLine;
    let (tree, offset) = fixture_with_caret("class C\n{\n    int _$0a;\n}\n");

    let offered = assists(&tree, TextRange::empty(offset), &config);
    assert_eq!(
        offered[0].tree.text(),
        "class C\n{\n    int _a;\n\n    public C(int a) {\n        this._a = a;\n    }\n}\n"
    );
}

#[test]
fn no_assists_away_from_fields_or_when_inapplicable() {
    let config = HotcmdConfig::default();
    for fixture in [
        "class C\n{\n    void M$0() { }\n}\n",
        "class C\n{\n    private int $0_;\n}\n",
        "class C\n{\n    int _$0a;\n    public C(int a) { }\n}\n",
    ] {
        let (tree, offset) = fixture_with_caret(fixture);
        assert!(
            assists(&tree, TextRange::empty(offset), &config).is_empty(),
            "{fixture}"
        );
    }
}

#[test]
fn assist_ids_and_kinds_serialize_as_snake_case() {
    assert_eq!(
        serde_json::to_value(AssistKind::RefactorRewrite).unwrap(),
        serde_json::json!("refactor_rewrite")
    );
    assert_eq!(
        serde_json::to_value(AssistId::INITIALIZE_FIELD_FROM_CONSTRUCTOR).unwrap(),
        serde_json::json!("initialize_field_from_constructor")
    );
    assert_eq!(
        serde_json::to_value(ToggleCommentAction::Uncomment).unwrap(),
        serde_json::json!("uncomment")
    );
}
