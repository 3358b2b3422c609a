use expect_test::expect;
use gramble_driver::{CompileConfig, Compiler, Severity};
use gramble_source::{CellPos, MessageKind};
use gramble_tst::{Cell, Header, Operator, TstGrid, TstHeader, TstNode, TstRow};

/// A small workbook: a `Verbs` sheet and a `Main` sheet that embeds it.
const WORKBOOK: &str = r#"
{
  "type": "collection",
  "cell": { "text": "", "pos": { "sheet": "", "row": 0, "col": 0 } },
  "name": "Project",
  "children": [
    {
      "type": "collection",
      "cell": { "text": "Verbs", "pos": { "sheet": "Verbs", "row": 0, "col": 0 } },
      "name": "Verbs",
      "children": [
        {
          "type": "op",
          "cell": { "text": "root =", "pos": { "sheet": "Verbs", "row": 0, "col": 0 } },
          "op": { "kind": "assign", "name": "root" },
          "child": {
            "type": "grid",
            "cell": { "text": "text", "pos": { "sheet": "Verbs", "row": 0, "col": 1 } },
            "headers": [
              { "header": { "kind": "tape", "name": "text" }, "pos": { "sheet": "Verbs", "row": 0, "col": 1 } },
              { "header": { "kind": "tape", "name": "gloss" }, "pos": { "sheet": "Verbs", "row": 0, "col": 2 } }
            ],
            "rows": [
              { "pos": { "sheet": "Verbs", "row": 1, "col": 1 },
                "cells": [
                  { "text": "walk", "pos": { "sheet": "Verbs", "row": 1, "col": 1 } },
                  { "text": "walk", "pos": { "sheet": "Verbs", "row": 1, "col": 2 } }
                ] },
              { "pos": { "sheet": "Verbs", "row": 2, "col": 1 },
                "cells": [
                  { "text": "jump", "pos": { "sheet": "Verbs", "row": 2, "col": 1 } },
                  { "text": "jump", "pos": { "sheet": "Verbs", "row": 2, "col": 2 } }
                ] }
            ]
          }
        }
      ]
    },
    {
      "type": "collection",
      "cell": { "text": "Main", "pos": { "sheet": "Main", "row": 0, "col": 0 } },
      "name": "Main",
      "children": [
        {
          "type": "op",
          "cell": { "text": "word =", "pos": { "sheet": "Main", "row": 0, "col": 0 } },
          "op": { "kind": "assign", "name": "word" },
          "child": {
            "type": "op",
            "cell": { "text": "test:", "pos": { "sheet": "Main", "row": 3, "col": 1 } },
            "op": { "kind": "test" },
            "sibling": {
              "type": "op",
              "cell": { "text": "table:", "pos": { "sheet": "Main", "row": 0, "col": 1 } },
              "op": { "kind": "table" },
              "child": {
                "type": "grid",
                "cell": { "text": "embed", "pos": { "sheet": "Main", "row": 0, "col": 2 } },
                "headers": [
                  { "header": { "kind": "embed" }, "pos": { "sheet": "Main", "row": 0, "col": 2 } },
                  { "header": { "kind": "choice", "tape": "text" }, "pos": { "sheet": "Main", "row": 0, "col": 3 } }
                ],
                "rows": [
                  { "pos": { "sheet": "Main", "row": 1, "col": 2 },
                    "cells": [
                      { "text": "Verbs.root", "pos": { "sheet": "Main", "row": 1, "col": 2 } },
                      { "text": "ed|ing", "pos": { "sheet": "Main", "row": 1, "col": 3 } }
                    ] }
                ]
              }
            },
            "child": {
              "type": "grid",
              "cell": { "text": "text", "pos": { "sheet": "Main", "row": 3, "col": 2 } },
              "headers": [
                { "header": { "kind": "tape", "name": "text" }, "pos": { "sheet": "Main", "row": 3, "col": 2 } },
                { "header": { "kind": "tape", "name": "gloss" }, "pos": { "sheet": "Main", "row": 3, "col": 3 } }
              ],
              "rows": [
                { "pos": { "sheet": "Main", "row": 4, "col": 2 },
                  "cells": [
                    { "text": "walked", "pos": { "sheet": "Main", "row": 4, "col": 2 } },
                    { "text": "walk", "pos": { "sheet": "Main", "row": 4, "col": 3 } }
                  ] },
                { "pos": { "sheet": "Main", "row": 5, "col": 2 },
                  "cells": [
                    { "text": "jumping", "pos": { "sheet": "Main", "row": 5, "col": 2 } },
                    { "text": "jump", "pos": { "sheet": "Main", "row": 5, "col": 3 } }
                  ] }
              ]
            }
          }
        }
      ]
    }
  ]
}
"#;

fn pos(row: usize, col: usize) -> CellPos {
    CellPos::new("Sheet1", row, col)
}

fn sheet(children: Vec<TstNode>) -> TstNode {
    TstNode::collection(Cell::new("Sheet1", pos(0, 0)), "Sheet1", children)
}

fn assign(row: usize, name: &str, sibling: TstNode, child: TstNode) -> TstNode {
    TstNode::op(Cell::new(format!("{} =", name), pos(row, 0)), Operator::assign(name), sibling, child)
}

fn embed_table(row: usize, target: &str) -> TstNode {
    let grid = TstGrid::new(
        Cell::new("embed", pos(row, 1)),
        vec![TstHeader::new(Header::Embed, pos(row, 1))],
        vec![TstRow::new(pos(row + 1, 1), vec![Cell::new(target, pos(row + 1, 1))])],
    );
    TstNode::grid(grid)
}

fn literal_grid(row: usize, tape: &str, values: &[&str]) -> TstNode {
    let rows = values
        .iter()
        .enumerate()
        .map(|(i, value)| TstRow::new(pos(row + 1 + i, 2), vec![Cell::new(*value, pos(row + 1 + i, 2))]))
        .collect();
    TstNode::grid(TstGrid::new(
        Cell::new(tape, pos(row, 2)),
        vec![TstHeader::new(Header::tape(tape), pos(row, 2))],
        rows,
    ))
}

#[test]
fn test_compile_workbook() {
    let root: TstNode = serde_json::from_str(WORKBOOK).unwrap();
    let output = Compiler::default().compile(root);

    // Only the implicit table under `root =` is worth mentioning.
    let kinds: Vec<_> = output.messages.iter().map(|m| &m.kind).collect();
    assert_eq!(kinds, vec![&MessageKind::ImplicitTable { op: "root =".into() }]);
    assert!(!output.has_errors());
    assert!(!output.failed(true));

    let compiled = output.result.unwrap();
    assert_eq!(
        compiled.symbol_names().collect::<Vec<_>>(),
        vec!["Verbs.root", "Verbs..all", "Main.word", "Main..all", ".all"]
    );
    expect![[r#"(alt (seq $Verbs.root (single text (alt .T:ed .T:ing))))"#]]
        .assert_eq(&compiled.symbol("main.word").unwrap().to_str());
    assert_eq!(compiled.tapes_of("Main.word").unwrap().to_string(), "{gloss, text}");
    assert_eq!(compiled.tapes_of(".all").unwrap().to_string(), "{gloss, text}");

    assert_eq!(compiled.tests.len(), 2);
    assert_eq!(compiled.tests[0].symbol, "Main.word");
    assert!(compiled.tests.iter().all(|test| compiled.symbol(&test.symbol).is_some()));
    expect![[r#"
        gloss: jump, walk
        text: jumping, walked
    "#]]
    .assert_eq(&compiled.literals.to_string());
}

#[test]
fn test_recursive_sheet_compiles_with_errors() {
    let b = assign(0, "b", TstNode::Empty, embed_table(0, "a"));
    let a = assign(3, "a", b, embed_table(3, "b"));
    let output = Compiler::default().compile(sheet(vec![a]));

    assert!(output.has_errors());
    assert!(output.failed(false));
    let errors: Vec<_> = output.errors().map(|m| m.kind.clone()).collect();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|k| matches!(k, MessageKind::RecursiveEmbed { .. })));

    let compiled = output.result.unwrap();
    assert_eq!(compiled.symbol("a").unwrap().to_str(), "∅");
    assert!(compiled.tapes_of("b").unwrap().is_empty());
}

#[test]
fn test_every_node_of_the_output_is_annotated() {
    let root: TstNode = serde_json::from_str(WORKBOOK).unwrap();
    let compiled = Compiler::default().compile(root).result.unwrap();
    for name in compiled.symbol_names() {
        assert!(compiled.tapes_of(name).is_some(), "{} has no tapes", name);
    }
    assert!(compiled.grammar.tapes().is_some());
}

#[test]
fn test_info_messages_can_be_turned_off() {
    let config = CompileConfig::from_toml_str("[compile]\nreport_info = false\n").unwrap();
    let root: TstNode = serde_json::from_str(WORKBOOK).unwrap();
    let output = Compiler::new(config).compile(root);
    assert!(output.messages.is_empty());
}

#[test]
fn test_warnings_and_fail_on_warnings() {
    let empty = assign(0, "nothing", TstNode::Empty, TstNode::op(
        Cell::new("table:", pos(0, 1)),
        Operator::Table,
        TstNode::Empty,
        TstNode::Empty,
    ));
    let output = Compiler::default().compile(sheet(vec![empty]));
    let warnings: Vec<_> = output.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity(), Severity::Warning);
    assert_eq!(warnings[0].pos, Some(pos(0, 1)));
    assert!(!output.failed(false));
    assert!(output.failed(true));
}

#[test]
fn test_unknown_embed_is_reported_at_its_cell() {
    let word = assign(0, "word", TstNode::Empty, embed_table(0, "missing"));
    let output = Compiler::default().compile(sheet(vec![word]));
    let errors: Vec<_> = output.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, MessageKind::UnresolvedSymbol { name: "missing".into() });
    assert_eq!(errors[0].pos, Some(pos(1, 1)));
    let compiled = output.result.unwrap();
    assert_eq!(compiled.symbol("word").unwrap().to_str(), "(alt (seq ∅))");
}

#[test]
fn test_collection_operand_does_not_stop_compilation() {
    let sub = TstNode::collection(Cell::new("Sub", pos(1, 2)), "Sub", vec![]);
    let or = TstNode::op(Cell::new("or:", pos(1, 1)), Operator::Or, literal_grid(0, "t", &["a"]), sub);
    let x = assign(0, "x", TstNode::Empty, or);
    let y = assign(4, "y", x, literal_grid(4, "u", &["b"]));
    let output = Compiler::default().compile(sheet(vec![y]));

    assert!(!output.has_errors());
    let warnings: Vec<_> = output.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, MessageKind::MisplacedCollection { name: "Sub".into() });
    assert_eq!(warnings[0].pos, Some(pos(1, 2)));

    let compiled = output.result.unwrap();
    assert_eq!(compiled.symbol("x").unwrap().to_str(), "(alt (alt (seq t:a)) ε)");
    assert_eq!(compiled.tapes_of("x").unwrap().to_string(), "{t}");
    assert_eq!(compiled.tapes_of("y").unwrap().to_string(), "{u}");
}

#[test]
fn test_test_symbols_name_compiled_symbols() {
    let tested = TstNode::op(Cell::new("table:", pos(1, 1)), Operator::Table, TstNode::Empty, literal_grid(1, "text", &["run"]));
    let test = TstNode::op(Cell::new("test:", pos(4, 1)), Operator::Test, tested, literal_grid(4, "text", &["run"]));
    let foo = TstNode::collection(Cell::new("Foo", pos(1, 0)), "Foo", vec![assign(1, "v", TstNode::Empty, test)]);
    let output = Compiler::default().compile(sheet(vec![assign(0, "x", TstNode::Empty, foo)]));
    assert!(output.messages.is_empty(), "{:?}", output.messages);

    let compiled = output.result.unwrap();
    assert_eq!(compiled.symbol_names().collect::<Vec<_>>(), vec!["x.v", "x..all", ".all"]);
    assert_eq!(compiled.tests.len(), 1);
    assert_eq!(compiled.tests[0].symbol, "x.v");
    for test in &compiled.tests {
        assert!(compiled.symbol(&test.symbol).is_some(), "`{}` is not a compiled symbol", test.symbol);
    }
}
