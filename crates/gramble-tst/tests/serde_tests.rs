use gramble_source::CellPos;
use gramble_tst::{Cell, Header, Operator, TstNode};

const VERB_SHEET: &str = r#"
{
  "type": "collection",
  "cell": { "text": "Verbs", "pos": { "sheet": "Verbs", "row": 0, "col": 0 } },
  "name": "Verbs",
  "children": [
    {
      "type": "op",
      "cell": { "text": "verb =", "pos": { "sheet": "Verbs", "row": 0, "col": 0 } },
      "op": { "kind": "assign", "name": "verb" },
      "child": {
        "type": "op",
        "cell": { "text": "table:", "pos": { "sheet": "Verbs", "row": 0, "col": 1 } },
        "op": { "kind": "table" },
        "child": {
          "type": "grid",
          "cell": { "text": "text", "pos": { "sheet": "Verbs", "row": 0, "col": 2 } },
          "headers": [
            { "header": { "kind": "unique", "inner": { "kind": "tape", "name": "text" } },
              "pos": { "sheet": "Verbs", "row": 0, "col": 2 } },
            { "header": { "kind": "embed" }, "pos": { "sheet": "Verbs", "row": 0, "col": 3 } }
          ],
          "rows": [
            { "pos": { "sheet": "Verbs", "row": 1, "col": 2 },
              "cells": [
                { "text": "run", "pos": { "sheet": "Verbs", "row": 1, "col": 2 } },
                { "text": "suffix", "pos": { "sheet": "Verbs", "row": 1, "col": 3 } }
              ] }
          ]
        }
      }
    }
  ]
}
"#;

#[test]
fn test_deserialize_sheet() {
    let node: TstNode = serde_json::from_str(VERB_SHEET).unwrap();
    let TstNode::Collection(coll) = node else {
        panic!("expected a collection");
    };
    assert_eq!(coll.name, "Verbs");
    assert_eq!(coll.children.len(), 1);

    let TstNode::Op(assign) = &coll.children[0] else {
        panic!("expected an operator");
    };
    assert_eq!(assign.op, Operator::assign("verb"));
    assert!(assign.sibling.is_empty());

    let TstNode::Op(table) = assign.child.as_ref() else {
        panic!("expected a table");
    };
    let TstNode::Grid(grid) = table.child.as_ref() else {
        panic!("expected a grid");
    };
    assert_eq!(grid.headers[0].header, Header::unique(Header::tape("text")));
    assert_eq!(grid.headers[1].header, Header::Embed);
    assert_eq!(grid.rows[0].cell(1), Some(&Cell::new("suffix", CellPos::new("Verbs", 1, 3))));
}

#[test]
fn test_serialize_then_read_back() {
    let node = TstNode::op(
        Cell::new("testnot:", CellPos::new("Sheet1", 4, 0)),
        Operator::TestNot,
        TstNode::Empty,
        TstNode::Empty,
    );
    let json = serde_json::to_string(&node).unwrap();
    assert!(json.contains(r#""kind":"testnot""#));
    let back: TstNode = serde_json::from_str(&json).unwrap();
    assert_eq!(back, node);
}

#[test]
fn test_unknown_operator_is_rejected() {
    let json = r#"{ "type": "op", "cell": { "text": "x", "pos": { "sheet": "S", "row": 0, "col": 0 } },
                   "op": { "kind": "replace" } }"#;
    assert!(serde_json::from_str::<TstNode>(json).is_err());
}
