use gramble_grammar::{Grammar, GrammarKind};
use gramble_passes::{AssignDefaults, CheckTestLiterals, InsertTables, Pass, PassOutput, TranslateTst};
use gramble_source::{CellPos, MessageKind, PassOptions, Severity, ALL_SYMBOL};
use gramble_tst::{Cell, Header, Operator, TstGrid, TstHeader, TstNode, TstRow};

/// Builds a grid whose header row is `row` and whose first column is `col`.
fn grid(sheet: &str, row: usize, col: usize, headers: Vec<Header>, rows: Vec<Vec<&str>>) -> TstNode {
    let at = |r: usize, c: usize| CellPos::new(sheet, r, c);
    let headers = headers
        .into_iter()
        .enumerate()
        .map(|(i, h)| TstHeader::new(h, at(row, col + i)))
        .collect();
    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(i, texts)| {
            let r = row + 1 + i;
            let cells = texts
                .into_iter()
                .enumerate()
                .map(|(j, text)| Cell::new(text, at(r, col + j)))
                .collect();
            TstRow::new(at(r, col), cells)
        })
        .collect();
    TstNode::grid(TstGrid::new(Cell::new("", at(row, col)), headers, rows))
}

fn op(sheet: &str, row: usize, col: usize, op: Operator, sibling: TstNode, child: TstNode) -> TstNode {
    TstNode::op(Cell::new(op.to_string(), CellPos::new(sheet, row, col)), op, sibling, child)
}

fn sheet(name: &str, children: Vec<TstNode>) -> TstNode {
    TstNode::collection(Cell::new(name, CellPos::new(name, 0, 0)), name, children)
}

fn normalize(root: TstNode) -> PassOutput<Grammar> {
    InsertTables
        .compose(CheckTestLiterals)
        .compose(TranslateTst)
        .compose(AssignDefaults)
        .get_env_and_transform(root, PassOptions::default())
}

#[test]
fn test_bare_grids_and_defaults() {
    // verb = (grid)       no explicit table
    let verbs = op(
        "Verbs",
        0,
        0,
        Operator::assign("verb"),
        TstNode::Empty,
        grid("Verbs", 0, 1, vec![Header::tape("text")], vec![vec!["run"], vec!["walk"]]),
    );
    let root = sheet("Project", vec![sheet("Verbs", vec![verbs])]);

    let output = normalize(root);
    let grammar = output.output.unwrap();
    assert_eq!(
        grammar.to_str(),
        "(coll (Verbs (coll (verb (alt (seq text:run) (seq text:walk))) (.all (alt $verb)))) (.all (alt $Verbs..all)))"
    );
    assert_eq!(output.messages.len(), 1);
    assert_eq!(output.messages[0].kind, MessageKind::ImplicitTable { op: "verb =".into() });
}

#[test]
fn test_literal_only_enforcement() {
    let tested = op(
        "Sheet1",
        0,
        1,
        Operator::Table,
        TstNode::Empty,
        grid("Sheet1", 0, 2, vec![Header::tape("text")], vec![vec!["run"]]),
    );
    let inputs = grid(
        "Sheet1",
        3,
        2,
        vec![Header::tape("text"), Header::Embed],
        vec![vec!["run", "verb"], vec!["walk", "noun"]],
    );
    let test = op("Sheet1", 3, 1, Operator::Test, tested, inputs);
    let root = sheet("Sheet1", vec![op("Sheet1", 0, 0, Operator::assign("word"), TstNode::Empty, test)]);

    let output = normalize(root);
    assert!(output.output.is_ok());

    let errors: Vec<_> = output.messages.iter().filter(|m| m.severity() == Severity::Error).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, MessageKind::NonLiteralTestHeader { header: "embed".into() });
    assert_eq!(errors[0].sheet(), Some("Sheet1"));
    assert_eq!(errors[0].row(), Some(3));
    assert_eq!(errors[0].col(), Some(3));

    let inputs: Vec<_> = output.tests.iter().map(|t| t.input.to_str()).collect();
    assert_eq!(inputs, vec!["(seq text:run)", "(seq text:walk)"]);
    assert!(output.tests.iter().all(|t| t.symbol == "word" && !t.negated));
}

#[test]
fn test_default_symbol_lists_direct_members() {
    let a = op("S", 0, 0, Operator::assign("a"), TstNode::Empty, TstNode::Empty);
    let b = op(
        "S",
        2,
        0,
        Operator::assign("B"),
        a,
        op("S", 2, 1, Operator::Table, TstNode::Empty, grid("S", 2, 2, vec![Header::tape("t")], vec![vec!["x"]])),
    );
    let root = sheet("S", vec![b, sheet("Inner", vec![])]);

    let grammar = normalize(root).output.unwrap();
    let GrammarKind::Collection(symbols) = grammar.kind() else {
        panic!("expected a collection");
    };
    let all = symbols.get(ALL_SYMBOL).unwrap();
    assert_eq!(all.to_str(), "(alt $a $B $Inner..all)");
}

#[test]
fn test_assign_defaults_is_idempotent_on_translated_trees() {
    let root = sheet(
        "S",
        vec![op(
            "S",
            0,
            0,
            Operator::assign("x"),
            TstNode::Empty,
            grid("S", 0, 1, vec![Header::tape("t")], vec![vec!["y"]]),
        )],
    );
    let once = normalize(root).output.unwrap();
    let twice = AssignDefaults
        .get_env_and_transform(once.clone(), PassOptions::default())
        .output
        .unwrap();
    assert_eq!(once, twice);
}
