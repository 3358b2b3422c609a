use gramble_source::{InternalError, MessageKind};
use gramble_tst::{Cell, Operator, TstCollection, TstNode, TstOp};

use crate::pass::{Pass, PassEnv, Transform};

/// Wraps every bare grid in an implicit `table` operator.
///
/// Grids are only meaningful as the child of `table`, `test` or `testnot`.
/// A grid found anywhere else (as the sibling of an operator, as the child of
/// `or` or an assignment, or directly inside a collection) is read as a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertTables;

fn wrap_in_table(node: TstNode) -> TstNode {
    match node {
        TstNode::Grid(grid) => {
            let cell = Cell::new("table:", grid.cell.pos.clone());
            TstNode::op(cell, Operator::Table, TstNode::Empty, TstNode::Grid(grid))
        }
        node => node,
    }
}

impl InsertTables {
    fn post_transform(&self, node: TstNode, env: &mut PassEnv) -> TstNode {
        match node {
            TstNode::Op(TstOp { cell, op, sibling, child }) => {
                let sibling = wrap_in_table(*sibling);
                let child = if child.is_grid() && !op.allows_grid_child() {
                    env.info(MessageKind::ImplicitTable { op: op.to_string() }, child.pos());
                    wrap_in_table(*child)
                } else {
                    *child
                };
                TstNode::op(cell, op, sibling, child)
            }
            TstNode::Collection(TstCollection { cell, name, children }) => {
                let children = children.into_iter().map(wrap_in_table).collect();
                TstNode::Collection(TstCollection { cell, name, children })
            }
            TstNode::Grid(_) | TstNode::Empty => node,
        }
    }
}

impl Pass for InsertTables {
    type Input = TstNode;
    type Output = TstNode;

    fn name(&self) -> &'static str {
        "insert-tables"
    }

    fn transform(&self, input: TstNode, env: &mut PassEnv) -> Result<TstNode, InternalError> {
        input.transform_bottom_up(env, &mut |node: TstNode, env: &mut PassEnv| {
            Ok(self.post_transform(node, env))
        })
    }
}
