use gramble_source::{InternalError, MessageKind};
use gramble_tst::{TstGrid, TstNode, TstOp};

use crate::pass::{Pass, PassEnv, Transform};

/// Removes non-literal columns from the grids under `test` and `testnot`.
///
/// Test rows must be plain strings on named tapes. Each offending column is
/// reported once, at its header cell, and dropped together with its cells.
/// Comment columns contribute nothing and stay.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckTestLiterals;

fn check_grid(mut grid: TstGrid, env: &mut PassEnv) -> TstGrid {
    let invalid: Vec<usize> = grid
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !h.header.is_literal() && !h.header.is_comment())
        .map(|(index, _)| index)
        .collect();

    for &index in &invalid {
        let header = &grid.headers[index];
        env.error(
            MessageKind::NonLiteralTestHeader { header: header.header.to_string() },
            Some(&header.pos),
        );
    }

    // Highest index first so the remaining indices stay valid.
    for &index in invalid.iter().rev() {
        grid.remove_column(index);
    }
    grid
}

impl Pass for CheckTestLiterals {
    type Input = TstNode;
    type Output = TstNode;

    fn name(&self) -> &'static str {
        "check-test-literals"
    }

    fn transform(&self, input: TstNode, env: &mut PassEnv) -> Result<TstNode, InternalError> {
        input.transform_bottom_up(env, &mut |node: TstNode, env: &mut PassEnv| match node {
            TstNode::Op(TstOp { cell, op, sibling, child }) if op.is_test() => {
                let child = match *child {
                    TstNode::Grid(grid) => TstNode::Grid(check_grid(grid, env)),
                    other => other,
                };
                Ok(TstNode::op(cell, op, *sibling, child))
            }
            node => Ok(node),
        })
    }
}
