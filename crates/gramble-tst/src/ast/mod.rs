pub mod common;
pub mod header;
pub mod node;

pub use common::Cell;
pub use header::{Header, TstHeader};
pub use node::{Operator, TstCollection, TstGrid, TstNode, TstOp, TstRow};
