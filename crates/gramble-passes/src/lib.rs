//! Tree-rewrite passes that take a TST to an unflattened Grammar IR.
//!
//! Every stage implements [`Pass`]. Stages are chained with
//! [`Pass::compose`] and run through [`Pass::get_env_and_transform`], which
//! threads one [`PassEnv`] through the chain and hands back the final tree
//! together with every message and test case the stages produced.
//!
//! The stages defined here, in pipeline order:
//!
//! 1. [`InsertTables`]: wraps bare grids in implicit `table` operators
//! 2. [`CheckTestLiterals`]: drops non-literal columns from test grids
//! 3. [`TranslateTst`]: turns the TST into Grammar IR and collects test cases
//! 4. [`AssignDefaults`]: synthesizes the `.all` symbol of every collection

mod assign_defaults;
mod check_test_literals;
mod insert_tables;
pub mod pass;
mod translate;

pub use assign_defaults::AssignDefaults;
pub use check_test_literals::CheckTestLiterals;
pub use insert_tables::InsertTables;
pub use pass::{Compose, Pass, PassEnv, PassOutput, TestCase, Transform};
pub use translate::TranslateTst;
