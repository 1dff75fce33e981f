// fixtures/tables/mod.rs
//
// Test table definitions. Each table is a struct implementing TestTable.

pub mod skills;

pub use skills::{Skill, SkillTable};
