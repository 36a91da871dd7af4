//! Domain logic - parsing query output and rewriting manifest text,
//! independent of how the commit is queried or the file is written

pub mod commit;
pub mod rule;

pub use commit::{CommitInfo, QueryFields};
pub use rule::{apply_rules, rules_for, RewriteResult, RuleOutcome, SubstitutionRule};
