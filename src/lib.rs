//! roll-option predicate engine
//!
//! exposes the predicate evaluator plus the config and CLI layers used by the
//! `rollpred` binary.

pub mod cli;
pub mod config;
pub mod predicate;

pub use predicate::{
    FactSet, InvalidStatementError, Operand, Predicate, RawStatement, RollOptions, Statement,
};
