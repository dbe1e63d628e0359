//! exit codes for rollpred commands
//!
//! 0 and 1 mirror `test(1)`: the predicate held or it did not.
//! the remaining codes let scripts tell failure types apart.

/// command completed successfully, or the predicate held
pub const SUCCESS: i32 = 0;

/// the predicate did not hold
pub const NOT_SATISFIED: i32 = 1;

/// general or unknown error
pub const ERROR: i32 = 2;

/// invalid command-line arguments
pub const INVALID_ARGS: i32 = 3;

/// configuration file error
pub const CONFIG_ERROR: i32 = 4;

/// a statement failed validation
pub const INVALID_STATEMENT: i32 = 5;
