//! Command implementations
//!
//! User-facing operations, one module per subcommand, each implemented
//! as methods on `Repository`.

pub mod porcelain;
