//! Command implementations.

pub mod check;
pub mod fuzzify;
pub mod infer;
pub mod init;
pub mod membership;
pub mod rules;
pub mod sets;

pub use self::check::execute_check;
pub use self::fuzzify::execute_fuzzify;
pub use self::infer::execute_infer;
pub use self::init::execute_init;
pub use self::membership::execute_membership;
pub use self::rules::execute_rules;
pub use self::sets::execute_sets;
