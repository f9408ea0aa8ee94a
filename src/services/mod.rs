//! Service layer for homebox
//!
//! The service layer provides the ledger's business rules on top of the
//! storage layer: validation, name resolution and logging of mutations.

pub mod category;
pub mod ledger;
pub mod member;

pub use category::CategoryService;
pub use ledger::{LedgerService, MAX_QUERY_ROWS};
pub use member::MemberService;
