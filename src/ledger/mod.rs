mod reader;
mod types;
mod writer;

pub use reader::{ledger_label, ledger_paths, read_ledger};
pub use types::*;
pub use writer::{write_ledger, LedgerError};
