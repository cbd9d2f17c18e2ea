pub mod ledger;

pub use ledger::{EntryReceipt, ExitReceipt, Ledger, Revenue};
