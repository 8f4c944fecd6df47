pub mod ledger_index;
pub mod request;
pub mod response;
