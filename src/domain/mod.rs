pub mod billing;
pub mod payments;
