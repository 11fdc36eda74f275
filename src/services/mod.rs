// Reference data
pub mod catalog;
pub mod customers;

// Bill of materials and explosion
pub mod bom;

// Stock ledger and the transactions that move it
pub mod inventory;
pub mod orders;
pub mod receipts;
