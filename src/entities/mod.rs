pub mod customer;
pub mod inventory;
pub mod inventory_history;
pub mod inventory_receipt;
pub mod inventory_receipt_item;
pub mod order;
pub mod order_image;
pub mod order_item;
pub mod product;
pub mod product_bom;
pub mod product_category;
pub mod product_image;
pub mod unit_of_measure;
