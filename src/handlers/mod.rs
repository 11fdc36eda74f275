pub mod bom;
pub mod categories;
pub mod common;
pub mod customers;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod receipts;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{DbPool, UnitOfWork},
    services::{
        bom::BomService, catalog::CatalogService, customers::CustomerService,
        inventory::InventoryService, orders::OrderService, receipts::ReceiptService,
    },
};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<CatalogService>,
    pub customers: Arc<CustomerService>,
    pub bom: Arc<BomService>,
    pub inventory: Arc<InventoryService>,
    pub orders: Arc<OrderService>,
    pub receipts: Arc<ReceiptService>,
}

impl AppServices {
    /// Wires every service onto one pool and one unit-of-work factory.
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig) -> Self {
        let uow = UnitOfWork::new(db_pool.clone(), config.transaction_timeout());

        Self {
            catalog: Arc::new(CatalogService::new(db_pool.clone(), uow.clone())),
            customers: Arc::new(CustomerService::new(db_pool.clone(), uow.clone())),
            bom: Arc::new(BomService::new(
                db_pool.clone(),
                uow.clone(),
                config.bom_max_depth,
            )),
            inventory: Arc::new(InventoryService::new(db_pool.clone(), uow.clone())),
            orders: Arc::new(OrderService::new(
                db_pool.clone(),
                uow.clone(),
                config.bom_max_depth,
                config.currency_scale,
            )),
            receipts: Arc::new(ReceiptService::new(db_pool, uow)),
        }
    }
}
