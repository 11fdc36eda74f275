use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    db::UnitOfWork,
    entities::customer::{self, Entity as Customer},
    errors::{storage_error, ServiceError},
    repositories::CodeKind,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCustomerInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCustomerInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerFilter {
    /// Case-sensitive substring of name or code
    pub search: Option<String>,
}

/// Customer reference embedded in order payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub phone: Option<String>,
}

impl From<customer::Model> for CustomerSummary {
    fn from(c: customer::Model) -> Self {
        Self {
            id: c.id,
            code: c.code,
            name: c.name,
            phone: c.phone,
        }
    }
}

pub(crate) async fn require_customer<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<customer::Model, ServiceError> {
    Customer::find_by_id(id)
        .one(conn)
        .await
        .map_err(storage_error("customers.find"))?
        .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", id)))
}

/// Service for managing customers
#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DatabaseConnection>,
    uow: UnitOfWork,
}

impl CustomerService {
    pub fn new(db: Arc<DatabaseConnection>, uow: UnitOfWork) -> Self {
        Self { db, uow }
    }

    /// Creates a customer and assigns its `KH` code.
    #[instrument(skip(self))]
    pub async fn create_customer(
        &self,
        input: CreateCustomerInput,
    ) -> Result<customer::Model, ServiceError> {
        input.validate()?;

        let tx = self.uow.begin().await?;
        let outcome = self
            .uow
            .within_deadline("create_customer", async {
                let conn = tx.conn();
                let inserted = customer::ActiveModel {
                    code: Set(CodeKind::Customer.placeholder()),
                    name: Set(input.name.clone()),
                    phone: Set(input.phone.clone()),
                    address: Set(input.address.clone()),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(conn)
                .await
                .map_err(storage_error("customers.insert"))?;

                let code = CodeKind::Customer.format(inserted.id);
                let mut active: customer::ActiveModel = inserted.into();
                active.code = Set(code);
                active
                    .update(conn)
                    .await
                    .map_err(storage_error("customers.assign_code"))
            })
            .await;
        let created = tx.finish(outcome).await?;

        info!(customer_id = created.id, code = %created.code, "Customer created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        id: i64,
        input: UpdateCustomerInput,
    ) -> Result<customer::Model, ServiceError> {
        input.validate()?;
        let existing = require_customer(&*self.db, id).await?;

        let mut active: customer::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if input.phone.is_some() {
            active.phone = Set(input.phone);
        }
        if input.address.is_some() {
            active.address = Set(input.address);
        }
        active
            .update(&*self.db)
            .await
            .map_err(storage_error("customers.update"))
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: i64) -> Result<customer::Model, ServiceError> {
        require_customer(&*self.db, id).await
    }

    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        filter: CustomerFilter,
    ) -> Result<Vec<customer::Model>, ServiceError> {
        let mut query = Customer::find().order_by_asc(customer::Column::Id);
        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                customer::Column::Name
                    .contains(term)
                    .or(customer::Column::Code.contains(term)),
            );
        }
        query
            .all(&*self.db)
            .await
            .map_err(storage_error("customers.list"))
    }
}
