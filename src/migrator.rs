use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_reference_tables::Migration),
            Box::new(m20240101_000002_create_products_table::Migration),
            Box::new(m20240101_000003_create_customers_table::Migration),
            Box::new(m20240101_000004_create_product_boms_table::Migration),
            Box::new(m20240101_000005_create_inventory_tables::Migration),
            Box::new(m20240101_000006_create_orders_tables::Migration),
            Box::new(m20240101_000007_create_receipts_tables::Migration),
            Box::new(m20240101_000008_create_order_images_table::Migration),
        ]
    }
}

fn pk(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn money(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .decimal()
        .not_null()
        .default(0)
        .to_owned()
}

fn created_at(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

mod m20240101_000001_create_reference_tables {
    use super::{created_at, pk};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_reference_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductCategories::Table)
                        .if_not_exists()
                        .col(pk(ProductCategories::Id))
                        .col(
                            ColumnDef::new(ProductCategories::Code)
                                .string_len(32)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(ProductCategories::Name).string().not_null())
                        .col(ColumnDef::new(ProductCategories::Description).text().null())
                        .col(created_at(ProductCategories::CreatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(UnitsOfMeasure::Table)
                        .if_not_exists()
                        .col(pk(UnitsOfMeasure::Id))
                        .col(
                            ColumnDef::new(UnitsOfMeasure::Code)
                                .string_len(32)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(UnitsOfMeasure::Name).string().not_null())
                        .col(ColumnDef::new(UnitsOfMeasure::Description).text().null())
                        .col(created_at(UnitsOfMeasure::CreatedAt))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UnitsOfMeasure::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProductCategories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum ProductCategories {
        Table,
        Id,
        Code,
        Name,
        Description,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub(super) enum UnitsOfMeasure {
        Table,
        Id,
        Code,
        Name,
        Description,
        CreatedAt,
    }
}

mod m20240101_000002_create_products_table {
    use super::m20240101_000001_create_reference_tables::{ProductCategories, UnitsOfMeasure};
    use super::{created_at, money, pk};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(pk(Products::Id))
                        .col(
                            ColumnDef::new(Products::Code)
                                .string_len(32)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(money(Products::Cost))
                        .col(ColumnDef::new(Products::CategoryId).big_integer().null())
                        .col(ColumnDef::new(Products::UnitId).big_integer().null())
                        .col(ColumnDef::new(Products::Description).text().null())
                        .col(
                            ColumnDef::new(Products::OperationType)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(created_at(Products::CreatedAt))
                        .col(created_at(Products::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_category_id")
                                .from(Products::Table, Products::CategoryId)
                                .to(ProductCategories::Table, ProductCategories::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_unit_id")
                                .from(Products::Table, Products::UnitId)
                                .to(UnitsOfMeasure::Table, UnitsOfMeasure::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_operation_type")
                        .table(Products::Table)
                        .col(Products::OperationType)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductImages::Table)
                        .if_not_exists()
                        .col(pk(ProductImages::Id))
                        .col(
                            ColumnDef::new(ProductImages::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductImages::ImageKey).string().not_null())
                        .col(
                            ColumnDef::new(ProductImages::IsPrimary)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(created_at(ProductImages::CreatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_images_product_id")
                                .from(ProductImages::Table, ProductImages::ProductId)
                                .to(Products::Table, Products::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductImages::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Products {
        Table,
        Id,
        Code,
        Name,
        Cost,
        CategoryId,
        UnitId,
        Description,
        OperationType,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum ProductImages {
        Table,
        Id,
        ProductId,
        ImageKey,
        IsPrimary,
        CreatedAt,
    }
}

mod m20240101_000003_create_customers_table {
    use super::{created_at, pk};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(pk(Customers::Id))
                        .col(
                            ColumnDef::new(Customers::Code)
                                .string_len(32)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::Phone).string_len(32).null())
                        .col(ColumnDef::new(Customers::Address).text().null())
                        .col(created_at(Customers::CreatedAt))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Customers {
        Table,
        Id,
        Code,
        Name,
        Phone,
        Address,
        CreatedAt,
    }
}

mod m20240101_000004_create_product_boms_table {
    use super::m20240101_000002_create_products_table::Products;
    use super::{created_at, pk};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_product_boms_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProductBoms::Table)
                        .if_not_exists()
                        .col(pk(ProductBoms::Id))
                        .col(
                            ColumnDef::new(ProductBoms::ParentProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductBoms::ComponentProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductBoms::Quantity)
                                .decimal()
                                .not_null(),
                        )
                        .col(created_at(ProductBoms::CreatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_boms_parent")
                                .from(ProductBoms::Table, ProductBoms::ParentProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_boms_component")
                                .from(ProductBoms::Table, ProductBoms::ComponentProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_boms_parent_component")
                        .table(ProductBoms::Table)
                        .col(ProductBoms::ParentProductId)
                        .col(ProductBoms::ComponentProductId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_boms_component")
                        .table(ProductBoms::Table)
                        .col(ProductBoms::ComponentProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProductBoms::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ProductBoms {
        Table,
        Id,
        ParentProductId,
        ComponentProductId,
        Quantity,
        CreatedAt,
    }
}

mod m20240101_000005_create_inventory_tables {
    use super::m20240101_000002_create_products_table::Products;
    use super::{created_at, pk};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_inventory_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Inventories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Inventories::ProductId)
                                .big_integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Inventories::Quantity)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Inventories::Version).string_len(64).not_null())
                        .col(created_at(Inventories::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventories_product_id")
                                .from(Inventories::Table, Inventories::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .check(Expr::col(Inventories::Quantity).gte(0))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InventoryHistories::Table)
                        .if_not_exists()
                        .col(pk(InventoryHistories::Id))
                        .col(
                            ColumnDef::new(InventoryHistories::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryHistories::Quantity)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryHistories::FinalQuantity)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryHistories::ActorId)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryHistories::ActorName)
                                .string()
                                .not_null(),
                        )
                        .col(created_at(InventoryHistories::ImportedAt))
                        .col(ColumnDef::new(InventoryHistories::Note).text().null())
                        .col(
                            ColumnDef::new(InventoryHistories::ReferenceId)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InventoryHistories::ReferenceType)
                                .string_len(16)
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_histories_product_id")
                                .from(InventoryHistories::Table, InventoryHistories::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_histories_product_id")
                        .table(InventoryHistories::Table)
                        .col(InventoryHistories::ProductId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryHistories::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Inventories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Inventories {
        Table,
        ProductId,
        Quantity,
        Version,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InventoryHistories {
        Table,
        Id,
        ProductId,
        Quantity,
        FinalQuantity,
        ActorId,
        ActorName,
        ImportedAt,
        Note,
        ReferenceId,
        ReferenceType,
    }
}

mod m20240101_000006_create_orders_tables {
    use super::m20240101_000002_create_products_table::Products;
    use super::m20240101_000003_create_customers_table::Customers;
    use super::{created_at, money, pk};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_orders_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(pk(Orders::Id))
                        .col(
                            ColumnDef::new(Orders::Code)
                                .string_len(64)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Orders::CustomerId).big_integer().not_null())
                        .col(
                            ColumnDef::new(Orders::OrderDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Orders::Note).text().null())
                        .col(money(Orders::TotalOriginalCost))
                        .col(money(Orders::TotalSalesRevenue))
                        .col(money(Orders::AdditionalCost))
                        .col(ColumnDef::new(Orders::AdditionalCostNote).text().null())
                        .col(
                            ColumnDef::new(Orders::TaxPercent)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Orders::CreatedBy).string().not_null())
                        .col(created_at(Orders::CreatedAt))
                        .col(created_at(Orders::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_customer_id")
                                .from(Orders::Table, Orders::CustomerId)
                                .to(Customers::Table, Customers::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_customer_id")
                        .table(Orders::Table)
                        .col(Orders::CustomerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_orders_order_date")
                        .table(Orders::Table)
                        .col(Orders::OrderDate)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderItems::Table)
                        .if_not_exists()
                        .col(pk(OrderItems::Id))
                        .col(ColumnDef::new(OrderItems::OrderId).big_integer().not_null())
                        .col(
                            ColumnDef::new(OrderItems::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(OrderItems::Quantity).big_integer().not_null())
                        .col(money(OrderItems::SellingPrice))
                        .col(money(OrderItems::OriginalPrice))
                        .col(
                            ColumnDef::new(OrderItems::DiscountPercent)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(money(OrderItems::FinalAmount))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_items_order_id")
                                .from(OrderItems::Table, OrderItems::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_items_product_id")
                                .from(OrderItems::Table, OrderItems::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_order_items_order_id")
                        .table(OrderItems::Table)
                        .col(OrderItems::OrderId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Orders {
        Table,
        Id,
        Code,
        CustomerId,
        OrderDate,
        Note,
        TotalOriginalCost,
        TotalSalesRevenue,
        AdditionalCost,
        AdditionalCostNote,
        TaxPercent,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum OrderItems {
        Table,
        Id,
        OrderId,
        ProductId,
        Quantity,
        SellingPrice,
        OriginalPrice,
        DiscountPercent,
        FinalAmount,
    }
}

mod m20240101_000007_create_receipts_tables {
    use super::m20240101_000002_create_products_table::Products;
    use super::{created_at, pk};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_receipts_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryReceipts::Table)
                        .if_not_exists()
                        .col(pk(InventoryReceipts::Id))
                        .col(
                            ColumnDef::new(InventoryReceipts::Code)
                                .string_len(64)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(InventoryReceipts::UserId).string().not_null())
                        .col(
                            ColumnDef::new(InventoryReceipts::ReceiptDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryReceipts::Notes).text().null())
                        .col(
                            ColumnDef::new(InventoryReceipts::TotalItems)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(created_at(InventoryReceipts::CreatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InventoryReceiptItems::Table)
                        .if_not_exists()
                        .col(pk(InventoryReceiptItems::Id))
                        .col(
                            ColumnDef::new(InventoryReceiptItems::ReceiptId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryReceiptItems::ProductId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryReceiptItems::Quantity)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryReceiptItems::UnitCost)
                                .decimal()
                                .null(),
                        )
                        .col(ColumnDef::new(InventoryReceiptItems::Notes).text().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_receipt_items_receipt_id")
                                .from(InventoryReceiptItems::Table, InventoryReceiptItems::ReceiptId)
                                .to(InventoryReceipts::Table, InventoryReceipts::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_receipt_items_product_id")
                                .from(InventoryReceiptItems::Table, InventoryReceiptItems::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryReceiptItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InventoryReceipts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum InventoryReceipts {
        Table,
        Id,
        Code,
        UserId,
        ReceiptDate,
        Notes,
        TotalItems,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum InventoryReceiptItems {
        Table,
        Id,
        ReceiptId,
        ProductId,
        Quantity,
        UnitCost,
        Notes,
    }
}

mod m20240101_000008_create_order_images_table {
    use super::{created_at, pk};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000008_create_order_images_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(OrderImages::Table)
                        .if_not_exists()
                        .col(pk(OrderImages::Id))
                        .col(ColumnDef::new(OrderImages::OrderId).big_integer().not_null())
                        .col(ColumnDef::new(OrderImages::ImageKey).string().not_null())
                        .col(
                            ColumnDef::new(OrderImages::IsPrimary)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(created_at(OrderImages::CreatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_images_order_id")
                                .from(OrderImages::Table, OrderImages::OrderId)
                                .to(Orders::Table, Orders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderImages::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Orders {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum OrderImages {
        Table,
        Id,
        OrderId,
        ImageKey,
        IsPrimary,
        CreatedAt,
    }
}
