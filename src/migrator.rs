use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_store_tables::Migration),
            Box::new(m20240301_000002_create_contact_owner_indexes::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    FirstName,
    LastName,
    Birthday,
    TaxId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Suppliers {
    Table,
    Id,
    Name,
    TaxId,
    FantasyName,
    Sales,
    QuantityStock,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Code,
    Sales,
    MarketValue,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    CustomerId,
    OrderDate,
    DeliveryDate,
    DeliveryOrder,
    Discount,
    UkOrderNumber,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Contacts {
    Table,
    Id,
    Phone,
    SecondaryPhone,
    PostalCode,
    Area,
    District,
    AddressNumber,
    City,
    State,
    Country,
    Email,
    CustomerId,
    SupplierId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum ProductSuppliers {
    Table,
    Id,
    ProductId,
    SupplierId,
    Cost,
    Value,
    Quantity,
    SupplierProductCode,
    SupplierProductName,
    Sales,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum OrderProductSuppliers {
    Table,
    Id,
    OrderId,
    ProductSupplierId,
    Value,
    Discount,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn timestamp_cols<T: IntoIden>(created: T, updated: T, deleted: T) -> [ColumnDef; 3] {
    [
        ColumnDef::new(created)
            .timestamp_with_time_zone()
            .not_null()
            .to_owned(),
        ColumnDef::new(updated)
            .timestamp_with_time_zone()
            .not_null()
            .to_owned(),
        ColumnDef::new(deleted)
            .timestamp_with_time_zone()
            .null()
            .to_owned(),
    ]
}

fn money_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).decimal_len(19, 4).not_null().to_owned()
}

fn with_timestamps(
    mut table: TableCreateStatement,
    cols: [ColumnDef; 3],
) -> TableCreateStatement {
    for mut col in cols {
        table.col(&mut col);
    }
    table
}

mod m20240301_000001_create_store_tables {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000001_create_store_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(with_timestamps(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(&mut id_col(Customers::Id))
                        .col(ColumnDef::new(Customers::FirstName).string().not_null())
                        .col(ColumnDef::new(Customers::LastName).string().not_null())
                        .col(
                            ColumnDef::new(Customers::Birthday)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::TaxId).string().not_null())
                        .to_owned(),
                    timestamp_cols(
                        Customers::CreatedAt,
                        Customers::UpdatedAt,
                        Customers::DeletedAt,
                    ),
                ))
                .await?;

            manager
                .create_table(with_timestamps(
                    Table::create()
                        .table(Suppliers::Table)
                        .if_not_exists()
                        .col(&mut id_col(Suppliers::Id))
                        .col(ColumnDef::new(Suppliers::Name).string().not_null())
                        .col(ColumnDef::new(Suppliers::TaxId).string().not_null())
                        .col(ColumnDef::new(Suppliers::FantasyName).string().null())
                        .col(
                            ColumnDef::new(Suppliers::Sales)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Suppliers::QuantityStock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                    timestamp_cols(
                        Suppliers::CreatedAt,
                        Suppliers::UpdatedAt,
                        Suppliers::DeletedAt,
                    ),
                ))
                .await?;

            manager
                .create_table(with_timestamps(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(&mut id_col(Products::Id))
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(ColumnDef::new(Products::Code).string().not_null())
                        .col(
                            ColumnDef::new(Products::Sales)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Products::MarketValue).decimal_len(19, 4).null())
                        .to_owned(),
                    timestamp_cols(
                        Products::CreatedAt,
                        Products::UpdatedAt,
                        Products::DeletedAt,
                    ),
                ))
                .await?;

            manager
                .create_table(with_timestamps(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(&mut id_col(Orders::Id))
                        .col(ColumnDef::new(Orders::CustomerId).integer().not_null())
                        .col(
                            ColumnDef::new(Orders::OrderDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::DeliveryDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::DeliveryOrder)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(&mut money_col(Orders::Discount).default(0).to_owned())
                        .col(ColumnDef::new(Orders::UkOrderNumber).string().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_customer")
                                .from(Orders::Table, Orders::CustomerId)
                                .to(Customers::Table, Customers::Id),
                        )
                        .to_owned(),
                    timestamp_cols(Orders::CreatedAt, Orders::UpdatedAt, Orders::DeletedAt),
                ))
                .await?;

            manager
                .create_table(with_timestamps(
                    Table::create()
                        .table(Contacts::Table)
                        .if_not_exists()
                        .col(&mut id_col(Contacts::Id))
                        .col(ColumnDef::new(Contacts::Phone).string().not_null())
                        .col(ColumnDef::new(Contacts::SecondaryPhone).string().null())
                        .col(ColumnDef::new(Contacts::PostalCode).string().not_null())
                        .col(ColumnDef::new(Contacts::Area).string().not_null())
                        .col(ColumnDef::new(Contacts::District).string().not_null())
                        .col(ColumnDef::new(Contacts::AddressNumber).string().not_null())
                        .col(ColumnDef::new(Contacts::City).string().not_null())
                        .col(ColumnDef::new(Contacts::State).string().not_null())
                        .col(ColumnDef::new(Contacts::Country).string().not_null())
                        .col(ColumnDef::new(Contacts::Email).string().null())
                        .col(ColumnDef::new(Contacts::CustomerId).integer().null())
                        .col(ColumnDef::new(Contacts::SupplierId).integer().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_contacts_customer")
                                .from(Contacts::Table, Contacts::CustomerId)
                                .to(Customers::Table, Customers::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_contacts_supplier")
                                .from(Contacts::Table, Contacts::SupplierId)
                                .to(Suppliers::Table, Suppliers::Id),
                        )
                        .to_owned(),
                    timestamp_cols(
                        Contacts::CreatedAt,
                        Contacts::UpdatedAt,
                        Contacts::DeletedAt,
                    ),
                ))
                .await?;

            manager
                .create_table(with_timestamps(
                    Table::create()
                        .table(ProductSuppliers::Table)
                        .if_not_exists()
                        .col(&mut id_col(ProductSuppliers::Id))
                        .col(
                            ColumnDef::new(ProductSuppliers::ProductId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductSuppliers::SupplierId)
                                .integer()
                                .not_null(),
                        )
                        .col(&mut money_col(ProductSuppliers::Cost))
                        .col(&mut money_col(ProductSuppliers::Value))
                        .col(
                            ColumnDef::new(ProductSuppliers::Quantity)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductSuppliers::SupplierProductCode)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductSuppliers::SupplierProductName)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProductSuppliers::Sales)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_suppliers_product")
                                .from(ProductSuppliers::Table, ProductSuppliers::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_suppliers_supplier")
                                .from(ProductSuppliers::Table, ProductSuppliers::SupplierId)
                                .to(Suppliers::Table, Suppliers::Id),
                        )
                        .to_owned(),
                    timestamp_cols(
                        ProductSuppliers::CreatedAt,
                        ProductSuppliers::UpdatedAt,
                        ProductSuppliers::DeletedAt,
                    ),
                ))
                .await?;

            manager
                .create_table(with_timestamps(
                    Table::create()
                        .table(OrderProductSuppliers::Table)
                        .if_not_exists()
                        .col(&mut id_col(OrderProductSuppliers::Id))
                        .col(
                            ColumnDef::new(OrderProductSuppliers::OrderId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrderProductSuppliers::ProductSupplierId)
                                .integer()
                                .not_null(),
                        )
                        .col(&mut money_col(OrderProductSuppliers::Value))
                        .col(
                            &mut money_col(OrderProductSuppliers::Discount)
                                .default(0)
                                .to_owned(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_product_suppliers_order")
                                .from(OrderProductSuppliers::Table, OrderProductSuppliers::OrderId)
                                .to(Orders::Table, Orders::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_product_suppliers_product_supplier")
                                .from(
                                    OrderProductSuppliers::Table,
                                    OrderProductSuppliers::ProductSupplierId,
                                )
                                .to(ProductSuppliers::Table, ProductSuppliers::Id),
                        )
                        .to_owned(),
                    timestamp_cols(
                        OrderProductSuppliers::CreatedAt,
                        OrderProductSuppliers::UpdatedAt,
                        OrderProductSuppliers::DeletedAt,
                    ),
                ))
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_orders_customer_id")
                        .table(Orders::Table)
                        .col(Orders::CustomerId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_product_suppliers_product_id")
                        .table(ProductSuppliers::Table)
                        .col(ProductSuppliers::ProductId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_product_suppliers_supplier_id")
                        .table(ProductSuppliers::Table)
                        .col(ProductSuppliers::SupplierId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_order_product_suppliers_order_id")
                        .table(OrderProductSuppliers::Table)
                        .col(OrderProductSuppliers::OrderId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderProductSuppliers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProductSuppliers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Contacts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Suppliers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }
}

/// One live contact per owner. Partial indexes keep soft-deleted rows out of
/// the uniqueness check.
mod m20240301_000002_create_contact_owner_indexes {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000002_create_contact_owner_indexes"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let db = manager.get_connection();
            db.execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS ux_contacts_live_customer \
                 ON contacts (customer_id) WHERE deleted_at IS NULL",
            )
            .await?;
            db.execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS ux_contacts_live_supplier \
                 ON contacts (supplier_id) WHERE deleted_at IS NULL",
            )
            .await?;
            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let db = manager.get_connection();
            db.execute_unprepared("DROP INDEX IF EXISTS ux_contacts_live_customer")
                .await?;
            db.execute_unprepared("DROP INDEX IF EXISTS ux_contacts_live_supplier")
                .await?;
            Ok(())
        }
    }
}
