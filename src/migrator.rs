use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_products_table::Migration),
            Box::new(m20240301_000002_create_clients_table::Migration),
            Box::new(m20240301_000003_create_bills_of_lading_table::Migration),
        ]
    }
}

mod m20240301_000001_create_products_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000001_create_products_table"
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
                        .col(
                            ColumnDef::new(Products::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Products::ProductName).string_len(255).not_null())
                        .col(
                            ColumnDef::new(Products::ProductCode)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Products::UnitOfMeasure).string_len(50).null())
                        .col(ColumnDef::new(Products::ProductDescription).text().null())
                        .col(ColumnDef::new(Products::Grade).string_len(100).null())
                        .col(ColumnDef::new(Products::NmfcNumber).string_len(50).null())
                        .col(ColumnDef::new(Products::FreightClass).string_len(50).null())
                        .col(ColumnDef::new(Products::PackingGroup).string_len(50).null())
                        .col(ColumnDef::new(Products::NetWeight).decimal_len(10, 2).null())
                        .col(ColumnDef::new(Products::GrossWeight).decimal_len(10, 2).null())
                        .col(ColumnDef::new(Products::Stackable).string_len(50).null())
                        .col(
                            ColumnDef::new(Products::Hazardous)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Products::HazmatClass).string_len(50).null())
                        .col(ColumnDef::new(Products::NonHazmatClass).string_len(50).null())
                        .col(ColumnDef::new(Products::Account).string_len(100).null())
                        .col(ColumnDef::new(Products::Price).decimal_len(10, 2).null())
                        .col(ColumnDef::new(Products::ActiveStatus).string_len(50).null())
                        .col(
                            ColumnDef::new(Products::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Products::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Products {
        Table,
        Id,
        ProductName,
        ProductCode,
        UnitOfMeasure,
        ProductDescription,
        Grade,
        NmfcNumber,
        FreightClass,
        PackingGroup,
        NetWeight,
        GrossWeight,
        Stackable,
        Hazardous,
        HazmatClass,
        NonHazmatClass,
        Account,
        Price,
        ActiveStatus,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000002_create_clients_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000002_create_clients_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Clients::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Clients::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Clients::ClientName).string_len(255).not_null())
                        .col(
                            ColumnDef::new(Clients::ClientCode)
                                .string_len(100)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Clients::Address).text().null())
                        .col(ColumnDef::new(Clients::City).string_len(100).null())
                        .col(ColumnDef::new(Clients::State).string_len(50).null())
                        .col(ColumnDef::new(Clients::Zip).string_len(20).null())
                        .col(ColumnDef::new(Clients::Phone).string_len(50).null())
                        .col(ColumnDef::new(Clients::Email).string_len(255).null())
                        .col(ColumnDef::new(Clients::ContactPerson).string_len(255).null())
                        .col(ColumnDef::new(Clients::Status).string_len(50).null())
                        .col(
                            ColumnDef::new(Clients::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Clients::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Clients::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Clients {
        Table,
        Id,
        ClientName,
        ClientCode,
        Address,
        City,
        State,
        Zip,
        Phone,
        Email,
        ContactPerson,
        Status,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000003_create_bills_of_lading_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000003_create_bills_of_lading_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(BillsOfLading::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BillsOfLading::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(BillsOfLading::Filename).string_len(255).not_null())
                        .col(ColumnDef::new(BillsOfLading::Content).text().not_null())
                        .col(
                            ColumnDef::new(BillsOfLading::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_bills_of_lading_filename")
                        .table(BillsOfLading::Table)
                        .col(BillsOfLading::Filename)
                        .if_not_exists()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(BillsOfLading::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum BillsOfLading {
        Table,
        Id,
        Filename,
        Content,
        CreatedAt,
    }
}
