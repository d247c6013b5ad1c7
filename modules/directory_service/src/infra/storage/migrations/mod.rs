//! Database migrations for directory service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_buildings::Migration),
            Box::new(m20250301_000002_create_activities::Migration),
            Box::new(m20250301_000003_create_organizations::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Buildings {
    Table,
    Id,
    Address,
    Latitude,
    Longitude,
}

#[derive(DeriveIden)]
enum Activities {
    Table,
    Id,
    Name,
    ParentId,
}

#[derive(DeriveIden)]
enum Organizations {
    Table,
    Id,
    Name,
    BuildingId,
}

#[derive(DeriveIden)]
enum Phones {
    Table,
    Id,
    Number,
    OrganizationId,
}

#[derive(DeriveIden)]
enum OrganizationActivities {
    Table,
    OrganizationId,
    ActivityId,
}

mod m20250301_000001_create_buildings {
    use super::*;

    pub struct Migration;

    // hand-named: the derive would name every inline module "mod"
    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_buildings"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Buildings::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Buildings::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Buildings::Address).string().not_null())
                        // decimal text keeps the precision the client sent
                        .col(ColumnDef::new(Buildings::Latitude).string().not_null())
                        .col(ColumnDef::new(Buildings::Longitude).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Buildings::Table).to_owned())
                .await
        }
    }
}

mod m20250301_000002_create_activities {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_activities"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Activities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Activities::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Activities::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Activities::ParentId).integer())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_activities_parent")
                                .from(Activities::Table, Activities::ParentId)
                                .to(Activities::Table, Activities::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_activities_parent_id")
                        .table(Activities::Table)
                        .col(Activities::ParentId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Activities::Table).to_owned())
                .await
        }
    }
}

mod m20250301_000003_create_organizations {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_organizations"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Organizations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Organizations::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Organizations::Name).string().not_null())
                        .col(ColumnDef::new(Organizations::BuildingId).integer())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_organizations_building")
                                .from(Organizations::Table, Organizations::BuildingId)
                                .to(Buildings::Table, Buildings::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Phones::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Phones::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Phones::Number).string().not_null())
                        .col(ColumnDef::new(Phones::OrganizationId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_phones_organization")
                                .from(Phones::Table, Phones::OrganizationId)
                                .to(Organizations::Table, Organizations::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrganizationActivities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(OrganizationActivities::OrganizationId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(OrganizationActivities::ActivityId)
                                .integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(OrganizationActivities::OrganizationId)
                                .col(OrganizationActivities::ActivityId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_organization_activities_organization")
                                .from(
                                    OrganizationActivities::Table,
                                    OrganizationActivities::OrganizationId,
                                )
                                .to(Organizations::Table, Organizations::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_organization_activities_activity")
                                .from(
                                    OrganizationActivities::Table,
                                    OrganizationActivities::ActivityId,
                                )
                                .to(Activities::Table, Activities::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // Create indexes
            manager
                .create_index(
                    Index::create()
                        .name("idx_organizations_building_id")
                        .table(Organizations::Table)
                        .col(Organizations::BuildingId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_phones_organization_id")
                        .table(Phones::Table)
                        .col(Phones::OrganizationId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_organization_activities_activity_id")
                        .table(OrganizationActivities::Table)
                        .col(OrganizationActivities::ActivityId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrganizationActivities::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Phones::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Organizations::Table).to_owned())
                .await
        }
    }
}
