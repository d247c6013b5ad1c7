//! SeaORM entities for database tables

/// Buildings table entity
pub mod building {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "buildings")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        pub address: String,

        /// Canonical decimal text, e.g. "55.7558"
        pub latitude: String,

        /// Canonical decimal text, e.g. "37.6173"
        pub longitude: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::organization::Entity")]
        Organizations,
    }

    impl Related<super::organization::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Organizations.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Activity taxonomy table entity
pub mod activity {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "activities")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        #[sea_orm(unique)]
        pub name: String,

        /// Parent activity, null for roots
        pub parent_id: Option<i32>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        /// Self-reference to the parent node
        #[sea_orm(
            belongs_to = "Entity",
            from = "Column::ParentId",
            to = "Column::Id",
            on_delete = "Cascade"
        )]
        Parent,
        #[sea_orm(has_many = "super::organization_activity::Entity")]
        OrganizationActivities,
    }

    impl Related<super::organization_activity::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::OrganizationActivities.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Organizations table entity
pub mod organization {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "organizations")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        pub name: String,

        /// Building the organization occupies, if any
        pub building_id: Option<i32>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::building::Entity",
            from = "Column::BuildingId",
            to = "super::building::Column::Id",
            on_delete = "SetNull"
        )]
        Building,
        #[sea_orm(has_many = "super::phone::Entity")]
        Phones,
        #[sea_orm(has_many = "super::organization_activity::Entity")]
        OrganizationActivities,
    }

    impl Related<super::building::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Building.def()
        }
    }

    impl Related<super::phone::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Phones.def()
        }
    }

    impl Related<super::organization_activity::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::OrganizationActivities.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Phones table entity
pub mod phone {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "phones")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        pub number: String,

        pub organization_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::organization::Entity",
            from = "Column::OrganizationId",
            to = "super::organization::Column::Id",
            on_delete = "Cascade"
        )]
        Organization,
    }

    impl Related<super::organization::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Organization.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Organization <-> activity link table entity
pub mod organization_activity {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "organization_activities")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub organization_id: i32,

        #[sea_orm(primary_key, auto_increment = false)]
        pub activity_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::organization::Entity",
            from = "Column::OrganizationId",
            to = "super::organization::Column::Id",
            on_delete = "Cascade"
        )]
        Organization,
        #[sea_orm(
            belongs_to = "super::activity::Entity",
            from = "Column::ActivityId",
            to = "super::activity::Column::Id",
            on_delete = "Cascade"
        )]
        Activity,
    }

    impl Related<super::organization::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Organization.def()
        }
    }

    impl Related<super::activity::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Activity.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
