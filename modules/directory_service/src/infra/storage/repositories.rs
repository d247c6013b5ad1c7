//! SeaORM repository implementations

use crate::contract::{
    Activity, ActivityId, Building, BuildingId, NewActivity, NewBuilding, NewOrganization,
    Organization, OrganizationId, Phone,
};
use crate::domain::repository::{ActivityRepository, BuildingRepository, OrganizationRepository};
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    prelude::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::entity::{activity, building, organization, organization_activity, phone};

// ===== Building Repository =====

pub struct SeaOrmBuildingRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmBuildingRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BuildingRepository for SeaOrmBuildingRepository {
    async fn create(&self, building: &NewBuilding) -> Result<Building> {
        let active: building::ActiveModel = building.into();
        let model = active.insert(&*self.db).await?;
        model.try_into()
    }

    async fn find_by_id(&self, id: BuildingId) -> Result<Option<Building>> {
        let result = building::Entity::find_by_id(id).one(&*self.db).await?;

        result.map(Building::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Building>> {
        let results = building::Entity::find()
            .order_by_asc(building::Column::Id)
            .all(&*self.db)
            .await?;

        results.into_iter().map(Building::try_from).collect()
    }

    async fn update(&self, id: BuildingId, building: &NewBuilding) -> Result<Option<Building>> {
        use sea_orm::ActiveValue::Set;

        if building::Entity::find_by_id(id).one(&*self.db).await?.is_none() {
            return Ok(None);
        }

        let mut active: building::ActiveModel = building.into();
        active.id = Set(id);
        let model = active.update(&*self.db).await?;

        Ok(Some(model.try_into()?))
    }

    async fn delete(&self, id: BuildingId) -> Result<bool> {
        let txn = self.db.begin().await?;

        // detach explicitly; not every backend enforces ON DELETE SET NULL
        organization::Entity::update_many()
            .col_expr(
                organization::Column::BuildingId,
                Expr::value(Option::<i32>::None),
            )
            .filter(organization::Column::BuildingId.eq(id))
            .exec(&txn)
            .await?;

        let result = building::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}

// ===== Activity Repository =====

pub struct SeaOrmActivityRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmActivityRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityRepository for SeaOrmActivityRepository {
    async fn create(&self, activity: &NewActivity) -> Result<Activity> {
        let active: activity::ActiveModel = activity.into();
        let model = active.insert(&*self.db).await?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: ActivityId) -> Result<Option<Activity>> {
        let result = activity::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Activity>> {
        let result = activity::Entity::find()
            .filter(activity::Column::Name.eq(name))
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn find_children(&self, parent_ids: &[ActivityId]) -> Result<Vec<Activity>> {
        if parent_ids.is_empty() {
            return Ok(vec![]);
        }

        let results = activity::Entity::find()
            .filter(activity::Column::ParentId.is_in(parent_ids.iter().copied()))
            .order_by_asc(activity::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<Activity>> {
        let results = activity::Entity::find()
            .order_by_asc(activity::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn rename(&self, id: ActivityId, name: &str) -> Result<Option<Activity>> {
        use sea_orm::ActiveValue::Set;

        let Some(model) = activity::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let mut active: activity::ActiveModel = model.into();
        active.name = Set(name.to_string());
        let updated = active.update(&*self.db).await?;

        Ok(Some(updated.into()))
    }

    async fn delete_many(&self, ids: &[ActivityId]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;

        organization_activity::Entity::delete_many()
            .filter(organization_activity::Column::ActivityId.is_in(ids.iter().copied()))
            .exec(&txn)
            .await?;

        // children first so the self-referencing key never dangles
        let mut remaining: Vec<ActivityId> = ids.to_vec();
        let mut deleted = 0;
        while !remaining.is_empty() {
            let parents: Vec<ActivityId> = activity::Entity::find()
                .filter(activity::Column::ParentId.is_in(remaining.iter().copied()))
                .all(&txn)
                .await?
                .into_iter()
                .filter_map(|a| a.parent_id)
                .collect();

            let (leaves, inner): (Vec<ActivityId>, Vec<ActivityId>) =
                remaining.into_iter().partition(|id| !parents.contains(id));
            if leaves.is_empty() {
                anyhow::bail!("activity subtree {inner:?} has children outside the delete set");
            }

            deleted += activity::Entity::delete_many()
                .filter(activity::Column::Id.is_in(leaves))
                .exec(&txn)
                .await?
                .rows_affected;
            remaining = inner;
        }

        txn.commit().await?;
        Ok(deleted)
    }
}

// ===== Organization Repository =====

pub struct SeaOrmOrganizationRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrganizationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrganizationRepository for SeaOrmOrganizationRepository {
    async fn create(&self, organization: &NewOrganization) -> Result<Organization> {
        use sea_orm::ActiveValue::{NotSet, Set};

        let txn = self.db.begin().await?;

        let model = organization::ActiveModel {
            id: NotSet,
            name: Set(organization.name.clone()),
            building_id: Set(organization.building_id),
        }
        .insert(&txn)
        .await?;

        insert_children(&txn, model.id, organization).await?;

        let created = load_aggregates(&txn, vec![model])
            .await?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("organization vanished inside its own transaction"))?;

        txn.commit().await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: OrganizationId) -> Result<Option<Organization>> {
        let Some(model) = organization::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        Ok(load_aggregates(&*self.db, vec![model]).await?.pop())
    }

    async fn list_all(&self) -> Result<Vec<Organization>> {
        let models = organization::Entity::find()
            .order_by_asc(organization::Column::Id)
            .all(&*self.db)
            .await?;

        load_aggregates(&*self.db, models).await
    }

    async fn find_by_building(&self, building_id: BuildingId) -> Result<Vec<Organization>> {
        let models = organization::Entity::find()
            .filter(organization::Column::BuildingId.eq(building_id))
            .order_by_asc(organization::Column::Id)
            .all(&*self.db)
            .await?;

        load_aggregates(&*self.db, models).await
    }

    async fn find_by_activities(&self, activity_ids: &[ActivityId]) -> Result<Vec<Organization>> {
        if activity_ids.is_empty() {
            return Ok(vec![]);
        }

        let organization_ids: Vec<OrganizationId> = organization_activity::Entity::find()
            .filter(organization_activity::Column::ActivityId.is_in(activity_ids.iter().copied()))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|link| link.organization_id)
            .collect();

        if organization_ids.is_empty() {
            return Ok(vec![]);
        }

        let models = organization::Entity::find()
            .filter(organization::Column::Id.is_in(organization_ids))
            .order_by_asc(organization::Column::Id)
            .all(&*self.db)
            .await?;

        load_aggregates(&*self.db, models).await
    }

    async fn search_by_name(&self, needle: &str) -> Result<Vec<Organization>> {
        // SQL lower() folds ASCII only, so compare in Rust
        let needle = needle.to_lowercase();
        let models: Vec<organization::Model> = organization::Entity::find()
            .order_by_asc(organization::Column::Id)
            .all(&*self.db)
            .await?
            .into_iter()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .collect();

        load_aggregates(&*self.db, models).await
    }

    async fn list_with_building(&self) -> Result<Vec<Organization>> {
        let models = organization::Entity::find()
            .filter(organization::Column::BuildingId.is_not_null())
            .order_by_asc(organization::Column::Id)
            .all(&*self.db)
            .await?;

        load_aggregates(&*self.db, models).await
    }

    async fn update(
        &self,
        id: OrganizationId,
        organization: &NewOrganization,
    ) -> Result<Option<Organization>> {
        use sea_orm::ActiveValue::Set;

        let txn = self.db.begin().await?;

        let Some(existing) = organization::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: organization::ActiveModel = existing.into();
        active.name = Set(organization.name.clone());
        active.building_id = Set(organization.building_id);
        let model = active.update(&txn).await?;

        delete_children(&txn, id).await?;
        insert_children(&txn, id, organization).await?;

        let updated = load_aggregates(&txn, vec![model]).await?.pop();
        txn.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: OrganizationId) -> Result<bool> {
        let txn = self.db.begin().await?;

        delete_children(&txn, id).await?;
        let result = organization::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Helpers =====

/// Insert phones and activity links owned by an organization
async fn insert_children<C: ConnectionTrait>(
    conn: &C,
    organization_id: OrganizationId,
    organization: &NewOrganization,
) -> Result<()> {
    use sea_orm::ActiveValue::{NotSet, Set};

    if !organization.phones.is_empty() {
        let phones = organization.phones.iter().map(|number| phone::ActiveModel {
            id: NotSet,
            number: Set(number.clone()),
            organization_id: Set(organization_id),
        });
        phone::Entity::insert_many(phones).exec(conn).await?;
    }

    if !organization.activity_ids.is_empty() {
        let links = organization
            .activity_ids
            .iter()
            .map(|activity_id| organization_activity::ActiveModel {
                organization_id: Set(organization_id),
                activity_id: Set(*activity_id),
            });
        organization_activity::Entity::insert_many(links)
            .exec_without_returning(conn)
            .await?;
    }

    Ok(())
}

async fn delete_children<C: ConnectionTrait>(conn: &C, organization_id: OrganizationId) -> Result<()> {
    phone::Entity::delete_many()
        .filter(phone::Column::OrganizationId.eq(organization_id))
        .exec(conn)
        .await?;

    organization_activity::Entity::delete_many()
        .filter(organization_activity::Column::OrganizationId.eq(organization_id))
        .exec(conn)
        .await?;

    Ok(())
}

/// Resolve building, phones and activities for a batch of organizations
///
/// One query per related table regardless of batch size; input order is kept.
async fn load_aggregates<C: ConnectionTrait>(
    conn: &C,
    models: Vec<organization::Model>,
) -> Result<Vec<Organization>> {
    if models.is_empty() {
        return Ok(vec![]);
    }

    let organization_ids: Vec<OrganizationId> = models.iter().map(|m| m.id).collect();
    let building_ids: Vec<BuildingId> = models.iter().filter_map(|m| m.building_id).collect();

    let mut buildings: HashMap<BuildingId, Building> = HashMap::new();
    if !building_ids.is_empty() {
        for model in building::Entity::find()
            .filter(building::Column::Id.is_in(building_ids))
            .all(conn)
            .await?
        {
            buildings.insert(model.id, model.try_into()?);
        }
    }

    let mut phones: HashMap<OrganizationId, Vec<Phone>> = HashMap::new();
    for model in phone::Entity::find()
        .filter(phone::Column::OrganizationId.is_in(organization_ids.iter().copied()))
        .order_by_asc(phone::Column::Id)
        .all(conn)
        .await?
    {
        phones
            .entry(model.organization_id)
            .or_default()
            .push(model.into());
    }

    let links = organization_activity::Entity::find()
        .filter(organization_activity::Column::OrganizationId.is_in(organization_ids))
        .all(conn)
        .await?;

    let mut activities: HashMap<ActivityId, Activity> = HashMap::new();
    if !links.is_empty() {
        for model in activity::Entity::find()
            .filter(activity::Column::Id.is_in(links.iter().map(|l| l.activity_id)))
            .all(conn)
            .await?
        {
            activities.insert(model.id, model.into());
        }
    }

    let mut linked: HashMap<OrganizationId, Vec<Activity>> = HashMap::new();
    for link in links {
        if let Some(activity) = activities.get(&link.activity_id) {
            linked
                .entry(link.organization_id)
                .or_default()
                .push(activity.clone());
        }
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let mut organization_activities = linked.remove(&model.id).unwrap_or_default();
            organization_activities.sort_by_key(|a| a.id);

            Organization {
                id: model.id,
                building: model.building_id.and_then(|id| buildings.get(&id).cloned()),
                phones: phones.remove(&model.id).unwrap_or_default(),
                activities: organization_activities,
                name: model.name,
            }
        })
        .collect())
}
