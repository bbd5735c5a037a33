//! Repository layer for database operations

pub mod camera_gear;
pub mod consumables;
pub mod lab_equipment;
pub mod users;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        camera_gear::CameraGear, consumable::Consumable, enums::UserRole,
        lab_equipment::LabEquipment, user::User,
    },
};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub consumables: consumables::ConsumablesRepository,
    pub camera_gear: camera_gear::CameraGearRepository,
    pub lab_equipment: lab_equipment::LabEquipmentRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            consumables: consumables::ConsumablesRepository::new(pool.clone()),
            camera_gear: camera_gear::CameraGearRepository::new(pool.clone()),
            lab_equipment: lab_equipment::LabEquipmentRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Read-only view of the inventory tables consumed by the notification
/// engine. The filtered methods push comparisons down to the store and
/// may fail on a degraded backend; callers recover by combining the
/// corresponding full scan with an in-process predicate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn consumables_expiring_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<Consumable>>;

    async fn consumables_all(&self) -> AppResult<Vec<Consumable>>;

    async fn camera_gear_due_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<CameraGear>>;

    async fn camera_gear_overdue_before(&self, today: NaiveDate) -> AppResult<Vec<CameraGear>>;

    async fn camera_gear_all(&self) -> AppResult<Vec<CameraGear>>;

    async fn lab_equipment_all(&self) -> AppResult<Vec<LabEquipment>>;

    /// Users whose role makes them notification recipients (admin/TA)
    async fn notifiable_users(&self) -> AppResult<Vec<User>>;

    async fn users_all(&self) -> AppResult<Vec<User>>;
}

#[async_trait]
impl InventoryStore for Repository {
    async fn consumables_expiring_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<Consumable>> {
        self.consumables.expiring_between(start, end).await
    }

    async fn consumables_all(&self) -> AppResult<Vec<Consumable>> {
        self.consumables.list_all().await
    }

    async fn camera_gear_due_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<CameraGear>> {
        self.camera_gear.due_between(start, end).await
    }

    async fn camera_gear_overdue_before(&self, today: NaiveDate) -> AppResult<Vec<CameraGear>> {
        self.camera_gear.overdue_before(today).await
    }

    async fn camera_gear_all(&self) -> AppResult<Vec<CameraGear>> {
        self.camera_gear.list_all().await
    }

    async fn lab_equipment_all(&self) -> AppResult<Vec<LabEquipment>> {
        self.lab_equipment.list_all().await
    }

    async fn notifiable_users(&self) -> AppResult<Vec<User>> {
        self.users.with_roles(&UserRole::NOTIFIABLE).await
    }

    async fn users_all(&self) -> AppResult<Vec<User>> {
        self.users.list_all().await
    }
}
