//! Deleted-ticket archive entity for SeaORM.
//!
//! No relations: rows must outlive the users and tickets they describe.

use sea_orm::entity::prelude::*;

use crate::domain::DeletedTicket;
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "deleted_tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub original_id: i32,
    pub original_user_id: i32,
    pub original_user_name: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub priority: String,
    pub status: String,
    pub deleted_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for DeletedTicket {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, value: &str| {
            AppError::internal(format!(
                "archived ticket {} has unknown {} {:?}",
                model.id, field, value
            ))
        };
        let priority = model
            .priority
            .parse()
            .map_err(|_| corrupt("priority", &model.priority))?;
        let status = model
            .status
            .parse()
            .map_err(|_| corrupt("status", &model.status))?;

        Ok(DeletedTicket {
            id: model.id,
            original_id: model.original_id,
            original_user_id: model.original_user_id,
            original_user_name: model.original_user_name,
            title: model.title,
            description: model.description,
            priority,
            status,
            deleted_at: model.deleted_at,
        })
    }
}
