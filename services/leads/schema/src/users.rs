use sea_orm::entity::prelude::*;

/// Account holder. The main administrator is not flagged here; it is
/// recognised by configured email at the authorization layer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::form_submissions::Entity")]
    FormSubmissions,
}

impl Related<super::form_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FormSubmissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
