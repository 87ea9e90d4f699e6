use sea_orm::entity::prelude::*;

/// Referral partner. `referral_code` is issued once and never rewritten.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "agents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    #[sea_orm(unique)]
    pub referral_code: String,
    pub active: bool,
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
