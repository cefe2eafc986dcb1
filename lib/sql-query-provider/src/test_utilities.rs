use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr,
    RelationTrait, Schema, Set,
};
use time::macros::datetime;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::queryable::{
    column_from_name, NoRelations, QueryableEntity, RelationGraph, RelationNode,
};

pub(crate) mod order {
    use sea_orm::entity::prelude::*;
    use time::OffsetDateTime;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "order")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub reference: String,
        pub status: String,
        pub customer_email: String,
        pub created_date: OffsetDateTime,
    }

    impl ActiveModelBehavior for ActiveModel {}

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::order_item::Entity")]
        OrderItem,
    }
}

pub(crate) mod order_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "order_item")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub order_id: Uuid,
        pub product_id: Uuid,
        pub quantity: i32,
    }

    impl ActiveModelBehavior for ActiveModel {}

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::order::Entity",
            from = "Column::OrderId",
            to = "super::order::Column::Id"
        )]
        Order,
        #[sea_orm(
            belongs_to = "super::product::Entity",
            from = "Column::ProductId",
            to = "super::product::Column::Id"
        )]
        Product,
        #[sea_orm(has_many = "super::item_customization::Entity")]
        ItemCustomization,
    }
}

pub(crate) mod product {
    use sea_orm::entity::prelude::*;
    use time::OffsetDateTime;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "product")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub price: i64,
        pub created_date: OffsetDateTime,
        pub deleted_at: Option<OffsetDateTime>,
    }

    impl ActiveModelBehavior for ActiveModel {}

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::order_item::Entity")]
        OrderItem,
    }
}

pub(crate) mod item_customization {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "item_customization")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub order_item_id: Uuid,
        pub name: String,
        pub value: String,
    }

    impl ActiveModelBehavior for ActiveModel {}

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::order_item::Entity",
            from = "Column::OrderItemId",
            to = "super::order_item::Column::Id"
        )]
        OrderItem,
    }
}

pub(crate) struct OrderRelations;

impl RelationGraph for OrderRelations {
    fn relation(&self, segment: &str) -> Option<RelationNode> {
        match segment {
            "items" => Some(RelationNode {
                def: order::Relation::OrderItem.def(),
                related: &OrderItemRelations,
            }),
            _ => None,
        }
    }
}

pub(crate) struct OrderItemRelations;

impl RelationGraph for OrderItemRelations {
    fn relation(&self, segment: &str) -> Option<RelationNode> {
        match segment {
            "order" => Some(RelationNode {
                def: order_item::Relation::Order.def(),
                related: &OrderRelations,
            }),
            "product" => Some(RelationNode {
                def: order_item::Relation::Product.def(),
                related: &NoRelations,
            }),
            "customizations" => Some(RelationNode {
                def: order_item::Relation::ItemCustomization.def(),
                related: &NoRelations,
            }),
            _ => None,
        }
    }
}

impl QueryableEntity for order::Entity {
    fn column(name: &str) -> Option<Self::Column> {
        column_from_name::<Self>(name)
    }

    fn relations() -> &'static dyn RelationGraph {
        &OrderRelations
    }
}

impl QueryableEntity for order_item::Entity {
    fn column(name: &str) -> Option<Self::Column> {
        column_from_name::<Self>(name)
    }

    fn relations() -> &'static dyn RelationGraph {
        &OrderItemRelations
    }
}

impl QueryableEntity for product::Entity {
    fn column(name: &str) -> Option<Self::Column> {
        column_from_name::<Self>(name)
    }

    fn soft_delete_column() -> Option<Self::Column> {
        Some(product::Column::DeletedAt)
    }
}

impl QueryableEntity for item_customization::Entity {
    fn column(name: &str) -> Option<Self::Column> {
        column_from_name::<Self>(name)
    }
}

pub(crate) fn get_dummy_date() -> OffsetDateTime {
    datetime!(2005-04-02 21:37 +1)
}

pub(crate) async fn setup_test_connection() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Database Connected");

    let schema = Schema::new(DbBackend::Sqlite);
    let backend = db.get_database_backend();
    for statement in [
        schema.create_table_from_entity(product::Entity),
        schema.create_table_from_entity(order::Entity),
        schema.create_table_from_entity(order_item::Entity),
        schema.create_table_from_entity(item_customization::Entity),
    ] {
        db.execute(backend.build(&statement)).await.unwrap();
    }

    db
}

pub(crate) async fn insert_product(
    db: &DatabaseConnection,
    name: &str,
    description: Option<&str>,
    price: i64,
    deleted_at: Option<OffsetDateTime>,
) -> Result<Uuid, DbErr> {
    let product = product::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_owned()),
        description: Set(description.map(str::to_owned)),
        price: Set(price),
        created_date: Set(get_dummy_date()),
        deleted_at: Set(deleted_at),
    }
    .insert(db)
    .await?;

    Ok(product.id)
}

pub(crate) async fn insert_order(
    db: &DatabaseConnection,
    reference: &str,
    status: &str,
    customer_email: &str,
) -> Result<Uuid, DbErr> {
    let order = order::ActiveModel {
        id: Set(Uuid::new_v4()),
        reference: Set(reference.to_owned()),
        status: Set(status.to_owned()),
        customer_email: Set(customer_email.to_owned()),
        created_date: Set(get_dummy_date()),
    }
    .insert(db)
    .await?;

    Ok(order.id)
}

pub(crate) async fn insert_order_item(
    db: &DatabaseConnection,
    order_id: Uuid,
    product_id: Uuid,
    quantity: i32,
) -> Result<Uuid, DbErr> {
    let item = order_item::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(order_id),
        product_id: Set(product_id),
        quantity: Set(quantity),
    }
    .insert(db)
    .await?;

    Ok(item.id)
}

pub(crate) async fn insert_customization(
    db: &DatabaseConnection,
    order_item_id: Uuid,
    name: &str,
    value: &str,
) -> Result<Uuid, DbErr> {
    let customization = item_customization::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_item_id: Set(order_item_id),
        name: Set(name.to_owned()),
        value: Set(value.to_owned()),
    }
    .insert(db)
    .await?;

    Ok(customization.id)
}
