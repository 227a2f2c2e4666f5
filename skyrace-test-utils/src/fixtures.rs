//! Fixture factories inserting test rows with standard values.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use entity::pilot::Gender;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};

use crate::error::TestError;

/// Manufacturing date shared by drone fixtures.
pub fn test_manufacturing_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 6, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub async fn insert_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entity::user::Model, TestError> {
    let user = entity::user::ActiveModel {
        username: ActiveValue::Set(username.to_owned()),
        password_hash: ActiveValue::Set(String::new()),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    Ok(user.insert(db).await?)
}

pub async fn insert_token(
    db: &DatabaseConnection,
    user_id: i32,
    key: &str,
) -> Result<entity::auth_token::Model, TestError> {
    let token = entity::auth_token::ActiveModel {
        key: ActiveValue::Set(key.to_owned()),
        user_id: ActiveValue::Set(user_id),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    Ok(token.insert(db).await?)
}

pub async fn insert_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entity::drone_category::Model, TestError> {
    let category = entity::drone_category::ActiveModel {
        name: ActiveValue::Set(name.to_owned()),
        ..Default::default()
    };

    Ok(category.insert(db).await?)
}

pub async fn insert_drone(
    db: &DatabaseConnection,
    name: &str,
    drone_category_id: i32,
    owner_id: i32,
) -> Result<entity::drone::Model, TestError> {
    let drone = entity::drone::ActiveModel {
        name: ActiveValue::Set(name.to_owned()),
        drone_category_id: ActiveValue::Set(drone_category_id),
        owner_id: ActiveValue::Set(owner_id),
        manufacturing_date: ActiveValue::Set(test_manufacturing_date()),
        has_it_competed: ActiveValue::Set(false),
        inserted_timestamp: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    Ok(drone.insert(db).await?)
}

pub async fn insert_pilot(
    db: &DatabaseConnection,
    name: &str,
    races_count: i32,
) -> Result<entity::pilot::Model, TestError> {
    let pilot = entity::pilot::ActiveModel {
        name: ActiveValue::Set(name.to_owned()),
        gender: ActiveValue::Set(Gender::Male),
        races_count: ActiveValue::Set(races_count),
        inserted_timestamp: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    Ok(pilot.insert(db).await?)
}

pub async fn insert_competition(
    db: &DatabaseConnection,
    pilot_id: i32,
    drone_id: i32,
    distance_in_feet: i32,
    distance_achievement_date: NaiveDateTime,
) -> Result<entity::competition::Model, TestError> {
    let competition = entity::competition::ActiveModel {
        pilot_id: ActiveValue::Set(pilot_id),
        drone_id: ActiveValue::Set(drone_id),
        distance_in_feet: ActiveValue::Set(distance_in_feet),
        distance_achievement_date: ActiveValue::Set(distance_achievement_date),
        ..Default::default()
    };

    Ok(competition.insert(db).await?)
}
