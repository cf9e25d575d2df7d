use crate::db::DbPool;
use crate::entities::follow_relation;
use crate::error::{map_insert_error, ModelError, Result};
use crate::services::account::require_user;
use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

fn edge_condition(follower_id: i64, followee_id: i64) -> Condition {
    Condition::all()
        .add(follow_relation::Column::FollowerId.eq(follower_id))
        .add(follow_relation::Column::FolloweeId.eq(followee_id))
}

/// Adds the edge `follower_id -> followee_id`.
///
/// Self-follows and duplicate edges fail with `ConstraintViolation`, unknown
/// users with `NotFound`. The insert is a single statement; the unique
/// index, check constraint and foreign keys reject whatever a concurrent
/// writer slips past the reads before it.
pub async fn follow(
    db: &DbPool,
    follower_id: i64,
    followee_id: i64,
) -> Result<follow_relation::Model> {
    if follower_id == followee_id {
        return Err(ModelError::ConstraintViolation(format!(
            "user {} cannot follow themselves",
            follower_id
        )));
    }

    require_user(db, follower_id).await?;
    require_user(db, followee_id).await?;

    let duplicate = format!("user {} already follows user {}", follower_id, followee_id);
    if is_following(db, follower_id, followee_id).await? {
        return Err(ModelError::ConstraintViolation(duplicate));
    }

    let edge = follow_relation::ActiveModel {
        follower_id: Set(follower_id),
        followee_id: Set(followee_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| {
        map_insert_error(
            e,
            &duplicate,
            &format!("user {} or user {}", follower_id, followee_id),
        )
    })?;

    info!("User {} now follows user {}", follower_id, followee_id);
    Ok(edge)
}

/// The same edge as [`follow`], written from the followee's side.
pub async fn add_follower(
    db: &DbPool,
    followee_id: i64,
    follower_id: i64,
) -> Result<follow_relation::Model> {
    follow(db, follower_id, followee_id).await
}

/// Returns whether an edge was removed. A missing edge is a no-op.
pub async fn unfollow(db: &DbPool, follower_id: i64, followee_id: i64) -> Result<bool> {
    let result = follow_relation::Entity::delete_many()
        .filter(edge_condition(follower_id, followee_id))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        info!("User {} unfollowed user {}", follower_id, followee_id);
        Ok(true)
    } else {
        debug!(
            "User {} did not follow user {}, nothing to remove",
            follower_id, followee_id
        );
        Ok(false)
    }
}

pub async fn is_following(db: &DbPool, follower_id: i64, followee_id: i64) -> Result<bool> {
    let count = follow_relation::Entity::find()
        .filter(edge_condition(follower_id, followee_id))
        .count(db)
        .await?;
    Ok(count > 0)
}
