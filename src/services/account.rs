use crate::auth::{hash_password, verify_password, DEFAULT_COST};
use crate::db::DbPool;
use crate::entities::{follow_relation, post, post_like, user};
use crate::error::{map_insert_error, ModelError, Result};
use crate::models::UserSummary;
use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, RelationTrait, Set,
    TransactionTrait,
};

pub async fn create_user(db: &DbPool, username: &str, password: &str) -> Result<user::Model> {
    create_user_with_cost(db, username, password, DEFAULT_COST).await
}

/// Fails with `ConstraintViolation` when the username is empty or taken.
pub async fn create_user_with_cost(
    db: &DbPool,
    username: &str,
    password: &str,
    cost: u32,
) -> Result<user::Model> {
    if username.trim().is_empty() {
        return Err(ModelError::ConstraintViolation(
            "username must not be empty".to_string(),
        ));
    }

    let password_hash = hash_password(password, cost)?;

    let duplicate = format!("username '{}' is already taken", username);
    if find_by_username(db, username).await?.is_some() {
        return Err(ModelError::ConstraintViolation(duplicate));
    }

    // The unique index still catches a concurrent signup with the same name.
    let user = user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| map_insert_error(e, &duplicate, username))?;

    info!("Created user {} (id {})", user.username, user.id);
    Ok(user)
}

pub(crate) async fn require_user<C: ConnectionTrait>(conn: &C, id: i64) -> Result<user::Model> {
    user::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("user {}", id)))
}

pub async fn get_user(db: &DbPool, id: i64) -> Result<user::Model> {
    require_user(db, id).await
}

pub async fn find_by_username(db: &DbPool, username: &str) -> Result<Option<user::Model>> {
    let user = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    Ok(user)
}

pub fn check_password(user: &user::Model, password: &str) -> bool {
    verify_password(password, &user.password_hash)
}

/// Users that `user_id` follows.
pub async fn followings(db: &DbPool, user_id: i64) -> Result<Vec<user::Model>> {
    let users = user::Entity::find()
        .join_rev(JoinType::InnerJoin, follow_relation::Relation::Followee.def())
        .filter(follow_relation::Column::FollowerId.eq(user_id))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;
    Ok(users)
}

/// Users following `user_id`.
pub async fn followers(db: &DbPool, user_id: i64) -> Result<Vec<user::Model>> {
    let users = user::Entity::find()
        .join_rev(JoinType::InnerJoin, follow_relation::Relation::Follower.def())
        .filter(follow_relation::Column::FolloweeId.eq(user_id))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;
    Ok(users)
}

pub async fn followings_count(db: &DbPool, user_id: i64) -> Result<u64> {
    let count = follow_relation::Entity::find()
        .filter(follow_relation::Column::FollowerId.eq(user_id))
        .count(db)
        .await?;
    Ok(count)
}

pub async fn followers_count(db: &DbPool, user_id: i64) -> Result<u64> {
    let count = follow_relation::Entity::find()
        .filter(follow_relation::Column::FolloweeId.eq(user_id))
        .count(db)
        .await?;
    Ok(count)
}

/// Posts `user_id` has liked.
pub async fn liked_posts(db: &DbPool, user_id: i64) -> Result<Vec<post::Model>> {
    let posts = post::Entity::find()
        .join_rev(JoinType::InnerJoin, post_like::Relation::Post.def())
        .filter(post_like::Column::UserId.eq(user_id))
        .order_by_asc(post::Column::Id)
        .all(db)
        .await?;
    Ok(posts)
}

pub async fn user_summary(db: &DbPool, user_id: i64) -> Result<UserSummary> {
    let user = require_user(db, user_id).await?;
    Ok(UserSummary {
        id: user.id,
        username: user.username,
        followings_count: followings_count(db, user_id).await?,
        followers_count: followers_count(db, user_id).await?,
        created_at: user.created_at,
    })
}

/// Removes the user, its posts, every like it made or received and every
/// follow edge touching it.
pub async fn delete_user(db: &DbPool, user_id: i64) -> Result<()> {
    // Writes first: SQLite cannot upgrade a read lock while another
    // connection is writing.
    let txn = db.begin().await?;

    let authored = post::Entity::find()
        .select_only()
        .column(post::Column::Id)
        .filter(post::Column::AuthorId.eq(user_id))
        .into_query();
    let likes = post_like::Entity::delete_many()
        .filter(
            Condition::any()
                .add(post_like::Column::UserId.eq(user_id))
                .add(post_like::Column::PostId.in_subquery(authored)),
        )
        .exec(&txn)
        .await?;

    let posts = post::Entity::delete_many()
        .filter(post::Column::AuthorId.eq(user_id))
        .exec(&txn)
        .await?;

    let edges = follow_relation::Entity::delete_many()
        .filter(
            Condition::any()
                .add(follow_relation::Column::FollowerId.eq(user_id))
                .add(follow_relation::Column::FolloweeId.eq(user_id)),
        )
        .exec(&txn)
        .await?;

    let deleted = user::Entity::delete_by_id(user_id).exec(&txn).await?;
    if deleted.rows_affected == 0 {
        return Err(ModelError::NotFound(format!("user {}", user_id)));
    }

    txn.commit().await?;

    debug!(
        "Removed {} likes and {} follow edges with user {}",
        likes.rows_affected, edges.rows_affected, user_id
    );
    info!("Deleted user {} and {} posts", user_id, posts.rows_affected);
    Ok(())
}
