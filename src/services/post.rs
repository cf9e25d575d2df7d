use crate::db::DbPool;
use crate::entities::{post, post_like, user};
use crate::error::{map_insert_error, ModelError, Result};
use crate::models::PostDisplay;
use crate::services::account::require_user;
use chrono::Utc;
use log::{debug, info};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

async fn require_post<C: ConnectionTrait>(conn: &C, id: i64) -> Result<post::Model> {
    post::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("post {}", id)))
}

fn like_condition(post_id: i64, user_id: i64) -> Condition {
    Condition::all()
        .add(post_like::Column::PostId.eq(post_id))
        .add(post_like::Column::UserId.eq(user_id))
}

pub async fn create_post(db: &DbPool, author_id: i64, body: &str) -> Result<post::Model> {
    require_user(db, author_id).await?;

    let post = post::ActiveModel {
        author_id: Set(author_id),
        body: Set(body.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| {
        map_insert_error(
            e,
            &format!("post by user {}", author_id),
            &format!("user {}", author_id),
        )
    })?;

    info!("User {} created post {}", author_id, post.id);
    Ok(post)
}

pub async fn get_post(db: &DbPool, id: i64) -> Result<post::Model> {
    require_post(db, id).await
}

/// Newest first.
pub async fn posts_by_author(db: &DbPool, author_id: i64) -> Result<Vec<post::Model>> {
    let posts = post::Entity::find()
        .filter(post::Column::AuthorId.eq(author_id))
        .order_by_desc(post::Column::CreatedAt)
        .order_by_desc(post::Column::Id)
        .all(db)
        .await?;
    Ok(posts)
}

/// Removes the post and every like on it.
pub async fn delete_post(db: &DbPool, id: i64) -> Result<()> {
    // Writes first: SQLite cannot upgrade a read lock while another
    // connection is writing.
    let txn = db.begin().await?;

    let likes = post_like::Entity::delete_many()
        .filter(post_like::Column::PostId.eq(id))
        .exec(&txn)
        .await?;
    let deleted = post::Entity::delete_by_id(id).exec(&txn).await?;
    if deleted.rows_affected == 0 {
        return Err(ModelError::NotFound(format!("post {}", id)));
    }

    txn.commit().await?;

    info!("Deleted post {} with {} likes", id, likes.rows_affected);
    Ok(())
}

/// Adds `user_id` to the post's likers. Liking twice is a no-op; the return
/// value says whether a like was recorded by this call.
///
/// The insert is one `ON CONFLICT DO NOTHING` statement, so concurrent likes
/// of the same pair record exactly one row and the rest see `false`.
pub async fn like(db: &DbPool, post_id: i64, user_id: i64) -> Result<bool> {
    require_post(db, post_id).await?;
    require_user(db, user_id).await?;

    let new_like = post_like::ActiveModel {
        post_id: Set(post_id),
        user_id: Set(user_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = post_like::Entity::insert(new_like)
        .on_conflict(
            OnConflict::columns([post_like::Column::PostId, post_like::Column::UserId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                &format!("like of post {} by user {}", post_id, user_id),
                &format!("post {} or user {}", post_id, user_id),
            )
        })?;

    if inserted > 0 {
        info!("User {} liked post {}", user_id, post_id);
        Ok(true)
    } else {
        debug!("User {} already likes post {}", user_id, post_id);
        Ok(false)
    }
}

/// The same relation as [`like`], written from the user's side.
pub async fn like_post(db: &DbPool, user_id: i64, post_id: i64) -> Result<bool> {
    like(db, post_id, user_id).await
}

/// Returns whether a like was removed. Removing a non-liker is a no-op.
pub async fn unlike(db: &DbPool, post_id: i64, user_id: i64) -> Result<bool> {
    let result = post_like::Entity::delete_many()
        .filter(like_condition(post_id, user_id))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        info!("User {} unliked post {}", user_id, post_id);
    }
    Ok(result.rows_affected > 0)
}

pub async fn likers(db: &DbPool, post_id: i64) -> Result<Vec<user::Model>> {
    let users = user::Entity::find()
        .join_rev(JoinType::InnerJoin, post_like::Relation::User.def())
        .filter(post_like::Column::PostId.eq(post_id))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;
    Ok(users)
}

pub async fn like_count(db: &DbPool, post_id: i64) -> Result<u64> {
    let count = post_like::Entity::find()
        .filter(post_like::Column::PostId.eq(post_id))
        .count(db)
        .await?;
    Ok(count)
}

/// `"<author> (<created_at>): <body>"`, see [`PostDisplay`].
pub async fn display_string(db: &DbPool, post_id: i64) -> Result<String> {
    let post = require_post(db, post_id).await?;
    let author = post
        .find_related(user::Entity)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::NotFound(format!("author of post {}", post_id)))?;

    Ok(PostDisplay::new(&author.username, post.created_at, &post.body).to_string())
}
