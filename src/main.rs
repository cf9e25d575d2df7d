use sea_orm::{EntityTrait, PaginatorTrait};
use twitter_models::config::Config;
use twitter_models::db::create_pool;
use twitter_models::entities::{follow_relation, post, post_like, user};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()?;

    let pool = create_pool(&config).await?;

    log::info!("Database connection established, schema is up to date");

    let users = user::Entity::find().count(&pool).await?;
    let follows = follow_relation::Entity::find().count(&pool).await?;
    let posts = post::Entity::find().count(&pool).await?;
    let likes = post_like::Entity::find().count(&pool).await?;

    log::info!(
        "{} users, {} follow relations, {} posts, {} likes",
        users,
        follows,
        posts,
        likes
    );

    Ok(())
}
