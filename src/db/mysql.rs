// MySQL forbids CHECK constraints on columns used by a cascading foreign key,
// so the foreign keys here are plain and deletes clean up relations
// explicitly.
pub const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGINT AUTO_INCREMENT PRIMARY KEY,
        username VARCHAR(150) UNIQUE NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS follow_relations (
        id BIGINT AUTO_INCREMENT PRIMARY KEY,
        follower_id BIGINT NOT NULL,
        followee_id BIGINT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        UNIQUE KEY unique_follower_followee (follower_id, followee_id),
        CONSTRAINT check_no_self_follow CHECK (follower_id <> followee_id),
        FOREIGN KEY (follower_id) REFERENCES users(id),
        FOREIGN KEY (followee_id) REFERENCES users(id),
        INDEX idx_followee_id (followee_id)
    );

    CREATE TABLE IF NOT EXISTS posts (
        id BIGINT AUTO_INCREMENT PRIMARY KEY,
        author_id BIGINT NOT NULL,
        body TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (author_id) REFERENCES users(id),
        INDEX idx_author_id (author_id),
        INDEX idx_created_at (created_at)
    );

    CREATE TABLE IF NOT EXISTS post_likes (
        id BIGINT AUTO_INCREMENT PRIMARY KEY,
        post_id BIGINT NOT NULL,
        user_id BIGINT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        UNIQUE KEY unique_post_user (post_id, user_id),
        FOREIGN KEY (post_id) REFERENCES posts(id),
        FOREIGN KEY (user_id) REFERENCES users(id),
        INDEX idx_user_id (user_id)
    );
"#;
