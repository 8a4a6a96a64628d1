//! Session service - database-backed login sessions
//!
//! Sessions live in the `sessions` table so logins survive restarts.
//! Expired rows are ignored on lookup and swept by a background loop.

use uuid::Uuid;

use crate::{
  entity::{session, user},
  prelude::*,
};

pub struct Sessions<'a> {
  db: &'a DatabaseConnection,
  lifetime: TimeDelta,
}

impl<'a> Sessions<'a> {
  pub fn new(db: &'a DatabaseConnection, lifetime_hours: i64) -> Self {
    Self { db, lifetime: TimeDelta::hours(lifetime_hours) }
  }

  /// Opens a session and returns its token (the cookie value).
  pub async fn open(&self, user_id: i32) -> Result<String> {
    let now = Utc::now().naive_utc();
    let token = Uuid::new_v4().to_string();

    session::ActiveModel {
      id: Set(token.clone()),
      user_id: Set(user_id),
      created_at: Set(now),
      expires_at: Set(now + self.lifetime),
    }
    .insert(self.db)
    .await?;

    Ok(token)
  }

  /// Resolves a token to its user; expired or unknown tokens are `None`.
  pub async fn resolve(&self, token: &str) -> Result<Option<user::Model>> {
    let Some(session) =
      session::Entity::find_by_id(token).one(self.db).await?
    else {
      return Ok(None);
    };

    if session.expires_at < Utc::now().naive_utc() {
      return Ok(None);
    }

    Ok(user::Entity::find_by_id(session.user_id).one(self.db).await?)
  }

  pub async fn close(&self, token: &str) -> Result<()> {
    session::Entity::delete_by_id(token).exec(self.db).await?;
    Ok(())
  }

  /// Sweeps expired rows; driven by the loop spawned in `main`.
  pub async fn prune_expired(&self) -> Result<u64> {
    let result = session::Entity::delete_many()
      .filter(session::Column::ExpiresAt.lt(Utc::now().naive_utc()))
      .exec(self.db)
      .await?;
    Ok(result.rows_affected)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{migration::Migrator, sv::Users};

  async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
  }

  async fn test_user(db: &DatabaseConnection) -> user::Model {
    Users::new(db)
      .create("alice", "alice@example.com", "hunter2", None)
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn open_and_resolve() {
    let db = setup_test_db().await;
    let user = test_user(&db).await;

    let sv = Sessions::new(&db, 24);
    let token = sv.open(user.id).await.unwrap();

    let resolved = sv.resolve(&token).await.unwrap().unwrap();
    assert_eq!(resolved.id, user.id);

    assert!(sv.resolve("not-a-token").await.unwrap().is_none());
  }

  #[tokio::test]
  async fn expired_sessions_do_not_resolve() {
    let db = setup_test_db().await;
    let user = test_user(&db).await;

    // negative lifetime: expired the moment it was opened
    let sv = Sessions::new(&db, -1);
    let token = sv.open(user.id).await.unwrap();

    assert!(sv.resolve(&token).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn close_destroys_the_session() {
    let db = setup_test_db().await;
    let user = test_user(&db).await;

    let sv = Sessions::new(&db, 24);
    let token = sv.open(user.id).await.unwrap();
    sv.close(&token).await.unwrap();

    assert!(sv.resolve(&token).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn prune_removes_only_expired_rows() {
    let db = setup_test_db().await;
    let user = test_user(&db).await;

    let live = Sessions::new(&db, 24);
    let dead = Sessions::new(&db, -1);

    let keep = live.open(user.id).await.unwrap();
    dead.open(user.id).await.unwrap();
    dead.open(user.id).await.unwrap();

    assert_eq!(live.prune_expired().await.unwrap(), 2);
    assert!(live.resolve(&keep).await.unwrap().is_some());
  }
}
