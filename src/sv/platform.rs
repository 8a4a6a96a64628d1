//! Platform connection service - linking and unlinking external accounts

use crate::{
  entity::{Platform, badge, contest, language, platform, profile, submission},
  prelude::*,
};

pub struct Platforms<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Platforms<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn connect(
    &self,
    user_id: i32,
    kind: Platform,
    username: &str,
  ) -> Result<platform::Model> {
    if self.get(user_id, kind).await?.is_some() {
      return Err(Error::AlreadyConnected);
    }

    let now = Utc::now().naive_utc();
    let connection = platform::ActiveModel {
      user_id: Set(user_id),
      platform: Set(kind),
      username: Set(username.to_string()),
      is_active: Set(true),
      created_at: Set(now),
      ..Default::default()
    };

    Ok(connection.insert(self.db).await?)
  }

  pub async fn get(
    &self,
    user_id: i32,
    kind: Platform,
  ) -> Result<Option<platform::Model>> {
    let connection = platform::Entity::find()
      .filter(platform::Column::UserId.eq(user_id))
      .filter(platform::Column::Platform.eq(kind))
      .one(self.db)
      .await?;
    Ok(connection)
  }

  pub async fn list(&self, user_id: i32) -> Result<Vec<platform::Model>> {
    let connections = platform::Entity::find()
      .filter(platform::Column::UserId.eq(user_id))
      .order_by_asc(platform::Column::CreatedAt)
      .all(self.db)
      .await?;
    Ok(connections)
  }

  /// Removes the connection and every dependent row for that
  /// (user, platform) in one transaction, so readers never observe a
  /// half-disconnected platform.
  pub async fn disconnect(&self, user_id: i32, kind: Platform) -> Result<()> {
    let connection =
      self.get(user_id, kind).await?.ok_or(Error::PlatformNotConnected)?;

    let txn = self.db.begin().await?;

    profile::Entity::delete_many()
      .filter(profile::Column::UserId.eq(user_id))
      .filter(profile::Column::Platform.eq(kind))
      .exec(&txn)
      .await?;
    submission::Entity::delete_many()
      .filter(submission::Column::UserId.eq(user_id))
      .filter(submission::Column::Platform.eq(kind))
      .exec(&txn)
      .await?;
    language::Entity::delete_many()
      .filter(language::Column::UserId.eq(user_id))
      .filter(language::Column::Platform.eq(kind))
      .exec(&txn)
      .await?;
    badge::Entity::delete_many()
      .filter(badge::Column::UserId.eq(user_id))
      .filter(badge::Column::Platform.eq(kind))
      .exec(&txn)
      .await?;
    contest::Entity::delete_many()
      .filter(contest::Column::UserId.eq(user_id))
      .filter(contest::Column::Platform.eq(kind))
      .exec(&txn)
      .await?;
    platform::Entity::delete_by_id(connection.id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    migration::Migrator,
    model::{BadgeSpec, DailyCount, LanguageShare, ProfileFacet},
    sv::{Stats, Users},
  };

  async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
  }

  async fn test_user(db: &DatabaseConnection) -> i32 {
    Users::new(db)
      .create("alice", "alice@example.com", "hunter2", None)
      .await
      .unwrap()
      .id
  }

  #[tokio::test]
  async fn connect_is_unique_per_platform() {
    let db = setup_test_db().await;
    let user_id = test_user(&db).await;
    let sv = Platforms::new(&db);

    sv.connect(user_id, Platform::Leetcode, "alice_lc").await.unwrap();

    assert!(matches!(
      sv.connect(user_id, Platform::Leetcode, "other").await,
      Err(Error::AlreadyConnected)
    ));

    // a different platform is fine
    sv.connect(user_id, Platform::CodeForces, "alice_cf").await.unwrap();
    assert_eq!(sv.list(user_id).await.unwrap().len(), 2);
  }

  #[tokio::test]
  async fn disconnect_cascades_to_every_facet() {
    let db = setup_test_db().await;
    let user_id = test_user(&db).await;
    let sv = Platforms::new(&db);
    let stats = Stats::new(&db);

    sv.connect(user_id, Platform::Leetcode, "alice_lc").await.unwrap();

    let kind = Platform::Leetcode;
    stats
      .upsert_profile(user_id, kind, &ProfileFacet {
        total_solved: Some(120),
        ..Default::default()
      })
      .await
      .unwrap();
    stats
      .replace_submissions(user_id, kind, &[DailyCount {
        date: Date::from_ymd_opt(2026, 3, 12).unwrap(),
        count: 3,
      }])
      .await
      .unwrap();
    stats
      .replace_languages(user_id, kind, &[LanguageShare {
        language: "Rust".to_string(),
        count: 10,
        percentage: "100.0%".to_string(),
      }])
      .await
      .unwrap();
    stats
      .replace_badges(user_id, kind, &[BadgeSpec {
        name: "Century Club".to_string(),
        description: "Solved 100+ problems".to_string(),
        icon: "trophy".to_string(),
      }])
      .await
      .unwrap();

    sv.disconnect(user_id, kind).await.unwrap();

    assert!(sv.get(user_id, kind).await.unwrap().is_none());
    assert!(stats.profile(user_id, kind).await.unwrap().is_none());
    assert!(stats.submissions(user_id, kind).await.unwrap().is_empty());
    assert!(stats.languages(user_id, kind).await.unwrap().is_empty());
    assert!(stats.badges(user_id, kind).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn disconnect_unknown_platform_is_not_found() {
    let db = setup_test_db().await;
    let user_id = test_user(&db).await;

    assert!(matches!(
      Platforms::new(&db).disconnect(user_id, Platform::CodeForces).await,
      Err(Error::PlatformNotConnected)
    ));
  }
}
