//! Stats service - per-facet persistence and dashboard assembly
//!
//! Every list facet (submissions, languages, badges, contests) is
//! replaced with delete-then-insert inside one transaction, so readers
//! observe each swap atomically. The profile row is upserted in place.

use crate::{
  entity::{Platform, badge, contest, language, platform, profile, submission, user},
  model::{
    BadgeSpec, ContestEntry, DailyCount, LanguageShare, PlatformData,
    PlatformSummary, ProfileFacet, UserWithStats,
  },
  prelude::*,
  sv::Platforms,
};

pub struct Stats<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Stats<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn upsert_profile(
    &self,
    user_id: i32,
    kind: Platform,
    facet: &ProfileFacet,
  ) -> Result<profile::Model> {
    let now = Utc::now().naive_utc();

    let existing = profile::Entity::find()
      .filter(profile::Column::UserId.eq(user_id))
      .filter(profile::Column::Platform.eq(kind))
      .one(self.db)
      .await?;

    let updated = match existing {
      Some(model) => {
        let mut active: profile::ActiveModel = model.into();
        active.total_solved = Set(facet.total_solved);
        active.easy_solved = Set(facet.easy_solved);
        active.medium_solved = Set(facet.medium_solved);
        active.hard_solved = Set(facet.hard_solved);
        active.total_submissions = Set(facet.total_submissions);
        active.acceptance_rate = Set(facet.acceptance_rate.clone());
        active.ranking = Set(facet.ranking.clone());
        active.contest_attended = Set(facet.contest_attended);
        active.additional = Set(facet.additional.clone());
        active.last_updated = Set(now);
        active.update(self.db).await?
      }
      None => {
        profile::ActiveModel {
          user_id: Set(user_id),
          platform: Set(kind),
          total_solved: Set(facet.total_solved),
          easy_solved: Set(facet.easy_solved),
          medium_solved: Set(facet.medium_solved),
          hard_solved: Set(facet.hard_solved),
          total_submissions: Set(facet.total_submissions),
          acceptance_rate: Set(facet.acceptance_rate.clone()),
          ranking: Set(facet.ranking.clone()),
          contest_attended: Set(facet.contest_attended),
          additional: Set(facet.additional.clone()),
          last_updated: Set(now),
          ..Default::default()
        }
        .insert(self.db)
        .await?
      }
    };

    Ok(updated)
  }

  pub async fn replace_submissions(
    &self,
    user_id: i32,
    kind: Platform,
    stats: &[DailyCount],
  ) -> Result<()> {
    let txn = self.db.begin().await?;

    submission::Entity::delete_many()
      .filter(submission::Column::UserId.eq(user_id))
      .filter(submission::Column::Platform.eq(kind))
      .exec(&txn)
      .await?;

    if !stats.is_empty() {
      let models: Vec<_> = stats
        .iter()
        .map(|stat| submission::ActiveModel {
          user_id: Set(user_id),
          platform: Set(kind),
          date: Set(stat.date),
          count: Set(stat.count),
          ..Default::default()
        })
        .collect();

      submission::Entity::insert_many(models).exec(&txn).await?;
    }

    txn.commit().await?;
    Ok(())
  }

  pub async fn replace_languages(
    &self,
    user_id: i32,
    kind: Platform,
    stats: &[LanguageShare],
  ) -> Result<()> {
    let txn = self.db.begin().await?;

    language::Entity::delete_many()
      .filter(language::Column::UserId.eq(user_id))
      .filter(language::Column::Platform.eq(kind))
      .exec(&txn)
      .await?;

    if !stats.is_empty() {
      let models: Vec<_> = stats
        .iter()
        .map(|stat| language::ActiveModel {
          user_id: Set(user_id),
          platform: Set(kind),
          language: Set(stat.language.clone()),
          count: Set(stat.count),
          percentage: Set(stat.percentage.clone()),
          ..Default::default()
        })
        .collect();

      language::Entity::insert_many(models).exec(&txn).await?;
    }

    txn.commit().await?;
    Ok(())
  }

  pub async fn replace_badges(
    &self,
    user_id: i32,
    kind: Platform,
    badges: &[BadgeSpec],
  ) -> Result<()> {
    let txn = self.db.begin().await?;

    badge::Entity::delete_many()
      .filter(badge::Column::UserId.eq(user_id))
      .filter(badge::Column::Platform.eq(kind))
      .exec(&txn)
      .await?;

    if !badges.is_empty() {
      let models: Vec<_> = badges
        .iter()
        .map(|spec| badge::ActiveModel {
          user_id: Set(user_id),
          platform: Set(kind),
          name: Set(spec.name.clone()),
          description: Set(spec.description.clone()),
          icon: Set(spec.icon.clone()),
          ..Default::default()
        })
        .collect();

      badge::Entity::insert_many(models).exec(&txn).await?;
    }

    txn.commit().await?;
    Ok(())
  }

  pub async fn replace_contests(
    &self,
    user_id: i32,
    kind: Platform,
    contests: &[ContestEntry],
  ) -> Result<()> {
    let txn = self.db.begin().await?;

    contest::Entity::delete_many()
      .filter(contest::Column::UserId.eq(user_id))
      .filter(contest::Column::Platform.eq(kind))
      .exec(&txn)
      .await?;

    if !contests.is_empty() {
      let models: Vec<_> = contests
        .iter()
        .map(|entry| contest::ActiveModel {
          user_id: Set(user_id),
          platform: Set(kind),
          name: Set(entry.name.clone()),
          ranking: Set(entry.ranking.clone()),
          score: Set(entry.score),
          date: Set(entry.date),
          ..Default::default()
        })
        .collect();

      contest::Entity::insert_many(models).exec(&txn).await?;
    }

    txn.commit().await?;
    Ok(())
  }

  pub async fn profile(
    &self,
    user_id: i32,
    kind: Platform,
  ) -> Result<Option<profile::Model>> {
    let model = profile::Entity::find()
      .filter(profile::Column::UserId.eq(user_id))
      .filter(profile::Column::Platform.eq(kind))
      .one(self.db)
      .await?;
    Ok(model)
  }

  pub async fn submissions(
    &self,
    user_id: i32,
    kind: Platform,
  ) -> Result<Vec<submission::Model>> {
    let rows = submission::Entity::find()
      .filter(submission::Column::UserId.eq(user_id))
      .filter(submission::Column::Platform.eq(kind))
      .order_by_asc(submission::Column::Date)
      .all(self.db)
      .await?;
    Ok(rows)
  }

  pub async fn languages(
    &self,
    user_id: i32,
    kind: Platform,
  ) -> Result<Vec<language::Model>> {
    let rows = language::Entity::find()
      .filter(language::Column::UserId.eq(user_id))
      .filter(language::Column::Platform.eq(kind))
      .order_by_desc(language::Column::Count)
      .all(self.db)
      .await?;
    Ok(rows)
  }

  pub async fn badges(
    &self,
    user_id: i32,
    kind: Platform,
  ) -> Result<Vec<badge::Model>> {
    let rows = badge::Entity::find()
      .filter(badge::Column::UserId.eq(user_id))
      .filter(badge::Column::Platform.eq(kind))
      .all(self.db)
      .await?;
    Ok(rows)
  }

  pub async fn contests(
    &self,
    user_id: i32,
    kind: Platform,
  ) -> Result<Vec<contest::Model>> {
    let rows = contest::Entity::find()
      .filter(contest::Column::UserId.eq(user_id))
      .filter(contest::Column::Platform.eq(kind))
      .order_by_desc(contest::Column::Date)
      .all(self.db)
      .await?;
    Ok(rows)
  }

  /// Assembles everything stored for one connection.
  pub async fn platform_data(
    &self,
    connection: &platform::Model,
  ) -> Result<PlatformData> {
    let user_id = connection.user_id;
    let kind = connection.platform;

    let profile = self.profile(user_id, kind).await?.map(|row| ProfileFacet {
      total_solved: row.total_solved,
      easy_solved: row.easy_solved,
      medium_solved: row.medium_solved,
      hard_solved: row.hard_solved,
      total_submissions: row.total_submissions,
      acceptance_rate: row.acceptance_rate,
      ranking: row.ranking,
      contest_attended: row.contest_attended,
      additional: row.additional,
    });

    let submissions = self
      .submissions(user_id, kind)
      .await?
      .into_iter()
      .map(|row| DailyCount { date: row.date, count: row.count })
      .collect();

    let languages = self
      .languages(user_id, kind)
      .await?
      .into_iter()
      .map(|row| LanguageShare {
        language: row.language,
        count: row.count,
        percentage: row.percentage,
      })
      .collect();

    let badges = self
      .badges(user_id, kind)
      .await?
      .into_iter()
      .map(|row| BadgeSpec {
        name: row.name,
        description: row.description,
        icon: row.icon,
      })
      .collect();

    let contests = self
      .contests(user_id, kind)
      .await?
      .into_iter()
      .map(|row| ContestEntry {
        name: row.name,
        ranking: row.ranking,
        score: row.score,
        date: row.date,
      })
      .collect();

    Ok(PlatformData {
      platform: kind,
      username: connection.username.clone(),
      profile,
      submissions,
      languages,
      badges,
      contests,
    })
  }

  /// The full dashboard payload for one user.
  pub async fn user_with_stats(
    &self,
    user: &user::Model,
  ) -> Result<UserWithStats> {
    let connections = Platforms::new(self.db).list(user.id).await?;

    let mut platform_data = Vec::with_capacity(connections.len());
    for connection in &connections {
      platform_data.push(self.platform_data(connection).await?);
    }

    Ok(UserWithStats {
      id: user.id,
      username: user.username.clone(),
      email: user.email.clone(),
      full_name: user.full_name.clone(),
      platforms: connections
        .into_iter()
        .map(|connection| PlatformSummary {
          platform_type: connection.platform,
          username: connection.username,
          is_active: connection.is_active,
        })
        .collect(),
      platform_data,
    })
  }
}
