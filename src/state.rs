use crate::{migration::Migrator, platforms::Fetcher, prelude::*, sv};

#[derive(Debug, Clone)]
pub struct Config {
  /// session lifetime in hours
  pub session_lifetime: i64,
  /// how often the expired-session sweep runs, in seconds
  pub session_gc_interval: u64,
}

impl Default for Config {
  fn default() -> Self {
    Self { session_lifetime: 24, session_gc_interval: 3600 }
  }
}

pub struct Services<'a> {
  pub user: sv::Users<'a>,
  pub session: sv::Sessions<'a>,
  pub platform: sv::Platforms<'a>,
  pub stats: sv::Stats<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub fetcher: Fetcher,
  pub config: Config,
}

impl AppState {
  pub async fn new(db_url: &str) -> Self {
    Self::with_config(db_url, Config::default()).await
  }

  pub async fn with_config(db_url: &str, config: Config) -> Self {
    info!("Connecting to database...");
    let db =
      Database::connect(db_url).await.expect("Failed to connect to database");

    info!("Running migrations...");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    Self { db, fetcher: Fetcher::new(), config }
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      user: sv::Users::new(&self.db),
      session: sv::Sessions::new(&self.db, self.config.session_lifetime),
      platform: sv::Platforms::new(&self.db),
      stats: sv::Stats::new(&self.db),
    }
  }

  pub fn refresh(&self) -> sv::Refresh<'_> {
    sv::Refresh::new(&self.db, &self.fetcher)
  }
}
