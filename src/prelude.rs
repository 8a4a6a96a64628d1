pub use std::{collections::HashMap, time::Duration};

pub use anyhow::Context;
pub use chrono::{NaiveDate as Date, TimeDelta, TimeZone, Utc};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, Condition, Database, DatabaseConnection,
  EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
pub use sea_orm_migration::MigratorTrait;
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result};
pub(crate) use crate::utils;
