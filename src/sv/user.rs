//! User service - registration and credential checks

use argon2::{
  Argon2,
  password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    rand_core::OsRng,
  },
};

use crate::{entity::user, prelude::*};

pub struct Users<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Users<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Creates a user, rejecting duplicate usernames or emails up front so
  /// the caller gets a 400 rather than a constraint violation.
  pub async fn create(
    &self,
    username: &str,
    email: &str,
    password: &str,
    full_name: Option<String>,
  ) -> Result<user::Model> {
    let taken = user::Entity::find()
      .filter(
        Condition::any()
          .add(user::Column::Username.eq(username))
          .add(user::Column::Email.eq(email)),
      )
      .one(self.db)
      .await?;

    if taken.is_some() {
      return Err(Error::UserExists);
    }

    let now = Utc::now().naive_utc();
    let user = user::ActiveModel {
      username: Set(username.to_string()),
      email: Set(email.to_string()),
      password_hash: Set(hash_password(password)?),
      full_name: Set(full_name),
      created_at: Set(now),
      ..Default::default()
    };

    Ok(user.insert(self.db).await?)
  }

  #[allow(dead_code)]
  pub async fn by_id(&self, id: i32) -> Result<Option<user::Model>> {
    Ok(user::Entity::find_by_id(id).one(self.db).await?)
  }

  pub async fn by_username(
    &self,
    username: &str,
  ) -> Result<Option<user::Model>> {
    let user = user::Entity::find()
      .filter(user::Column::Username.eq(username))
      .one(self.db)
      .await?;
    Ok(user)
  }

  /// Looks the user up and checks the password; both failure modes
  /// collapse into `InvalidCredentials` so responses do not reveal which
  /// half was wrong.
  pub async fn verify_credentials(
    &self,
    username: &str,
    password: &str,
  ) -> Result<user::Model> {
    let user =
      self.by_username(username).await?.ok_or(Error::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash)? {
      return Err(Error::InvalidCredentials);
    }

    Ok(user)
  }
}

fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map_err(|err| Error::Internal(format!("password hashing failed: {err}")))?;
  Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
  let parsed = PasswordHash::new(hash).map_err(|err| {
    Error::Internal(format!("stored password hash is invalid: {err}"))
  })?;
  Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}
