use std::ops::Deref;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::{AuthUser, repository};

mod login;
mod password;
mod profile;
mod register;

pub use login::LoginInput;
pub use password::ChangePasswordInput;
pub use profile::UpdateProfileInput;
pub use register::RegisterInput;

fn hash_password(password: &str) -> runplan_shared::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

fn verify_password(password: &str, hash: &str) -> runplan_shared::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Clone)]
pub struct Command(pub runplan_shared::State);

impl Deref for Command {
    type Target = runplan_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    pub fn new(state: runplan_shared::State) -> Self {
        Self(state)
    }

    pub async fn find(&self, id: impl Into<String>) -> runplan_shared::Result<Option<AuthUser>> {
        Ok(
            repository::find(&self.read_db, repository::FindType::Id(id.into()))
                .await?
                .map(|row| AuthUser {
                    id: row.id,
                    email: row.email,
                }),
        )
    }

    pub async fn find_by_email(
        &self,
        email: impl Into<String>,
    ) -> runplan_shared::Result<Option<AuthUser>> {
        Ok(
            repository::find(&self.read_db, repository::FindType::Email(email.into()))
                .await?
                .map(|row| AuthUser {
                    id: row.id,
                    email: row.email,
                }),
        )
    }
}
