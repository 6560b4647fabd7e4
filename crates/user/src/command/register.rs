use ulid::Ulid;
use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> runplan_shared::Result<String> {
        input.validate()?;

        let email = input.email.trim().to_lowercase();

        if repository::find(&self.read_db, repository::FindType::Email(email.to_owned()))
            .await?
            .is_some()
        {
            runplan_shared::user!("Email already exists");
        }

        let password_hash = super::hash_password(&input.password)?;

        let id = Ulid::new().to_string();
        repository::create(&self.write_db, id.to_owned(), email, password_hash).await?;

        tracing::info!(user = id, "user registered");

        Ok(id)
    }
}
