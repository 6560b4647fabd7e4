use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    /// Checks the credentials and returns the user id.
    #[tracing::instrument(skip_all, fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> runplan_shared::Result<String> {
        input.validate()?;

        let email = input.email.trim().to_lowercase();

        let Some(user) =
            repository::find(&self.read_db, repository::FindType::Email(email)).await?
        else {
            runplan_shared::user!("Invalid email or password. Please try again.");
        };

        if !super::verify_password(&input.password, &user.password)? {
            runplan_shared::user!("Invalid email or password. Please try again.");
        }

        Ok(user.id)
    }
}
