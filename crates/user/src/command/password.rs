use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct ChangePasswordInput {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8, max = 64))]
    pub new_password: String,
}

impl super::Command {
    /// Replaces the password after checking the current one.
    #[tracing::instrument(skip(self, input), fields(user = %id))]
    pub async fn change_password(
        &self,
        id: &str,
        input: ChangePasswordInput,
    ) -> runplan_shared::Result<()> {
        input.validate()?;

        let Some(user) =
            repository::find(&self.read_db, repository::FindType::Id(id.to_owned())).await?
        else {
            return Err(runplan_shared::Error::NotFound);
        };

        if !super::verify_password(&input.current_password, &user.password)? {
            runplan_shared::user!("Current password is incorrect");
        }

        let password_hash = super::hash_password(&input.new_password)?;
        repository::update_password(&self.write_db, user.id, password_hash).await?;

        tracing::info!("password changed");

        Ok(())
    }
}
