use time::OffsetDateTime;
use validator::Validate;

use crate::{Profile, repository};

#[derive(Validate)]
pub struct UpdateProfileInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 150))]
    pub first_name: Option<String>,
    #[validate(length(max = 150))]
    pub last_name: Option<String>,
}

fn name(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl super::Command {
    pub async fn profile(&self, id: impl Into<String>) -> runplan_shared::Result<Profile> {
        let Some(row) = repository::find_profile(&self.read_db, id.into()).await? else {
            return Err(runplan_shared::Error::NotFound);
        };

        Ok(Profile {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            joined_on: OffsetDateTime::from_unix_timestamp(row.created_at)?.date(),
        })
    }

    #[tracing::instrument(skip(self, input), fields(user = %id))]
    pub async fn update_profile(
        &self,
        id: &str,
        input: UpdateProfileInput,
    ) -> runplan_shared::Result<()> {
        input.validate()?;

        let email = input.email.trim().to_lowercase();

        if repository::find(&self.read_db, repository::FindType::Id(id.to_owned()))
            .await?
            .is_none()
        {
            return Err(runplan_shared::Error::NotFound);
        }

        let taken = repository::find(&self.read_db, repository::FindType::Email(email.to_owned()))
            .await?
            .is_some_and(|user| user.id != id);

        if taken {
            runplan_shared::user!("Email already exists");
        }

        repository::update_profile(
            &self.write_db,
            id.to_owned(),
            email,
            name(input.first_name),
            name(input.last_name),
        )
        .await?;

        tracing::info!("profile updated");

        Ok(())
    }
}
