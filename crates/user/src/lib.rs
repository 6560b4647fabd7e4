mod command;
pub(crate) mod repository;

pub use command::*;

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub joined_on: time::Date,
}

impl Profile {
    /// First and last name joined, when at least one is set.
    pub fn full_name(&self) -> Option<String> {
        let parts = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        (!parts.is_empty()).then(|| parts.join(" "))
    }
}
