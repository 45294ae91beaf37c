use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::user::models::User;

pub mod create_user;
pub mod delete_user;
pub mod favorites;
pub mod get_user;
pub mod update_user;

pub use create_user::create_user;
pub use delete_user::delete_user;
pub use favorites::add_favorite;
pub use favorites::remove_favorite;
pub use get_user::get_user;
pub use update_user::update_user;

/// Public representation of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserData {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
    pub favorite_movies: Vec<String>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            birthday: user.birthday,
            favorite_movies: user.favorite_movies.iter().map(|m| m.to_string()).collect(),
        }
    }
}
