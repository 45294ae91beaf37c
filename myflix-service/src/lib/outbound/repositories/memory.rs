use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::matches_name;
use crate::domain::movie::models::Director;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::ports::MovieRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Identifiers of the sample catalog. The seed migration uses the same values.
pub const INCEPTION_ID: MovieId =
    MovieId(Uuid::from_u128(0x6b0f8e3a_1c2d_4e5f_8a9b_0c1d2e3f4a01));
pub const PARASITE_ID: MovieId =
    MovieId(Uuid::from_u128(0x6b0f8e3a_1c2d_4e5f_8a9b_0c1d2e3f4a02));
pub const WHIPLASH_ID: MovieId =
    MovieId(Uuid::from_u128(0x6b0f8e3a_1c2d_4e5f_8a9b_0c1d2e3f4a03));

/// User store kept in process memory.
///
/// Enforces the same username uniqueness as the `users_username_key` constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn username_taken(users: &HashMap<UserId, User>, candidate: &User) -> bool {
    users
        .values()
        .any(|u| u.id != candidate.id && u.username == candidate.username)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if username_taken(&users, &user) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<Option<User>, UserError> {
        let mut users = self.users.write().await;
        if username_taken(&users, &user) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        Ok(users.get_mut(&user.id).map(|stored| {
            stored.username = user.username;
            stored.email = user.email;
            stored.password_hash = user.password_hash;
            stored.birthday = user.birthday;
            stored.clone()
        }))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserError> {
        Ok(self.users.write().await.remove(id).is_some())
    }

    async fn add_favorite(
        &self,
        id: &UserId,
        movie_id: &MovieId,
    ) -> Result<Option<User>, UserError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(id).map(|user| {
            user.favorite_movies.insert(*movie_id);
            user.clone()
        }))
    }

    async fn remove_favorite(
        &self,
        id: &UserId,
        movie_id: &MovieId,
    ) -> Result<Option<User>, UserError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(id).map(|user| {
            user.favorite_movies.remove(movie_id);
            user.clone()
        }))
    }
}

/// Movie catalog kept in process memory, ordered by title.
#[derive(Default)]
pub struct InMemoryMovieRepository {
    movies: RwLock<Vec<Movie>>,
}

impl InMemoryMovieRepository {
    pub fn new(mut movies: Vec<Movie>) -> Self {
        movies.sort_by(|a, b| a.title.cmp(&b.title));
        Self {
            movies: RwLock::new(movies),
        }
    }

    /// Catalog seeded with the sample movies.
    pub fn with_sample_catalog() -> Self {
        Self::new(sample_catalog())
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn list_all(&self) -> Result<Vec<Movie>, MovieError> {
        Ok(self.movies.read().await.clone())
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieError> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|m| &m.id == id)
            .cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, MovieError> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|m| matches_name(&m.title, title))
            .cloned())
    }

    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, MovieError> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|m| matches_name(&m.genre.name, name))
            .map(|m| m.genre.clone()))
    }

    async fn find_director_by_name(&self, name: &str) -> Result<Option<Director>, MovieError> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|m| matches_name(&m.director.name, name))
            .map(|m| m.director.clone()))
    }
}

/// The three-movie sample catalog.
pub fn sample_catalog() -> Vec<Movie> {
    vec![
        Movie {
            id: INCEPTION_ID,
            title: "Inception".to_string(),
            description: "A skilled thief who steals information through dreams is given a \
                          chance to erase his criminal record."
                .to_string(),
            genre: Genre {
                name: "Sci-Fi".to_string(),
                description: "Speculative stories built on imagined science and technology."
                    .to_string(),
            },
            director: Director {
                name: "Christopher Nolan".to_string(),
                bio: "British-American filmmaker known for intricate, time-bending narratives."
                    .to_string(),
                birth_year: Some(1970),
                death_year: None,
            },
            image_url: "https://m.media-amazon.com/images/I/51zUbui+gbL._AC_.jpg".to_string(),
            featured: true,
        },
        Movie {
            id: PARASITE_ID,
            title: "Parasite".to_string(),
            description: "A poor family schemes to become employed by a wealthy household and \
                          infiltrate their lives."
                .to_string(),
            genre: Genre {
                name: "Thriller".to_string(),
                description: "Suspense-driven stories that keep tension high until the end."
                    .to_string(),
            },
            director: Director {
                name: "Bong Joon-ho".to_string(),
                bio: "South Korean filmmaker blending genre cinema with social satire."
                    .to_string(),
                birth_year: Some(1969),
                death_year: None,
            },
            image_url: "https://m.media-amazon.com/images/I/91qvN3eNqvL._AC_UF894,1000_QL80_.jpg"
                .to_string(),
            featured: true,
        },
        Movie {
            id: WHIPLASH_ID,
            title: "Whiplash".to_string(),
            description: "A young drummer enrolls in a music conservatory where he faces abuse \
                          from a ruthless instructor."
                .to_string(),
            genre: Genre {
                name: "Drama".to_string(),
                description: "Character-driven stories centred on emotional conflict.".to_string(),
            },
            director: Director {
                name: "Damien Chazelle".to_string(),
                bio: "American filmmaker whose work often revolves around music.".to_string(),
                birth_year: Some(1985),
                death_year: None,
            },
            image_url: "https://m.media-amazon.com/images/I/71pVtxg0uAL._AC_UF894,1000_QL80_.jpg"
                .to_string(),
            featured: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;
    use crate::domain::user::models::UpdateUserCommand;
    use crate::domain::user::ports::UserServicePort;
    use crate::domain::user::service::UserService;

    fn user(name: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new(name.to_string()).unwrap(),
            email: EmailAddress::new(format!("{}@x.com", name)).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            birthday: None,
            favorite_movies: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_username() {
        let repository = InMemoryUserRepository::new();
        repository.create(user("alice")).await.unwrap();

        let result = repository.create(user("alice")).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(_))));

        // Usernames are case-sensitive
        assert!(repository.create(user("Alice")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_rejects_rename_onto_existing_username() {
        let repository = InMemoryUserRepository::new();
        repository.create(user("alice")).await.unwrap();
        let mut bob = repository.create(user("bob")).await.unwrap();

        bob.username = Username::new("alice".to_string()).unwrap();
        assert!(matches!(
            repository.update(bob).await,
            Err(UserError::UsernameAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_stored_favorites() {
        let repository = InMemoryUserRepository::new();
        let mut alice = repository.create(user("alice")).await.unwrap();

        repository.add_favorite(&alice.id, &INCEPTION_ID).await.unwrap();

        // `alice` was read before the favorite was added
        alice.email = EmailAddress::new("alice@movies.example".to_string()).unwrap();
        let updated = repository.update(alice).await.unwrap().unwrap();

        assert_eq!(updated.email.as_str(), "alice@movies.example");
        assert_eq!(updated.favorite_movies, BTreeSet::from([INCEPTION_ID]));
    }

    #[tokio::test]
    async fn test_password_change_racing_add_favorite_keeps_favorite() {
        let users = Arc::new(InMemoryUserRepository::new());
        let service = Arc::new(UserService::new(
            Arc::clone(&users),
            Arc::new(InMemoryMovieRepository::with_sample_catalog()),
        ));
        let alice = users.create(user("alice")).await.unwrap();

        let update = tokio::spawn({
            let service = Arc::clone(&service);
            let id = alice.id;
            async move {
                let command = UpdateUserCommand {
                    password: Some(Password::new("n3w-s3cret".to_string()).unwrap()),
                    ..UpdateUserCommand::default()
                };
                service.update_user(&id, command).await
            }
        });
        tokio::time::sleep(Duration::from_millis(2)).await;
        service.add_favorite(&alice.id, &INCEPTION_ID).await.unwrap();
        update.await.unwrap().unwrap();

        let stored = users.find_by_id(&alice.id).await.unwrap().unwrap();
        assert_eq!(stored.favorite_movies, BTreeSet::from([INCEPTION_ID]));
        assert_ne!(stored.password_hash, "$argon2id$hash");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_user() {
        let repository = InMemoryUserRepository::new();
        let ghost = user("ghost");
        let ghost_id = ghost.id;

        assert!(repository.update(ghost).await.unwrap().is_none());
        assert!(!repository.delete(&ghost_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_favorites_are_a_set() {
        let repository = InMemoryUserRepository::new();
        let alice = repository.create(user("alice")).await.unwrap();

        repository.add_favorite(&alice.id, &INCEPTION_ID).await.unwrap();
        let updated = repository
            .add_favorite(&alice.id, &INCEPTION_ID)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.favorite_movies.len(), 1);

        let updated = repository
            .remove_favorite(&alice.id, &INCEPTION_ID)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.favorite_movies.is_empty());

        assert!(repository
            .add_favorite(&UserId::new(), &INCEPTION_ID)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_sample_catalog_lookups() {
        let repository = InMemoryMovieRepository::with_sample_catalog();

        let titles: Vec<_> = repository
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["Inception", "Parasite", "Whiplash"]);

        let movie = repository.find_by_title("parasite").await.unwrap().unwrap();
        assert_eq!(movie.id, PARASITE_ID);
        assert!(repository.find_by_title("Para").await.unwrap().is_none());

        let genre = repository.find_genre_by_name("DRAMA").await.unwrap().unwrap();
        assert_eq!(genre.name, "Drama");

        let director = repository
            .find_director_by_name("christopher nolan")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(director.birth_year, Some(1970));
    }
}
