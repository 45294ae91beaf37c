use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::ports::MovieRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection. The
/// movie repository is only consulted to check that a favorite exists.
pub struct UserService<UR, MR>
where
    UR: UserRepository,
    MR: MovieRepository,
{
    repository: Arc<UR>,
    movies: Arc<MR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, MR> UserService<UR, MR>
where
    UR: UserRepository,
    MR: MovieRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `movies` - Catalog persistence implementation
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, movies: Arc<MR>) -> Self {
        Self {
            repository,
            movies,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    async fn hash_password(&self, password: Password) -> Result<String, UserError> {
        let hasher = self.password_hasher;
        tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))
    }
}

#[async_trait]
impl<UR, MR> UserServicePort for UserService<UR, MR>
where
    UR: UserRepository,
    MR: MovieRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password).await?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            birthday: command.birthday,
            favorite_movies: BTreeSet::new(),
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self.get_user(id).await?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash_password(new_password).await?;
        }

        if let Some(new_birthday) = command.birthday {
            user.birthday = Some(new_birthday);
        }

        self.repository
            .update(user)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        if !self.repository.delete(id).await? {
            return Err(UserError::NotFound(id.to_string()));
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn add_favorite(&self, id: &UserId, movie_id: &MovieId) -> Result<User, UserError> {
        let movie = self.movies.find_by_id(movie_id).await.map_err(|e| match e {
            MovieError::DatabaseError(msg) => UserError::DatabaseError(msg),
            other => UserError::Unknown(other.to_string()),
        })?;
        if movie.is_none() {
            return Err(UserError::MovieNotFound(movie_id.to_string()));
        }

        self.repository
            .add_favorite(id, movie_id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn remove_favorite(
        &self,
        id: &UserId,
        movie_id: &MovieId,
    ) -> Result<User, UserError> {
        self.repository
            .remove_favorite(id, movie_id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::movie::models::Director;
    use crate::domain::movie::models::Genre;
    use crate::domain::movie::models::Movie;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Username;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn update(&self, user: User) -> Result<Option<User>, UserError>;
            async fn delete(&self, id: &UserId) -> Result<bool, UserError>;
            async fn add_favorite(&self, id: &UserId, movie_id: &MovieId) -> Result<Option<User>, UserError>;
            async fn remove_favorite(&self, id: &UserId, movie_id: &MovieId) -> Result<Option<User>, UserError>;
        }
    }

    mock! {
        pub TestMovieRepository {}

        #[async_trait]
        impl MovieRepository for TestMovieRepository {
            async fn list_all(&self) -> Result<Vec<Movie>, MovieError>;
            async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieError>;
            async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, MovieError>;
            async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, MovieError>;
            async fn find_director_by_name(&self, name: &str) -> Result<Option<Director>, MovieError>;
        }
    }

    fn sample_user(id: UserId) -> User {
        User {
            id,
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            birthday: None,
            favorite_movies: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    fn sample_movie(id: MovieId) -> Movie {
        Movie {
            id,
            title: "Inception".to_string(),
            description: "Dreams within dreams.".to_string(),
            genre: Genre {
                name: "Science Fiction".to_string(),
                description: "Speculative stories.".to_string(),
            },
            director: Director {
                name: "Christopher Nolan".to_string(),
                bio: "British-American director.".to_string(),
                birth_year: Some(1970),
                death_year: None,
            },
            image_url: "inception.png".to_string(),
            featured: true,
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();
        let movies = MockTestMovieRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "testuser"
                    && user.email.as_str() == "test@example.com"
                    && user.password_hash.starts_with("$argon2")
                    && user.favorite_movies.is_empty()
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), Arc::new(movies));

        let command = CreateUserCommand::new(
            Username::new("testuser".to_string()).unwrap(),
            EmailAddress::new("test@example.com".to_string()).unwrap(),
            Password::new("password123".to_string()).unwrap(),
            None,
        );

        let user = service.create_user(command).await.unwrap();
        assert_eq!(user.username.as_str(), "testuser");
        // Password is hashed with real Argon2
        assert!(user.password_hash.starts_with("$argon2"));
        assert_ne!(user.password_hash, "password123");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username() {
        let mut repository = MockTestUserRepository::new();
        let movies = MockTestMovieRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository), Arc::new(movies));

        let command = CreateUserCommand::new(
            Username::new("testuser".to_string()).unwrap(),
            EmailAddress::new("test2@example.com".to_string()).unwrap(),
            Password::new("password456".to_string()).unwrap(),
            None,
        );

        assert!(matches!(
            service.create_user(command).await,
            Err(UserError::UsernameAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(MockTestMovieRepository::new()),
        );

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_user_replaces_provided_fields() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId::new();

        let existing = sample_user(user_id);
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        repository
            .expect_update()
            .withf(|user| {
                user.username.as_str() == "newuser"
                    && user.email.as_str() == "test@example.com"
                    && user.password_hash.starts_with("$argon2")
                    && user.birthday.is_some()
            })
            .times(1)
            .returning(|user| Ok(Some(user)));

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(MockTestMovieRepository::new()),
        );

        let command = UpdateUserCommand {
            username: Some(Username::new("newuser".to_string()).unwrap()),
            password: Some(Password::new("newpassword".to_string()).unwrap()),
            birthday: chrono::NaiveDate::from_ymd_opt(1990, 1, 1),
            ..Default::default()
        };

        let updated = service.update_user(&user_id, command).await.unwrap();
        assert_eq!(updated.username.as_str(), "newuser");
        assert_eq!(updated.email.as_str(), "test@example.com");
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(MockTestMovieRepository::new()),
        );

        let result = service
            .update_user(&UserId::new(), UpdateUserCommand::default())
            .await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_delete().times(1).returning(|_| Ok(false));

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(MockTestMovieRepository::new()),
        );

        assert!(matches!(
            service.delete_user(&UserId::new()).await,
            Err(UserError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_add_favorite_checks_catalog() {
        let mut repository = MockTestUserRepository::new();
        let mut movies = MockTestMovieRepository::new();
        let user_id = UserId::new();
        let movie_id = MovieId::new();

        movies
            .expect_find_by_id()
            .withf(move |id| *id == movie_id)
            .times(1)
            .returning(move |id| Ok(Some(sample_movie(*id))));

        repository
            .expect_add_favorite()
            .times(1)
            .returning(move |id, movie| {
                let mut user = sample_user(*id);
                user.favorite_movies.insert(*movie);
                Ok(Some(user))
            });

        let service = UserService::new(Arc::new(repository), Arc::new(movies));

        let user = service.add_favorite(&user_id, &movie_id).await.unwrap();
        assert!(user.favorite_movies.contains(&movie_id));
    }

    #[tokio::test]
    async fn test_add_favorite_unknown_movie() {
        let mut repository = MockTestUserRepository::new();
        let mut movies = MockTestMovieRepository::new();

        movies.expect_find_by_id().times(1).returning(|_| Ok(None));
        repository.expect_add_favorite().times(0);

        let service = UserService::new(Arc::new(repository), Arc::new(movies));

        let result = service.add_favorite(&UserId::new(), &MovieId::new()).await;
        assert!(matches!(result, Err(UserError::MovieNotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_favorite_missing_user() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_remove_favorite()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(MockTestMovieRepository::new()),
        );

        let result = service.remove_favorite(&UserId::new(), &MovieId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
