use async_trait::async_trait;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::Director;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;

/// Port for catalog read operations.
#[async_trait]
pub trait MovieServicePort: Send + Sync + 'static {
    /// List every movie in the catalog.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError>;

    /// Retrieve a movie by its title.
    ///
    /// # Errors
    /// * `NotFound` - No movie has this title
    /// * `DatabaseError` - Store operation failed
    async fn get_movie_by_title(&self, title: &str) -> Result<Movie, MovieError>;

    /// Retrieve a movie by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Movie does not exist
    /// * `DatabaseError` - Store operation failed
    async fn get_movie(&self, id: &MovieId) -> Result<Movie, MovieError>;

    /// Retrieve a genre by name.
    ///
    /// # Errors
    /// * `GenreNotFound` - No movie carries this genre
    /// * `DatabaseError` - Store operation failed
    async fn get_genre(&self, name: &str) -> Result<Genre, MovieError>;

    /// Retrieve a director by name.
    ///
    /// # Errors
    /// * `DirectorNotFound` - No movie was directed by this name
    /// * `DatabaseError` - Store operation failed
    async fn get_director(&self, name: &str) -> Result<Director, MovieError>;
}

/// Persistence operations for the movie catalog.
///
/// Text lookups are whole-value matches ignoring case.
#[async_trait]
pub trait MovieRepository: Send + Sync + 'static {
    async fn list_all(&self) -> Result<Vec<Movie>, MovieError>;

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieError>;

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, MovieError>;

    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, MovieError>;

    async fn find_director_by_name(&self, name: &str) -> Result<Option<Director>, MovieError>;
}
