use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::Director;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::ports::MovieRepository;
use crate::domain::movie::ports::MovieServicePort;

/// Domain service implementation for catalog reads.
pub struct MovieService<MR>
where
    MR: MovieRepository,
{
    repository: Arc<MR>,
}

impl<MR> MovieService<MR>
where
    MR: MovieRepository,
{
    /// Create a new movie service.
    ///
    /// # Arguments
    /// * `repository` - Catalog persistence implementation
    pub fn new(repository: Arc<MR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<MR> MovieServicePort for MovieService<MR>
where
    MR: MovieRepository,
{
    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError> {
        self.repository.list_all().await
    }

    async fn get_movie_by_title(&self, title: &str) -> Result<Movie, MovieError> {
        self.repository
            .find_by_title(title)
            .await?
            .ok_or_else(|| MovieError::NotFound(title.to_string()))
    }

    async fn get_movie(&self, id: &MovieId) -> Result<Movie, MovieError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| MovieError::NotFound(id.to_string()))
    }

    async fn get_genre(&self, name: &str) -> Result<Genre, MovieError> {
        self.repository
            .find_genre_by_name(name)
            .await?
            .ok_or_else(|| MovieError::GenreNotFound(name.to_string()))
    }

    async fn get_director(&self, name: &str) -> Result<Director, MovieError> {
        self.repository
            .find_director_by_name(name)
            .await?
            .ok_or_else(|| MovieError::DirectorNotFound(name.to_string()))
    }
}
