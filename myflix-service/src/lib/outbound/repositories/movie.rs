use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::movie::errors::MovieError;
use crate::domain::movie::models::Director;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::ports::MovieRepository;

const MOVIE_COLUMNS: &str = "id, title, description, genre_name, genre_description, \
     director_name, director_bio, director_birth_year, director_death_year, image_url, featured";

pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_genre(row: &PgRow) -> Result<Genre, MovieError> {
        Ok(Genre {
            name: row.try_get("genre_name").map_err(db_error)?,
            description: row.try_get("genre_description").map_err(db_error)?,
        })
    }

    fn row_to_director(row: &PgRow) -> Result<Director, MovieError> {
        Ok(Director {
            name: row.try_get("director_name").map_err(db_error)?,
            bio: row.try_get("director_bio").map_err(db_error)?,
            birth_year: row.try_get("director_birth_year").map_err(db_error)?,
            death_year: row.try_get("director_death_year").map_err(db_error)?,
        })
    }

    fn row_to_movie(row: &PgRow) -> Result<Movie, MovieError> {
        Ok(Movie {
            id: MovieId(row.try_get("id").map_err(db_error)?),
            title: row.try_get("title").map_err(db_error)?,
            description: row.try_get("description").map_err(db_error)?,
            genre: Self::row_to_genre(row)?,
            director: Self::row_to_director(row)?,
            image_url: row.try_get("image_url").map_err(db_error)?,
            featured: row.try_get("featured").map_err(db_error)?,
        })
    }
}

fn db_error(e: sqlx::Error) -> MovieError {
    MovieError::DatabaseError(e.to_string())
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn list_all(&self) -> Result<Vec<Movie>, MovieError> {
        let rows = sqlx::query(&format!("SELECT {} FROM movies ORDER BY title", MOVIE_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.iter().map(Self::row_to_movie).collect()
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieError> {
        let row = sqlx::query(&format!("SELECT {} FROM movies WHERE id = $1", MOVIE_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.as_ref().map(Self::row_to_movie).transpose()
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, MovieError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM movies WHERE lower(title) = lower($1)",
            MOVIE_COLUMNS
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::row_to_movie).transpose()
    }

    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, MovieError> {
        let row = sqlx::query(
            r#"
            SELECT genre_name, genre_description
            FROM movies
            WHERE lower(genre_name) = lower($1)
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::row_to_genre).transpose()
    }

    async fn find_director_by_name(&self, name: &str) -> Result<Option<Director>, MovieError> {
        let row = sqlx::query(
            r#"
            SELECT director_name, director_bio, director_birth_year, director_death_year
            FROM movies
            WHERE lower(director_name) = lower($1)
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::row_to_director).transpose()
    }
}
