use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};
use tracing::{debug, info};

use super::model::*;
use super::repo::*;
use crate::catalog::MovieQuery;

const MOVIE_COLUMNS: &str = "m.title, m.plot, m.image, m.year, m.rating, m.genre, m.wikipedia_url";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(db_path: &str) -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str(db_path)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let repo = Self::from_pool(pool).await?;

        info!("Database initialized at {}", db_path);

        Ok(repo)
    }

    /// A private in-memory database. Uses a single connection that is never
    /// recycled, since every sqlite memory connection is its own database.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> DbResult<Self> {
        let repo = Self { pool };
        repo.init_schema().await?;
        Ok(repo)
    }

    async fn init_schema(&self) -> DbResult<()> {
        let schema = include_str!("schema.sql");
        sqlx::raw_sql(schema).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn is_empty(&self) -> DbResult<bool> {
        let (movies, genres): (i64, i64) = sqlx::query_as(
            "SELECT (SELECT COUNT(*) FROM movies), (SELECT COUNT(*) FROM genres)",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(movies == 0 && genres == 0)
    }

    /// Load a fixtures file if the catalog has no rows yet.
    /// Returns whether anything was imported.
    pub async fn import_fixtures_file(&self, path: &str) -> DbResult<bool> {
        if !self.is_empty().await? {
            debug!("Catalog not empty, skipping fixtures {}", path);
            return Ok(false);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DbError::FixturesRead(path.to_string(), e))?;
        let fixtures: Fixtures = serde_json::from_str(&content)
            .map_err(|e| DbError::FixturesParse(path.to_string(), e))?;

        self.import_fixtures(&fixtures).await?;
        info!(
            genres = fixtures.genres.len(),
            movies = fixtures.movies.len(),
            "Imported fixtures from {}",
            path
        );
        Ok(true)
    }

    pub async fn import_fixtures(&self, fixtures: &Fixtures) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        for genre in &fixtures.genres {
            sqlx::query("INSERT INTO genres (value) VALUES (?)")
                .bind(genre)
                .execute(&mut *tx)
                .await?;
        }

        for record in &fixtures.movies {
            let movie = &record.movie;
            sqlx::query(
                "INSERT INTO movies
                (title, plot, image, year, rating, genre, wikipedia_url, release_date)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&movie.title)
            .bind(&movie.plot)
            .bind(&movie.image)
            .bind(movie.year)
            .bind(movie.rating)
            .bind(&movie.genre)
            .bind(&movie.wikipedia_url)
            .bind(&record.release_date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl MovieRepo for SqliteRepository {
    async fn list_movies(&self, query: &MovieQuery) -> DbResult<Vec<Movie>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM movies m", MOVIE_COLUMNS));

        if let Some(genre) = &query.genre {
            builder.push(" WHERE m.genre = ").push_bind(genre.clone());
        }

        builder
            .push(" ORDER BY ")
            .push(query.order_by())
            .push(" LIMIT ")
            .push_bind(query.limit);

        let movies = builder
            .build_query_as::<Movie>()
            .fetch_all(&self.pool)
            .await?;

        Ok(movies)
    }
}

#[async_trait]
impl GenreRepo for SqliteRepository {
    async fn list_genres(&self, limit: u32) -> DbResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>("SELECT g.id, g.value FROM genres g LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(genres)
    }
}
