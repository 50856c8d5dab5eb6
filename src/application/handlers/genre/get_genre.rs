//! GetGenreHandler - Query handler for a single genre.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::GenreOutput;
use crate::domain::foundation::{DomainError, GenreId};
use crate::ports::GenreRepository;

#[derive(Debug, Clone)]
pub struct GetGenreQuery {
    pub id: GenreId,
}

pub struct GetGenreHandler {
    repository: Arc<dyn GenreRepository>,
}

impl GetGenreHandler {
    pub fn new(repository: Arc<dyn GenreRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetGenreQuery,
        cancel: &CancellationToken,
    ) -> Result<GenreOutput, DomainError> {
        let genre = self.repository.get(query.id, cancel).await?;
        Ok(GenreOutput::from(&genre))
    }
}
