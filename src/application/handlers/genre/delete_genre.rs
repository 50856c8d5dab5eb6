//! DeleteGenreHandler - Command handler for removing genres.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::domain::foundation::{DomainError, GenreId};
use crate::ports::{GenreRepository, UnitOfWork};

#[derive(Debug, Clone)]
pub struct DeleteGenreCommand {
    pub id: GenreId,
}

pub struct DeleteGenreHandler {
    repository: Arc<dyn GenreRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl DeleteGenreHandler {
    pub fn new(repository: Arc<dyn GenreRepository>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the genre does not exist
    pub async fn handle(
        &self,
        cmd: DeleteGenreCommand,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        let genre = self.repository.get(cmd.id, cancel).await?;
        self.repository.delete(genre, cancel).await?;
        self.unit_of_work.commit(cancel).await
    }
}
