//! DeleteCastMemberHandler - Command handler for removing cast members.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::domain::foundation::{CastMemberId, DomainError};
use crate::ports::{CastMemberRepository, UnitOfWork};

#[derive(Debug, Clone)]
pub struct DeleteCastMemberCommand {
    pub id: CastMemberId,
}

pub struct DeleteCastMemberHandler {
    repository: Arc<dyn CastMemberRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl DeleteCastMemberHandler {
    pub fn new(
        repository: Arc<dyn CastMemberRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }

    pub async fn handle(
        &self,
        cmd: DeleteCastMemberCommand,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        let member = self.repository.get(cmd.id, cancel).await?;
        self.repository.delete(member, cancel).await?;
        self.unit_of_work.commit(cancel).await
    }
}
