//! GetCastMemberHandler - Query handler for a single cast member.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::CastMemberOutput;
use crate::domain::foundation::{CastMemberId, DomainError};
use crate::ports::CastMemberRepository;

#[derive(Debug, Clone)]
pub struct GetCastMemberQuery {
    pub id: CastMemberId,
}

pub struct GetCastMemberHandler {
    repository: Arc<dyn CastMemberRepository>,
}

impl GetCastMemberHandler {
    pub fn new(repository: Arc<dyn CastMemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetCastMemberQuery,
        cancel: &CancellationToken,
    ) -> Result<CastMemberOutput, DomainError> {
        let member = self.repository.get(query.id, cancel).await?;
        Ok(CastMemberOutput::from(&member))
    }
}
