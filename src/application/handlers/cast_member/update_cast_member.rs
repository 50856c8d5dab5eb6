//! UpdateCastMemberHandler - Command handler for cast member updates.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::CastMemberOutput;
use crate::domain::cast_member::CastMemberType;
use crate::domain::foundation::{CastMemberId, DomainError};
use crate::ports::{CastMemberRepository, UnitOfWork};

#[derive(Debug, Clone)]
pub struct UpdateCastMemberCommand {
    pub id: CastMemberId,
    pub name: String,
    pub member_type: CastMemberType,
}

pub struct UpdateCastMemberHandler {
    repository: Arc<dyn CastMemberRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl UpdateCastMemberHandler {
    pub fn new(
        repository: Arc<dyn CastMemberRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the cast member does not exist
    /// - `ValidationFailed` if the new name is invalid
    pub async fn handle(
        &self,
        cmd: UpdateCastMemberCommand,
        cancel: &CancellationToken,
    ) -> Result<CastMemberOutput, DomainError> {
        let mut member = self.repository.get(cmd.id, cancel).await?;
        member.update(cmd.name, cmd.member_type)?;

        let output = CastMemberOutput::from(&member);
        self.repository.update(member, cancel).await?;
        self.unit_of_work.commit(cancel).await?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{token, Harness};
    use crate::domain::cast_member::CastMember;
    use crate::domain::foundation::{AggregateRoot, SearchableRepository};
    use crate::domain::EventKind;

    #[tokio::test]
    async fn changes_name_and_type() {
        let h = Harness::new();
        let member = CastMember::new("Jane Doe", CastMemberType::Actor).unwrap();
        let id = member.id();
        h.session.cast_members().insert(member, &token()).await.unwrap();
        h.unit_of_work.commit(&token()).await.unwrap();
        h.publisher.clear();

        let output = UpdateCastMemberHandler::new(h.session.cast_members(), h.unit_of_work.clone())
            .handle(
                UpdateCastMemberCommand {
                    id,
                    name: "Jane Roe".to_string(),
                    member_type: CastMemberType::Director,
                },
                &token(),
            )
            .await
            .unwrap();

        assert_eq!(output.member_type, CastMemberType::Director);
        let stored = h.session.cast_members().get(id, &token()).await.unwrap();
        assert_eq!(stored.name(), "Jane Roe");
        assert_eq!(h.publisher.kinds(), vec![EventKind::CastMemberUpdated]);
    }
}
