//! CreateCastMemberHandler - Command handler for creating cast members.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::CastMemberOutput;
use crate::domain::cast_member::{CastMember, CastMemberType};
use crate::domain::foundation::DomainError;
use crate::ports::{CastMemberRepository, UnitOfWork};

#[derive(Debug, Clone)]
pub struct CreateCastMemberCommand {
    pub name: String,
    pub member_type: CastMemberType,
}

pub struct CreateCastMemberHandler {
    repository: Arc<dyn CastMemberRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl CreateCastMemberHandler {
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
        cmd: CreateCastMemberCommand,
        cancel: &CancellationToken,
    ) -> Result<CastMemberOutput, DomainError> {
        let member = CastMember::new(cmd.name, cmd.member_type)?;
        let output = CastMemberOutput::from(&member);

        self.repository.insert(member, cancel).await?;
        self.unit_of_work.commit(cancel).await?;

        Ok(output)
    }
}
