//! ListCastMembersHandler - Paged cast member listing.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::CastMemberOutput;
use crate::domain::foundation::{DomainError, SearchInput, SearchOutput};
use crate::ports::CastMemberRepository;

pub struct ListCastMembersHandler {
    repository: Arc<dyn CastMemberRepository>,
}

impl ListCastMembersHandler {
    pub fn new(repository: Arc<dyn CastMemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        input: SearchInput,
        cancel: &CancellationToken,
    ) -> Result<SearchOutput<CastMemberOutput>, DomainError> {
        let page = self.repository.search(&input, cancel).await?;
        Ok(page.map(|member| CastMemberOutput::from(&member)))
    }
}

#[cfg(test)]
mod tests {
    use crate::ports::UnitOfWork;
    use super::*;
    use crate::application::handlers::test_support::{token, Harness};
    use crate::domain::cast_member::{CastMember, CastMemberType};
    use crate::domain::foundation::{SearchOrder, SearchableRepository};

    #[tokio::test]
    async fn pages_cast_members() {
        let h = Harness::new();
        for name in ["Ana", "Bruno", "Carla", "Davi"] {
            let member = CastMember::new(name, CastMemberType::Actor).unwrap();
            h.session.cast_members().insert(member, &token()).await.unwrap();
        }
        h.unit_of_work.commit(&token()).await.unwrap();

        let handler = ListCastMembersHandler::new(h.session.cast_members());
        let input = SearchInput::new(2, 3, "", "name", SearchOrder::Asc).unwrap();
        let page = handler.handle(input, &token()).await.unwrap();

        assert_eq!(page.total, 4);
        assert_eq!(page.current_page, 2);
        let names: Vec<_> = page.items.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Davi"]);
    }
}
