use serde::Serialize;

/// A referenced aggregate as shown in an output: always its id, and its name
/// when the handler looked it up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedOutput<ID> {
    pub id: ID,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl<ID> RelatedOutput<ID> {
    pub fn unnamed(id: ID) -> Self {
        Self { id, name: None }
    }
}
