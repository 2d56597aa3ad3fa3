use crate::model::Id;

/// Behaviour shared by the people taking part in an election.
pub trait Entity {
    fn id(&self) -> Id;

    fn name(&self) -> &str;

    /// Type-specific details, one fact per line.
    fn description(&self) -> String;

    /// Whether the entity's year of study allows it to take part.
    fn is_eligible(&self) -> bool;

    /// A printable block summarising the entity.
    fn info(&self) -> String {
        format!(
            "ID: {}\nName: {}\n{}\nEligible: {}",
            self.id(),
            self.name(),
            self.description(),
            if self.is_eligible() { "Yes" } else { "No" }
        )
    }
}
