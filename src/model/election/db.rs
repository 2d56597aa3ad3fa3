use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::model::{election::ElectionCore, Id};

/// An election from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    pub id: Id,
    #[serde(flatten)]
    pub election: ElectionCore,
}

impl Election {
    pub fn new(id: Id, election: ElectionCore) -> Self {
        Self { id, election }
    }
}

impl Deref for Election {
    type Target = ElectionCore;

    fn deref(&self) -> &Self::Target {
        &self.election
    }
}

impl DerefMut for Election {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.election
    }
}

impl Display for Election {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Election #{}: {} ({} to {}, academic year {}){}",
            self.id,
            self.name,
            self.start_date,
            self.end_date,
            self.academic_year,
            if self.is_active() { " [active]" } else { "" }
        )
    }
}
