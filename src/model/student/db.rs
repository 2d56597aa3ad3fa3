use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::model::{student::StudentCore, Entity, Id};

/// A student from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: Id,
    #[serde(flatten)]
    pub student: StudentCore,
}

impl Student {
    pub fn new(id: Id, student: StudentCore) -> Self {
        Self { id, student }
    }
}

impl Deref for Student {
    type Target = StudentCore;

    fn deref(&self) -> &Self::Target {
        &self.student
    }
}

impl DerefMut for Student {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.student
    }
}

impl Entity for Student {
    fn id(&self) -> Id {
        self.id
    }

    fn name(&self) -> &str {
        &self.student.name
    }

    fn description(&self) -> String {
        self.student.description()
    }

    fn is_eligible(&self) -> bool {
        self.student.is_eligible()
    }
}
