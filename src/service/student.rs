use crate::db::Database;
use crate::error::{Error, Result};
use crate::model::{
    common::Votable,
    ranking,
    student::{NewStudent, Student},
    Id,
};
use crate::repository::{CandidateRepository, Repository, StudentRepository};
use crate::service::ensure_valid;

pub struct StudentService {
    db: Database,
    students: StudentRepository,
    candidates: CandidateRepository,
}

impl StudentService {
    pub fn from_db(db: &Database) -> Self {
        Self {
            db: db.clone(),
            students: StudentRepository::from_db(db),
            candidates: CandidateRepository::from_db(db),
        }
    }

    /// Register a student, refusing a student ID that is already taken.
    pub fn create_student(&self, student: NewStudent) -> Result<Student> {
        ensure_valid(&student, "student")?;

        // Check student ID uniqueness.
        if self.students.exists_by_student_id(&student.student_id) {
            warn!("Rejected student: {} is already registered", student.student_id);
            return Err(Error::duplicate(format!(
                "Student with ID {} already exists",
                student.student_id
            )));
        }

        let student = self.students.create(student)?;
        info!("Registered student #{}: {}", student.id, student.name);
        Ok(student)
    }

    pub fn get_student(&self, id: Id) -> Result<Student> {
        self.students.find_by_id(id)
    }

    pub fn get_student_by_student_id(&self, student_id: &str) -> Result<Student> {
        self.students.find_by_student_id(student_id)
    }

    pub fn all_students(&self) -> Result<Vec<Student>> {
        self.students.find_all()
    }

    pub fn update_student(&self, student: &Student) -> Result<()> {
        ensure_valid(&student.student, "student")?;
        self.students.update(student)?;
        info!("Updated student #{}", student.id);
        Ok(())
    }

    pub fn delete_student(&self, id: Id) -> Result<()> {
        self.students.delete(id)?;
        info!("Deleted student #{id}");
        Ok(())
    }

    pub fn students_by_major(&self, major: &str) -> Result<Vec<Student>> {
        self.students.find_by_major(major)
    }

    pub fn voted_students(&self) -> Result<Vec<Student>> {
        self.students.find_voted()
    }

    pub fn non_voted_students(&self) -> Result<Vec<Student>> {
        self.students.find_non_voted()
    }

    /// Students who may still vote, by name.
    pub fn eligible_voters(&self) -> Result<Vec<Student>> {
        Ok(ranking::filter_eligible_voters(self.students.find_all()?))
    }

    /// Record one vote from a student for a candidate.
    ///
    /// Marking the student as voted and counting the vote happen in one
    /// transaction: either both are stored or neither is.
    pub fn cast_vote(&self, student_id: Id, candidate_id: Id) -> Result<()> {
        let mut student = self.students.find_by_id(student_id)?;
        if !student.can_vote() {
            warn!(
                "Student #{student_id} tried to vote: {}",
                student.vote_status_description()
            );
            return Err(Error::invalid(format!(
                "Student cannot vote: {}",
                student.vote_status_description()
            )));
        }
        let mut candidate = self.candidates.find_by_id(candidate_id)?;

        self.db.transaction(|| {
            student.vote()?;
            self.students.update(&student)?;

            candidate.increment_vote_count()?;
            self.candidates.update(&candidate)
        })?;

        info!(
            "Student #{student_id} voted for candidate #{candidate_id} ({} votes)",
            candidate.vote_count
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        candidate::{Candidate, CandidateCore},
        election::ElectionCore,
        student::StudentCore,
    };
    use crate::service::{CandidateService, ElectionService};

    fn candidate(db: &Database) -> Candidate {
        let election = ElectionService::from_db(db)
            .create_election(ElectionCore::example())
            .unwrap();
        CandidateService::from_db(db)
            .create_candidate(CandidateCore::example1(&election))
            .unwrap()
    }

    #[backend_test]
    fn create_then_get(students: StudentService) {
        let created = students.create_student(StudentCore::example1()).unwrap();
        assert!(!created.has_voted);
        assert_eq!(students.get_student(created.id).unwrap(), created);
        assert_eq!(students.get_student_by_student_id("S001").unwrap(), created);
    }

    #[backend_test]
    fn duplicate_student_id_creates_nothing(students: StudentService) {
        students.create_student(StudentCore::example1()).unwrap();
        let impostor = StudentCore::new("Duplicate Student", "S001", "Math", 2);
        match students.create_student(impostor) {
            Err(Error::Duplicate(msg)) => assert_eq!(msg, "Student with ID S001 already exists"),
            other => panic!("expected Duplicate, got {other:?}"),
        }
        assert_eq!(students.all_students().unwrap().len(), 1);
    }

    #[backend_test]
    fn invalid_student(students: StudentService) {
        let graduate = StudentCore::new("Graduate", "S099", "History", 5);
        match students.create_student(graduate) {
            Err(Error::InvalidInput(msg)) => assert_eq!(msg, "Students must be in year 1-4"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
        assert!(students.all_students().unwrap().is_empty());
    }

    #[backend_test]
    fn vote_counts_once(db: Database, students: StudentService, candidates: CandidateService) {
        let candidate = candidate(&db);
        let student = students.create_student(StudentCore::example2()).unwrap();

        students.cast_vote(student.id, candidate.id).unwrap();
        assert!(students.get_student(student.id).unwrap().has_voted);
        assert_eq!(candidates.get_candidate(candidate.id).unwrap().vote_count, 1);

        match students.cast_vote(student.id, candidate.id) {
            Err(Error::InvalidInput(msg)) => {
                assert_eq!(msg, "Student cannot vote: Already voted or ineligible")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
        assert_eq!(candidates.get_candidate(candidate.id).unwrap().vote_count, 1);
        assert_eq!(students.voted_students().unwrap().len(), 1);
        assert!(students.non_voted_students().unwrap().is_empty());
    }

    #[backend_test]
    fn ineligible_student_cannot_vote(
        db: Database,
        students: StudentService,
        candidates: CandidateService,
    ) {
        let candidate = candidate(&db);
        let mut student = students.create_student(StudentCore::example3()).unwrap();
        // Stored directly: the service would refuse a year-6 student.
        student.year_of_study = 6;
        StudentRepository::from_db(&db).update(&student).unwrap();

        assert!(matches!(
            students.cast_vote(student.id, candidate.id),
            Err(Error::InvalidInput(_))
        ));
        assert!(!students.get_student(student.id).unwrap().has_voted);
        assert_eq!(candidates.get_candidate(candidate.id).unwrap().vote_count, 0);
        assert!(students.eligible_voters().unwrap().is_empty());
    }

    #[backend_test]
    fn missing_participants(db: Database, students: StudentService) {
        let candidate = candidate(&db);
        let student = students.create_student(StudentCore::example2()).unwrap();

        assert!(matches!(
            students.cast_vote(Id::new(77), candidate.id),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            students.cast_vote(student.id, Id::new(77)),
            Err(Error::NotFound(_))
        ));
        assert!(!students.get_student(student.id).unwrap().has_voted);
    }

    #[backend_test]
    fn failed_count_rolls_back_vote(db: Database, students: StudentService) {
        let candidate = candidate(&db);
        let student = students.create_student(StudentCore::example2()).unwrap();
        db.connection()
            .execute_batch(
                "CREATE TRIGGER refuse_count BEFORE UPDATE ON candidates \
                 BEGIN SELECT RAISE(ABORT, 'counting offline'); END;",
            )
            .unwrap();

        let result = students.cast_vote(student.id, candidate.id);
        assert!(matches!(result, Err(ref err) if err.is_storage_failure()));
        assert!(!students.get_student(student.id).unwrap().has_voted);
        assert_eq!(students.eligible_voters().unwrap().len(), 1);
    }

    #[backend_test]
    fn queries(students: StudentService) {
        let arguan = students.create_student(StudentCore::example1()).unwrap();
        let dastan = students.create_student(StudentCore::example2()).unwrap();
        assert_eq!(students.students_by_major("CS").unwrap(), vec![dastan.clone()]);
        assert_eq!(students.eligible_voters().unwrap(), vec![arguan.clone(), dastan]);

        let mut renamed = arguan;
        renamed.major = "Mathematics".to_string();
        students.update_student(&renamed).unwrap();
        assert_eq!(students.get_student(renamed.id).unwrap(), renamed);

        students.delete_student(renamed.id).unwrap();
        assert!(matches!(
            students.get_student(renamed.id),
            Err(Error::NotFound(_))
        ));
    }
}
