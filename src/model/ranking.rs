//! Ordering and filtering over loaded entities.

use std::cmp::Reverse;

use crate::model::{candidate::Candidate, common::Votable, student::Student, Entity};

pub fn sort_by_name<T: Entity>(entities: &mut [T]) {
    entities.sort_by(|a, b| a.name().cmp(b.name()));
}

pub fn sort_by_name_descending<T: Entity>(entities: &mut [T]) {
    entities.sort_by(|a, b| b.name().cmp(a.name()));
}

/// Most votes first. The sort is stable, so tied candidates keep their
/// relative order.
pub fn sort_candidates_by_votes(candidates: &mut [Candidate]) {
    candidates.sort_by_key(|candidate| Reverse(candidate.vote_count));
}

/// The `n` candidates with the most votes, best first.
pub fn top_candidates(mut candidates: Vec<Candidate>, n: usize) -> Vec<Candidate> {
    sort_candidates_by_votes(&mut candidates);
    candidates.truncate(n);
    candidates
}

pub fn filter_eligible<T: Entity>(entities: impl IntoIterator<Item = T>) -> Vec<T> {
    entities
        .into_iter()
        .filter(|entity| entity.is_eligible())
        .collect()
}

/// Students who may still cast a vote.
pub fn filter_eligible_voters(students: impl IntoIterator<Item = Student>) -> Vec<Student> {
    students
        .into_iter()
        .filter(|student| student.can_vote())
        .collect()
}

/// Case-insensitive match on the major.
pub fn filter_students_by_major(
    students: impl IntoIterator<Item = Student>,
    major: &str,
) -> Vec<Student> {
    let major = major.to_lowercase();
    students
        .into_iter()
        .filter(|student| student.major.to_lowercase() == major)
        .collect()
}

pub fn count_matching<T>(items: &[T], condition: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|item| condition(item)).count()
}
