//! The fixed demonstration run by the binary.

use std::io::Write;

use chrono::NaiveDate;

use crate::controller::ElectionController;
use crate::model::{
    candidate::NewCandidate,
    common::{is_valid_string, is_valid_year, meets_basic_voting_requirements, Validatable, Votable},
    election::NewElection,
    student::NewStudent,
};

/// Register one election with its candidates and voters, try some invalid
/// registrations, vote, and print the standings.
pub fn run<W: Write>(controller: &mut ElectionController<W>) {
    controller.say("=== UNIVERSITY ELECTION MANAGEMENT ===");

    controller.say("\n[1] CREATING ENTITIES");
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(2026, 1, 10),
        NaiveDate::from_ymd_opt(2026, 1, 19),
    ) else {
        return;
    };
    let Some(election) = controller.create_election(NewElection::new(
        "University President Election 2026",
        start,
        end,
        "2026-2027",
    )) else {
        controller.say("Cannot continue without an election");
        return;
    };

    let candidates = [
        NewCandidate::new(
            "Zhubanazarova Ainaz",
            "Computer Science",
            3,
            "Innovation and Student Welfare",
            election.clone(),
        ),
        NewCandidate::new(
            "Bekbolat Aruzhan",
            "Software Engineering",
            2,
            "New learning platforms",
            election.clone(),
        ),
        NewCandidate::new(
            "Daurenuly Alisher",
            "Cybersecurity",
            3,
            "Comfort in Campus",
            election.clone(),
        ),
    ]
    .map(|candidate| controller.create_candidate(candidate));

    let students = [
        NewStudent::new("Arguan Bakikair", "S001", "Software Engineering", 1),
        NewStudent::new("Dastan Nursultanov", "S002", "CS", 3),
        NewStudent::new("Ershat Diasov", "S003", "Data Science", 2),
    ]
    .map(|student| controller.create_student(student));

    controller.say("\n[2] ENTITY SUMMARIES");
    if let Some(candidate) = &candidates[0] {
        controller.display_entity_info(candidate);
        controller.say(format_args!("Validation: {}", candidate.validation_message()));
    }
    if let Some(student) = &students[0] {
        controller.display_entity_info(student);
        controller.say(format_args!("Vote status: {}", student.vote_status_description()));
    }
    controller.say(format_args!(
        "Checks: valid string {}, valid year {}, basic voting requirements {}",
        is_valid_string("Test"),
        is_valid_year(2, 1, 4),
        meets_basic_voting_requirements(false, true)
    ));

    controller.say("\n[3] INVALID REGISTRATIONS");
    controller.create_candidate(NewCandidate::new(
        "Invalid Student",
        "Computer Science",
        1,
        "Should fail",
        election.clone(),
    ));
    controller.create_student(NewStudent::new("Duplicate", "S001", "CS", 2));

    controller.say("\n[4] VOTING");
    for (voter, choice) in [(0, 0), (1, 0), (2, 1)] {
        if let (Some(student), Some(candidate)) = (&students[voter], &candidates[choice]) {
            controller.say(format_args!("{} votes for {}:", student.name, candidate.name));
            controller.cast_vote(student.id, candidate.id);
        }
    }

    controller.say("\n[5] RESULTS");
    controller.all_candidates_sorted();
    controller.eligible_voters();
    controller.say("");
    controller.top_candidates(2);
    controller.say("");
    controller.eligible_candidates();
    controller.election_results(election.id);

    controller.say("\nFinal state:");
    controller.all_elections();
    controller.all_candidates_sorted();
}
