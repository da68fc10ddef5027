//! End-to-end scenarios through the store, detector and grid builder.

use std::time::Duration;

use ffcs_timetable::planner::{GenerationStatus, Planner};
use ffcs_timetable::registration::{CourseRegistrationStore, RegistrationField, RegistrationId};
use ffcs_timetable::timetable::{detect_conflicts, expand_registration, generate, ColumnKey, Day, SlotType};
use ffcs_timetable::TimetableError;

fn register(store: &mut CourseRegistrationStore, id: RegistrationId, faculty: &str, slots: &str) {
    store.update(id, RegistrationField::FacultyName, faculty).unwrap();
    store.update(id, RegistrationField::SlotCombination, slots).unwrap();
    store.commit(id).unwrap();
}

#[test]
fn disjoint_courses_generate_a_grid() {
    let mut store = CourseRegistrationStore::new();
    let a = store.registrations()[0].id;
    register(&mut store, a, "Course A", "A1+TA1");
    let b = store.add();
    register(&mut store, b, "Course B", "B1");

    assert!(detect_conflicts(&store.committed()).is_empty());
    let grid = generate(&store.committed()).unwrap();

    assert_eq!(grid.cell(Day::Mon, ColumnKey::Morning1).unwrap().faculty_name, "Course A");
    assert_eq!(grid.cell(Day::Tue, ColumnKey::Morning1).unwrap().faculty_name, "Course B");
    assert_eq!(grid.cell(Day::Tue, ColumnKey::Morning4).unwrap().slot_code, "TA1");
}

#[test]
fn theory_and_lab_in_the_same_column_conflict() {
    let mut store = CourseRegistrationStore::new();
    let a = store.registrations()[0].id;
    register(&mut store, a, "Course A", "A1");
    let b = store.add();
    register(&mut store, b, "Course B", "L1+L2");

    let conflicts = detect_conflicts(&store.committed());
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].day, Day::Mon);
    assert_eq!(conflicts[0].column, ColumnKey::Morning1);
    assert_eq!(conflicts[0].first.slot_type, SlotType::Theory);
    assert_eq!(conflicts[0].second.slot_type, SlotType::Lab);

    match generate(&store.committed()) {
        Err(TimetableError::ConflictDetected { conflicts: rejected }) => assert_eq!(rejected, conflicts),
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[test]
fn unknown_slot_code_expands_to_nothing() {
    // Documented gap: "Z9" is not in the catalog and silently occupies no
    // cell, so it can neither conflict nor appear on the grid. Only the
    // unresolved list and the commit outcome expose it.
    let mut store = CourseRegistrationStore::new();
    let a = store.registrations()[0].id;
    store.update(a, RegistrationField::FacultyName, "Course A").unwrap();
    store.update(a, RegistrationField::SlotCombination, "Z9").unwrap();
    let outcome = store.commit(a).unwrap();
    assert_eq!(outcome.unresolved_slots, vec!["Z9".to_string()]);

    let expansion = expand_registration(store.get(a).unwrap());
    assert!(expansion.records.is_empty());

    let grid = generate(&store.committed()).unwrap();
    assert_eq!(grid.occupied(), 0);
}

#[test]
fn resolving_a_conflict_by_deleting_a_course() {
    let mut store = CourseRegistrationStore::new();
    let a = store.registrations()[0].id;
    register(&mut store, a, "Course A", "A1");
    let b = store.add();
    register(&mut store, b, "Course B", "L1");
    let c = store.add();
    register(&mut store, c, "Course C", "C2");

    assert!(generate(&store.committed()).is_err());
    store.delete(b).unwrap();

    let grid = generate(&store.committed()).unwrap();
    let c_cell = grid.cell(Day::Wed, ColumnKey::Afternoon3).unwrap();
    assert_eq!(c_cell.faculty_name, "Course C");
    assert_eq!(c_cell.course_number, 2);
}

#[tokio::test]
async fn planner_invalidates_grid_on_edit() {
    let planner = Planner::new();
    let a = planner.registrations()[0].id;
    planner.update(a, RegistrationField::FacultyName, "Course A").unwrap();
    planner.update(a, RegistrationField::SlotCombination, "D2").unwrap();
    planner.commit(a).unwrap();

    planner.generate(Duration::ZERO).await.unwrap();
    assert_eq!(planner.status(), GenerationStatus::Generated);
    assert!(planner.current_grid().is_some());

    planner.edit(a).unwrap();
    assert!(planner.current_grid().is_none());

    // Back in editing, nothing is schedulable any more
    let result = planner.generate(Duration::ZERO).await;
    assert!(matches!(result, Err(TimetableError::EmptyRegistrationSet)));
}
