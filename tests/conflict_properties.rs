//! Property tests for conflict detection, generation and store renumbering.

use std::collections::HashSet;

use ffcs_timetable::registration::{CourseRegistration, CourseRegistrationStore, RegistrationId};
use ffcs_timetable::timetable::{
    all_slots, detect_conflicts, expand_registration, generate, ColumnKey, ConflictRecord, Day, SlotType,
};
use ffcs_timetable::TimetableError;
use proptest::prelude::*;

fn committed(id: u64, slots: &str) -> CourseRegistration {
    CourseRegistration {
        id: RegistrationId(id),
        course_number: id as u32,
        faculty_name: format!("Faculty {}", id),
        slot_combination: slots.to_string(),
        is_editing: false,
    }
}

fn cells(registration: &CourseRegistration) -> HashSet<(Day, ColumnKey)> {
    expand_registration(registration)
        .records
        .iter()
        .map(|r| (r.day, r.column))
        .collect()
}

fn slot_codes() -> Vec<String> {
    all_slots().into_iter().map(|s| s.code.clone()).collect()
}

fn combination() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(slot_codes()), 1..4).prop_map(|codes| codes.join("+"))
}

proptest! {
    #[test]
    fn disjoint_occupancy_never_conflicts(a in combination(), b in combination()) {
        let r1 = committed(1, &a);
        let r2 = committed(2, &b);
        prop_assume!(cells(&r1).is_disjoint(&cells(&r2)));
        prop_assert!(detect_conflicts(&[r1, r2]).is_empty());
    }

    #[test]
    fn conflicts_match_shared_cells(a in combination(), b in combination()) {
        let r1 = committed(1, &a);
        let r2 = committed(2, &b);
        let shared: HashSet<(Day, ColumnKey)> = cells(&r1).intersection(&cells(&r2)).copied().collect();
        let conflicts = detect_conflicts(&[r1, r2]);
        let reported: HashSet<(Day, ColumnKey)> = conflicts.iter().map(|c| (c.day, c.column)).collect();
        prop_assert_eq!(conflicts.len(), shared.len());
        prop_assert_eq!(reported, shared);
    }

    #[test]
    fn detection_is_idempotent(courses in prop::collection::vec(combination(), 1..6)) {
        let registrations: Vec<CourseRegistration> = courses
            .iter()
            .enumerate()
            .map(|(i, slots)| committed(i as u64 + 1, slots))
            .collect();
        let first: HashSet<ConflictRecord> = detect_conflicts(&registrations).into_iter().collect();
        let second: HashSet<ConflictRecord> = detect_conflicts(&registrations).into_iter().collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn detection_ignores_input_order(courses in prop::collection::vec(combination(), 2..6)) {
        let registrations: Vec<CourseRegistration> = courses
            .iter()
            .enumerate()
            .map(|(i, slots)| committed(i as u64 + 1, slots))
            .collect();
        let mut reversed = registrations.clone();
        reversed.reverse();
        let forward: HashSet<ConflictRecord> = detect_conflicts(&registrations).into_iter().collect();
        let backward: HashSet<ConflictRecord> = detect_conflicts(&reversed).into_iter().collect();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn generation_is_atomic(courses in prop::collection::vec(combination(), 1..6)) {
        let registrations: Vec<CourseRegistration> = courses
            .iter()
            .enumerate()
            .map(|(i, slots)| committed(i as u64 + 1, slots))
            .collect();
        let conflicts = detect_conflicts(&registrations);
        match generate(&registrations) {
            Ok(grid) => {
                prop_assert!(conflicts.is_empty());
                let expected: HashSet<(Day, ColumnKey)> = registrations.iter().flat_map(cells).collect();
                prop_assert_eq!(grid.occupied(), expected.len());
            }
            Err(TimetableError::ConflictDetected { conflicts: reported }) => {
                prop_assert!(!conflicts.is_empty());
                prop_assert_eq!(reported.len(), conflicts.len());
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn delete_renumbers_contiguously(extra in 1usize..10, picks in prop::collection::vec(any::<prop::sample::Index>(), 1..10)) {
        let mut store = CourseRegistrationStore::new();
        for _ in 0..extra {
            store.add();
        }

        for pick in picks {
            let before: Vec<RegistrationId> = store.registrations().iter().map(|r| r.id).collect();
            let victim = before[pick.index(before.len())];
            match store.delete(victim) {
                Ok(()) => {
                    let expected: Vec<RegistrationId> = before.into_iter().filter(|id| *id != victim).collect();
                    let after: Vec<RegistrationId> = store.registrations().iter().map(|r| r.id).collect();
                    prop_assert_eq!(after, expected);
                }
                Err(TimetableError::CannotDeleteLast) => prop_assert_eq!(before.len(), 1),
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }

            prop_assert!(store.len() >= 1);
            let numbers: Vec<u32> = store.registrations().iter().map(|r| r.course_number).collect();
            let contiguous: Vec<u32> = (1..=store.len() as u32).collect();
            prop_assert_eq!(numbers, contiguous);
        }
    }
}

#[test]
fn one_shared_cell_gives_one_conflict_for_every_slot_pair() {
    let codes = slot_codes();
    let mut seen_kinds = HashSet::new();

    for a in &codes {
        for b in &codes {
            let r1 = committed(1, a);
            let r2 = committed(2, b);
            if cells(&r1).intersection(&cells(&r2)).count() != 1 {
                continue;
            }
            let conflicts = detect_conflicts(&[r1, r2]);
            assert_eq!(conflicts.len(), 1, "{} vs {}", a, b);

            let kinds = (conflicts[0].first.slot_type, conflicts[0].second.slot_type);
            seen_kinds.insert(kinds);
        }
    }

    assert!(seen_kinds.contains(&(SlotType::Theory, SlotType::Theory)));
    assert!(seen_kinds.contains(&(SlotType::Lab, SlotType::Lab)));
    assert!(seen_kinds.contains(&(SlotType::Theory, SlotType::Lab)));
    assert!(seen_kinds.contains(&(SlotType::Lab, SlotType::Theory)));
}

#[test]
fn self_overlapping_course_conflicts_once_per_shared_cell() {
    let codes = slot_codes();

    // "a+b" against "b": every cell of b is shared, whether or not a and b
    // overlap inside the first course.
    for a in &codes {
        for b in &codes {
            let r1 = committed(1, &format!("{}+{}", a, b));
            let r2 = committed(2, b);
            let shared = cells(&r1).intersection(&cells(&r2)).count();
            let conflicts = detect_conflicts(&[r1, r2]);
            assert_eq!(conflicts.len(), shared, "{}+{} vs {}", a, b, b);
        }
    }

    let conflicts = detect_conflicts(&[committed(1, "A1+L1"), committed(2, "L1")]);
    assert_eq!(conflicts.len(), 1);
    assert_eq!((conflicts[0].day, conflicts[0].column), (Day::Mon, ColumnKey::Morning1));
    assert_eq!(conflicts[0].first.slot_type, SlotType::Theory);
    assert_eq!(conflicts[0].second.slot_type, SlotType::Lab);
}
