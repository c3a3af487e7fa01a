use std::collections::HashMap;
use shift_roster::logging;
use shift_roster::schedule::{all_slots, CycleState, Day, ScheduleError, ScheduleReport, SchedulingEngine, ShiftKind};
use shift_roster::SchedulingRules;

fn engine_with(count: usize) -> SchedulingEngine {
    logging::init_test();
    let mut engine = SchedulingEngine::default();
    for i in 1..=count {
        engine.register(&format!("E{i}"));
    }
    engine
}

fn assert_daily_exclusive(report: &ScheduleReport) {
    for day in Day::ALL {
        let mut seen: HashMap<&str, ShiftKind> = HashMap::new();
        for shift in ShiftKind::ALL {
            for employee in &report.slot(day, shift).unwrap().employees {
                if let Some(previous) = seen.insert(employee.as_str(), shift) {
                    panic!("{employee} works {previous} and {shift} on {day}");
                }
            }
        }
    }
}

fn assert_load_matches_slots(report: &ScheduleReport) {
    for load in &report.workload {
        let placed = report
            .slots
            .iter()
            .filter(|s| s.employees.contains(&load.employee))
            .count() as u32;
        assert_eq!(placed, load.shifts, "load mismatch for {}", load.employee);
        assert!(load.shifts <= 5);
    }
}

#[test]
fn nine_employees_without_preferences_fill_every_slot_with_two() {
    let mut engine = engine_with(9);

    let report = engine.generate().unwrap();

    assert_eq!(report.slots.len(), 21);
    assert!(report.slots.iter().all(|s| s.employees.len() == 2));
    assert_daily_exclusive(&report);
    assert_load_matches_slots(&report);
    assert_eq!(report.total_assignments(), 42);
    for i in 1..=6 {
        assert_eq!(report.load_of(&format!("E{i}")), 5);
    }
    for i in 7..=9 {
        assert_eq!(report.load_of(&format!("E{i}")), 4);
    }
    assert_eq!(
        report.slot(Day::Monday, ShiftKind::Morning).unwrap().employees,
        vec!["E1", "E2"]
    );
}

#[test]
fn five_employees_are_not_enough() {
    let mut engine = engine_with(5);

    let err = engine.generate().unwrap_err();

    assert_eq!(err, ScheduleError::InsufficientStaff { required: 9, current: 5 });
}

#[test]
fn gate_leaves_existing_state_untouched() {
    let mut engine = engine_with(8);
    engine.add_preference("E1", Day::Monday, ShiftKind::Morning);
    engine.assign("E2", Day::Tuesday, ShiftKind::Evening);
    let before = engine.snapshot();
    let prefs_before = engine.preferences().to_vec();

    assert!(matches!(
        engine.generate(),
        Err(ScheduleError::InsufficientStaff { current: 8, .. })
    ));

    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.preferences(), prefs_before.as_slice());
    assert_eq!(engine.employee_count(), 8);
    assert_eq!(engine.cycle_state(), CycleState::Populated);
}

#[test]
fn shared_first_choice_seeds_only_the_first_employee() {
    let mut engine = engine_with(9);
    for i in 1..=9 {
        engine.add_preference(&format!("E{i}"), Day::Monday, ShiftKind::Morning);
    }

    let report = engine.generate().unwrap();

    let monday = &report.slot(Day::Monday, ShiftKind::Morning).unwrap().employees;
    assert_eq!(monday, &vec!["E1".to_string(), "E2".to_string()]);
    assert!(report.slots.iter().all(|s| s.employees.len() >= 2));
    assert_daily_exclusive(&report);
}

#[test]
fn distinct_first_choices_are_all_honored() {
    let mut engine = engine_with(9);
    let wishes = [
        ("E1", Day::Monday, ShiftKind::Morning),
        ("E2", Day::Monday, ShiftKind::Afternoon),
        ("E3", Day::Tuesday, ShiftKind::Morning),
        ("E4", Day::Wednesday, ShiftKind::Evening),
        ("E5", Day::Thursday, ShiftKind::Morning),
        ("E6", Day::Friday, ShiftKind::Afternoon),
        ("E7", Day::Saturday, ShiftKind::Evening),
        ("E8", Day::Sunday, ShiftKind::Morning),
        ("E9", Day::Sunday, ShiftKind::Evening),
    ];
    for (name, day, shift) in wishes {
        engine.add_preference(name, day, shift);
    }

    let report = engine.generate().unwrap();

    for (name, day, shift) in wishes {
        assert_eq!(report.slot(day, shift).unwrap().employees[0], name);
    }
    assert_load_matches_slots(&report);
}

#[test]
fn employee_at_weekly_cap_cannot_take_more() {
    let mut engine = engine_with(9);
    for day in [Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday, Day::Friday] {
        engine.assign("E1", day, ShiftKind::Morning);
    }

    assert_eq!(engine.load_of("E1"), 5);
    assert!(!engine.can_assign("E1", Day::Saturday, ShiftKind::Morning));
    assert!(engine.can_assign("E2", Day::Saturday, ShiftKind::Morning));
}

#[test]
fn shortfall_names_the_slot_when_only_capped_employees_remain() {
    let rules = SchedulingRules { max_shifts_per_week: 4, ..SchedulingRules::default() };
    let mut engine = SchedulingEngine::new(rules);
    for i in 1..=9 {
        engine.register(&format!("E{i}"));
    }

    let err = engine.generate().unwrap_err();

    let (day, shift, partial) = match err {
        ScheduleError::StaffingShortfall { day, shift, partial } => (day, shift, partial),
        other => panic!("expected a staffing shortfall, got {other:?}"),
    };
    assert_eq!((day, shift), (Day::Sunday, ShiftKind::Morning));
    assert!(partial.workload.iter().all(|l| l.shifts == 4 && l.at_max));
    assert!(partial.slot(Day::Sunday, ShiftKind::Morning).unwrap().employees.is_empty());
    // partial roster is kept on the engine as well
    assert_eq!(engine.snapshot(), *partial);
}

#[test]
fn repeated_generation_is_deterministic() {
    let mut engine = engine_with(11);
    engine.add_preference("E3", Day::Friday, ShiftKind::Evening);
    engine.add_preference("E7", Day::Friday, ShiftKind::Evening);
    engine.add_preference("E7", Day::Monday, ShiftKind::Afternoon);

    let first = engine.generate().unwrap();
    let second = engine.generate().unwrap();

    assert_eq!(first, second);
}

#[test]
fn larger_rosters_respect_every_invariant() {
    let mut engine = engine_with(14);
    for (i, (day, shift)) in all_slots().enumerate().take(14) {
        engine.add_preference(&format!("E{}", i + 1), day, shift);
    }

    let report = engine.generate().unwrap();

    assert!(report.slots.iter().all(|s| s.employees.len() >= 2));
    assert_daily_exclusive(&report);
    assert_load_matches_slots(&report);
}

#[test]
fn removing_an_employee_can_drop_below_the_gate() {
    let mut engine = engine_with(9);
    engine.generate().unwrap();

    assert!(engine.remove_employee("E9"));

    assert!(matches!(
        engine.generate(),
        Err(ScheduleError::InsufficientStaff { current: 8, .. })
    ));
}

#[test]
fn seeding_follows_preference_order_not_registration_order() {
    let mut engine = engine_with(9);
    engine.add_preference("E9", Day::Sunday, ShiftKind::Evening);
    engine.add_preference("E1", Day::Sunday, ShiftKind::Evening);

    let report = engine.generate().unwrap();

    assert_eq!(report.slot(Day::Sunday, ShiftKind::Evening).unwrap().employees[0], "E9");
    assert_ne!(report.slot(Day::Monday, ShiftKind::Morning).unwrap().employees[0], "E9");
}
