use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// Day of the scheduling week, in calendar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Position in the week, Monday = 0
    pub fn index(self) -> usize {
        self as usize
    }

    /// The following day, wrapping Sunday back to Monday
    pub fn next(self) -> Day {
        Day::ALL[(self.index() + 1) % Day::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = ();

    /// Accepts the day name in any case, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Day::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or(())
    }
}

/// Shift within a day, in fixed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftKind {
    Morning,
    Afternoon,
    Evening,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 3] = [ShiftKind::Morning, ShiftKind::Afternoon, ShiftKind::Evening];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ShiftKind::Morning => "Morning",
            ShiftKind::Afternoon => "Afternoon",
            ShiftKind::Evening => "Evening",
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShiftKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ShiftKind::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or(())
    }
}

/// Number of staffable (day, shift) slots in a week
pub const SLOTS_PER_WEEK: usize = Day::ALL.len() * ShiftKind::ALL.len();

/// Flat index of a slot, days outermost
pub fn slot_index(day: Day, shift: ShiftKind) -> usize {
    day.index() * ShiftKind::ALL.len() + shift.index()
}

/// Every (day, shift) pair in traversal order
pub fn all_slots() -> impl Iterator<Item = (Day, ShiftKind)> {
    Day::ALL
        .into_iter()
        .flat_map(|day| ShiftKind::ALL.into_iter().map(move |shift| (day, shift)))
}

/// One staffable shift instance and the employees assigned to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSlot {
    pub day: Day,
    pub shift: ShiftKind,
    pub employees: Vec<String>, // assignment order
}

impl ShiftSlot {
    pub fn new(day: Day, shift: ShiftKind) -> Self {
        Self { day, shift, employees: Vec::new() }
    }

    pub fn contains(&self, employee: &str) -> bool {
        self.employees.iter().any(|e| e == employee)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

/// Preferred shifts for one day, in the order they were recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPreference {
    pub day: Day,
    pub shifts: Vec<ShiftKind>,
}

/// All preferences recorded for one employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub employee: String,
    pub days: Vec<DayPreference>, // order the day was first recorded
}

impl Preference {
    pub fn new(employee: &str) -> Self {
        Self { employee: employee.to_string(), days: Vec::new() }
    }

    /// Appends `shift` under `day` unless it is already there
    /// Returns true if something was added
    pub fn add(&mut self, day: Day, shift: ShiftKind) -> bool {
        let entry = match self.days.iter().position(|d| d.day == day) {
            Some(idx) => &mut self.days[idx],
            None => {
                self.days.push(DayPreference { day, shifts: Vec::new() });
                let last = self.days.len() - 1;
                &mut self.days[last]
            }
        };
        if entry.shifts.contains(&shift) {
            return false;
        }
        entry.shifts.push(shift);
        true
    }

    pub fn shifts_for(&self, day: Day) -> &[ShiftKind] {
        self.days
            .iter()
            .find(|d| d.day == day)
            .map(|d| d.shifts.as_slice())
            .unwrap_or(&[])
    }

    /// Flattened (day, shift) choices in recorded order
    pub fn choices(&self) -> impl Iterator<Item = (Day, ShiftKind)> + '_ {
        self.days
            .iter()
            .flat_map(|d| d.shifts.iter().map(move |&s| (d.day, s)))
    }
}

/// Whether the current cycle has started placing employees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleState {
    Idle,
    Populated,
}
