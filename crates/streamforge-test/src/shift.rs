//! Shift fixtures.

/// A shift worked by one employee over `[start, end)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shift {
    pub id: usize,
    pub employee: Option<usize>,
    pub start: i64,
    pub end: i64,
}

impl Shift {
    pub fn new(id: usize, employee: Option<usize>, start: i64, end: i64) -> Self {
        Self {
            id,
            employee,
            start,
            end,
        }
    }

    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Four shifts: employee 1 has two overlapping shifts, employee 2 one,
/// and one shift is unassigned.
pub fn shifts() -> Vec<Shift> {
    vec![
        Shift::new(0, Some(1), 0, 8),
        Shift::new(1, Some(1), 6, 14),
        Shift::new(2, Some(2), 8, 16),
        Shift::new(3, None, 16, 24),
    ]
}
