use jiff::civil::Time;

use super::day_type::DayType;

/// Departures of one bus, split by day type. Each list is kept sorted and
/// free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Timetable {
    departures: [Vec<Time>; 3],
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same departures on every day type.
    pub fn uniform(departures: Vec<Time>) -> Self {
        let mut timetable = Timetable::new();
        for day_type in DayType::ALL {
            timetable.set_departures(day_type, departures.clone());
        }
        timetable
    }

    pub fn set_departures(&mut self, day_type: DayType, mut departures: Vec<Time>) {
        departures.sort_unstable();
        departures.dedup();
        self.departures[day_type.index()] = departures;
    }

    pub fn with_departures(mut self, day_type: DayType, departures: Vec<Time>) -> Self {
        self.set_departures(day_type, departures);
        self
    }

    #[inline]
    pub fn departures(&self, day_type: DayType) -> &[Time] {
        &self.departures[day_type.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayType, &[Time])> {
        DayType::ALL
            .into_iter()
            .map(|day_type| (day_type, self.departures(day_type)))
    }

    pub fn all_departures(&self) -> impl Iterator<Item = Time> + '_ {
        self.departures.iter().flatten().copied()
    }

    /// Total number of departures across all day types.
    pub fn len(&self) -> usize {
        self.departures.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.departures.iter().all(Vec::is_empty)
    }
}
