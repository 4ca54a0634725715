use jiff::{SignedDuration, civil::DateTime};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    desired_time: DateTime,
    origin: String,
    destination: String,
    created_at: DateTime,
}

impl TripRequest {
    pub fn new(
        desired_time: DateTime,
        origin: impl Into<String>,
        destination: impl Into<String>,
        created_at: DateTime,
    ) -> Self {
        TripRequest {
            desired_time,
            origin: origin.into().trim().to_owned(),
            destination: destination.into().trim().to_owned(),
            created_at,
        }
    }

    pub fn desired_time(&self) -> DateTime {
        self.desired_time
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn created_at(&self) -> DateTime {
        self.created_at
    }

    #[inline]
    pub fn desired_hour(&self) -> usize {
        self.desired_time.hour() as usize
    }
}

/// Trailing window of trip history, counted back from `now` on the request
/// creation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandWindow {
    pub now: DateTime,
    pub days: i64,
}

impl DemandWindow {
    pub fn trailing(now: DateTime) -> Self {
        DemandWindow {
            now,
            days: TripHistory::DEMAND_WINDOW_DAYS,
        }
    }

    pub fn historical(now: DateTime) -> Self {
        DemandWindow {
            now,
            days: TripHistory::HISTORICAL_WINDOW_DAYS,
        }
    }
}

/// Snapshot of recorded trip requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripHistory {
    requests: Vec<TripRequest>,
}

impl TripHistory {
    pub const DEMAND_WINDOW_DAYS: i64 = 30;
    pub const HISTORICAL_WINDOW_DAYS: i64 = 90;

    pub fn new(requests: Vec<TripRequest>) -> Self {
        TripHistory { requests }
    }

    pub fn requests(&self) -> &[TripRequest] {
        &self.requests
    }

    pub fn into_requests(self) -> Vec<TripRequest> {
        self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Requests created within the trailing `days` before `now`. A window
    /// reaching past the representable calendar keeps every request.
    pub fn within_window(&self, now: DateTime, days: i64) -> TripHistory {
        let threshold = days
            .checked_mul(SECONDS_PER_DAY)
            .map(SignedDuration::from_secs)
            .and_then(|span| now.checked_sub(span).ok());

        let Some(threshold) = threshold else {
            return self.clone();
        };

        TripHistory {
            requests: self
                .requests
                .iter()
                .filter(|request| request.created_at >= threshold)
                .cloned()
                .collect(),
        }
    }

    pub fn within(&self, window: DemandWindow) -> TripHistory {
        self.within_window(window.now, window.days)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn request_created_at(created_at: DateTime) -> TripRequest {
        TripRequest::new(
            date(2025, 6, 10).at(8, 0, 0, 0),
            " X ",
            "Z",
            created_at,
        )
    }

    #[test]
    fn test_trims_stop_names() {
        let request = request_created_at(date(2025, 6, 1).at(0, 0, 0, 0));

        assert_eq!(request.origin(), "X");
        assert_eq!(request.desired_hour(), 8);
    }

    #[test]
    fn test_within_window() {
        let history = TripHistory::new(vec![
            request_created_at(date(2025, 4, 1).at(12, 0, 0, 0)),
            request_created_at(date(2025, 5, 20).at(12, 0, 0, 0)),
            request_created_at(date(2025, 6, 9).at(12, 0, 0, 0)),
        ]);

        let now = date(2025, 6, 10).at(12, 0, 0, 0);

        assert_eq!(history.within_window(now, 30).len(), 2);
        assert_eq!(history.within_window(now, 90).len(), 3);
        assert_eq!(history.within_window(now, 0).len(), 0);
        assert_eq!(history.within(DemandWindow::trailing(now)).len(), 2);
        assert_eq!(history.within(DemandWindow::historical(now)).len(), 3);
    }

    #[test]
    fn test_huge_window_keeps_everything() {
        let history = TripHistory::new(vec![
            request_created_at(date(1990, 1, 1).at(0, 0, 0, 0)),
            request_created_at(date(2025, 6, 9).at(12, 0, 0, 0)),
        ]);

        let now = date(2025, 6, 10).at(12, 0, 0, 0);

        assert_eq!(history.within_window(now, i64::MAX).len(), 2);
        assert_eq!(history.within_window(now, 10_000_000).len(), 2);
    }
}
