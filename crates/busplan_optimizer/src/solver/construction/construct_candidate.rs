use crate::{
    problem::{bus_route::RouteIdx, fleet_problem::FleetProblem},
    solver::{
        candidate::{BusPlan, Candidate, RoutePlan},
        schedule_generator::generate_timetable,
    },
};

/// Peak route-hour demand one bus is expected to absorb.
pub const PASSENGERS_PER_BUS: usize = 30;

/// Demand-driven fleet size, growing at most one bus over the current fleet.
pub fn suggested_fleet_size(current_fleet_size: usize, peak_demand: usize) -> usize {
    (current_fleet_size + 1)
        .min(peak_demand / PASSENGERS_PER_BUS)
        .max(1)
}

/// Plan for `fleet_size` buses sharing the generated timetable of the route.
pub fn build_route_plan(
    problem: &FleetProblem,
    route_id: RouteIdx,
    fleet_size: usize,
) -> RoutePlan {
    let timetable = generate_timetable(problem.demand(), route_id);

    RoutePlan::new(
        (0..fleet_size)
            .map(|bus_index| BusPlan::new(format!("bus_{bus_index}"), timetable.clone()))
            .collect(),
    )
}

pub fn construct_candidate(problem: &FleetProblem) -> Candidate {
    Candidate::new(
        problem
            .route_ids()
            .map(|route_id| {
                let fleet_size = suggested_fleet_size(
                    problem.current_fleet().size(route_id),
                    problem.demand().peak_route_demand(route_id),
                );

                build_route_plan(problem, route_id, fleet_size)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use crate::{
        problem::{day_type::DayType, fleet::CurrentFleet},
        test_utils::{self, TestRoute},
    };

    use super::*;

    #[test]
    fn test_suggested_fleet_size() {
        assert_eq!(suggested_fleet_size(3, 0), 1);
        assert_eq!(suggested_fleet_size(3, 29), 1);
        assert_eq!(suggested_fleet_size(3, 65), 2);
        assert_eq!(suggested_fleet_size(1, 300), 2);
        assert_eq!(suggested_fleet_size(0, 300), 1);
    }

    #[test]
    fn test_construct_candidate() {
        let problem = test_utils::create_test_problem(
            vec![
                TestRoute::new("A", &["X", "Y", "Z"]),
                TestRoute::new("B", &["Q", "R"]),
            ],
            Some(CurrentFleet::from_sizes(vec![4, 2])),
            test_utils::create_trip_requests(8, 95, "X", "Z"),
        );

        let candidate = construct_candidate(&problem);

        assert_eq!(candidate.fleet_size(RouteIdx::new(0)), 3);
        assert_eq!(candidate.fleet_size(RouteIdx::new(1)), 1);

        let route = candidate.route(RouteIdx::new(0));
        assert_eq!(
            route.buses().iter().map(BusPlan::name).collect::<Vec<_>>(),
            vec!["bus_0", "bus_1", "bus_2"]
        );

        for bus in route.buses() {
            for day_type in DayType::ALL {
                assert!(!bus.timetable().departures(day_type).is_empty());
            }
        }

        assert!(!candidate.is_evaluated());
    }
}
