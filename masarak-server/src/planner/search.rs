//! Itinerary search over the network graph.
//!
//! Direct search scans every route serving an origin for a destination
//! later in its traversal order. Transfer search chains legs through the
//! derived adjacency, guarded by a per-path visited-route set and the
//! configured transfer bound, and terminates early once the transfer
//! group's quota is met. Pure graph traversal: no I/O, no randomness, no
//! clock reads.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::domain::{
    DirectItinerary, Itinerary, ItineraryKey, Route, RouteId, StationId, TransferItinerary,
};
use crate::network::Network;

use super::config::SearchConfig;

/// Deduplicating result collector.
///
/// Two itineraries with the same key are the same trip; the one with the
/// better (shorter, then cheaper) cost is kept. Direct results are
/// collected exhaustively (the route list at an origin bounds them) and
/// capped later by ranking; the transfer group rejects new keys once its
/// quota is filled, which is what lets the chain search stop early.
struct Collector {
    direct: BTreeMap<ItineraryKey, Itinerary>,
    transfer: BTreeMap<ItineraryKey, Itinerary>,
    max_transfer: usize,
}

impl Collector {
    fn new(config: &SearchConfig) -> Self {
        Self {
            direct: BTreeMap::new(),
            transfer: BTreeMap::new(),
            max_transfer: config.max_transfer,
        }
    }

    fn offer(&mut self, itinerary: Itinerary) {
        let key = itinerary.key();
        let (group, quota) = if itinerary.is_direct() {
            (&mut self.direct, usize::MAX)
        } else {
            (&mut self.transfer, self.max_transfer)
        };

        if let Some(existing) = group.get_mut(&key) {
            let better = (itinerary.duration_mins(), itinerary.fare())
                < (existing.duration_mins(), existing.fare());
            if better {
                *existing = itinerary;
            }
        } else if group.len() < quota {
            group.insert(key, itinerary);
        }
    }

    fn transfer_quota_met(&self) -> bool {
        self.transfer.len() >= self.max_transfer
    }

    fn into_itineraries(self) -> Vec<Itinerary> {
        self.direct
            .into_values()
            .chain(self.transfer.into_values())
            .collect()
    }
}

/// Find direct and bounded-transfer itineraries between two station sets.
///
/// Origins and destinations are the resolver's candidates for the two
/// query names; every origin × destination pair is explored. Results are
/// deduplicated but not yet scored; see [`rank`](super::rank).
pub fn find_itineraries(
    network: &Network,
    origins: &[StationId],
    dests: &[StationId],
    config: &SearchConfig,
) -> Vec<Itinerary> {
    // Sorted, deduplicated endpoints make the traversal order (and with it
    // the early-termination cut) reproducible. The candidate sets may
    // overlap when both query names resolve fuzzily to nearby stations;
    // only the per-pair origin == destination case is degenerate.
    let origins: BTreeSet<&StationId> = origins.iter().collect();
    let dests: BTreeSet<&StationId> = dests.iter().collect();

    if origins.is_empty() || dests.is_empty() {
        return Vec::new();
    }

    let mut collector = Collector::new(config);

    for origin in origins.iter().copied() {
        direct_from(network, origin, &dests, config, &mut collector);
    }

    if config.max_transfers >= 1 {
        for origin in origins.iter().copied() {
            if collector.transfer_quota_met() {
                break;
            }
            let mut search = TransferSearch {
                network,
                config,
                origin,
                dests: &dests,
                collector: &mut collector,
            };
            search.from_origin();
        }
    }

    let found = collector.into_itineraries();
    debug!(
        origins = origins.len(),
        dests = dests.len(),
        found = found.len(),
        "itinerary search complete"
    );
    found
}

/// Emit a direct itinerary for every route that carries `origin` to one of
/// the destinations in its traversal direction.
fn direct_from(
    network: &Network,
    origin: &StationId,
    dests: &BTreeSet<&StationId>,
    config: &SearchConfig,
    collector: &mut Collector,
) {
    for route_id in network.routes_at(origin) {
        let Some(route) = network.route(route_id) else {
            continue;
        };
        let Some(from) = network.position(route_id, origin) else {
            continue;
        };

        for dest in dests.iter().copied() {
            if dest == origin {
                continue;
            }
            let Some(to) = network.position(route_id, dest) else {
                continue;
            };
            if !route.reaches(from, to) {
                continue;
            }

            let hops = Route::hops(from, to) as i64;
            collector.offer(Itinerary::Direct(DirectItinerary {
                route: route_id.clone(),
                stations: route.slice(from, to),
                duration_mins: hops * config.hop_mins,
                fare: config.fare_policy.trip_fare(1),
                rating: None,
                score: 0.0,
            }));
        }
    }
}

/// Depth-first transfer-chain exploration from a single origin.
struct TransferSearch<'a> {
    network: &'a Network,
    config: &'a SearchConfig,
    origin: &'a StationId,
    dests: &'a BTreeSet<&'a StationId>,
    collector: &'a mut Collector,
}

impl TransferSearch<'_> {
    fn from_origin(&mut self) {
        let origin = self.origin;
        let first_routes: Vec<RouteId> = self.network.routes_at(origin).cloned().collect();
        for route_id in first_routes {
            if self.collector.transfer_quota_met() {
                return;
            }
            let mut routes = vec![route_id];
            let mut transfers = Vec::new();
            self.explore(&mut routes, &mut transfers, 0, origin);
        }
    }

    /// Extend the chain whose last leg boards `board` on `routes.last()`.
    ///
    /// `hops_so_far` covers all completed legs; the current leg's hops are
    /// added per reachable transfer point.
    fn explore(
        &mut self,
        routes: &mut Vec<RouteId>,
        transfers: &mut Vec<StationId>,
        hops_so_far: i64,
        board: &StationId,
    ) {
        let Some(riding) = routes.last().cloned() else {
            return;
        };
        let Some(route) = self.network.route(&riding) else {
            return;
        };
        let Some(board_pos) = self.network.position(&riding, board) else {
            return;
        };

        for stop_pos in reachable_positions(route, board_pos) {
            if self.collector.transfer_quota_met() {
                return;
            }

            let stop = &route.stations()[stop_pos];
            // Changing routes at a destination is never useful: the direct
            // or shorter chain already covers it.
            if self.dests.contains(stop) {
                continue;
            }

            let leg_hops = Route::hops(board_pos, stop_pos) as i64;
            let candidates: Vec<RouteId> = self
                .network
                .transfer_candidates(stop, &riding)
                .filter(|r| !routes.contains(*r))
                .cloned()
                .collect();

            for next_route_id in candidates {
                if self.collector.transfer_quota_met() {
                    return;
                }

                let Some(next_route) = self.network.route(&next_route_id) else {
                    continue;
                };
                let Some(next_board_pos) = self.network.position(&next_route_id, stop) else {
                    continue;
                };

                // Does the next route complete the trip?
                for dest in self.dests.iter().copied() {
                    if dest == self.origin {
                        continue;
                    }
                    let Some(dest_pos) = self.network.position(&next_route_id, dest) else {
                        continue;
                    };
                    if !next_route.reaches(next_board_pos, dest_pos) {
                        continue;
                    }

                    let total_hops = hops_so_far
                        + leg_hops
                        + Route::hops(next_board_pos, dest_pos) as i64;
                    let mut chain = routes.clone();
                    chain.push(next_route_id.clone());
                    let mut chain_transfers = transfers.clone();
                    chain_transfers.push(stop.clone());

                    let transfer_count = chain_transfers.len() as i64;
                    let boardings = chain.len() as u32;
                    let duration_mins = total_hops * self.config.hop_mins
                        + transfer_count * self.config.transfer_penalty_mins;
                    let fare = self.config.fare_policy.trip_fare(boardings);

                    match TransferItinerary::new(chain, chain_transfers, duration_mins, fare) {
                        Ok(itinerary) => self.collector.offer(Itinerary::Transfer(itinerary)),
                        Err(e) => trace!(error = %e, "skipping malformed transfer chain"),
                    }
                }

                // Chain deeper while the transfer bound allows another
                // change after this one.
                if routes.len() < self.config.max_transfers {
                    routes.push(next_route_id);
                    transfers.push(stop.clone());
                    self.explore(routes, transfers, hops_so_far + leg_hops, stop);
                    transfers.pop();
                    routes.pop();
                }
            }
        }
    }
}

/// Positions reachable from `board_pos`, in deterministic order: forward
/// along the route, then backward for bidirectional routes.
fn reachable_positions(route: &Route, board_pos: usize) -> Vec<usize> {
    let len = route.stations().len();
    let mut positions: Vec<usize> = (board_pos + 1..len).collect();
    if route.direction == crate::domain::Direction::Bidirectional {
        positions.extend((0..board_pos).rev());
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Direction, Station};
    use crate::planner::FarePolicy;

    fn sid(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn rid(s: &str) -> RouteId {
        RouteId::parse(s).unwrap()
    }

    fn station(name: &str) -> Station {
        Station::new(sid(name), name, Coordinate::new(33.5, 36.3).unwrap())
    }

    fn route(name: &str, direction: Direction, stops: &[&str]) -> Route {
        Route::new(
            rid(name),
            name,
            None,
            direction,
            stops.iter().map(|s| sid(s)).collect(),
        )
        .unwrap()
    }

    /// Two-route fixture: the Mazzeh line and the Jadat Salamiyah line
    /// meeting at Governorate Square.
    fn example_network() -> Network {
        let stations = [
            "المزة",
            "الجبل",
            "ساحة المحافظة",
            "ساحة الأمويين",
            "وسط البلد",
            "جادات سلمية",
            "شارع الثورة",
            "البحصة",
        ]
        .iter()
        .map(|s| station(s))
        .collect();

        let routes = vec![
            route(
                "خط المزة جبل",
                Direction::OneWay,
                &[
                    "المزة",
                    "الجبل",
                    "ساحة المحافظة",
                    "ساحة الأمويين",
                    "وسط البلد",
                ],
            ),
            route(
                "خط جادات سلمية",
                Direction::OneWay,
                &["جادات سلمية", "شارع الثورة", "البحصة", "ساحة المحافظة"],
            ),
        ];

        Network::build(stations, routes).unwrap()
    }

    fn search(
        network: &Network,
        from: &str,
        to: &str,
        config: &SearchConfig,
    ) -> Vec<Itinerary> {
        find_itineraries(network, &[sid(from)], &[sid(to)], config)
    }

    #[test]
    fn direct_on_shared_route() {
        let network = example_network();
        let config = SearchConfig::default();

        let found = search(&network, "المزة", "وسط البلد", &config);
        let directs: Vec<_> = found.iter().filter(|i| i.is_direct()).collect();
        assert_eq!(directs.len(), 1);

        let Itinerary::Direct(d) = directs[0] else {
            unreachable!()
        };
        assert_eq!(d.route, rid("خط المزة جبل"));
        assert_eq!(d.stations.first(), Some(&sid("المزة")));
        assert_eq!(d.stations.last(), Some(&sid("وسط البلد")));
        assert_eq!(d.stations.len(), 5);
        // 4 hops at 5 minutes each.
        assert_eq!(d.duration_mins, 20);
        assert_eq!(d.fare, 2500);
    }

    #[test]
    fn one_transfer_via_shared_station() {
        let network = example_network();
        let config = SearchConfig::default();

        let found = search(&network, "جادات سلمية", "وسط البلد", &config);
        assert!(found.iter().all(|i| !i.is_direct()));
        assert_eq!(found.len(), 1);

        let Itinerary::Transfer(t) = &found[0] else {
            unreachable!()
        };
        assert_eq!(
            t.routes(),
            &[rid("خط جادات سلمية"), rid("خط المزة جبل")]
        );
        assert_eq!(t.transfer_stations(), &[sid("ساحة المحافظة")]);
        // 3 hops to the square + 2 hops onward, plus one transfer penalty.
        assert_eq!(t.duration_mins, 5 * 5 + 10);
        assert_eq!(t.fare, 5500);
    }

    #[test]
    fn transfer_station_served_by_both_routes() {
        let network = example_network();
        let config = SearchConfig::default();

        for itinerary in search(&network, "جادات سلمية", "وسط البلد", &config) {
            let Itinerary::Transfer(t) = itinerary else {
                continue;
            };
            assert_ne!(t.routes()[0], t.routes()[1]);
            for (i, stop) in t.transfer_stations().iter().enumerate() {
                let serving: Vec<_> = network.routes_at(stop).collect();
                assert!(serving.contains(&&t.routes()[i]));
                assert!(serving.contains(&&t.routes()[i + 1]));
            }
        }
    }

    #[test]
    fn zero_transfers_disables_transfer_search() {
        let network = example_network();
        let config = SearchConfig {
            max_transfers: 0,
            ..SearchConfig::default()
        };

        let found = search(&network, "جادات سلمية", "وسط البلد", &config);
        assert!(found.is_empty());
    }

    #[test]
    fn one_way_route_not_traversed_backwards() {
        let network = example_network();
        let config = SearchConfig::default();

        // Both routes are one-way in the example; the reverse trip has no
        // direct itinerary.
        let found = search(&network, "وسط البلد", "المزة", &config);
        assert!(found.iter().all(|i| !i.is_direct()));
    }

    #[test]
    fn bidirectional_route_traversed_backwards() {
        let stations = ["a", "b", "c"].iter().map(|s| station(s)).collect();
        let routes = vec![route("r", Direction::Bidirectional, &["a", "b", "c"])];
        let network = Network::build(stations, routes).unwrap();
        let config = SearchConfig::default();

        let found = search(&network, "c", "a", &config);
        assert_eq!(found.len(), 1);
        let Itinerary::Direct(d) = &found[0] else {
            unreachable!()
        };
        assert_eq!(d.stations, vec![sid("c"), sid("b"), sid("a")]);
    }

    #[test]
    fn same_route_never_reused_in_a_chain() {
        let network = example_network();
        let config = SearchConfig {
            max_transfers: 3,
            ..SearchConfig::default()
        };

        for itinerary in search(&network, "جادات سلمية", "وسط البلد", &config) {
            if let Itinerary::Transfer(t) = itinerary {
                let mut seen = BTreeSet::new();
                for r in t.routes() {
                    assert!(seen.insert(r.clone()), "route {r} reused");
                }
            }
        }
    }

    #[test]
    fn two_transfer_chain_found_when_allowed() {
        // a --r1-- x --r2-- y --r3-- b requires two transfers.
        let stations = ["a", "x", "y", "b", "p", "q"]
            .iter()
            .map(|s| station(s))
            .collect();
        let routes = vec![
            route("r1", Direction::OneWay, &["a", "x"]),
            route("r2", Direction::OneWay, &["x", "p", "y"]),
            route("r3", Direction::OneWay, &["y", "q", "b"]),
        ];
        let network = Network::build(stations, routes).unwrap();

        let one = SearchConfig::default();
        assert!(search(&network, "a", "b", &one).is_empty());

        let two = SearchConfig {
            max_transfers: 2,
            ..SearchConfig::default()
        };
        let found = search(&network, "a", "b", &two);
        assert_eq!(found.len(), 1);
        let Itinerary::Transfer(t) = &found[0] else {
            unreachable!()
        };
        assert_eq!(t.routes(), &[rid("r1"), rid("r2"), rid("r3")]);
        assert_eq!(t.transfer_stations(), &[sid("x"), sid("y")]);
        assert_eq!(t.fare, 2500 * 3 + 500 * 2);
    }

    #[test]
    fn duplicate_pairs_deduplicated() {
        let network = example_network();
        let config = SearchConfig::default();

        // Two origin candidates on the same route collapse to one
        // suggestion per route sequence, keeping the shorter ride.
        let found = find_itineraries(
            &network,
            &[sid("المزة"), sid("الجبل")],
            &[sid("وسط البلد")],
            &config,
        );
        let directs: Vec<_> = found.iter().filter(|i| i.is_direct()).collect();
        assert_eq!(directs.len(), 1);
        assert_eq!(directs[0].duration_mins(), 15); // from الجبل, 3 hops
    }

    #[test]
    fn overlapping_candidate_sets_keep_valid_pairs() {
        let network = example_network();
        let config = SearchConfig::default();

        // الجبل appears on both sides, as fuzzy resolution can produce;
        // the المزة → الجبل ride must survive while the degenerate
        // الجبل → الجبل pair yields nothing.
        let found = find_itineraries(
            &network,
            &[sid("المزة"), sid("الجبل")],
            &[sid("الجبل"), sid("وسط البلد")],
            &config,
        );
        let directs: Vec<_> = found.iter().filter(|i| i.is_direct()).collect();
        assert_eq!(directs.len(), 1);

        let Itinerary::Direct(d) = directs[0] else {
            unreachable!()
        };
        assert_eq!(d.stations.last(), Some(&sid("الجبل")));
        assert_eq!(d.duration_mins, 5);
    }

    #[test]
    fn direct_search_outlasts_the_result_cap() {
        // Three parallel routes; the fastest sorts last in traversal
        // order, so a quota applied during collection would drop it.
        let stations = ["a", "m1", "m2", "n1", "n2", "b"]
            .iter()
            .map(|s| station(s))
            .collect();
        let routes = vec![
            route("r1", Direction::OneWay, &["a", "m1", "m2", "b"]),
            route("r2", Direction::OneWay, &["a", "n1", "n2", "b"]),
            route("r9", Direction::OneWay, &["a", "b"]),
        ];
        let network = Network::build(stations, routes).unwrap();

        let config = SearchConfig {
            max_direct: 2,
            ..SearchConfig::default()
        };
        let found = search(&network, "a", "b", &config);
        let directs: Vec<_> = found.iter().filter(|i| i.is_direct()).collect();
        // Capping is ranking's job; the search reports all three so the
        // 5-minute ride can win.
        assert_eq!(directs.len(), 3);
        assert!(directs.iter().any(|i| i.duration_mins() == 5));
    }

    #[test]
    fn transfer_quota_terminates_early() {
        // Star topology: many feeder routes into a hub, all reaching the
        // destination via the trunk.
        let mut stations: Vec<Station> = vec![station("hub"), station("dest")];
        let mut routes = vec![route("trunk", Direction::OneWay, &["hub", "dest"])];
        for i in 0..20 {
            let leaf = format!("leaf{i:02}");
            stations.push(station(&leaf));
            routes.push(route(
                &format!("feeder{i:02}"),
                Direction::OneWay,
                &[&leaf, "hub"],
            ));
        }
        let network = Network::build(stations, routes).unwrap();

        let origins: Vec<StationId> = (0..20).map(|i| sid(&format!("leaf{i:02}"))).collect();
        let config = SearchConfig {
            max_transfer: 3,
            ..SearchConfig::default()
        };
        let found = find_itineraries(&network, &origins, &[sid("dest")], &config);
        let transfers = found.iter().filter(|i| !i.is_direct()).count();
        assert_eq!(transfers, 3);
    }

    #[test]
    fn search_is_deterministic() {
        let network = example_network();
        let config = SearchConfig::default();

        let a = search(&network, "جادات سلمية", "وسط البلد", &config);
        let b = search(&network, "جادات سلمية", "وسط البلد", &config);
        assert_eq!(a, b);
    }

    #[test]
    fn origin_equal_to_destination_yields_nothing() {
        let network = example_network();
        let config = SearchConfig::default();
        assert!(search(&network, "المزة", "المزة", &config).is_empty());
    }

    #[test]
    fn free_transfer_policy_changes_fare() {
        let network = example_network();
        let config = SearchConfig {
            fare_policy: FarePolicy::FreeTransfers { fare: 3000 },
            ..SearchConfig::default()
        };

        let found = search(&network, "جادات سلمية", "وسط البلد", &config);
        assert_eq!(found[0].fare(), 3000);
    }
}
