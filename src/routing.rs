//! Shortest travel-time routes between cities.
//!
//! A [`RouteGraph`] holds one node per atlas city and an undirected edge for
//! every pair of cities a vehicle can travel between directly, weighted by
//! the travel time in hours. Routes are found with Dijkstra's algorithm.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use crate::atlas::{Atlas, City};
use crate::trip::Trip;
use crate::vehicle::Vehicle;

/// Weighted travel graph for a single vehicle.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    cities: Vec<Arc<City>>,
    adjacency: Vec<Vec<(usize, u32)>>,
    edge_count: usize,
}

impl RouteGraph {
    /// Build the graph of every direct trip the vehicle can make.
    pub fn build(atlas: &Atlas, vehicle: &Vehicle) -> Self {
        let cities = atlas.cities().to_vec();
        let n = cities.len();
        let mut adjacency = vec![Vec::new(); n];
        let mut edge_count = 0;

        for i in 0..n {
            for j in (i + 1)..n {
                if let Some(hours) = vehicle.travel_time(&cities[i], &cities[j]) {
                    adjacency[i].push((j, hours));
                    adjacency[j].push((i, hours));
                    edge_count += 1;
                }
            }
        }

        tracing::debug!(
            "Built route graph for {}: {} nodes, {} edges",
            vehicle,
            n,
            edge_count
        );

        Self {
            cities,
            adjacency,
            edge_count,
        }
    }

    pub fn node_count(&self) -> usize {
        self.cities.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Weight of the direct edge between two cities, if any.
    pub fn edge(&self, from: &City, to: &City) -> Option<u32> {
        let (a, b) = (self.index_of(from)?, self.index_of(to)?);
        self.adjacency[a]
            .iter()
            .find(|(n, _)| *n == b)
            .map(|(_, w)| *w)
    }

    fn index_of(&self, city: &City) -> Option<usize> {
        self.cities.iter().position(|c| c.id == city.id)
    }

    /// Fastest route from one city to another.
    ///
    /// Among routes of equal duration the one with fewer legs wins. Returns
    /// `None` if either city is not in the graph or no route exists.
    pub fn shortest_path(&self, from: &City, to: &City) -> Option<Trip> {
        let source = self.index_of(from)?;
        let target = self.index_of(to)?;

        let n = self.cities.len();
        let mut best: Vec<Option<(u64, usize)>> = vec![None; n];
        let mut previous: Vec<Option<usize>> = vec![None; n];
        let mut heap = BinaryHeap::new();

        best[source] = Some((0, 0));
        heap.push(Reverse((0u64, 0usize, source)));

        while let Some(Reverse((cost, hops, node))) = heap.pop() {
            if node == target {
                break;
            }
            if best[node].is_some_and(|b| (cost, hops) > b) {
                continue;
            }
            for &(next, weight) in &self.adjacency[node] {
                let candidate = (cost + u64::from(weight), hops + 1);
                if best[next].is_none_or(|b| candidate < b) {
                    best[next] = Some(candidate);
                    previous[next] = Some(node);
                    heap.push(Reverse((candidate.0, candidate.1, next)));
                }
            }
        }

        best[target]?;

        let mut path = vec![target];
        let mut current = target;
        while let Some(prev) = previous[current] {
            path.push(prev);
            current = prev;
        }
        path.reverse();

        Trip::from_cities(path.into_iter().map(|i| Arc::clone(&self.cities[i])).collect())
    }
}

/// Fastest route between two cities for a vehicle, or `None` if there is none.
pub fn find_shortest_path(
    atlas: &Atlas,
    vehicle: &Vehicle,
    from: &City,
    to: &City,
) -> Option<Trip> {
    let trip = RouteGraph::build(atlas, vehicle).shortest_path(from, to);
    match &trip {
        Some(t) => tracing::debug!("Route for {}: {}", vehicle, t),
        None => tracing::debug!("No route for {} from {} to {}", vehicle, from, to),
    }
    trip
}
