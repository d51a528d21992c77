use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use tracing::{debug, warn};

use crate::graph::StarGraph;
use crate::star::Star;
use crate::traveler::Traveler;

/// Research time spent at each newly reached star, as a share of its eating time.
pub const RESEARCH_TIME_RATIO: f64 = 0.5;

/// Limits applied to the exhaustive search.
///
/// The exhaustive search is exponential in the worst case; a budget turns a
/// runaway search into a best-effort answer instead of an unbounded loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchBudget {
    /// Maximum number of frontier entries to expand. `None` means unlimited.
    pub max_expansions: Option<usize>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn expansions(limit: usize) -> Self {
        Self {
            max_expansions: Some(limit),
        }
    }

    fn exhausted(&self, expanded: usize) -> bool {
        self.max_expansions.is_some_and(|limit| expanded >= limit)
    }
}

struct Frontier {
    current: String,
    route: Vec<String>,
    traveler: Traveler,
}

/// Find the route that reaches the most distinct stars before the traveler dies.
///
/// Breadth-first branching: every frontier entry owns its own traveler copy.
/// A neighbor is enqueued only if the traveler survives both the trip and the
/// visit (with research for half the star's eating time). The longest route
/// seen across all dequeues wins; on ties the first one found is kept.
///
/// Only revisits within a single route are pruned, so the number of branches
/// grows exponentially with graph density. Use `budget` on anything beyond a
/// few dozen densely linked stars.
///
/// An unknown start yields `[start]`.
pub fn find_max_stars_route(
    graph: &StarGraph,
    start: &str,
    traveler: &Traveler,
    budget: SearchBudget,
) -> Vec<String> {
    if !graph.contains(start) {
        return vec![start.to_string()];
    }

    let mut best = vec![start.to_string()];
    let mut queue = VecDeque::new();
    queue.push_back(Frontier {
        current: start.to_string(),
        route: vec![start.to_string()],
        traveler: traveler.clone(),
    });

    let mut expanded = 0usize;
    while let Some(entry) = queue.pop_front() {
        if entry.route.len() > best.len() {
            best = entry.route.clone();
        }

        if budget.exhausted(expanded) {
            warn!(
                expanded,
                pending = queue.len(),
                best = best.len(),
                "max-stars search budget exhausted; returning best route so far"
            );
            return best;
        }
        expanded += 1;

        for (neighbor_id, distance) in graph.get_adjacent(&entry.current) {
            if entry.route.contains(&neighbor_id) {
                continue;
            }
            let Some(neighbor) = graph.get_by_id(&neighbor_id) else {
                continue;
            };

            let mut branch = entry.traveler.clone();
            if !branch.travel(distance, None) {
                continue;
            }
            if !branch.visit(neighbor, neighbor.time_to_eat * RESEARCH_TIME_RATIO, None) {
                continue;
            }

            let mut route = entry.route.clone();
            route.push(neighbor_id.clone());
            queue.push_back(Frontier {
                current: neighbor_id,
                route,
                traveler: branch,
            });
        }
    }

    debug!(expanded, stars = best.len(), "max-stars search finished");
    best
}

/// Walk greedily towards the most efficient unvisited neighbor.
///
/// A single traveler is simulated and the walk never backtracks, so it can
/// strand itself where an exhaustive search would not. The walk stops when no
/// unvisited neighbor is reachable, the traveler dies, or every star has been
/// visited.
///
/// An unknown start yields `[start]`.
pub fn find_optimal_route(graph: &StarGraph, start: &str, traveler: &Traveler) -> Vec<String> {
    let mut route = vec![start.to_string()];
    if !graph.contains(start) {
        return route;
    }

    let mut agent = traveler.clone();
    let mut visited: HashSet<String> = HashSet::from([start.to_string()]);
    let mut current = start.to_string();

    while !agent.is_dead() && visited.len() < graph.len() {
        let mut best: Option<(f64, f64, &Star)> = None;

        for (neighbor_id, distance) in graph.get_adjacent(&current) {
            if visited.contains(&neighbor_id) {
                continue;
            }
            let Some(neighbor) = graph.get_by_id(&neighbor_id) else {
                continue;
            };

            let score = efficiency(&agent, neighbor, distance);
            let better = match best {
                None => true,
                Some((best_score, best_distance, _)) => match score.total_cmp(&best_score) {
                    Ordering::Greater => true,
                    Ordering::Equal => distance < best_distance,
                    Ordering::Less => false,
                },
            };
            if better {
                best = Some((score, distance, neighbor));
            }
        }

        let Some((score, distance, next)) = best else {
            debug!(at = %current, "no unvisited neighbor left");
            break;
        };

        debug!(from = %current, to = %next.id, score, distance, "greedy step");
        if !agent.travel(distance, None) {
            break;
        }
        if !agent.visit(next, next.time_to_eat * RESEARCH_TIME_RATIO, None) {
            break;
        }

        visited.insert(next.id.clone());
        route.push(next.id.clone());
        current = next.id.clone();
    }

    route
}

/// Score a candidate hop for the greedy walk. Higher is better.
fn efficiency(traveler: &Traveler, star: &Star, distance: f64) -> f64 {
    let energy = traveler.energy();

    let proximity = 100.0 / (distance + 1.0);
    let emergency = if energy < 30.0 && star.research_effect > 0.0 {
        2.0
    } else {
        1.0
    };
    let research_value = 1.0 + star.research_effect * 0.1;
    let eating_speed = 5.0 / (star.time_to_eat + 1.0);
    let hypergiant = if star.hypergiant { 1.5 } else { 1.0 };

    let score = proximity * 0.4
        + emergency * 0.2
        + research_value * 0.2
        + eating_speed * 0.1
        + hypergiant * 0.1;

    if energy < 20.0 && distance > 100.0 {
        score * 0.5
    } else {
        score
    }
}

/// Shortest path by cumulative distance (Dijkstra).
///
/// Blocked edges are treated as absent. Resources are ignored: the path only
/// has to exist, not be survivable. Returns an empty list when either endpoint
/// is unknown or the goal is unreachable, and `[start]` when both are equal.
///
/// Links with a negative distance are skipped. Ingestion rejects them, but
/// graphs built by hand through [`Star::link`] are not validated.
pub fn find_route_to_destination(graph: &StarGraph, start: &str, goal: &str) -> Vec<String> {
    if !graph.contains(start) || !graph.contains(goal) {
        return Vec::new();
    }
    if start == goal {
        return vec![start.to_string()];
    }

    let mut distances: HashMap<String, f64> = HashMap::new();
    let mut parents: HashMap<String, String> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut sequence = 0u64;

    distances.insert(start.to_string(), 0.0);
    queue.push(QueueEntry::new(start.to_string(), 0.0, sequence));

    while let Some(entry) = queue.pop() {
        let current_distance = match distances.get(&entry.node) {
            Some(distance) if *distance < entry.cost.0 => continue,
            Some(distance) => *distance,
            None => continue,
        };

        if entry.node == goal {
            return reconstruct_path(&parents, start, goal);
        }

        for (next, edge_distance) in graph.get_adjacent(&entry.node) {
            if !graph.contains(&next) {
                continue;
            }
            if edge_distance < 0.0 || edge_distance.is_nan() {
                debug!(from = %entry.node, to = %next, edge_distance, "skipping negative link");
                continue;
            }

            let next_cost = current_distance + edge_distance;
            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next.clone(), next_cost);
                parents.insert(next.clone(), entry.node.clone());
                sequence += 1;
                queue.push(QueueEntry::new(next, next_cost, sequence));
            }
        }
    }

    Vec::new()
}

/// Sum of link distances along a route, following stored links.
///
/// Returns `None` if two consecutive stars are not linked.
pub fn route_distance(graph: &StarGraph, route: &[String]) -> Option<f64> {
    route
        .windows(2)
        .map(|pair| hop_distance(graph, &pair[0], &pair[1]))
        .sum()
}

/// Distance of the shortest unblocked stored link from `from` to `to`.
pub fn hop_distance(graph: &StarGraph, from: &str, to: &str) -> Option<f64> {
    graph
        .get_adjacent(from)
        .into_iter()
        .filter(|(id, _)| id == to)
        .map(|(_, distance)| distance)
        .min_by(|a, b| a.total_cmp(b))
}

fn reconstruct_path(parents: &HashMap<String, String>, start: &str, goal: &str) -> Vec<String> {
    let mut path = vec![goal.to_string()];
    let mut current = goal;
    while current != start {
        match parents.get(current) {
            Some(parent) => {
                path.push(parent.clone());
                current = parent.as_str();
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: String,
    cost: FloatOrd,
    sequence: u64,
}

impl QueueEntry {
    fn new(node: String, cost: f64, sequence: u64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            sequence,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then FIFO.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
