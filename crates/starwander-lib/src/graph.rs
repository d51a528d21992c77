use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::star::{Constellation, Star};

/// Location of a star inside the constellation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    constellation: usize,
    member: usize,
}

/// In-memory star graph: constellations, a flat id index, and blocked edges.
///
/// Links are stored on their origin star and are not mirrored. Adjacency from
/// `a` may list `b` while adjacency from `b` does not list `a`; blocking, on the
/// other hand, always applies to the unordered pair.
#[derive(Debug, Clone, Default)]
pub struct StarGraph {
    constellations: Vec<Constellation>,
    index: HashMap<String, Slot>,
    blocked_edges: HashSet<(String, String)>,
    galaxies: BTreeSet<String>,
}

impl StarGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constellation and register its stars.
    ///
    /// Star ids that collide with an already registered id are renamed in
    /// place by appending `_1`, `_2`, ... until unique.
    pub fn add_cluster(&mut self, mut constellation: Constellation) {
        let constellation_index = self.constellations.len();

        for (member, star) in constellation.stars.iter_mut().enumerate() {
            if self.index.contains_key(&star.id) {
                let original = star.id.clone();
                let mut counter = 1usize;
                let mut candidate = format!("{original}_{counter}");
                while self.index.contains_key(&candidate) {
                    counter += 1;
                    candidate = format!("{original}_{counter}");
                }
                debug!(original = %original, renamed = %candidate, "resolved star id collision");
                star.id = candidate;
            }

            self.index.insert(
                star.id.clone(),
                Slot {
                    constellation: constellation_index,
                    member,
                },
            );
            self.galaxies.insert(star.galaxy.clone());
        }

        debug!(
            name = %constellation.name,
            stars = constellation.stars.len(),
            "registered constellation"
        );
        self.constellations.push(constellation);
    }

    /// Lookup a star by identifier.
    pub fn get_by_id(&self, id: &str) -> Option<&Star> {
        self.index
            .get(id)
            .map(|slot| &self.constellations[slot.constellation].stars[slot.member])
    }

    /// Whether a star with the given id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All stars in insertion order.
    pub fn get_all_stars(&self) -> Vec<&Star> {
        self.stars().collect()
    }

    pub fn get_stars_by_galaxy(&self, galaxy: &str) -> Vec<&Star> {
        self.stars().filter(|star| star.galaxy == galaxy).collect()
    }

    /// Hypergiant stars, optionally restricted to one galaxy.
    pub fn get_hypergiant_stars(&self, galaxy: Option<&str>) -> Vec<&Star> {
        self.stars()
            .filter(|star| star.hypergiant)
            .filter(|star| galaxy.is_none_or(|name| star.galaxy == name))
            .collect()
    }

    /// First constellation containing the star.
    pub fn get_constellation_for(&self, star_id: &str) -> Option<&Constellation> {
        self.constellations
            .iter()
            .find(|constellation| constellation.stars.iter().any(|star| star.id == star_id))
    }

    /// Stars whose coordinates fall inside the tolerance box around `(x, y)`.
    pub fn get_stars_at(&self, x: f64, y: f64, tolerance: f64) -> Vec<&Star> {
        self.stars()
            .filter(|star| {
                (star.coordinates.x - x).abs() <= tolerance
                    && (star.coordinates.y - y).abs() <= tolerance
            })
            .collect()
    }

    pub fn block_edge(&mut self, a: &str, b: &str) {
        self.blocked_edges.insert(canonical_pair(a, b));
    }

    pub fn unblock_edge(&mut self, a: &str, b: &str) {
        self.blocked_edges.remove(&canonical_pair(a, b));
    }

    pub fn is_blocked(&self, a: &str, b: &str) -> bool {
        self.blocked_edges.contains(&canonical_pair(a, b))
    }

    /// Blocked pairs, sorted for stable output.
    pub fn blocked_edges(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<_> = self.blocked_edges.iter().cloned().collect();
        pairs.sort();
        pairs
    }

    /// Unblocked outgoing links of a star as `(neighbor_id, distance)`.
    ///
    /// Unknown ids yield an empty list.
    pub fn get_adjacent(&self, id: &str) -> Vec<(String, f64)> {
        let Some(star) = self.get_by_id(id) else {
            return Vec::new();
        };

        star.linked_to
            .iter()
            .filter(|link| !self.is_blocked(id, &link.star_id))
            .map(|link| (link.star_id.clone(), link.distance))
            .collect()
    }

    /// Unweighted breadth-first traversal.
    ///
    /// With `end`, returns the first path found (fewest hops), or an empty list
    /// when `end` cannot be reached. Without `end`, returns the visitation order.
    pub fn find_path_bfs(&self, start: &str, end: Option<&str>) -> Vec<String> {
        if !self.contains(start) {
            return Vec::new();
        }

        let mut visited: HashSet<String> = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();

        visited.insert(start.to_string());
        queue.push_back(vec![start.to_string()]);

        while let Some(path) = queue.pop_front() {
            let Some(current) = path.last().cloned() else {
                continue;
            };
            order.push(current.clone());

            if end == Some(current.as_str()) {
                return path;
            }

            for (neighbor, _) in self.get_adjacent(&current) {
                if visited.insert(neighbor.clone()) {
                    let mut next = path.clone();
                    next.push(neighbor);
                    queue.push_back(next);
                }
            }
        }

        if end.is_some() {
            Vec::new()
        } else {
            order
        }
    }

    /// Replace the research effect of a star. Returns `false` for unknown ids.
    pub fn set_research_effect(&mut self, id: &str, effect: f64) -> bool {
        let Some(slot) = self.index.get(id).copied() else {
            return false;
        };
        self.constellations[slot.constellation].stars[slot.member].research_effect = effect;
        true
    }

    /// Galaxy labels seen so far, sorted.
    pub fn galaxies(&self) -> impl Iterator<Item = &str> {
        self.galaxies.iter().map(String::as_str)
    }

    pub fn constellations(&self) -> &[Constellation] {
        &self.constellations
    }

    /// Iterate stars in insertion order.
    pub fn stars(&self) -> impl Iterator<Item = &Star> {
        self.constellations
            .iter()
            .flat_map(|constellation| constellation.stars.iter())
    }

    /// Number of registered stars.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Star ids closest to `id` by normalized Levenshtein similarity.
    pub fn fuzzy_star_matches(&self, id: &str, limit: usize) -> Vec<String> {
        let needle = id.to_lowercase();
        let mut scored: Vec<(f64, &Star)> = self
            .stars()
            .map(|star| {
                let by_id = strsim::normalized_levenshtein(&needle, &star.id.to_lowercase());
                let by_label = strsim::normalized_levenshtein(&needle, &star.label.to_lowercase());
                (by_id.max(by_label), star)
            })
            .filter(|(score, _)| *score >= 0.5)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.id.cmp(&b.1.id)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, star)| star.id.clone())
            .collect()
    }
}

fn canonical_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
