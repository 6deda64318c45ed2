//! Exhaustive branch-and-prune route search over a visibility graph.
//!
//! The engine keeps a set of *cursors*, each one a partial route with its own
//! forbidden set. Every sweep advances each active cursor by exactly one node;
//! whenever the current node offers more than one unvisited neighbour the
//! cursor keeps the first and spawns a sibling for each of the others. A
//! cursor terminates as a hit when it steps onto the destination, or as a dead
//! end when it has nowhere left to go. Once no cursor is active the best hit
//! is chosen according to a [`HitSelection`] policy.
//!
//! Because every cursor advances in lockstep, hits are discovered in
//! non-decreasing hop order.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::graph::{NodeIndex, VisibilityGraph};

/// Read-only view of a graph that the search can traverse.
pub trait SearchSpace {
    /// Total number of addressable nodes.
    fn node_count(&self) -> usize;

    /// Neighbours of `node` in a stable order.
    fn neighbours(&self, node: NodeIndex) -> &[NodeIndex];

    /// Cost of the hop between two adjacent nodes, used as a tie-breaker.
    fn hop_distance(&self, from: NodeIndex, to: NodeIndex) -> f64;
}

impl SearchSpace for VisibilityGraph {
    fn node_count(&self) -> usize {
        self.len()
    }

    fn neighbours(&self, node: NodeIndex) -> &[NodeIndex] {
        VisibilityGraph::neighbours(self, node)
    }

    /// Both indices must be in range; `PathSearch::new` checks the endpoints
    /// and every other index comes from a neighbour list.
    fn hop_distance(&self, from: NodeIndex, to: NodeIndex) -> f64 {
        debug_assert!(
            from.get() < self.len() && to.get() < self.len(),
            "hop_distance called with an index outside the graph"
        );
        self.distance(from, to).unwrap_or_default()
    }
}

/// Policy used to pick the best hit once the search is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HitSelection {
    /// Fewest hops, then shortest cumulative length, then earliest hit.
    #[default]
    FewestHops,
    /// Replace the current best only when a hit has no more hops *and* a
    /// strictly shorter length. A later hit with fewer hops but a longer
    /// length is rejected.
    Legacy,
}

impl HitSelection {
    /// Index of the best route in `hits`, or `None` when `hits` is empty.
    pub fn select(self, hits: &[Route]) -> Option<usize> {
        match self {
            HitSelection::FewestHops => {
                let mut best: Option<usize> = None;
                for (index, hit) in hits.iter().enumerate() {
                    let better = match best {
                        None => true,
                        Some(current) => {
                            let current = &hits[current];
                            hit.hops < current.hops
                                || (hit.hops == current.hops && hit.length < current.length)
                        }
                    };
                    if better {
                        best = Some(index);
                    }
                }
                best
            }
            HitSelection::Legacy => {
                let mut best = None;
                let mut best_hops = usize::MAX;
                let mut best_length = f64::INFINITY;
                for (index, hit) in hits.iter().enumerate() {
                    if hit.hops <= best_hops && hit.length < best_length {
                        best = Some(index);
                        best_hops = hit.hops;
                        best_length = hit.length;
                    }
                }
                best
            }
        }
    }
}

impl fmt::Display for HitSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            HitSelection::FewestHops => "fewest_hops",
            HitSelection::Legacy => "legacy",
        };
        f.write_str(value)
    }
}

impl FromStr for HitSelection {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().replace('-', "_").as_str() {
            "fewest_hops" => Ok(HitSelection::FewestHops),
            "legacy" => Ok(HitSelection::Legacy),
            other => Err(format!("unknown hit selection policy: {other}")),
        }
    }
}

/// How a spawned sibling seeds its cumulative length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiblingLength {
    /// Copy the spawning cursor's length as it stands once that cursor has
    /// chosen its own next node. The sibling's first hop is never counted and
    /// the parent's is counted in its place, so a route length is a
    /// tie-break score rather than the distance along its nodes.
    #[default]
    Inherited,
    /// Length travelled so far plus the sibling's own first hop; every route
    /// length equals the sum of angular distances along its nodes.
    Measured,
}

/// A complete route from start to end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Visited nodes, start and end included.
    pub nodes: Vec<NodeIndex>,
    /// Number of links traversed.
    pub hops: usize,
    /// Cumulative angular length in degrees, accounted per [`SiblingLength`].
    pub length: f64,
}

impl Route {
    /// Nodes strictly between the two endpoints.
    pub fn relays(&self) -> &[NodeIndex] {
        match self.nodes.len() {
            0..=2 => &[],
            len => &self.nodes[1..len - 1],
        }
    }
}

/// Counters collected while the search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub sweeps: usize,
    pub cursors_spawned: usize,
    pub dead_ends: usize,
}

/// Everything the search produced: all hits and the selected best one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub hits: Vec<Route>,
    pub selection: HitSelection,
    pub stats: SearchStats,
    best: Option<usize>,
}

impl SearchOutcome {
    pub fn best(&self) -> Option<&Route> {
        self.best.and_then(|index| self.hits.get(index))
    }

    pub fn into_best(mut self) -> Option<Route> {
        self.best.map(|index| self.hits.swap_remove(index))
    }

    pub fn found(&self) -> bool {
        self.best.is_some()
    }

    /// Hop count of the best route, or `0` when nothing was found.
    pub fn best_hops(&self) -> usize {
        self.best().map_or(0, |route| route.hops)
    }
}

/// Find the best route with the default [`HitSelection`].
pub fn find_route<S: SearchSpace>(
    space: &S,
    start: NodeIndex,
    end: NodeIndex,
) -> Result<Option<Route>> {
    Ok(PathSearch::new(space, start, end)?.run().into_best())
}

/// Search engine bound to one start/end pair.
#[derive(Debug)]
pub struct PathSearch<'a, S: SearchSpace> {
    space: &'a S,
    start: NodeIndex,
    end: NodeIndex,
    selection: HitSelection,
    sibling_length: SiblingLength,
}

impl<'a, S: SearchSpace> PathSearch<'a, S> {
    /// Prepare a search; fails fast when either endpoint is not in `space`.
    pub fn new(space: &'a S, start: NodeIndex, end: NodeIndex) -> Result<Self> {
        for index in [start, end] {
            if index.get() >= space.node_count() {
                return Err(Error::NodeIndexOutOfRange {
                    index: index.get(),
                    len: space.node_count(),
                });
            }
        }
        Ok(Self {
            space,
            start,
            end,
            selection: HitSelection::default(),
            sibling_length: SiblingLength::default(),
        })
    }

    pub fn with_selection(mut self, selection: HitSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_sibling_length(mut self, sibling_length: SiblingLength) -> Self {
        self.sibling_length = sibling_length;
        self
    }

    /// Run the search to exhaustion.
    pub fn run(self) -> SearchOutcome {
        let mut stats = SearchStats::default();
        let mut hits = Vec::new();
        let mut active = vec![Cursor::initial(self.start, self.space.node_count())];

        while !active.is_empty() {
            stats.sweeps += 1;
            let sweep = std::mem::take(&mut active);
            let mut spawned = Vec::new();

            for mut cursor in sweep {
                match self.advance(&mut cursor, &mut spawned) {
                    Advance::Hit => {
                        trace!(hops = cursor.hops, length = cursor.length, "hit");
                        hits.push(cursor.into_route());
                    }
                    Advance::DeadEnd => {
                        trace!(hops = cursor.hops, "dead end");
                        stats.dead_ends += 1;
                    }
                    Advance::Continue => active.push(cursor),
                }
            }

            stats.cursors_spawned += spawned.len();
            active.extend(spawned);
        }

        let best = self.selection.select(&hits);
        debug!(
            hits = hits.len(),
            sweeps = stats.sweeps,
            cursors = stats.cursors_spawned + 1,
            best_hops = ?best.map(|index| hits[index].hops),
            "path search finished"
        );

        SearchOutcome {
            hits,
            selection: self.selection,
            stats,
            best,
        }
    }

    /// Step `cursor` onto its pending node and decide where it goes next.
    ///
    /// Every unvisited neighbour beyond the first is handed to a new sibling
    /// pushed onto `spawned`; the neighbour is forbidden for this cursor
    /// before the sibling copies its state. Siblings are only spawned after
    /// the first neighbour is chosen, so an inherited length already includes
    /// this cursor's hop to its own next node.
    fn advance(&self, cursor: &mut Cursor, spawned: &mut Vec<Cursor>) -> Advance {
        let Some(current) = cursor.next.take() else {
            return Advance::DeadEnd;
        };

        if !cursor.track.is_empty() {
            cursor.hops += 1;
        }
        cursor.track = cursor.track.push(current);
        cursor.forbidden.insert(current);

        if current == self.end {
            return Advance::Hit;
        }

        let travelled = cursor.length;
        for &neighbour in self.space.neighbours(current) {
            if cursor.forbidden.contains(neighbour) {
                continue;
            }
            if cursor.next.is_none() {
                cursor.next = Some(neighbour);
                cursor.length = travelled + self.space.hop_distance(current, neighbour);
            } else {
                let length = match self.sibling_length {
                    SiblingLength::Inherited => cursor.length,
                    SiblingLength::Measured => {
                        travelled + self.space.hop_distance(current, neighbour)
                    }
                };
                cursor.forbidden.insert(neighbour);
                spawned.push(cursor.branch(neighbour, length));
            }
        }

        if cursor.next.is_none() {
            Advance::DeadEnd
        } else {
            Advance::Continue
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Advance {
    Hit,
    DeadEnd,
    Continue,
}

/// One partial route under construction.
#[derive(Debug, Clone)]
struct Cursor {
    hops: usize,
    length: f64,
    next: Option<NodeIndex>,
    track: Track,
    forbidden: ForbiddenSet,
}

impl Cursor {
    fn initial(start: NodeIndex, node_count: usize) -> Self {
        Self {
            hops: 0,
            length: 0.0,
            next: Some(start),
            track: Track::default(),
            forbidden: ForbiddenSet::with_capacity(node_count),
        }
    }

    fn branch(&self, next: NodeIndex, length: f64) -> Self {
        Self {
            hops: self.hops,
            length,
            next: Some(next),
            track: self.track.clone(),
            forbidden: self.forbidden.clone(),
        }
    }

    fn into_route(self) -> Route {
        Route {
            nodes: self.track.to_vec(),
            hops: self.hops,
            length: self.length,
        }
    }
}

/// Persistent visited-node list; siblings share their common prefix.
#[derive(Debug, Clone, Default)]
struct Track {
    head: Option<Rc<TrackLink>>,
    len: usize,
}

#[derive(Debug)]
struct TrackLink {
    node: NodeIndex,
    parent: Option<Rc<TrackLink>>,
}

impl Track {
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn push(&self, node: NodeIndex) -> Self {
        Self {
            head: Some(Rc::new(TrackLink {
                node,
                parent: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    fn to_vec(&self) -> Vec<NodeIndex> {
        let mut nodes = Vec::with_capacity(self.len);
        let mut link = self.head.as_deref();
        while let Some(current) = link {
            nodes.push(current.node);
            link = current.parent.as_deref();
        }
        nodes.reverse();
        nodes
    }
}

/// Fixed-size bitset of nodes a cursor may not step onto.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ForbiddenSet {
    words: Vec<u64>,
}

impl ForbiddenSet {
    fn with_capacity(node_count: usize) -> Self {
        Self {
            words: vec![0; node_count.div_ceil(64)],
        }
    }

    fn contains(&self, node: NodeIndex) -> bool {
        let (word, bit) = Self::slot(node);
        self.words
            .get(word)
            .is_some_and(|value| *value & (1u64 << bit) != 0)
    }

    fn insert(&mut self, node: NodeIndex) {
        let (word, bit) = Self::slot(node);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1u64 << bit;
    }

    fn slot(node: NodeIndex) -> (usize, u32) {
        (node.get() / 64, (node.get() % 64) as u32)
    }
}
