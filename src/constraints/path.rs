//! Path constraints: keep designated tiles connectable
//!
//! Both variants maintain the same invariant: every cell that must be path
//! stays reachable from every other through cells that still could be path.
//! When the could-graph disconnects the required cells the solve is
//! contradicted; articulation points of the could-graph whose removal would
//! disconnect them are forced to be path before the solver can ban them.

use crate::algorithm::executor::{Status, TilePropagator};
use crate::constraints::TileConstraint;
use crate::io::error::{Result, SolverError};
use crate::model::tiles::{Tile, TileValue};
use std::collections::HashMap;

/// Requires the cells holding a tile set to form one connected subgraph
#[derive(Clone, Debug)]
pub struct PathConstraint<V> {
    /// Tiles that count as path
    pub tiles: Vec<Tile<V>>,
    /// Cells that must end up on the path; defaults to every committed cell
    pub endpoints: Option<Vec<[usize; 3]>>,
}

impl<V: TileValue> TileConstraint<V> for PathConstraint<V> {
    fn init(&mut self, propagator: &mut TilePropagator<V>) -> Result<()> {
        validate_endpoints(self.endpoints.as_deref(), propagator)
    }

    fn check(&mut self, propagator: &mut TilePropagator<V>) -> Result<()> {
        let topology = propagator.topology().clone();
        let cell_count = topology.cell_count();

        let mut could = vec![false; cell_count];
        let mut must = vec![false; cell_count];
        for index in 0..cell_count {
            if !topology.is_active(index) {
                continue;
            }
            let [x, y, z] = topology.coordinates(index);
            let (banned, selected) = propagator.banned_selected(x, y, z, &self.tiles)?;
            could[index] = !banned;
            must[index] = selected;
        }

        let direction_count = topology.directions().count();
        let mut neighbors = vec![Vec::new(); cell_count];
        for (index, adjacency) in neighbors.iter_mut().enumerate() {
            for direction in 0..direction_count {
                if let Some(neighbor) = topology.neighbor(index, direction) {
                    adjacency.push(neighbor);
                }
            }
        }

        let relevant = relevant_cells(&topology, self.endpoints.as_deref(), &must);
        enforce_connectivity(
            propagator,
            &topology,
            PathGraph {
                neighbors,
                could,
                relevant,
            },
            &must,
            &self.tiles,
        )
    }
}

/// Path constraint where connections follow declared tile exits
///
/// A cell connects to its neighbor in a direction only when some remaining
/// tile on each side offers a matching exit pair.
#[derive(Clone, Debug)]
pub struct EdgedPathConstraint<V> {
    /// Exit directions each path tile offers
    pub exits: HashMap<Tile<V>, Vec<usize>>,
    /// Cells that must end up on the path; defaults to every committed cell
    pub endpoints: Option<Vec<[usize; 3]>>,
}

impl<V: TileValue> TileConstraint<V> for EdgedPathConstraint<V> {
    fn init(&mut self, propagator: &mut TilePropagator<V>) -> Result<()> {
        let direction_count = propagator.topology().directions().count();
        for directions in self.exits.values() {
            if let Some(&direction) = directions.iter().find(|&&d| d >= direction_count) {
                return Err(SolverError::UnknownDirection {
                    direction,
                    count: direction_count,
                });
            }
        }
        validate_endpoints(self.endpoints.as_deref(), propagator)
    }

    fn check(&mut self, propagator: &mut TilePropagator<V>) -> Result<()> {
        let topology = propagator.topology().clone();
        let cell_count = topology.cell_count();
        let direction_count = topology.directions().count();
        let path_tiles: Vec<Tile<V>> = self.exits.keys().cloned().collect();

        let mut could = vec![false; cell_count];
        let mut must = vec![false; cell_count];
        let mut exit_dirs = vec![vec![false; direction_count]; cell_count];
        for index in 0..cell_count {
            if !topology.is_active(index) {
                continue;
            }
            let [x, y, z] = topology.coordinates(index);
            let (banned, selected) = propagator.banned_selected(x, y, z, &path_tiles)?;
            could[index] = !banned;
            must[index] = selected;
            if banned {
                continue;
            }
            for tile in propagator.possible_tiles(x, y, z)? {
                if let Some(directions) = self.exits.get(&tile) {
                    for &direction in directions {
                        exit_dirs[index][direction] = true;
                    }
                }
            }
        }

        // An edge needs a matching exit pair on both endpoints
        let mut neighbors = vec![Vec::new(); cell_count];
        for index in 0..cell_count {
            for direction in 0..direction_count {
                if !exit_dirs[index][direction] {
                    continue;
                }
                let Some(neighbor) = topology.neighbor(index, direction) else {
                    continue;
                };
                let opposite = topology.directions().opposite(direction);
                if exit_dirs[neighbor][opposite] {
                    neighbors[index].push(neighbor);
                }
            }
        }

        let relevant = relevant_cells(&topology, self.endpoints.as_deref(), &must);
        enforce_connectivity(
            propagator,
            &topology,
            PathGraph {
                neighbors,
                could,
                relevant,
            },
            &must,
            &path_tiles,
        )
    }
}

fn validate_endpoints<V: TileValue>(
    endpoints: Option<&[[usize; 3]]>,
    propagator: &TilePropagator<V>,
) -> Result<()> {
    let topology = propagator.topology();
    if let Some(points) = endpoints {
        for &point in points {
            if !topology.contains(point[0], point[1], point[2]) {
                return Err(SolverError::OutOfBounds {
                    point,
                    dimensions: topology.dimensions(),
                });
            }
        }
    }
    Ok(())
}

fn relevant_cells(
    topology: &crate::spatial::topology::GridTopology,
    endpoints: Option<&[[usize; 3]]>,
    must: &[bool],
) -> Vec<bool> {
    endpoints.map_or_else(
        || must.to_vec(),
        |points| {
            let mut relevant = vec![false; must.len()];
            for &point in points {
                relevant[topology.index(point[0], point[1], point[2])] = true;
            }
            relevant
        },
    )
}

/// Declare contradiction or force path tiles per the graph analysis
fn enforce_connectivity<V: TileValue>(
    propagator: &mut TilePropagator<V>,
    topology: &crate::spatial::topology::GridTopology,
    graph: PathGraph,
    must: &[bool],
    path_tiles: &[Tile<V>],
) -> Result<()> {
    match analyze(&graph) {
        PathAnalysis::Disconnected => {
            propagator.set_contradiction();
            Ok(())
        }
        PathAnalysis::Forced(cells) => {
            for cell in cells {
                if must[cell] {
                    continue;
                }
                let [x, y, z] = topology.coordinates(cell);
                propagator.select_tiles(x, y, z, path_tiles)?;
                if propagator.status() == Status::Contradiction {
                    break;
                }
            }
            Ok(())
        }
    }
}

/// A cell graph restricted to path-capable cells
struct PathGraph {
    neighbors: Vec<Vec<usize>>,
    could: Vec<bool>,
    relevant: Vec<bool>,
}

enum PathAnalysis {
    /// Some relevant cell cannot reach the others
    Disconnected,
    /// Cells whose loss would disconnect the relevant set
    Forced(Vec<usize>),
}

/// Find articulation points of the could-subgraph separating relevant cells
///
/// Depth-first search from a relevant root, counting relevant cells per
/// subtree. A vertex is an articulation when some child subtree contains a
/// relevant cell and has no back edge above the vertex; the root is one
/// when at least two of its subtrees contain relevant cells.
fn analyze(graph: &PathGraph) -> PathAnalysis {
    let total_relevant = graph.relevant.iter().filter(|&&r| r).count();
    if total_relevant <= 1 {
        return PathAnalysis::Forced(Vec::new());
    }
    if graph
        .relevant
        .iter()
        .zip(&graph.could)
        .any(|(&relevant, &could)| relevant && !could)
    {
        return PathAnalysis::Disconnected;
    }

    let cell_count = graph.neighbors.len();
    let Some(root) = (0..cell_count).find(|&cell| graph.relevant[cell]) else {
        return PathAnalysis::Forced(Vec::new());
    };

    const UNVISITED: usize = usize::MAX;
    struct Frame {
        node: usize,
        parent: usize,
        next: usize,
        skipped_parent_edge: bool,
    }

    let mut disc = vec![UNVISITED; cell_count];
    let mut low = vec![0usize; cell_count];
    let mut subtree_relevant = vec![0usize; cell_count];
    let mut articulation = vec![false; cell_count];
    let mut root_branches = 0usize;
    let mut counter = 0usize;

    disc[root] = counter;
    low[root] = counter;
    counter += 1;
    subtree_relevant[root] = usize::from(graph.relevant[root]);
    let mut stack = vec![Frame {
        node: root,
        parent: UNVISITED,
        next: 0,
        skipped_parent_edge: false,
    }];

    while !stack.is_empty() {
        let (node, pending) = {
            let Some(top) = stack.last_mut() else { break };
            let node = top.node;
            let mut pending = None;
            while top.next < graph.neighbors[node].len() {
                let candidate = graph.neighbors[node][top.next];
                top.next += 1;
                if !graph.could[candidate] {
                    continue;
                }
                // Skip the tree edge back to the parent exactly once; a
                // second parallel edge is a genuine cycle
                if candidate == top.parent && !top.skipped_parent_edge {
                    top.skipped_parent_edge = true;
                    continue;
                }
                pending = Some(candidate);
                break;
            }
            (node, pending)
        };

        match pending {
            Some(next) if disc[next] != UNVISITED => {
                low[node] = low[node].min(disc[next]);
            }
            Some(next) => {
                disc[next] = counter;
                low[next] = counter;
                counter += 1;
                subtree_relevant[next] = usize::from(graph.relevant[next]);
                stack.push(Frame {
                    node: next,
                    parent: node,
                    next: 0,
                    skipped_parent_edge: false,
                });
            }
            None => {
                let Some(finished) = stack.pop() else { break };
                if finished.parent == UNVISITED {
                    continue;
                }
                let parent = finished.parent;
                let child = finished.node;
                low[parent] = low[parent].min(low[child]);
                if low[child] >= disc[parent] && subtree_relevant[child] > 0 {
                    articulation[parent] = true;
                }
                if parent == root && subtree_relevant[child] > 0 {
                    root_branches += 1;
                }
                subtree_relevant[parent] += subtree_relevant[child];
            }
        }
    }

    if subtree_relevant[root] != total_relevant {
        return PathAnalysis::Disconnected;
    }
    articulation[root] = root_branches >= 2;

    PathAnalysis::Forced(
        (0..cell_count)
            .filter(|&cell| articulation[cell] && graph.could[cell])
            .collect(),
    )
}
