use std::collections::{BTreeMap, BTreeSet};

use anyhow::{anyhow, Result};
use log::{debug, error, warn};
use ordered_float::OrderedFloat;

use crate::component::Component;
use crate::edge::Edge;
use crate::error::ArrangementError;
use crate::node::{Node, Polar};
use crate::r2::R2;
use crate::region::Region;
use crate::shape::Shape;

/// Raw intersection points within this distance are treated as one node;
/// point pairs within it of each other are dropped as tangent contacts.
pub const MERGE_THRESHOLD: f64 = 1e-7;

/// Planar arrangement of a set of shapes: intersection nodes, arc edges,
/// connected components, and the exclusive area of every region.
#[derive(Clone, Debug)]
pub struct Arrangement {
    pub shapes: Vec<Shape>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub components: Vec<Component>,
    /// `containments[i][j]`: shape i wholly contains shape j (only detected
    /// when their boundaries don't intersect)
    pub containments: Vec<Vec<bool>>,
    /// `islands[i][j]`: shape i contains shape j, and they are in different
    /// connected components
    pub islands: Vec<Vec<bool>>,
    /// Exclusive area per region key ("0,2" ⇒ inside shapes 0 and 2 only)
    pub areas: BTreeMap<String, f64>,
}

impl Arrangement {
    pub fn new(shapes: Vec<Shape>) -> Result<Arrangement, ArrangementError> {
        if shapes.is_empty() {
            return Err(ArrangementError::Empty);
        }
        for shape in &shapes {
            shape.validate()?;
        }
        let num = shapes.len();

        // Pairwise intersections, merged into nodes
        let mut nodes: Vec<Node> = vec![];
        let mut adjacent = vec![vec![false; num]; num];
        for i in 0..num {
            for j in (i + 1)..num {
                let mut points = shapes[i].intersect(&shapes[j]);
                drop_tangent_pairs(&mut points, i, j);
                if !points.is_empty() {
                    adjacent[i][j] = true;
                    adjacent[j][i] = true;
                }
                for p in points {
                    let theta_i = Polar::new(shapes[i].theta(&p));
                    let theta_j = Polar::new(shapes[j].theta(&p));
                    match nodes.iter_mut().find(|n| n.p.distance(&p) < MERGE_THRESHOLD) {
                        Some(node) => node.merge(p, i, theta_i, j, theta_j),
                        None => nodes.push(Node {
                            idx: nodes.len(),
                            p,
                            n: 1,
                            shape_thetas: BTreeMap::from([(i, theta_i), (j, theta_j)]),
                            edge_idxs: vec![],
                        }),
                    }
                }
            }
        }
        debug!("{} nodes", nodes.len());
        for node in &nodes {
            debug!("  {}", node);
        }

        // Transitive closure of adjacency
        let mut is_connected = adjacent.clone();
        for i in 0..num {
            is_connected[i][i] = true;
        }
        for k in 0..num {
            for i in 0..num {
                for j in 0..num {
                    if is_connected[i][k] && is_connected[k][j] {
                        is_connected[i][j] = true;
                    }
                }
            }
        }

        // Containment among non-intersecting pairs; first detected direction wins
        let mut containments = vec![vec![false; num]; num];
        let mut islands = vec![vec![false; num]; num];
        for i in 0..num {
            for j in 0..num {
                if i == j || adjacent[i][j] {
                    continue;
                }
                if !shapes[i].contains_shape(&shapes[j]) {
                    continue;
                }
                if containments[j][i] {
                    warn!("shapes {} and {} appear mutually containing; keeping {} ⊃ {}", i, j, j, i);
                    continue;
                }
                containments[i][j] = true;
                islands[i][j] = !is_connected[i][j];
            }
        }
        // Island containers per shape
        let island_containers: Vec<BTreeSet<usize>> = (0..num)
            .map(|j| (0..num).filter(|&i| islands[i][j]).collect())
            .collect();

        // Nodes on each shape, sorted by boundary coordinate
        let mut nodes_by_shape: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for node in &nodes {
            for &shape_idx in node.shape_thetas.keys() {
                nodes_by_shape.entry(shape_idx).or_default().push(node.idx);
            }
        }
        for (shape_idx, idxs) in nodes_by_shape.iter_mut() {
            idxs.sort_by_key(|&n| OrderedFloat(nodes[n].theta(*shape_idx)));
        }

        // Group shapes into connected components
        let mut component_sets: Vec<Vec<usize>> = vec![];
        let mut seen = vec![false; num];
        for i in 0..num {
            if seen[i] {
                continue;
            }
            let members: Vec<usize> = (0..num).filter(|&j| is_connected[i][j]).collect();
            for &m in &members {
                seen[m] = true;
            }
            component_sets.push(members);
        }

        let mut edges: Vec<Edge> = vec![];
        let mut components: Vec<Component> = vec![];
        for (cdx, members) in component_sets.into_iter().enumerate() {
            let container_idxs = island_containers[members[0]].clone();
            for &m in &members[1..] {
                if island_containers[m] != container_idxs {
                    error!(
                        "component {:?}: members disagree on containers ({:?} vs {:?} for shape {})",
                        members, container_idxs, island_containers[m], m,
                    );
                }
            }
            components.push(Component::new(
                cdx,
                members,
                container_idxs,
                &nodes_by_shape,
                &mut nodes,
                &mut edges,
                &shapes,
            ));
        }

        // Attach each island component to the one region of its immediate
        // parent that contains it, and carve its hull out of that region
        for cdx in 0..components.len() {
            if components[cdx].container_idxs.is_empty() {
                continue;
            }
            // Immediate parent: of the components containing this one, the one
            // that is itself most deeply nested
            let parent = components
                .iter()
                .enumerate()
                .filter(|(pdx, c)| {
                    *pdx != cdx && components[cdx].container_idxs.iter().any(|i| c.set_idxs.contains(i))
                })
                .max_by_key(|(_, c)| c.container_idxs.len())
                .map(|(pdx, _)| pdx);
            let pdx = match parent {
                Some(pdx) => pdx,
                None => {
                    error!(
                        "island component [{}] has containers {:?} but no parent component",
                        components[cdx].key_string(),
                        components[cdx].container_idxs,
                    );
                    continue;
                }
            };
            let child_hull_area = components[cdx].hull_area(&edges, &nodes, &shapes);
            let representative = shapes[components[cdx].set_idxs[0]].center();
            let parent_set_idxs = components[pdx].set_idxs.clone();
            let matches: Vec<usize> = components[pdx]
                .regions
                .iter()
                .enumerate()
                .filter(|(_, r)| r.contains(&representative, &parent_set_idxs, &shapes))
                .map(|(rdx, _)| rdx)
                .collect();
            if matches.len() != 1 {
                return Err(ArrangementError::ContainerRegionCount {
                    component: components[pdx].key_string(),
                    child: components[cdx].key_string(),
                    count: matches.len(),
                });
            }
            components[pdx].regions[matches[0]].island_area += child_hull_area;
        }

        let mut areas: BTreeMap<String, f64> = BTreeMap::new();
        for component in &components {
            for region in &component.regions {
                *areas.entry(region.key_string()).or_insert(0.) += region.area();
            }
        }

        let arrangement = Arrangement {
            shapes,
            nodes,
            edges,
            components,
            containments,
            islands,
            areas,
        };
        if let Err(e) = arrangement.verify_areas(1e-6) {
            error!("{}", e);
        }
        Ok(arrangement)
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.components.iter().flat_map(|c| c.regions.iter())
    }

    /// Exclusive area of the regions covered by exactly the given key
    /// (shape indices joined by commas, e.g. "0,2").
    pub fn area(&self, key: &str) -> Option<f64> {
        self.areas.get(key).copied()
    }

    /// Total area covered by at least one shape.
    pub fn total_area(&self) -> f64 {
        self.regions().map(|r| r.area()).sum()
    }

    /// Each shape's area should equal the sum of the regions inside it.
    pub fn verify_areas(&self, eps: f64) -> Result<()> {
        for (idx, shape) in self.shapes.iter().enumerate() {
            let sum: f64 = self
                .regions()
                .filter(|r| r.key.contains(&idx))
                .map(|r| r.area())
                .sum();
            let shape_area = shape.area();
            let diff = (sum / shape_area - 1.).abs();
            if diff > eps {
                return Err(anyhow!(
                    "shape {} area {} != sum of its regions' areas {}, half-diff {}",
                    idx,
                    shape_area,
                    sum,
                    (sum - shape_area) / 2.,
                ));
            }
        }
        Ok(())
    }
}

/// Tangent (or numerically tangent) contacts produce coincident point pairs;
/// drop both, they don't partition any area.
fn drop_tangent_pairs(points: &mut Vec<R2>, i: usize, j: usize) {
    loop {
        let mut found = None;
        'scan: for a in 0..points.len() {
            for b in (a + 1)..points.len() {
                if points[a].distance(&points[b]) < MERGE_THRESHOLD {
                    found = Some((a, b));
                    break 'scan;
                }
            }
        }
        match found {
            Some((a, b)) => {
                warn!("dropping tangent contact between shapes {} and {}", i, j);
                points.remove(b);
                points.remove(a);
            }
            None => break,
        }
    }
}
