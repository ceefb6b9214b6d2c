use std::collections::{BTreeMap, BTreeSet};
use std::f64::consts::TAU;

use itertools::Itertools;
use log::{debug, error};

use crate::edge::Edge;
use crate::node::{Node, Polar};
use crate::region::{polygon_area, Region};
use crate::segment::Segment;
use crate::shape::Shape;

/// Connected component of the arrangement: a maximal set of shapes linked by
/// boundary intersections, plus the regions they partition into.
#[derive(Clone, Debug)]
pub struct Component {
    pub idx: usize,
    /// Member shape indices, ascending
    pub set_idxs: Vec<usize>,
    /// Shapes that contain this whole component without touching it
    pub container_idxs: BTreeSet<usize>,
    pub node_idxs: Vec<usize>,
    pub edge_idxs: Vec<usize>,
    pub regions: Vec<Region>,
    /// Outer boundary walk
    pub hull: Vec<Segment>,
}

impl Component {
    pub fn new(
        idx: usize,
        set_idxs: Vec<usize>,
        container_idxs: BTreeSet<usize>,
        nodes_by_shape: &BTreeMap<usize, Vec<usize>>,
        nodes: &mut Vec<Node>,
        edges: &mut Vec<Edge>,
        shapes: &[Shape],
    ) -> Component {
        debug!("Making component: {:?}", set_idxs);
        if set_idxs.len() == 1 {
            return Component::singleton(idx, set_idxs[0], container_idxs, nodes, edges, shapes);
        }

        let mut node_idxs: BTreeSet<usize> = BTreeSet::new();
        for shape_idx in &set_idxs {
            if let Some(shape_nodes) = nodes_by_shape.get(shape_idx) {
                node_idxs.extend(shape_nodes.iter().cloned());
            }
        }
        let node_idxs: Vec<usize> = node_idxs.into_iter().collect();

        let edge_idxs = Component::edges(&set_idxs, &container_idxs, nodes_by_shape, nodes, edges, shapes);
        let hull = Component::hull(&edge_idxs, edges, nodes);
        let regions = Component::regions(&edge_idxs, &container_idxs, edges, nodes, shapes);

        Component {
            idx,
            set_idxs,
            container_idxs,
            node_idxs,
            edge_idxs,
            regions,
            hull,
        }
    }

    /// A shape that intersects nothing: one synthetic node at its θ=0 point and
    /// a single full-loop edge.
    fn singleton(
        idx: usize,
        set_idx: usize,
        container_idxs: BTreeSet<usize>,
        nodes: &mut Vec<Node>,
        edges: &mut Vec<Edge>,
        shapes: &[Shape],
    ) -> Component {
        let shape = &shapes[set_idx];
        let node_idx = nodes.len();
        let edge_idx = edges.len();
        let mut node = Node {
            idx: node_idx,
            p: shape.point(0.),
            n: 1,
            shape_thetas: BTreeMap::from([(set_idx, Polar::new(0.))]),
            edge_idxs: vec![],
        };
        node.add_edge(edge_idx);
        nodes.push(node);
        edges.push(Edge {
            idx: edge_idx,
            shape_idx: set_idx,
            node0: node_idx,
            node1: node_idx,
            theta0: 0.,
            theta1: TAU,
            container_idxs: container_idxs.clone(),
            is_boundary: true,
            visits: 0,
        });
        let mut key = container_idxs.clone();
        key.insert(set_idx);
        let segments = vec![Segment { edge_idx, fwd: true }];
        let region = Region::new(key, segments.clone(), edges, nodes, shapes);
        debug!("singleton component {}: {}", set_idx, region);
        Component {
            idx,
            set_idxs: vec![set_idx],
            container_idxs,
            node_idxs: vec![node_idx],
            edge_idxs: vec![edge_idx],
            regions: vec![region],
            hull: segments,
        }
    }

    /// Split each member shape's boundary into arcs at its nodes, θ-ascending,
    /// tagging each arc with the shapes containing its midpoint.
    fn edges(
        set_idxs: &[usize],
        component_container_idxs: &BTreeSet<usize>,
        nodes_by_shape: &BTreeMap<usize, Vec<usize>>,
        nodes: &mut Vec<Node>,
        edges: &mut Vec<Edge>,
        shapes: &[Shape],
    ) -> Vec<usize> {
        let mut edge_idxs = vec![];
        for &shape_idx in set_idxs {
            let shape_nodes = &nodes_by_shape[&shape_idx];
            debug!(
                "{} nodes for shape {}: {:?}",
                shape_nodes.len(),
                shape_idx,
                shape_nodes.iter().map(|n| nodes[*n].theta(shape_idx)).collect::<Vec<f64>>(),
            );
            let num = shape_nodes.len();
            for i in 0..num {
                let cur = shape_nodes[i];
                let nxt = shape_nodes[(i + 1) % num];
                let theta0 = nodes[cur].theta(shape_idx);
                let theta1 = nodes[nxt].theta(shape_idx);
                let theta1 = if theta1 <= theta0 { theta1 + TAU } else { theta1 };
                let midpoint = shapes[shape_idx].arc_midpoint(theta0, theta1);
                let mut container_idxs = component_container_idxs.clone();
                let mut is_boundary = true;
                for &other in set_idxs {
                    if other != shape_idx && shapes[other].contains(&midpoint) {
                        container_idxs.insert(other);
                        is_boundary = false;
                    }
                }
                let edge_idx = edges.len();
                edges.push(Edge {
                    idx: edge_idx,
                    shape_idx,
                    node0: cur,
                    node1: nxt,
                    theta0,
                    theta1,
                    container_idxs,
                    is_boundary,
                    visits: 0,
                });
                edge_idxs.push(edge_idx);
                nodes[cur].add_edge(edge_idx);
                nodes[nxt].add_edge(edge_idx);
            }
        }
        debug!("{} edges", edge_idxs.len());
        for &edge_idx in &edge_idxs {
            debug!("  {}", edges[edge_idx]);
        }
        edge_idxs
    }

    /// Walk the outer boundary: from any boundary edge, repeatedly take the
    /// unique boundary successor until back at the start.
    fn hull(edge_idxs: &[usize], edges: &[Edge], nodes: &[Node]) -> Vec<Segment> {
        let first = match edge_idxs.iter().find(|&&e| edges[e].is_boundary) {
            Some(&first) => first,
            None => {
                error!("component has no boundary edges: {:?}", edge_idxs);
                return vec![];
            }
        };
        let first_segment = Segment { edge_idx: first, fwd: true };
        let start_idx = first_segment.start(edges);
        let mut hull = vec![first_segment];
        loop {
            let last = *hull.last().unwrap();
            if last.end(edges) == start_idx {
                break;
            }
            let successors: Vec<Segment> = last
                .successors(edges, nodes)
                .into_iter()
                .filter(|s| edges[s.edge_idx].is_boundary)
                .collect();
            if successors.len() != 1 {
                error!(
                    "expected 1 boundary successor for hull segment {:?}, found {}",
                    last,
                    successors.len(),
                );
                return vec![];
            }
            hull.push(successors[0]);
            if hull.len() > edge_idxs.len() {
                error!("hull walk failed to close after {} segments", hull.len());
                return vec![];
            }
        }
        hull
    }

    /// Area enclosed by the outer boundary, holes and interior structure
    /// ignored.
    pub fn hull_area(&self, edges: &[Edge], nodes: &[Node], shapes: &[Shape]) -> f64 {
        polygon_area(&self.hull, edges, nodes)
            + self
                .hull
                .iter()
                .map(|s| edges[s.edge_idx].secant_area(shapes))
                .sum::<f64>()
    }

    /// Enumerate regions by constrained depth-first traversal. Each region's
    /// first two segments determine its candidate container set; `traverse`
    /// then completes the cycle.
    fn regions(
        edge_idxs: &[usize],
        component_container_idxs: &BTreeSet<usize>,
        edges: &mut Vec<Edge>,
        nodes: &[Node],
        shapes: &[Shape],
    ) -> Vec<Region> {
        let mut regions: Vec<Region> = vec![];
        let mut segments: Vec<Segment> = vec![];
        let mut visited_nodes: BTreeSet<usize> = BTreeSet::new();
        let max_edges = edge_idxs.len();
        for &edge_idx in edge_idxs {
            if edges[edge_idx].visits == edges[edge_idx].expected_visits() {
                continue;
            }
            // Each region's first edge can be traversed forward, WLOG
            let segment = Segment { edge_idx, fwd: true };
            let start = segment.start(edges);
            let end = segment.end(edges);
            let successors = segment.successors(edges, nodes);
            segments.push(segment);
            visited_nodes.insert(end);
            let first_idxs = edges[edge_idx].all_idxs();
            for successor in successors {
                let successor_end = successor.end(edges);
                segments.push(successor);
                visited_nodes.insert(successor_end);
                let container_idxs: BTreeSet<usize> = first_idxs
                    .intersection(&edges[successor.edge_idx].all_idxs())
                    .cloned()
                    .collect();
                // The region must lie inside at least one member shape; island
                // containers alone don't count
                let in_component = container_idxs.difference(component_container_idxs).next().is_some();
                if in_component {
                    Component::traverse(
                        start,
                        &mut regions,
                        &mut segments,
                        &container_idxs,
                        &mut visited_nodes,
                        max_edges,
                        edges,
                        nodes,
                        shapes,
                    );
                    debug_assert_eq!(segments.len(), 2);
                }
                segments.pop();
                visited_nodes.remove(&successor_end);
            }
            segments.pop();
            visited_nodes.remove(&end);
        }

        debug!("{} regions", regions.len());
        for region in &regions {
            debug!("  {}", region);
        }

        let total_expected: usize = edge_idxs.iter().map(|&e| edges[e].expected_visits()).sum();
        let total_visits: usize = edge_idxs.iter().map(|&e| edges[e].visits).sum();
        if total_visits != total_expected {
            error!("total_visits ({}) != total_expected_visits ({})", total_visits, total_expected);
        }

        regions
    }

    fn traverse(
        start: usize,
        regions: &mut Vec<Region>,
        segments: &mut Vec<Segment>,
        container_idxs: &BTreeSet<usize>,
        visited_nodes: &mut BTreeSet<usize>,
        max_edges: usize,
        edges: &mut Vec<Edge>,
        nodes: &[Node],
        shapes: &[Shape],
    ) {
        if segments.len() > max_edges {
            error!(
                "region traversal exceeded edge count: {} segments > {} edges",
                segments.len(),
                max_edges,
            );
            return;
        }
        let last = *segments.last().unwrap();
        let end = last.end(edges);
        debug!(
            "traverse: {}, {} segments, containers: [{}], {} regions",
            segments.iter().fold(start.to_string(), |acc, s| format!("{}→{}", acc, s.end(edges))),
            segments.len(),
            container_idxs.iter().map(|i| i.to_string()).join(" "),
            regions.len(),
        );
        if start == end {
            // Back where we started; adjacent segments are checked as they are
            // pushed, but closing the loop also requires the first and last to
            // lie on different shapes
            let first_shape = edges[segments[0].edge_idx].shape_idx;
            let last_shape = edges[last.edge_idx].shape_idx;
            if first_shape == last_shape {
                return;
            }
            for segment in segments.iter() {
                edges[segment.edge_idx].visits += 1;
            }
            let region = Region::new(container_idxs.clone(), segments.clone(), edges, nodes, shapes);
            regions.push(region);
        } else {
            for successor in last.successors(edges, nodes) {
                let next_node = successor.end(edges);
                if visited_nodes.contains(&next_node) {
                    // Only the start node may be revisited, to close the region
                    continue;
                }
                let nxt_idxs = edges[successor.edge_idx].all_idxs();
                // Existing containers must be preserved by the new segment
                if container_idxs.difference(&nxt_idxs).next().is_some() {
                    continue;
                }
                // The only admissible extra shape is the one whose border the
                // new segment runs along (outside the region)
                let extra: BTreeSet<usize> = nxt_idxs.difference(container_idxs).cloned().collect();
                if extra.len() > 1 {
                    continue;
                }
                if let Some(&extra_idx) = extra.iter().next() {
                    if extra_idx != edges[successor.edge_idx].shape_idx {
                        continue;
                    }
                }
                visited_nodes.insert(next_node);
                segments.push(successor);
                Component::traverse(
                    start,
                    regions,
                    segments,
                    container_idxs,
                    visited_nodes,
                    max_edges,
                    edges,
                    nodes,
                    shapes,
                );
                segments.pop();
                visited_nodes.remove(&next_node);
            }
        }
    }

    pub fn key_string(&self) -> String {
        self.set_idxs.iter().map(|idx| idx.to_string()).join(",")
    }
}
