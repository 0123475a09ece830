//! Dependency graph scheduler.
//!
//! Produces the two orderings the orchestrator needs:
//!
//! - **Declaration order**: every type follows the in-batch types named in its
//!   base and interface references. Types are layered by inheritance depth and
//!   each layer keeps the namespace display order.
//! - **Static-initialization order**: `A` comes before `B` whenever one of
//!   `A`'s member bodies mentions `B`. References are ranked by where they
//!   occur (constructors, static methods, instance methods, static-init
//!   statements). When the union of all tiers is cyclic, the lowest tier still
//!   in play is dropped for the nodes of each cycle and the cycle is re-sorted,
//!   until it breaks or only constructor edges remain.
//!
//! Both orders are pure functions of the batch; nothing survives between runs.

use crate::declarations::{TypeBatch, TypeDeclaration, TypeId};
use crate::type_references::{TypeReferenceFinder, heritage_references};
use bitflags::bitflags;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

bitflags! {
    /// Set of reference tiers that support an edge, or that are still in play.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct ReferenceTiers: u8 {
        const CONSTRUCTOR = 1 << 0;
        const STATIC_METHOD = 1 << 1;
        const INSTANCE_METHOD = 1 << 2;
        const STATIC_INIT = 1 << 3;
    }
}

impl ReferenceTiers {
    /// Drop the lowest-priority tier present.
    ///
    /// Returns `None` once only constructor references remain; those are never dropped.
    pub fn without_lowest(self) -> Option<Self> {
        [Self::STATIC_INIT, Self::INSTANCE_METHOD, Self::STATIC_METHOD]
            .into_iter()
            .find(|tier| self.contains(*tier))
            .map(|tier| self - tier)
    }
}

/// Where a reference was found, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReferenceTier {
    Constructor,
    StaticMethod,
    InstanceMethod,
    StaticInit,
}

impl ReferenceTier {
    pub const ALL: [Self; 4] = [
        Self::Constructor,
        Self::StaticMethod,
        Self::InstanceMethod,
        Self::StaticInit,
    ];

    pub const fn flag(self) -> ReferenceTiers {
        match self {
            Self::Constructor => ReferenceTiers::CONSTRUCTOR,
            Self::StaticMethod => ReferenceTiers::STATIC_METHOD,
            Self::InstanceMethod => ReferenceTiers::INSTANCE_METHOD,
            Self::StaticInit => ReferenceTiers::STATIC_INIT,
        }
    }
}

/// "`from` must initialize before `to`", with the tiers that support it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub from: TypeId,
    pub to: TypeId,
    pub tiers: ReferenceTiers,
}

/// In-batch types referenced from one tier of `decl`'s members.
pub fn tier_references(decl: &TypeDeclaration, tier: ReferenceTier) -> Vec<TypeId> {
    let Some(def) = decl.class_definition() else {
        return Vec::new();
    };
    let mut finder = TypeReferenceFinder::new();
    match tier {
        ReferenceTier::Constructor => {
            if let Some(ctor) = &def.unnamed_constructor {
                finder.visit_all(&ctor.body);
            }
            for ctor in &def.named_constructors {
                finder.visit_all(&ctor.body);
            }
        }
        ReferenceTier::StaticMethod => {
            for method in &def.static_methods {
                finder.visit_all(method.body.as_deref().unwrap_or_default());
            }
        }
        ReferenceTier::InstanceMethod => {
            for method in &def.instance_methods {
                finder.visit_all(method.body.as_deref().unwrap_or_default());
            }
        }
        ReferenceTier::StaticInit => finder.visit_all(&def.static_init),
    }
    finder.into_sorted()
}

// =============================================================================
// Declaration (inheritance) order
// =============================================================================

/// Order types so that bases and interfaces precede the types that name them.
///
/// `baseline` is the namespace display order; it decides ties between types of
/// equal inheritance depth.
#[tracing::instrument(level = "debug", skip_all, fields(types = baseline.len()))]
pub fn declaration_order(batch: &TypeBatch, baseline: &[TypeId]) -> Vec<TypeId> {
    let mut depths: Vec<Option<usize>> = vec![None; batch.len()];
    let mut visiting = vec![false; batch.len()];
    for &id in baseline {
        inheritance_depth(batch, id, &mut depths, &mut visiting);
    }

    let mut order = baseline.to_vec();
    // Stable sort: equal depths keep their baseline position.
    order.sort_by_key(|id| depths[id.index()].unwrap_or(0));
    order
}

fn inheritance_depth(
    batch: &TypeBatch,
    id: TypeId,
    depths: &mut [Option<usize>],
    visiting: &mut [bool],
) -> usize {
    if let Some(depth) = depths[id.index()] {
        return depth;
    }
    // Inheritance cycles are an upstream contract violation; treat the back edge as a root.
    if visiting[id.index()] {
        return 0;
    }
    visiting[id.index()] = true;

    let heritage = batch
        .get(id)
        .and_then(TypeDeclaration::class_definition)
        .map(heritage_references)
        .unwrap_or_default();
    let len = depths.len();
    let depth = heritage
        .into_iter()
        .filter(|dep| *dep != id && dep.index() < len)
        .map(|dep| inheritance_depth(batch, dep, depths, visiting) + 1)
        .max()
        .unwrap_or(0);

    visiting[id.index()] = false;
    depths[id.index()] = Some(depth);
    depth
}

// =============================================================================
// Static-initialization order
// =============================================================================

/// Ranked reference graph over every type of a batch.
///
/// Node `i` is the type with `TypeId(i)`, so node order is declaration order.
#[derive(Debug)]
pub struct ReferenceGraph {
    node_count: usize,
    edges: IndexMap<(TypeId, TypeId), ReferenceTiers>,
}

impl ReferenceGraph {
    #[tracing::instrument(level = "debug", skip_all, fields(types = batch.len()))]
    pub fn build(batch: &TypeBatch) -> Self {
        let mut edges: IndexMap<(TypeId, TypeId), ReferenceTiers> = IndexMap::new();
        for (from, decl) in batch.iter() {
            for tier in ReferenceTier::ALL {
                for to in tier_references(decl, tier) {
                    if to == from || to.index() >= batch.len() {
                        continue;
                    }
                    *edges
                        .entry((from, to))
                        .or_insert(ReferenceTiers::empty()) |= tier.flag();
                }
            }
        }
        tracing::debug!(edges = edges.len(), "built reference graph");
        Self {
            node_count: batch.len(),
            edges,
        }
    }

    pub fn edges(&self) -> impl Iterator<Item = DependencyEdge> + '_ {
        self.edges.iter().map(|(&(from, to), &tiers)| DependencyEdge { from, to, tiers })
    }

    /// Tiers supporting `from -> to`, empty if there is no such edge.
    pub fn tiers_between(&self, from: TypeId, to: TypeId) -> ReferenceTiers {
        self.edges
            .get(&(from, to))
            .copied()
            .unwrap_or(ReferenceTiers::empty())
    }

    /// Cycle-safe static-initialization order over all types.
    pub fn static_init_order(&self) -> Vec<TypeId> {
        let members: Vec<usize> = (0..self.node_count).collect();
        self.order_members(&members, ReferenceTiers::all())
            .into_iter()
            .map(|i| TypeId(i as u32))
            .collect()
    }

    /// Topologically order `members` (ascending node indices) using the edges
    /// supported by `tiers`. Cycles are re-ordered recursively with one tier fewer.
    fn order_members(&self, members: &[usize], tiers: ReferenceTiers) -> Vec<usize> {
        let adjacency = self.adjacency(members, tiers);
        let components = strongly_connected_components(&adjacency);

        let mut component_of = vec![0usize; members.len()];
        for (c, component) in components.iter().enumerate() {
            for &local in component {
                component_of[local] = c;
            }
        }

        let mut successors: Vec<FxHashSet<usize>> = vec![FxHashSet::default(); components.len()];
        let mut in_degree = vec![0usize; components.len()];
        for (local, targets) in adjacency.iter().enumerate() {
            for &target in targets {
                let (from, to) = (component_of[local], component_of[target]);
                if from != to && successors[from].insert(to) {
                    in_degree[to] += 1;
                }
            }
        }

        // Unconstrained components go latest-declared first.
        let priority = |c: usize| {
            components[c]
                .iter()
                .map(|&local| members[local])
                .max()
                .unwrap_or(0)
        };
        let mut ready: BinaryHeap<(usize, Reverse<usize>)> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(c, _)| (priority(c), Reverse(c)))
            .collect();

        let mut order = Vec::with_capacity(members.len());
        while let Some((_, Reverse(c))) = ready.pop() {
            let mut component: Vec<usize> = components[c].iter().map(|&l| members[l]).collect();
            component.sort_unstable();
            if component.len() == 1 {
                order.push(component[0]);
            } else {
                order.extend(self.order_cycle(&component, tiers));
            }

            let mut next: Vec<usize> = successors[c].iter().copied().collect();
            next.sort_unstable();
            for succ in next {
                in_degree[succ] -= 1;
                if in_degree[succ] == 0 {
                    ready.push((priority(succ), Reverse(succ)));
                }
            }
        }
        order
    }

    fn order_cycle(&self, component: &[usize], tiers: ReferenceTiers) -> Vec<usize> {
        match tiers.without_lowest() {
            Some(reduced) => {
                tracing::debug!(
                    nodes = component.len(),
                    ?tiers,
                    ?reduced,
                    "static-init cycle; dropping lowest tier"
                );
                self.order_members(component, reduced)
            }
            None => {
                tracing::debug!(
                    nodes = component.len(),
                    "constructor-only cycle; using baseline order"
                );
                component.iter().rev().copied().collect()
            }
        }
    }

    /// Local adjacency lists for `members`, keeping only edges supported by `tiers`.
    fn adjacency(&self, members: &[usize], tiers: ReferenceTiers) -> Vec<Vec<usize>> {
        let mut local_of = vec![None; self.node_count];
        for (local, &node) in members.iter().enumerate() {
            local_of[node] = Some(local);
        }
        let mut adjacency = vec![Vec::new(); members.len()];
        for (&(from, to), &edge_tiers) in &self.edges {
            if !edge_tiers.intersects(tiers) {
                continue;
            }
            if let (Some(from), Some(to)) = (local_of[from.index()], local_of[to.index()]) {
                adjacency[from].push(to);
            }
        }
        adjacency
    }
}

// =============================================================================
// Tarjan's algorithm
// =============================================================================

struct TarjanState<'g> {
    adjacency: &'g [Vec<usize>],
    index_counter: usize,
    indices: Vec<Option<usize>>,
    lowlinks: Vec<usize>,
    stack: Vec<usize>,
    on_stack: Vec<bool>,
    components: Vec<Vec<usize>>,
}

/// Strongly connected components of a graph given as adjacency lists.
pub fn strongly_connected_components(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = adjacency.len();
    let mut state = TarjanState {
        adjacency,
        index_counter: 0,
        indices: vec![None; n],
        lowlinks: vec![0; n],
        stack: Vec::new(),
        on_stack: vec![false; n],
        components: Vec::new(),
    };
    for v in 0..n {
        if state.indices[v].is_none() {
            state.strongconnect(v);
        }
    }
    state.components
}

impl TarjanState<'_> {
    fn strongconnect(&mut self, v: usize) {
        self.indices[v] = Some(self.index_counter);
        self.lowlinks[v] = self.index_counter;
        self.index_counter += 1;

        self.stack.push(v);
        self.on_stack[v] = true;

        let adjacency = self.adjacency;
        for &w in &adjacency[v] {
            match self.indices[w] {
                None => {
                    self.strongconnect(w);
                    self.lowlinks[v] = self.lowlinks[v].min(self.lowlinks[w]);
                }
                Some(w_index) if self.on_stack[w] => {
                    self.lowlinks[v] = self.lowlinks[v].min(w_index);
                }
                Some(_) => {}
            }
        }

        // Root of SCC
        if Some(self.lowlinks[v]) == self.indices[v] {
            let mut component = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack[w] = false;
                component.push(w);
                if w == v {
                    break;
                }
            }
            self.components.push(component);
        }
    }
}

#[cfg(test)]
#[path = "../tests/scheduler.rs"]
mod tests;
