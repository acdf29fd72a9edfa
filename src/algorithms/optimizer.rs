use rayon::prelude::*;
use std::iter;
use tracing::debug;

use crate::algorithms::PathFinder;
use crate::error::{PlannerError, Result};
use crate::models::{AccessPoint, Coordinate, Grid, Steps};
use crate::utils::cancel::CancellationToken;
use crate::utils::permutations::Permutations;

// How many permutations are scored between cancellation checks
const CANCEL_CHECK_INTERVAL: usize = 1024;

/// Chosen visiting order and what it costs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitOrder {
    /// Access points in visiting order
    pub stops: Vec<AccessPoint>,

    /// Sum of the cell counts of every leg, return leg included when requested
    pub cost: Steps,

    /// Number of candidate orders scored
    pub evaluated: usize,
}

/// Leg lengths between every ordered pair of route nodes.
///
/// Node 0 is the entrance, node `i + 1` is access point `i`. `None` marks an
/// unreachable leg.
#[derive(Debug, Clone)]
struct LegTable {
    size: usize,
    lengths: Vec<Option<Steps>>,
}

impl LegTable {
    /// Runs the finder once per ordered pair of distinct nodes, in parallel
    fn compute(
        grid: &Grid,
        finder: &dyn PathFinder,
        nodes: &[Coordinate],
        cancel: &CancellationToken,
    ) -> Result<Self> {
        let size = nodes.len();
        let lengths = (0..size * size)
            .into_par_iter()
            .map(|pair| -> Result<Option<Steps>> {
                let (from, to) = (pair / size, pair % size);
                if from == to {
                    // a search whose start is its end yields the single start cell
                    return Ok(Some(1));
                }
                cancel.check()?;
                let path = finder.find_path(grid, nodes[from], nodes[to])?;
                Ok((!path.is_empty()).then_some(path.len()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { size, lengths })
    }

    fn length(&self, from: usize, to: usize) -> Option<Steps> {
        self.lengths[from * self.size + to]
    }

    /// Cost of visiting the access points in `order`, `None` if any leg is unreachable
    fn order_cost(&self, order: &[usize], include_return_trip: bool) -> Option<Steps> {
        let mut total: Steps = 0;
        let mut from = 0;
        for &stop in order {
            total += self.length(from, stop + 1)?;
            from = stop + 1;
        }
        if include_return_trip {
            total += self.length(from, 0)?;
        }
        Some(total)
    }
}

fn route_nodes(entrance: Coordinate, points: &[AccessPoint]) -> Vec<Coordinate> {
    iter::once(entrance)
        .chain(points.iter().map(|point| point.location))
        .collect()
}

/// Finds the cheapest order in which to visit `points`, starting at the entrance.
///
/// Every one of the `n!` orders is scored, so this is only viable for small
/// shopping lists; callers cap `n`. An order with an unreachable leg is never
/// chosen. On equal cost the first order generated wins, and the input order is
/// generated first. Fails with `NoValidRoute` when every order has an
/// unreachable leg.
pub fn best_order(
    grid: &Grid,
    finder: &dyn PathFinder,
    entrance: Coordinate,
    points: &[AccessPoint],
    include_return_trip: bool,
    cancel: &CancellationToken,
) -> Result<VisitOrder> {
    let nodes = route_nodes(entrance, points);
    let legs = LegTable::compute(grid, finder, &nodes, cancel)?;

    let mut best: Option<(Steps, Vec<usize>)> = None;
    let mut evaluated = 0;

    for order in Permutations::new(points.len()) {
        if evaluated % CANCEL_CHECK_INTERVAL == 0 {
            cancel.check()?;
        }
        evaluated += 1;

        let Some(cost) = legs.order_cost(&order, include_return_trip) else {
            continue;
        };
        if best.as_ref().map_or(true, |(best_cost, _)| cost < *best_cost) {
            best = Some((cost, order));
        }
    }

    let (cost, order) = best.ok_or(PlannerError::NoValidRoute)?;
    debug!(
        finder = finder.name(),
        stops = points.len(),
        evaluated,
        cost,
        "selected visit order"
    );

    Ok(VisitOrder {
        stops: order.into_iter().map(|index| points[index]).collect(),
        cost,
        evaluated,
    })
}

/// Scores the points in the order given, without searching other orders
pub fn listed_order(
    grid: &Grid,
    finder: &dyn PathFinder,
    entrance: Coordinate,
    points: &[AccessPoint],
    include_return_trip: bool,
    cancel: &CancellationToken,
) -> Result<VisitOrder> {
    let nodes = route_nodes(entrance, points);
    let legs = LegTable::compute(grid, finder, &nodes, cancel)?;

    let order: Vec<usize> = (0..points.len()).collect();
    let cost = legs
        .order_cost(&order, include_return_trip)
        .ok_or(PlannerError::NoValidRoute)?;

    Ok(VisitOrder {
        stops: points.to_vec(),
        cost,
        evaluated: 1,
    })
}
