use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::algorithms::access::resolve_access_point;
use crate::algorithms::optimizer::{best_order, listed_order, VisitOrder};
use crate::algorithms::PathFinder;
use crate::config::{OrderPolicy, PlannerConfig, StopLimitPolicy};
use crate::error::{PlannerError, Result};
use crate::models::{
    AccessPoint, Coordinate, Grid, ProductCatalog, ProductId, RoutePlan, RouteSegment,
    ShoppingList, StoreMap,
};
use crate::utils::cancel::CancellationToken;

/// Plans in-store shopping routes.
///
/// Holds only read-only settings and a stateless path finder, so one planner
/// can serve many requests at once; every request builds its own grid.
#[derive(Clone)]
pub struct RoutePlanner {
    config: PlannerConfig,
    finder: Arc<dyn PathFinder>,
}

impl RoutePlanner {
    /// Creates a planner using the finder selected by `config.strategy`
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        let finder = config.strategy.finder(&config);
        Ok(Self { config, finder })
    }

    /// Creates a planner around a custom path finder
    pub fn with_finder(config: PlannerConfig, finder: Arc<dyn PathFinder>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, finder })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn finder(&self) -> &dyn PathFinder {
        self.finder.as_ref()
    }

    /// Plans a route, aborting once the configured timeout (if any) has passed
    pub fn plan_route<C>(
        &self,
        map: &StoreMap,
        shopping_list: &ShoppingList,
        catalog: &C,
    ) -> Result<RoutePlan>
    where
        C: ProductCatalog + ?Sized,
    {
        let cancel = self
            .config
            .timeout()
            .map_or_else(CancellationToken::new, CancellationToken::with_timeout);
        self.plan_route_with_cancel(map, shopping_list, catalog, &cancel)
    }

    /// Plans a route through `map` that picks up every product of `shopping_list`.
    ///
    /// The entrance is located before any search runs. Products the catalog has
    /// no shelf location for are skipped and listed in the plan; a shelf with no
    /// walkable neighbour fails the whole request.
    pub fn plan_route_with_cancel<C>(
        &self,
        map: &StoreMap,
        shopping_list: &ShoppingList,
        catalog: &C,
        cancel: &CancellationToken,
    ) -> Result<RoutePlan>
    where
        C: ProductCatalog + ?Sized,
    {
        let strategy = self.config.strategy;
        let entrance = map.entrance()?;
        let grid = map.build_grid(self.config.grid_width, self.config.grid_height)?;

        let (targets, mut skipped) = shopping_list.resolve_targets(catalog);
        for product_id in &skipped {
            warn!(
                store_id = map.store_id,
                product_id, "product has no shelf location; skipping"
            );
        }

        let mut access_points = targets
            .iter()
            .map(|shelf| resolve_access_point(&grid, shelf, self.config.access_reference))
            .collect::<Result<Vec<AccessPoint>>>()?;
        self.apply_stop_limit(map, &mut access_points, &mut skipped)?;

        if access_points.is_empty() {
            info!(store_id = map.store_id, "nothing to route");
            return Ok(RoutePlan::empty(map.store_id, strategy, skipped));
        }

        let order = self.choose_order(&grid, entrance, &access_points, cancel)?;

        let mut segments = Vec::with_capacity(order.stops.len());
        let mut from = entrance;
        for stop in &order.stops {
            let path = self.finder.find_path(&grid, from, stop.location)?;
            if path.is_empty() {
                return Err(PlannerError::NoValidRoute);
            }
            debug!(
                product_id = stop.product_id,
                from = %from,
                to = %stop.location,
                cells = path.len(),
                "planned leg"
            );
            segments.push(RouteSegment::new(stop.product_id, path));
            from = stop.location;
        }

        let return_leg = if self.config.include_return_trip {
            let path = self.finder.find_path(&grid, from, entrance)?;
            if path.is_empty() {
                return Err(PlannerError::NoValidRoute);
            }
            Some(path.into_cells())
        } else {
            None
        };

        info!(
            store_id = map.store_id,
            strategy = %strategy,
            stops = segments.len(),
            evaluated = order.evaluated,
            cost = order.cost,
            "planned shopping route"
        );

        Ok(RoutePlan {
            store_id: map.store_id,
            strategy,
            segments,
            return_leg,
            total_cost: order.cost,
            skipped,
        })
    }

    /// Plans independent requests in parallel; one failure does not affect the others
    pub fn plan_many<C>(
        &self,
        requests: &[(StoreMap, ShoppingList)],
        catalog: &C,
    ) -> Vec<Result<RoutePlan>>
    where
        C: ProductCatalog + Sync + ?Sized,
    {
        requests
            .par_iter()
            .map(|(map, shopping_list)| self.plan_route(map, shopping_list, catalog))
            .collect()
    }

    fn choose_order(
        &self,
        grid: &Grid,
        entrance: Coordinate,
        access_points: &[AccessPoint],
        cancel: &CancellationToken,
    ) -> Result<VisitOrder> {
        let finder = self.finder.as_ref();
        let include_return_trip = self.config.include_return_trip;
        match self.config.order_policy {
            OrderPolicy::Exhaustive => best_order(
                grid,
                finder,
                entrance,
                access_points,
                include_return_trip,
                cancel,
            ),
            OrderPolicy::AsListed => listed_order(
                grid,
                finder,
                entrance,
                access_points,
                include_return_trip,
                cancel,
            ),
        }
    }

    fn apply_stop_limit(
        &self,
        map: &StoreMap,
        access_points: &mut Vec<AccessPoint>,
        skipped: &mut Vec<ProductId>,
    ) -> Result<()> {
        let limit = self.config.max_stops;
        if access_points.len() <= limit {
            return Ok(());
        }

        match self.config.stop_limit_policy {
            StopLimitPolicy::Reject => Err(PlannerError::TooManyStops {
                requested: access_points.len(),
                limit,
            }),
            StopLimitPolicy::Truncate => {
                let dropped = access_points.split_off(limit);
                warn!(
                    store_id = map.store_id,
                    limit,
                    dropped = dropped.len(),
                    "shopping list exceeds stop limit; truncating"
                );
                skipped.extend(dropped.into_iter().map(|point| point.product_id));
                Ok(())
            }
        }
    }
}
