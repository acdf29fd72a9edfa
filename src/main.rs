use std::collections::HashMap;
use std::env;
use std::process::ExitCode;

use store_route_planner::models::{Product, ProductId, ShoppingList, StoreMap};
use store_route_planner::utils::init_map::{
    demo_store, load_catalog, load_shopping_list, load_store_map,
};
use store_route_planner::utils::visualize::RenderedRoute;
use store_route_planner::{PlannerConfig, RoutePlanner, Strategy};
use tracing_subscriber::EnvFilter;

type Inputs = (StoreMap, HashMap<ProductId, Product>, ShoppingList);

fn load_inputs(args: &[String]) -> store_route_planner::Result<Inputs> {
    match args {
        [map_path, catalog_path, list_path] => Ok((
            load_store_map(map_path)?,
            load_catalog(catalog_path)?,
            load_shopping_list(list_path)?,
        )),
        _ => {
            let (map, catalog) = demo_store(1);
            let list: ShoppingList = [(1, 2), (2, 1), (3, 1), (4, 1)].into_iter().collect();
            Ok((map, catalog, list))
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match PlannerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid planner configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // usage: store_route_planner [<map.json> <catalog.json> <shopping_list.json>]
    let args: Vec<String> = env::args().skip(1).collect();
    let (map, catalog, shopping_list) = match load_inputs(&args) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("Error loading store data: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let grid = match map.build_grid(config.grid_width, config.grid_height) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Invalid store map: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("\nShopping List:");
    for item in &shopping_list.items {
        let name = catalog
            .get(&item.product_id)
            .map_or("unknown", |product| product.name.as_str());
        println!("  Product {} ({}): {} units", item.product_id, name, item.quantity);
    }

    let mut failed = false;
    for strategy in [Strategy::AStar, Strategy::BreadthFirst, Strategy::DepthFirst] {
        let planner = match RoutePlanner::new(PlannerConfig {
            strategy,
            ..config.clone()
        }) {
            Ok(planner) => planner,
            Err(e) => {
                eprintln!("Invalid planner configuration: {}", e);
                return ExitCode::FAILURE;
            }
        };

        println!("\n=== Strategy: {} ===", strategy);
        match planner.plan_route(&map, &shopping_list, &catalog) {
            Ok(plan) => {
                println!("Visit order: {:?}", plan.visit_order());
                println!("Total cost: {} cells", plan.total_cost);
                if !plan.skipped.is_empty() {
                    println!("Skipped products: {:?}", plan.skipped);
                }
                print!("{}", RenderedRoute::new(&map, &grid, &plan));
                match serde_json::to_string(&plan) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Could not serialize route: {}", e),
                }
            }
            Err(e) => {
                failed = true;
                let body = e.to_body();
                eprintln!("Route planning failed [{}]: {}", body.code, body.message);
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
