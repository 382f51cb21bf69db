use std::error::Error;
use vpc_subnet_planner::check_for_duplicate_names;
use vpc_subnet_planner::declare_network_from;
use vpc_subnet_planner::load_config;
use vpc_subnet_planner::output::{plan_print, print_exports, write_layout};
use vpc_subnet_planner::subnet_entries;
use vpc_subnet_planner::LAYOUT_FILE_ENV;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default())
        .map_err(|e| format!("Error initializing log4rs: {e}"))?;
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let config = load_config()?;
    let entries = subnet_entries(&config)?;
    let layout = declare_network_from(&config, &entries);
    check_for_duplicate_names(&layout)?;

    plan_print(
        &config.vpc_cidr.network(),
        &entries,
        &config.availability_zones,
    )?;

    let layout_file = std::env::var(LAYOUT_FILE_ENV).ok();
    let path = write_layout(&layout, layout_file.as_deref())?;
    print_exports(&layout.exports());
    println!("Layout written to {path}");

    Ok(())
}
