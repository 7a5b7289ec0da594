use super::load_inputs;
use crudgen_introspect::MapGenerator;
use std::path::{Path, PathBuf};

pub fn run(models: &[PathBuf], json: bool, config: Option<&Path>) -> anyhow::Result<()> {
    let (model, config) = load_inputs(models, config)?;

    let map = MapGenerator::new(config).generate(&model)?;

    if json {
        println!("{}", map.to_json()?);
    } else {
        println!("Handler Map:");
        for entity in &map.entities {
            println!(
                "{} ({}) table={} key={}",
                entity.name, entity.shape_id, entity.table, entity.hash_key
            );
            for route in map.routes_for(&entity.name) {
                println!(
                    "  {:<7} {:<20} {} -> {}",
                    route.method, route.path, route.symbol, route.file
                );
            }
        }
        println!("Entities: {}", map.entities.len());
        println!("Routes: {}", map.routes.len());
    }

    Ok(())
}
