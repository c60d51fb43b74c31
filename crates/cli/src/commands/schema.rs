//! Schema listing command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use nearlite_core::schema_registry;

#[derive(Args)]
pub struct SchemaArgs {
    /// Show only this type
    type_name: Option<String>,
}

pub fn run(args: SchemaArgs) -> Result<()> {
    let registry = schema_registry();

    match args.type_name {
        Some(name) => {
            let layout = registry.get(&name)?;
            println!("{} = {}", name.bold(), layout);
        }
        None => {
            for name in registry.type_names() {
                println!("{} = {}", name.bold(), registry.get(name)?);
            }
        }
    }

    Ok(())
}
