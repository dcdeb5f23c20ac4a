use super::load_catalog;
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum AgentsSubcommand {
    /// List registered agents
    List,

    /// Show one agent's descriptor and instructions
    Show {
        /// Agent name
        name: String,
    },
}

pub fn run(root: &Path, subcmd: AgentsSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        AgentsSubcommand::List => list(root, json),
        AgentsSubcommand::Show { name } => show(root, &name, json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(root)?;
    let agents = catalog.agents();

    if json {
        let out: Vec<_> = agents.iter().collect();
        return print_json(&out);
    }

    if agents.is_empty() {
        println!("No agents.");
        return Ok(());
    }

    let rows = agents
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                a.model.clone().unwrap_or_else(|| "-".into()),
                a.tool_capabilities
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(","),
            ]
        })
        .collect();
    print_table(&["NAME", "MODEL", "TOOLS"], rows);
    Ok(())
}

fn show(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(root)?;
    let agent = catalog
        .agents()
        .find_by_name(name)
        .with_context(|| format!("cannot show agent '{name}'"))?;

    if json {
        return print_json(agent);
    }

    println!("Name:        {}", agent.name);
    println!("Description: {}", agent.trigger_description);
    if let Some(model) = &agent.model {
        println!("Model:       {model}");
    }
    if !agent.tool_capabilities.is_empty() {
        let tools: Vec<&str> = agent.tool_capabilities.iter().map(String::as_str).collect();
        println!("Tools:       {}", tools.join(", "));
    }
    println!("Source:      {}", agent.path.display());
    if !agent.instructions.is_empty() {
        println!("\n{}", agent.instructions);
    }
    Ok(())
}
