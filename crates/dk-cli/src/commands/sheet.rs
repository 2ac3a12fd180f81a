use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use dk_core::{Resource, Tier, catalog};

pub fn run(share: &str) -> Result<(), String> {
    let (props, tree) = super::load_character(Some(share))?;

    println!("  {}", "Stats".bold().underline());

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Tier", "Points", "Value", "Description"]);

    for stat in catalog().iter() {
        let modifier = tree.modifier(stat.name).map_err(|e| e.to_string())?;
        let points = tree.points(stat.name).map_err(|e| e.to_string())?;
        let name = match stat.tier {
            Tier::Level => stat.name.to_string(),
            Tier::Realm => format!("  {}", stat.name),
            Tier::Attribute => format!("    {}", stat.name),
            Tier::Skill => format!("      {}", stat.name),
        };
        let value = if modifier.level_capped {
            format!("{} (capped)", modifier.value)
        } else {
            modifier.value.to_string()
        };
        let summary = if stat.summary.len() > 60 {
            format!("{}...", &stat.summary[..57])
        } else {
            stat.summary.to_string()
        };
        table.add_row(vec![
            name,
            stat.tier.to_string(),
            points.to_string(),
            value,
            summary,
        ]);
    }
    println!("{table}");

    let unallocated = tree
        .unallocated_points("Level")
        .map_err(|e| e.to_string())?;
    if unallocated != 0 {
        println!("  {unallocated} unallocated Level point(s)");
    }

    println!();
    println!("  {}", "Resources".bold().underline());

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Resource", "Current", "Maximum", "Breakdown"]);

    for resource in Resource::ALL {
        let state = resource.state(&tree, &props).map_err(|e| e.to_string())?;
        let max = resource.maximum(&tree).map_err(|e| e.to_string())?;
        table.add_row(vec![
            resource.display_name().to_string(),
            state.current.to_string(),
            state.max.to_string(),
            max.breakdown,
        ]);
    }
    println!("{table}");

    Ok(())
}
