//! Regions command - list the region codes accepted by `clean --region`.

use colored::Colorize;
use life_expectancy::Region;

pub fn run(countries_only: bool, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let regions = listed_regions(countries_only);

    if json_output {
        let entries: Vec<_> = regions
            .iter()
            .map(|r| {
                serde_json::json!({
                    "code": r.as_str(),
                    "aggregate": r.is_aggregate(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for region in &regions {
        if region.is_aggregate() {
            println!("{} {}", region.as_str().yellow(), "(aggregate)".dimmed());
        } else {
            println!("{}", region.as_str());
        }
    }
    println!();
    println!("{} regions", regions.len().to_string().white().bold());

    Ok(())
}

fn listed_regions(countries_only: bool) -> Vec<Region> {
    if countries_only {
        Region::actual_countries()
    } else {
        Region::ALL.to_vec()
    }
}
