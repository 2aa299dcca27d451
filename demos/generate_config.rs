//! Generate the default matcher configuration file
//!
//! Creates a JSON config with all default parameters

use harmony_match::MatcherConfig;
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} config/matcher.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = MatcherConfig::default();

    match config.to_json_file(output_path) {
        Ok(_) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!("  Sensitivity: {} (distance < {:.0})",
                     config.sensitivity,
                     config.sensitivity.threshold());
            eprintln!("  Matches: top {}, up to {} positions per color",
                     config.max_matches,
                     config.max_positions_per_color);
            eprintln!("  Markers: margin {:.0}, merged within {:.0}",
                     config.marker_margin,
                     config.dedup_distance);
            eprintln!("  Fallback grid: {}x{}",
                     config.fallback_grid.rows,
                     config.fallback_grid.columns);
            eprintln!("  Debounce: {}ms", config.debounce_ms);
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
