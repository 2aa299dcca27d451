//! Command-line interface for harmony_match
//!
//! Matches two saved analysis replies and prints the ranked matches

use harmony_match::{
    AnalysisResponse, AnalysisSummary, Harmony, ImageDimensions, MatchEngine, MatcherConfig,
    PreviewSize, Sensitivity,
};
use std::{env, path::Path, process, time::Instant};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut sensitivity = None;
    let mut harmony = None;
    let mut config_path = None;
    let mut source_size = ImageDimensions::new(800.0, 600.0);
    let mut preview = PreviewSize::new(320.0, 220.0);
    let mut replies = Vec::new();

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--sensitivity" => {
                sensitivity = Some(parse_or_exit::<Sensitivity>(value_after(&args, i)));
                i += 1;
            }
            "--harmony" => {
                harmony = Some(parse_or_exit::<Harmony>(value_after(&args, i)));
                i += 1;
            }
            "--config" => {
                config_path = Some(value_after(&args, i).to_string());
                i += 1;
            }
            "--source-size" => {
                let (w, h) = parse_size(value_after(&args, i));
                source_size = ImageDimensions::new(w, h);
                i += 1;
            }
            "--preview" => {
                let (w, h) = parse_size(value_after(&args, i));
                preview = PreviewSize::new(w, h);
                i += 1;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => replies.push(arg.to_string()),
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    if replies.len() != 2 {
        print_help(&args[0]);
        process::exit(1);
    }

    let config = match config_path {
        Some(path) => MatcherConfig::from_json_file(Path::new(&path)).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => MatcherConfig::default(),
    };
    let sensitivity = sensitivity.unwrap_or(config.sensitivity);

    let load = |path: &str| {
        AnalysisResponse::from_json_file(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        })
    };
    let garment = load(&replies[0]).colors;
    let rack = load(&replies[1]).colors;

    let fallback = config.fallback_grid.source_positions(source_size);
    let engine = MatchEngine::with_config(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let start = Instant::now();
    match engine.find_matches(&garment, &rack, &fallback, sensitivity, source_size, preview) {
        Ok(matches) => {
            let summary =
                AnalysisSummary::build(&garment, &rack, matches, start.elapsed()).filtered(harmony);
            print_summary(&summary);
        }
        Err(error) => {
            eprintln!("Matching failed: {}", error);
            process::exit(1);
        }
    }
}

fn value_after(args: &[String], i: usize) -> &str {
    match args.get(i + 1) {
        Some(value) => value,
        None => {
            eprintln!("Error: {} needs a value", args[i]);
            process::exit(1);
        }
    }
}

fn parse_or_exit<T>(value: &str) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    })
}

fn parse_size(value: &str) -> (f64, f64) {
    let parsed = value
        .split_once('x')
        .and_then(|(w, h)| Some((w.trim().parse().ok()?, h.trim().parse().ok()?)));
    parsed.unwrap_or_else(|| {
        eprintln!("Error: expected WIDTHxHEIGHT, got '{}'", value);
        process::exit(1);
    })
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <garment.json> <rack.json>", program_name);
    eprintln!();
    eprintln!("Match the colors of two saved analysis replies.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --sensitivity LEVEL   low, medium or high (default: from config)");
    eprintln!("  --harmony KIND        Keep only monochromatic, analogous, triadic or complementary");
    eprintln!("  --source-size WxH     Pixel size of the rack image (default: 800x600)");
    eprintln!("  --preview WxH         Preview size markers are placed on (default: 320x220)");
    eprintln!("  --config FILE         Matcher configuration JSON");
    eprintln!("  --help, -h            Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} saree.json rack.json", program_name);
    eprintln!("  {} --sensitivity high --harmony complementary saree.json rack.json", program_name);
}

fn print_summary(summary: &AnalysisSummary) {
    // Print JSON to stdout for programmatic use
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing summary: {}", e),
    }

    // Print summary to stderr for human reading
    eprintln!();
    eprintln!("Match Summary:");
    eprintln!("  Overall harmony: {} ({})", summary.overall_harmony, summary.overall_harmony.use_case());
    eprintln!("  Matches: {}", summary.matches.len());
    for m in &summary.matches {
        eprintln!(
            "  #{:<3} {} -> {} {:>3}%  {:<13} at ({:.0}, {:.0})  {}",
            m.id,
            m.source_color,
            m.target_color,
            m.display_confidence(),
            m.harmony,
            m.position.bounded.x,
            m.position.bounded.y,
            m.reasoning_text()
        );
    }
    eprintln!("  Completed in {}ms", summary.processing_time_ms);

    if summary.matches.is_empty() {
        eprintln!("  No matches found. Try different images or a lower sensitivity.");
    }
}
