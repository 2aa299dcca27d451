//! Integration tests for the complete matching workflow
//!
//! These tests drive the public API the way a caller would:
//! - Decode analysis service replies from JSON
//! - Run the match engine over both color sets
//! - Check the ranking, placement and deduplication guarantees
//! - Summarize and filter the results

use std::time::{Duration, Instant};

use harmony_match::{
    classify_harmony, fallback_positions, filter_by_harmony, find_matches, AnalysisResponse,
    AnalysisScheduler, AnalysisSummary, ColorNameIndex, ColorSample, FallbackGrid, Harmony,
    ImageDimensions,
    MatchEngine, MatchError, MatcherConfig, Point, PreviewSize, Sensitivity,
};

const GARMENT_REPLY: &str = r##"{
    "colors": [
        {"hex": "#ff0000", "positions": [{"x": 120, "y": 80}], "colorName": "Red"},
        {"hex": "#808080", "positions": [], "colorName": "Gray"},
        {"hex": "#1e3a8a", "positions": [{"x": 10, "y": 10}]},
        {"hex": "bad", "positions": []}
    ]
}"##;

const RACK_REPLY: &str = r##"{
    "colors": [
        {"hex": "#00ffff", "positions": [{"x": 100, "y": 100}, {"x": 700, "y": 500}], "colorName": "Cyan"},
        {"hex": "#FF1010", "positions": [{"x": 400, "y": 300}, {"x": 1500, "y": 1100}]},
        {"hex": "#a0a0a0", "positions": [{"x": 1200, "y": 200}, {"x": 300, "y": 900}, {"x": 900, "y": 900}]},
        {"hex": "#2f4f9f", "positions": []},
        {"hex": "#12345", "positions": [{"x": 50, "y": 50}]},
        {"hex": "#ffd700", "positions": [{"x": 1000, "y": 700}]}
    ]
}"##;

fn source_dims() -> ImageDimensions {
    ImageDimensions::new(1600.0, 1200.0)
}

fn preview() -> PreviewSize {
    PreviewSize::new(320.0, 220.0)
}

fn run(sensitivity: Sensitivity) -> (Vec<ColorSample>, Vec<ColorSample>, Vec<harmony_match::Match>) {
    let garment = AnalysisResponse::from_json_str(GARMENT_REPLY).unwrap().colors;
    let rack = AnalysisResponse::from_json_str(RACK_REPLY).unwrap().colors;
    let fallback = FallbackGrid::default().source_positions(source_dims());
    let matches = find_matches(&garment, &rack, &fallback, sensitivity, source_dims(), preview()).unwrap();
    (garment, rack, matches)
}

// ============================================================================
// Result Guarantees
// ============================================================================

#[test]
fn test_every_match_clears_minimum_confidence() {
    for sensitivity in [Sensitivity::Low, Sensitivity::Medium, Sensitivity::High] {
        let (_, _, matches) = run(sensitivity);
        assert!(!matches.is_empty(), "{} should find matches", sensitivity);
        for m in &matches {
            assert!(m.confidence > 70.0, "match {} has confidence {}", m.id, m.confidence);
            assert!(m.confidence <= 100.0);
        }
    }
}

#[test]
fn test_results_are_capped_and_sorted() {
    let (_, _, matches) = run(Sensitivity::Low);
    assert!(matches.len() <= 8);
    assert!(matches.windows(2).all(|w| w[0].confidence >= w[1].confidence));
}

#[test]
fn test_markers_stay_inside_preview_margins() {
    let preview = preview();
    for sensitivity in [Sensitivity::Low, Sensitivity::Medium, Sensitivity::High] {
        let (_, _, matches) = run(sensitivity);
        for m in &matches {
            let p = m.position.bounded;
            assert!(p.x >= 25.0 && p.x <= preview.width - 25.0, "x out of bounds: {:?}", p);
            assert!(p.y >= 25.0 && p.y <= preview.height - 25.0, "y out of bounds: {:?}", p);
        }
    }
}

#[test]
fn test_no_two_markers_overlap() {
    for sensitivity in [Sensitivity::Low, Sensitivity::Medium, Sensitivity::High] {
        let (_, _, matches) = run(sensitivity);
        for (i, a) in matches.iter().enumerate() {
            for b in &matches[i + 1..] {
                assert!(a.position.scaled.distance(&b.position.scaled) >= 30.0);
                assert!(a.position.bounded.distance(&b.position.bounded) >= 30.0);
            }
        }
    }
}

#[test]
fn test_ids_are_unique() {
    let (_, _, matches) = run(Sensitivity::Low);
    let mut ids: Vec<u32> = matches.iter().map(|m| m.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), matches.len());
}

#[test]
fn test_malformed_colors_never_appear() {
    let (_, _, matches) = run(Sensitivity::Low);
    for m in &matches {
        assert_ne!(m.source_color, "bad");
        assert_ne!(m.target_color, "#12345");
    }
}

// ============================================================================
// Concrete Scenarios
// ============================================================================

#[test]
fn test_exact_complement_scores_95() {
    let garment = vec![ColorSample::new("#ff0000")];
    let rack = vec![ColorSample::new("#00ffff").with_positions([Point::new(800.0, 600.0)])];

    let matches = find_matches(&garment, &rack, &[], Sensitivity::Medium, source_dims(), preview()).unwrap();

    assert_eq!(matches.len(), 1);
    assert!((matches[0].confidence - 95.0).abs() < 1e-4);
    assert_eq!(matches[0].harmony, Harmony::Complementary);
    assert!(matches[0].reasoning_text().contains("Complementary color match"));
    // Unnamed targets are labelled with their own match id
    assert_eq!(matches[0].id, 1);
    assert_eq!(matches[0].label, "Rack Color 1");
}

#[test]
fn test_low_saturation_pair_scores_at_least_80() {
    let garment = vec![ColorSample::new("#808080")];
    let rack = vec![ColorSample::new("#a0a0a0").with_positions([Point::new(800.0, 600.0)])];

    for sensitivity in [Sensitivity::Low, Sensitivity::Medium, Sensitivity::High] {
        let matches = find_matches(&garment, &rack, &[], sensitivity, source_dims(), preview()).unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].confidence >= 80.0);
        assert!(matches[0]
            .reasoning
            .iter()
            .any(|r| r == "Neutral tone combination"));
    }
}

#[test]
fn test_empty_color_sets() {
    let colors = vec![ColorSample::new("#ff0000").with_positions([Point::new(1.0, 1.0)])];
    let none: Vec<ColorSample> = Vec::new();

    assert!(find_matches(&none, &colors, &[], Sensitivity::Medium, source_dims(), preview())
        .unwrap()
        .is_empty());
    assert!(find_matches(&colors, &none, &[], Sensitivity::Medium, source_dims(), preview())
        .unwrap()
        .is_empty());
}

#[test]
fn test_near_positions_keep_first_discovered() {
    // Both target colors match red; their markers land 5 preview units apart
    let garment = vec![ColorSample::new("#ff0000")];
    let rack = vec![
        ColorSample::new("#fa0505").with_positions([Point::new(800.0, 600.0)]),
        ColorSample::new("#ff0000").with_positions([Point::new(825.0, 600.0)]),
    ];

    let matches = find_matches(&garment, &rack, &[], Sensitivity::Medium, source_dims(), preview()).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].target_color, "#fa0505");
}

#[test]
fn test_zero_dimensions_are_a_configuration_error() {
    let garment = vec![ColorSample::new("#ff0000")];
    let err = find_matches(
        &garment,
        &garment,
        &[],
        Sensitivity::Medium,
        ImageDimensions::new(0.0, 0.0),
        preview(),
    )
    .unwrap_err();

    assert!(err.is_configuration_error());
    match err {
        MatchError::InvalidDimensions { width, height } => {
            assert_eq!(width, 0.0);
            assert_eq!(height, 0.0);
        }
        other => panic!("Expected InvalidDimensions, got: {:?}", other),
    }
}

#[test]
fn test_fallback_grid_used_for_colors_without_positions() {
    let garment = vec![ColorSample::new("#2f4f9f")];
    let rack = vec![ColorSample::new("#2f4f9f")];
    let preview = preview();
    let grid = fallback_positions(preview);

    // Grid points are preview coordinates, so use the preview as source space
    let matches = find_matches(
        &garment,
        &rack,
        &grid,
        Sensitivity::Medium,
        ImageDimensions::new(preview.width, preview.height),
        preview,
    )
    .unwrap();

    assert_eq!(matches.len(), 5);
    for (m, expected) in matches.iter().zip(&grid) {
        assert_eq!(m.position.raw, *expected);
    }
}

#[test]
fn test_source_space_fallback_grid_spreads_markers() {
    let garment = vec![ColorSample::new("#2f4f9f")];
    let rack = vec![ColorSample::new("#2f4f9f")];
    let source = ImageDimensions::new(800.0, 600.0);
    let grid = FallbackGrid::default().source_positions(source);

    let matches = find_matches(&garment, &rack, &grid, Sensitivity::Medium, source, preview()).unwrap();

    // None of the five markers are pushed into the margin and merged
    assert_eq!(matches.len(), 5);
    for m in &matches {
        assert_eq!(m.position.scaled, m.position.bounded);
    }
}

#[test]
fn test_saturation_exactly_20_is_not_neutral() {
    // #060609 sits exactly on the neutral boundary and is far from green
    let garment = vec![ColorSample::new("#060609")];
    let rack = vec![ColorSample::new("#00ff00").with_positions([Point::new(800.0, 600.0)])];

    for sensitivity in [Sensitivity::Low, Sensitivity::Medium, Sensitivity::High] {
        let matches = find_matches(&garment, &rack, &[], sensitivity, source_dims(), preview()).unwrap();
        assert!(matches.is_empty(), "{} matched {:?}", sensitivity, matches);
    }
}

// ============================================================================
// Summary and Filtering
// ============================================================================

#[test]
fn test_summary_over_full_run() {
    let (garment, rack, matches) = run(Sensitivity::Medium);
    let count = matches.len();
    let summary = AnalysisSummary::build(&garment, &rack, matches, Duration::from_millis(12));

    assert_eq!(summary.matches.len(), count);
    assert_eq!(summary.reasoning.len(), count);
    assert_eq!(summary.dominant_colors.len(), 4);
    assert_eq!(summary.color_palette.len(), 6);
    assert_eq!(summary.source_descriptions[0], "Red (#ff0000)");

    let all: Vec<&str> = garment.iter().chain(&rack).map(|c| c.hex.as_str()).collect();
    assert_eq!(summary.overall_harmony, classify_harmony(&all));

    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"overall_harmony\""));
}

#[test]
fn test_harmony_filter_keeps_only_selected() {
    let (_, _, matches) = run(Sensitivity::Low);
    let total = matches.len();

    let mut seen = 0;
    for harmony in Harmony::ALL {
        let kept = filter_by_harmony(matches.clone(), Some(harmony));
        assert!(kept.iter().all(|m| m.harmony == harmony));
        seen += kept.len();
    }
    assert_eq!(seen, total);
}

#[test]
fn test_name_index_from_replies() {
    let (garment, rack, matches) = run(Sensitivity::Low);
    let mut index = ColorNameIndex::from_samples(garment.iter().chain(&rack));
    index.extend_from_matches(&matches);

    assert_eq!(index.get("#FF0000"), Some("Red"));
    assert_eq!(index.get("00FFFF"), Some("Cyan"));
    assert_eq!(index.get("#ff1010"), None);
}

// ============================================================================
// Configuration and Scheduling
// ============================================================================

#[test]
fn test_engine_respects_config() {
    let config: MatcherConfig =
        serde_json::from_str(r#"{"max_matches": 2, "max_positions_per_color": 1}"#).unwrap();
    config.validate().unwrap();
    let engine = MatchEngine::with_config(config).unwrap();

    let garment = AnalysisResponse::from_json_str(GARMENT_REPLY).unwrap().colors;
    let rack = AnalysisResponse::from_json_str(RACK_REPLY).unwrap().colors;
    let matches = engine
        .find_matches(&garment, &rack, &[], Sensitivity::Low, source_dims(), preview())
        .unwrap();

    assert!(matches.len() <= 2);
}

#[test]
fn test_scheduler_drives_a_single_run() {
    let config = MatcherConfig::default();
    let mut scheduler = AnalysisScheduler::from_config(&config);
    let start = Instant::now();

    // A burst of changes only triggers once
    scheduler.inputs_changed(start);
    scheduler.inputs_changed(start + Duration::from_millis(200));
    scheduler.inputs_changed(start + Duration::from_millis(400));

    let mut runs = 0;
    for tick in 0..40 {
        let now = start + Duration::from_millis(tick * 50);
        if scheduler.poll(now) {
            runs += 1;
            let (_, _, matches) = run(config.sensitivity);
            assert!(!matches.is_empty());
            scheduler.complete(now);
        }
    }
    assert_eq!(runs, 1);
}
