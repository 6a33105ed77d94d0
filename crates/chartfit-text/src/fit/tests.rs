use super::*;

// Heuristic measurer: 0.6em per char, 1.2em per line.
fn measurer() -> HeuristicTextMeasurer {
    HeuristicTextMeasurer::default()
}

fn style(size: f64) -> TextStyle {
    TextStyle {
        font_family: Some("Arial".to_string()),
        font_size: size,
        font_weight: None,
    }
}

#[test]
fn label_that_fits_is_returned_unchanged() {
    let out = fit_label(
        &measurer(),
        "Hello",
        &style(10.0),
        LabelBox::new(30.0),
        &FitOptions::default(),
    );
    assert_eq!(out.lines, vec!["Hello"]);
    assert_eq!(out.font_size, 10.0);
    assert_eq!(out.width, 30.0);
    assert!(!out.truncated && !out.hidden && !out.overflowing);
}

#[test]
fn wrapping_comes_before_shrinking() {
    let out = fit_label(
        &measurer(),
        "aa bb cc",
        &style(10.0),
        LabelBox::new(30.0),
        &FitOptions::default(),
    );
    assert_eq!(out.lines, vec!["aa bb", "cc"]);
    assert_eq!(out.font_size, 10.0);
    assert_eq!(out.height, 24.0);
}

#[test]
fn single_long_token_shrinks_until_it_fits() {
    let out = fit_label(
        &measurer(),
        "abcdef",
        &style(10.0),
        LabelBox::new(30.0),
        &FitOptions::default(),
    );
    assert_eq!(out.lines, vec!["abcdef"]);
    assert_eq!(out.font_size, 8.0);
    assert!(!out.truncated);
}

#[test]
fn truncates_with_ellipsis_at_min_size() {
    let out = fit_label(
        &measurer(),
        "abcdefghij",
        &style(10.0),
        LabelBox::new(30.0),
        &FitOptions::default(),
    );
    assert_eq!(out.lines, vec!["abcde\u{2026}"]);
    assert_eq!(out.font_size, 8.0);
    assert!(out.truncated);
    assert!(out.width <= 30.0);
}

#[test]
fn last_line_gets_ellipsis_when_lines_run_out() {
    let opts = FitOptions {
        min_font_size: 10.0,
        ..FitOptions::default()
    };
    let out = fit_label(
        &measurer(),
        "aa bb cc dd ee",
        &style(10.0),
        LabelBox::new(30.0),
        &opts,
    );
    assert_eq!(out.lines, vec!["aa bb", "cc d\u{2026}"]);
    assert!(out.truncated);
}

#[test]
fn height_limits_the_number_of_lines() {
    let out = fit_label(
        &measurer(),
        "aa bb cc",
        &style(10.0),
        LabelBox::with_height(30.0, 12.0),
        &FitOptions::default(),
    );
    assert_eq!(out.lines, vec!["aa bb\u{2026}"]);
    assert_eq!(out.font_size, 8.0);
    assert!((out.height - 9.6).abs() < 1e-9);
}

#[test]
fn hidden_when_even_an_ellipsis_is_too_wide() {
    let out = fit_label(
        &measurer(),
        "abc",
        &style(10.0),
        LabelBox::new(3.0),
        &FitOptions::default(),
    );
    assert!(out.hidden);
    assert!(out.lines.is_empty());
    assert!(!out.is_visible());
}

#[test]
fn degenerate_box_is_always_hidden() {
    for bx in [
        LabelBox::new(0.0),
        LabelBox::new(-5.0),
        LabelBox::new(f64::NAN),
        LabelBox::with_height(100.0, 0.0),
    ] {
        let out = fit_label(&measurer(), "a", &style(10.0), bx, &FitOptions::default());
        assert!(out.hidden, "{bx:?} should hide the label");
    }
}

#[test]
fn empty_text_is_a_zero_size_result() {
    let out = fit_label(
        &measurer(),
        "",
        &style(10.0),
        LabelBox::new(30.0),
        &FitOptions::default(),
    );
    assert!(!out.hidden);
    assert!(out.lines.is_empty());
    assert_eq!(out.width, 0.0);
    assert_eq!(out.height, 0.0);
}

#[test]
fn overflow_is_reported_when_truncation_is_disabled() {
    let opts = FitOptions {
        allow_truncate: false,
        ..FitOptions::default()
    };
    let out = fit_label(
        &measurer(),
        "abcdefghij",
        &style(10.0),
        LabelBox::new(30.0),
        &opts,
    );
    assert_eq!(out.lines, vec!["abcdefghij"]);
    assert_eq!(out.font_size, 8.0);
    assert!(out.overflowing);
    assert!(!out.truncated);
}

#[test]
fn without_wrap_a_multiline_label_is_cut_to_one_line() {
    let opts = FitOptions {
        allow_wrap: false,
        ..FitOptions::default()
    };
    let out = fit_label(
        &measurer(),
        "ab\ncd",
        &style(10.0),
        LabelBox::new(100.0),
        &opts,
    );
    assert_eq!(out.lines, vec!["ab\u{2026}"]);
    assert!(out.truncated);
}

#[test]
fn requested_size_below_minimum_is_raised() {
    let out = fit_label(
        &measurer(),
        "a",
        &style(4.0),
        LabelBox::new(100.0),
        &FitOptions::default(),
    );
    assert_eq!(out.font_size, 8.0);
}

#[test]
fn shrink_step_controls_the_decrement() {
    let opts = FitOptions {
        min_font_size: 4.0,
        shrink_step: 2.0,
        ..FitOptions::default()
    };
    // 6 chars: fits at 8px (28.8), not at 10px (36).
    let out = fit_label(
        &measurer(),
        "abcdef",
        &style(12.0),
        LabelBox::new(30.0),
        &opts,
    );
    assert_eq!(out.font_size, 8.0);
}
