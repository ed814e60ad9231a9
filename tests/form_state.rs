use nba_scout_terminal::artifacts::load_context;
use nba_scout_terminal::pipeline::CompetitionLevel;
use nba_scout_terminal::state::{AppState, FormField};

fn focus_on(state: &mut AppState, field: FormField) {
    while state.focused_field() != field {
        state.select_next();
    }
}

#[test]
fn focus_wraps_in_both_directions() {
    let mut state = AppState::new();
    assert_eq!(state.focused_field(), FormField::Age);
    state.select_prev();
    assert_eq!(state.focused_field(), FormField::Level);
    state.select_next();
    assert_eq!(state.focused_field(), FormField::Age);
}

#[test]
fn adjustment_clamps_at_field_bounds() {
    let mut state = AppState::new();

    focus_on(&mut state, FormField::Age);
    for _ in 0..100 {
        state.adjust(1, false);
    }
    assert_eq!(state.form.age, 45);
    for _ in 0..100 {
        state.adjust(-1, false);
    }
    assert_eq!(state.form.age, 15);

    focus_on(&mut state, FormField::Rebounds);
    for _ in 0..40 {
        state.adjust(1, true);
    }
    assert_eq!(state.form.rebounds, 25.0);
    for _ in 0..40 {
        state.adjust(-1, true);
    }
    assert_eq!(state.form.rebounds, 0.0);

    focus_on(&mut state, FormField::UsagePct);
    for _ in 0..100 {
        state.adjust(-1, false);
    }
    assert_eq!(state.form.usage_pct, 0.05);
}

#[test]
fn fine_float_steps_do_not_drift() {
    let mut state = AppState::new();
    focus_on(&mut state, FormField::TrueShootingPct);
    for _ in 0..10 {
        state.adjust(1, false);
    }
    for _ in 0..10 {
        state.adjust(-1, false);
    }
    assert_eq!(state.form.true_shooting_pct, 0.55);
}

#[test]
fn level_row_cycles_through_the_enum() {
    let mut state = AppState::new();
    focus_on(&mut state, FormField::Level);
    assert_eq!(state.form.competition_level, CompetitionLevel::Nba);
    state.adjust(1, false);
    assert_eq!(state.form.competition_level, CompetitionLevel::EuroLeague);
    state.adjust(-1, false);
    state.adjust(-1, false);
    assert_eq!(
        state.form.competition_level,
        CompetitionLevel::Departemental
    );
}

#[test]
fn submit_records_a_projection_and_a_log_line() {
    let ctx = load_context().expect("bundled artifacts should load");
    let mut state = AppState::new();
    state.submit(&ctx);

    let projection = state.projection.expect("submission should project");
    assert!(projection.score.is_finite());
    assert!(state.logs.iter().any(|l| l.starts_with("[INFO]")));
}

#[test]
fn reset_restores_defaults_and_clears_projection() {
    let ctx = load_context().expect("bundled artifacts should load");
    let mut state = AppState::new();
    focus_on(&mut state, FormField::Assists);
    state.adjust(1, true);
    state.submit(&ctx);
    assert!(state.projection.is_some());

    state.reset();
    assert_eq!(state.form.assists, 2.0);
    assert!(state.projection.is_none());
}

#[test]
fn log_buffer_stays_bounded() {
    let mut state = AppState::new();
    for i in 0..200 {
        state.push_log(format!("[INFO] line {i}"));
    }
    assert!(state.logs.len() <= 50);
    assert_eq!(state.logs.last().map(String::as_str), Some("[INFO] line 199"));
}
