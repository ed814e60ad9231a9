use crate::artifacts::ModelContext;
use crate::pipeline::{Projection, RawInput, run_projection};

/// One row of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Age,
    Height,
    Weight,
    GamesPlayed,
    Rebounds,
    Assists,
    UsagePct,
    TrueShootingPct,
    Level,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::Age,
        FormField::Height,
        FormField::Weight,
        FormField::GamesPlayed,
        FormField::Rebounds,
        FormField::Assists,
        FormField::UsagePct,
        FormField::TrueShootingPct,
        FormField::Level,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Age => "Age",
            FormField::Height => "Height (cm)",
            FormField::Weight => "Weight (kg)",
            FormField::GamesPlayed => "Games played / season",
            FormField::Rebounds => "Rebounds (avg)",
            FormField::Assists => "Assists (avg)",
            FormField::UsagePct => "Usage %",
            FormField::TrueShootingPct => "True Shooting %",
            FormField::Level => "Competition level",
        }
    }
}

pub struct AppState {
    pub form: RawInput,
    pub focus: usize,
    pub projection: Option<Projection>,
    pub logs: Vec<String>,
    pub help_overlay: bool,
}

const MAX_LOGS: usize = 50;

impl AppState {
    pub fn new() -> Self {
        Self {
            form: RawInput::default(),
            focus: 0,
            projection: None,
            logs: Vec::new(),
            help_overlay: false,
        }
    }

    pub fn focused_field(&self) -> FormField {
        FormField::ALL[self.focus]
    }

    pub fn select_next(&mut self) {
        self.focus = (self.focus + 1) % FormField::ALL.len();
    }

    pub fn select_prev(&mut self) {
        self.focus = (self.focus + FormField::ALL.len() - 1) % FormField::ALL.len();
    }

    /// Steps the focused field up or down, clamped to the field's
    /// domain. The clamping is what lets the pipeline skip range
    /// checks entirely.
    pub fn adjust(&mut self, dir: i32, coarse: bool) {
        let field = self.focused_field();
        let form = &mut self.form;
        match field {
            FormField::Age => form.age = step_u32(form.age, dir, 1, 15, 45),
            FormField::Height => {
                let step = if coarse { 5.0 } else { 1.0 };
                form.height_cm = step_f64(form.height_cm, dir, step, 150.0, 240.0, 10.0);
            }
            FormField::Weight => {
                let step = if coarse { 5.0 } else { 1.0 };
                form.weight_kg = step_f64(form.weight_kg, dir, step, 50.0, 160.0, 10.0);
            }
            FormField::GamesPlayed => {
                let step = if coarse { 10 } else { 1 };
                form.games_played = step_u32(form.games_played, dir, step, 1, 82);
            }
            FormField::Rebounds => {
                let step = if coarse { 1.0 } else { 0.1 };
                form.rebounds = step_f64(form.rebounds, dir, step, 0.0, 25.0, 10.0);
            }
            FormField::Assists => {
                let step = if coarse { 1.0 } else { 0.1 };
                form.assists = step_f64(form.assists, dir, step, 0.0, 20.0, 10.0);
            }
            FormField::UsagePct => {
                let step = if coarse { 0.05 } else { 0.01 };
                form.usage_pct = step_f64(form.usage_pct, dir, step, 0.05, 0.45, 100.0);
            }
            FormField::TrueShootingPct => {
                let step = if coarse { 0.05 } else { 0.01 };
                form.true_shooting_pct =
                    step_f64(form.true_shooting_pct, dir, step, 0.30, 0.85, 100.0);
            }
            FormField::Level => {
                form.competition_level = if dir >= 0 {
                    form.competition_level.next()
                } else {
                    form.competition_level.prev()
                };
            }
        }
    }

    pub fn reset(&mut self) {
        self.form = RawInput::default();
        self.projection = None;
        self.push_log("[INFO] Form reset to defaults");
    }

    pub fn submit(&mut self, ctx: &ModelContext) {
        match run_projection(&self.form, ctx) {
            Ok(projection) => {
                self.projection = Some(projection);
                self.push_log(format!(
                    "[INFO] Projection: {:.2} pts / game ({})",
                    projection.score,
                    self.form.competition_level.label()
                ));
            }
            Err(err) => {
                self.projection = None;
                self.push_log("[WARN] Projection failed: internal error");
                self.push_log(format!("[WARN] {err:#}"));
            }
        }
    }

    pub fn value_text(&self, field: FormField) -> String {
        let form = &self.form;
        match field {
            FormField::Age => format!("{}", form.age),
            FormField::Height => format!("{:.1}", form.height_cm),
            FormField::Weight => format!("{:.1}", form.weight_kg),
            FormField::GamesPlayed => format!("{}", form.games_played),
            FormField::Rebounds => format!("{:.1}", form.rebounds),
            FormField::Assists => format!("{:.1}", form.assists),
            FormField::UsagePct => format!("{:.2}", form.usage_pct),
            FormField::TrueShootingPct => format!("{:.2}", form.true_shooting_pct),
            FormField::Level => form.competition_level.label().to_string(),
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
        if self.logs.len() > MAX_LOGS {
            let excess = self.logs.len() - MAX_LOGS;
            self.logs.drain(..excess);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn step_u32(value: u32, dir: i32, step: u32, min: u32, max: u32) -> u32 {
    let next = if dir >= 0 {
        value.saturating_add(step)
    } else {
        value.saturating_sub(step)
    };
    next.clamp(min, max)
}

// `quantum` snaps the result back onto the step grid (1/quantum units)
// so repeated float steps cannot drift.
fn step_f64(value: f64, dir: i32, step: f64, min: f64, max: f64, quantum: f64) -> f64 {
    let next = value + step * dir.signum() as f64;
    ((next * quantum).round() / quantum).clamp(min, max)
}
