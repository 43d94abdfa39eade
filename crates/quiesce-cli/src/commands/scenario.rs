use clap::{Subcommand, ValueEnum};
use quiesce_core::{Action, ActiveItem, EmitterConfig, Scenario, Step};

#[derive(Subcommand)]
pub enum ScenarioAction {
    /// Print a ready-to-edit example scenario as JSON
    Example {
        /// Which engine the example exercises
        #[arg(value_enum)]
        kind: ExampleKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExampleKind {
    /// A typing burst into a debounced search box
    Emitter,
    /// Notifications with hover pause/resume
    Dismissal,
    /// Both engines in one session
    Mixed,
}

pub fn run(action: ScenarioAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ScenarioAction::Example { kind } => {
            let scenario = example(kind);
            println!("{}", scenario.to_json()?);
        }
    }
    Ok(())
}

fn step(at_ms: u64, action: Action) -> Step {
    Step { at_ms, action }
}

fn example(kind: ExampleKind) -> Scenario {
    match kind {
        ExampleKind::Emitter => Scenario {
            name: "typing burst".into(),
            emitter: Some(EmitterConfig {
                debounce_ms: 300,
                min_length: 2,
            }),
            steps: vec![
                step(0, Action::SetValue { value: "r".into() }),
                step(120, Action::SetValue { value: "ru".into() }),
                step(240, Action::SetValue { value: "rust".into() }),
                step(1_000, Action::Clear),
            ],
        },
        ExampleKind::Dismissal => Scenario {
            name: "toasts with hover".into(),
            emitter: None,
            steps: vec![
                step(
                    0,
                    Action::Reconcile {
                        items: vec![
                            ActiveItem::new("saved", 2_000),
                            ActiveItem::new("error", 0),
                        ],
                    },
                ),
                step(1_500, Action::Pause { id: "saved".into() }),
                step(3_000, Action::Resume { id: "saved".into() }),
                step(4_000, Action::Dismiss { id: "error".into() }),
            ],
        },
        ExampleKind::Mixed => Scenario {
            name: "search while toasts expire".into(),
            emitter: Some(EmitterConfig::default()),
            steps: vec![
                step(
                    0,
                    Action::Reconcile {
                        items: vec![ActiveItem::new("welcome", 1_000)],
                    },
                ),
                step(200, Action::SetValue { value: "qu".into() }),
                step(350, Action::SetValue { value: "quiesce".into() }),
                step(
                    1_200,
                    Action::Reconcile {
                        items: vec![ActiveItem::new("synced", 800)],
                    },
                ),
            ],
        },
    }
}
