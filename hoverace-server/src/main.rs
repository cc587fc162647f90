use hoverace_core::GLOBAL_CONFIG;

mod checkpoints;
mod circuit;
mod demo;
mod difficulty;
mod driving;
mod error;
mod physics;
mod progress;
mod race;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // headless races to the flag (or the tick limit)
    let mut demo = demo::DemoRace::new(&GLOBAL_CONFIG).expect("could not set up the demo race");
    demo.run_series(GLOBAL_CONFIG.demo_races, GLOBAL_CONFIG.demo_max_ticks);
}
