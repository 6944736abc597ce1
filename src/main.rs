use neurocar::EvolutionConfig;
use neurocar::training;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let generations: u32 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(100);
    let seed: u64 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    log::info!("training {generations} generations, seed {seed}");

    let checkpoint = std::path::Path::new("best_network.json");
    match training::run(EvolutionConfig::default(), generations, seed, "neurocar.db", checkpoint) {
        Ok(report) => log::info!(
            "done: {} generations, best fitness {:.2}",
            report.generations,
            report.best_fitness
        ),
        Err(e) => {
            log::error!("configuration error: {e}");
            std::process::exit(1);
        }
    }
}
