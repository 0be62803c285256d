// Fri Oct 16 2026 - Alex

use colored::Colorize;
use film_stream_finder::{
    cache::CacheStore,
    config::Config,
    orchestration::DiscoveryCoordinator,
    output::ReportGenerator,
    ui::{self, FetchProgress},
    utils::{self, logging},
};
use std::time::Instant;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let (config, warnings) = Config::from_env();
    logging::init(&config.log_level);
    for warning in warnings {
        log::warn!("{}", warning);
    }

    let use_color = ui::color_enabled();
    let renderer = ReportGenerator::new().with_color(use_color);
    let start = Instant::now();

    println!("{}", renderer.header());

    let cache = CacheStore::load(&config.cache_path);
    println!("Loaded cache with {} film(s)\n", cache.len());

    let mut coordinator = DiscoveryCoordinator::letterboxd(&config, cache)?;

    let items = coordinator.discover()?;
    println!("Found {} films\n", items.len());
    println!(
        "Fetching streaming info (checking cache first, max {} concurrent requests)...\n",
        config.max_concurrency
    );

    let show_bar = config.show_progress && atty::is(atty::Stream::Stderr);
    let progress = FetchProgress::new(items.len(), show_bar, use_color);
    let report = coordinator.fetch(&items, &progress)?;
    progress.finish();

    print!("{}", renderer.generate(&report));

    let stats = coordinator.scheduler().stats();
    log::info!(
        "Finished in {}: {} cache writes, {} not persisted",
        utils::format_duration(start.elapsed()),
        stats.cache_writes,
        stats.persist_failures
    );

    Ok(())
}
