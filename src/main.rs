//! Build optimizer CLI - Evolve a daily economy/industry spending plan.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use log::info;

use steady_ga::{
    compute::EvolutionEngine,
    compute::economy::{BuildPlan, Empire, GameSnapshot},
    compute::evolution::PopulationExport,
    schema::OptimizerConfig,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [iterations]", args[0]);
        eprintln!();
        eprintln!("Evolve a build plan for one player from a saved game scan.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to optimizer configuration file");
        eprintln!("  iterations   Override the configured iteration budget");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let mut config: OptimizerConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    if let Some(iterations) = args.get(2).and_then(|s| s.parse().ok()) {
        config.evolution.max_iterations = iterations;
    }

    if let Err(e) = config.validate() {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    }

    // Scan paths are relative to the config file
    let scan_path = config_path
        .parent()
        .map(|dir| dir.join(&config.scan_path))
        .unwrap_or_else(|| config.scan_path.clone());

    let scan = GameSnapshot::load(&scan_path).unwrap_or_else(|e| {
        eprintln!("Error loading scan {}: {}", scan_path.display(), e);
        std::process::exit(1);
    });

    let empire = Empire::from_snapshot(&scan, &config.player).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let empire = Arc::new(empire);

    println!("Build Optimizer");
    println!("===============");
    println!("Player: {} ({} stars)", empire.name, empire.stars.len());
    println!(
        "Economy: {}  Industry: {}  Cash: {}",
        empire.total_economy, empire.total_industry, empire.cash
    );
    println!("Days: {}", config.evolution.strands);
    println!("Population: {}", config.evolution.population_size);
    println!("Max iterations: {}", config.evolution.max_iterations);
    println!();

    let mut engine = EvolutionEngine::new(config.evolution.clone(), |dna| {
        BuildPlan::new(dna, Arc::clone(&empire))
    })
    .unwrap_or_else(|e| {
        eprintln!("Error creating population: {}", e);
        std::process::exit(1);
    });

    let result = engine
        .run_with_callback(|progress| {
            info!(
                "Generation: {}, Max Fitness: {}, Min Fitness: {}, Fitness Range: {}",
                progress.iteration,
                progress.best_fitness,
                progress.worst_fitness,
                progress.fitness_range
            );
        })
        .unwrap_or_else(|e| {
            eprintln!("Evolution failed: {}", e);
            std::process::exit(1);
        });

    let stats = &result.stats;
    println!("Stopped: {:?}", stats.stop_reason);
    println!(
        "Iterations: {} ({} accepted)",
        stats.iterations, stats.accepted
    );
    println!(
        "Best fitness: {:.0} (initial {:.0})",
        stats.best_fitness, stats.initial_best_fitness
    );
    println!("Final fitness range: {:.1}", stats.final_fitness_range);
    println!("Time: {:.2}s", stats.elapsed_seconds);
    println!();

    let best = engine.population().best().organism();
    println!("Best plan:");
    for day in best.simulate() {
        println!(
            "  Day {:>3}: economy {:>5.1}% of {:>6} cash, +{} economy, +{} industry, {} ships",
            day.day,
            day.economy_share * 100.0,
            day.cash,
            day.economy_bought,
            day.industry_bought,
            day.ship_production
        );
    }

    if let Some(export_path) = &config.export_path {
        let export = PopulationExport::from_population(engine.population());
        match export.save(export_path) {
            Ok(()) => println!("\nPopulation written to {}", export_path.display()),
            Err(e) => {
                eprintln!("Error writing population: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn print_example_config() {
    let config = OptimizerConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing example: {}", e),
    }
}
