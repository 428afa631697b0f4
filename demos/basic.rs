//! Basic example of using the hill-climbing engine

use queens_core::{conflict_count, neighbors, HillClimber, Placement, SearchConfig, Termination};

fn main() {
    // Reference board: eight queens, three sideways moves allowed
    println!("Starting from the reference placement...\n");
    let mut engine = HillClimber::new(SearchConfig::reference()).expect("reference config is valid");

    println!("{}", engine.placement());
    println!("{}\n", engine.status());

    // Look at the neighborhood
    let neighborhood = neighbors(engine.placement());
    let best = neighborhood.iter().map(|n| n.cost).min().unwrap_or(0);
    println!("Neighbors: {}", neighborhood.len());
    println!("Best neighbor cost: {}\n", best);

    // Step a few times by hand
    for _ in 0..3 {
        let result = engine.step();
        match result.mv {
            Some(mv) => println!("{} move, {}  ->  {}", result.kind, mv, engine.status()),
            None => println!("{}  ->  {}", result.kind, engine.status()),
        }
    }

    // Let the engine run to the end
    let report = engine.run(1000);
    println!("\n{} after {} more steps:", report.termination, report.steps);
    println!("{}", engine.placement());

    // Random restarts until a solution turns up
    println!("--- Random restarts on a 12x12 board ---\n");
    let mut engine = HillClimber::with_seed(SearchConfig::with_size(12), 2024).expect("size 12 is valid");
    for restart in 1..=50 {
        let report = engine.run(1000);
        if report.termination == Termination::Solved {
            println!("Solved on attempt {} ({} moves):", restart, report.moves);
            println!("{}", engine.placement());
            break;
        }
        engine.randomize();
    }

    // Parse a placement from a string
    let placement = Placement::parse("1,3,0,2").expect("valid placement");
    println!("{} has {} conflicts", placement.to_string_compact(), conflict_count(placement.rows()));
}
