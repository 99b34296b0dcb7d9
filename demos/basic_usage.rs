//! Basic usage example for jaro-winkler-trie.
//!
//! Run with `RUST_LOG=jaro_winkler_trie=trace` to see per-length pruning stats.

use jaro_winkler_trie::{similarity, JaroWinklerSimilarity, TrieSet};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Jaro-Winkler Trie - Basic Usage Example ===\n");

    // Two strings
    println!("Pairwise similarity:");
    for (a, b) in [
        ("MARTHA", "MARHTA"),
        ("Ronald Alexander", "Roland Alexander"),
        ("Colleen D'Agostino", "Raymond Bark-Jones"),
    ] {
        println!("  {a:?} / {b:?}: {:?}", similarity(a, b, 0.0));
    }

    // Dictionary with values
    let people = JaroWinklerSimilarity::of_map([
        ("Andre Lichtenberger", 17),
        ("Andrew Lichtenberger", 42),
        ("Ida Bauer", 7),
        ("Li Du", 3),
    ])
    .with_default_threshold(0.9);

    println!("\nDictionary {}:", people.trie());
    match people.apply("Andrea Lichtenberger") {
        Ok(matches) => {
            for (id, score) in matches {
                println!("  id {id}: {score:.4}");
            }
        }
        Err(err) => println!("  error: {err}"),
    }

    // Set with removal
    let mut names: TrieSet = ["Ronald", "Roland", "Rolf", "Ron"].into_iter().collect();
    println!("\nSet before removal: {names}");
    names.remove("Rolf");
    println!("Set after removal:  {names}");

    let matcher = JaroWinklerSimilarity::new(names);
    let all = matcher.match_many(["Ronald", "Rolland", "Xavier"], 0.85);
    println!("\nBatch matching (threshold 0.85):");
    for (query, matches) in all {
        let mut matches: Vec<_> = matches.into_iter().collect();
        matches.sort_by(|a, b| b.1.total_cmp(&a.1));
        println!("  {query:?}: {matches:?}");
    }

    // Missing default threshold
    println!("\nWithout a default threshold:");
    println!("  {:?}", matcher.apply("Ronald"));

    println!("\n=== Example Complete ===");
}
