// Print a summary of the artifacts in the model directory
//
// Usage: cargo run --bin inspect_model [model_dir]

use crop_advisor::artifacts::read_model;
use crop_advisor::{AdvisorConfig, ArtifactPaths, ModelArtifact, Recommender};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let model_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| AdvisorConfig::from_env().model_dir);
    let paths = ArtifactPaths::in_dir(&model_dir);

    println!("\n=== MODEL ARTIFACTS: {} ===\n", model_dir.display());

    match read_model(&paths.model)? {
        ModelArtifact::DecisionTree(tree) => {
            println!("Kind: decision tree");
            println!("  Nodes: {}  Leaves: {}", tree.nodes.n_nodes(), tree.nodes.n_leaves());
        }
        ModelArtifact::RandomForest(forest) => {
            let nodes: usize = forest.trees.iter().map(|t| t.n_nodes()).sum();
            println!("Kind: random forest ({:?} voting)", forest.voting);
            println!("  Trees: {}  Total nodes: {}", forest.trees.len(), nodes);
        }
    }

    // Full load repeats the cross-checks the advisor runs at startup
    let recommender = match Recommender::load(&paths) {
        Ok(rec) => rec,
        Err(e) => {
            eprintln!("Artifacts are not usable: {}", e);
            std::process::exit(1);
        }
    };

    println!("\nFeature columns ({}):", recommender.columns().len());
    for (i, name) in recommender.columns().names().iter().enumerate() {
        println!("  {:>2}. {}", i, name);
    }

    println!("\nRegions: {}", recommender.regions().classes().join(", "));
    println!("Seasons: {}", recommender.seasons().classes().join(", "));
    println!("Crops ({}):", recommender.crops().len());
    for crop in recommender.crops().classes() {
        println!("  {} {}", crop_advisor::icon_for(crop), crop);
    }

    let snapshot = recommender.default_snapshot();
    match recommender.recommend(&snapshot) {
        Ok(result) => println!(
            "\nDefault snapshot ({}/{}) -> {} {:.1}%",
            snapshot.region, snapshot.season, result.label, result.confidence
        ),
        Err(e) => println!("\nDefault snapshot failed: {}", e),
    }

    Ok(())
}
