use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use fridge_core::cleaner::clean;
use fridge_core::config::{expand_path, Config};
use fridge_core::error::Error;
use fridge_core::ratings::{RatingRecord, RatingsLog, Relevance, Verdict};
use fridge_core::types::MatchResult;
use fridge_corpus::Corpus;
use fridge_recommend::filters::{self, ResultFilters};
use fridge_recommend::Recommender;
use fridge_vision::detector_from_env;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <recommend|detect|rate> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

/// Pull `--max-time N` and `--max-missing N` out of the argument list,
/// returning the remaining positional arguments.
fn split_filters(args: Vec<String>) -> anyhow::Result<(Vec<String>, ResultFilters)> {
    let mut positional = Vec::new();
    let mut result_filters = ResultFilters::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--max-time" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--max-time needs a value"))?;
                result_filters.max_time_minutes = Some(value.parse()?);
            }
            "--max-missing" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--max-missing needs a value"))?;
                result_filters.max_missing = Some(value.parse()?);
            }
            _ => positional.push(arg),
        }
    }
    Ok((positional, result_filters))
}

fn load_recommender(config: &Config) -> anyhow::Result<Recommender> {
    let recipes_path: String = config
        .get("data.recipes_path")
        .unwrap_or_else(|_| "data/recetas.json".to_string());
    let path = expand_path(&recipes_path);
    // A malformed corpus aborts startup: serving a partial collection is
    // worse than failing fast.
    let corpus = Corpus::load(&path)
        .map_err(|e| anyhow::anyhow!("corpus load failed ({}): {}", path.display(), e))?;
    let recommender = Recommender::new(corpus);
    println!(
        "📚 Loaded {} recipes from {}",
        recommender.corpus().len(),
        path.display()
    );
    Ok(recommender)
}

fn print_results(results: &[MatchResult]) {
    println!("\n{} recipe(s) found\n", results.len());
    for r in results {
        println!("🍽️  {}", r.recipe.name);
        println!(
            "   Match: {} key ingredient(s) ({}) | TF-IDF: {:.3}",
            r.match_count,
            r.match_percent(),
            r.similarity
        );
        println!("   Matches: {}", r.matched_items.join(", "));
        let difficulty = r.recipe.difficulty.as_deref().unwrap_or("?");
        match r.recipe.time_minutes {
            Some(t) => println!("   Difficulty: {} | Time: {} min", difficulty, t),
            None => println!("   Difficulty: {}", difficulty),
        }
        println!();
    }
}

fn rank_and_print(
    recommender: &Recommender,
    names: &[String],
    top_n: usize,
    result_filters: &ResultFilters,
) {
    match recommender.rank(names, top_n) {
        Ok(results) => {
            let results = filters::apply(results, result_filters);
            if results.is_empty() {
                println!("🔍 No recipes matched those ingredients.");
            } else {
                print_results(&results);
            }
        }
        // Per-request errors are user-facing notices, never crashes.
        Err(Error::EmptyInput) => println!("⚠️  Provide at least one ingredient."),
        Err(e) => println!("❌ {}", e),
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "recommend" => {
            let (positional, result_filters) = split_filters(args)?;
            let raw = positional.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: fridge recommend \"huevo, patata, queso\" [top_n]");
                std::process::exit(1)
            });
            let top_n: usize = positional
                .get(1)
                .map(|n| n.parse())
                .transpose()?
                .unwrap_or(5);
            let names: Vec<String> = raw
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();

            let recommender = load_recommender(&config)?;
            rank_and_print(&recommender, &names, top_n, &result_filters);
        }
        "detect" => {
            let (positional, result_filters) = split_filters(args)?;
            let image = positional.first().map(PathBuf::from).unwrap_or_else(|| {
                eprintln!("Usage: fridge detect <image> [top_n]");
                std::process::exit(1)
            });
            let top_n: usize = positional
                .get(1)
                .map(|n| n.parse())
                .transpose()?
                .unwrap_or(5);

            let recommender = load_recommender(&config)?;
            let detector = match detector_from_env() {
                Ok(d) => d,
                Err(e) => {
                    println!("❌ {}", e);
                    return Ok(());
                }
            };
            let raw = match detector.detect(&image) {
                Ok(raw) => raw,
                Err(e) => {
                    println!("❌ {}", e);
                    return Ok(());
                }
            };
            let cleaned = match clean(&raw, &config.cleaner()) {
                Ok(cleaned) => cleaned,
                Err(e) => {
                    println!("❌ {}", e);
                    return Ok(());
                }
            };
            if cleaned.is_empty() {
                println!("⚠️  No ingredients detected. Try another photo.");
                return Ok(());
            }
            println!("🔍 Detected {} ingredient(s):", cleaned.len());
            for d in &cleaned {
                println!("   {:<24} {:.0}%", d.name, d.confidence * 100.0);
            }
            let names: Vec<String> = cleaned.iter().map(|d| d.name.clone()).collect();
            rank_and_print(&recommender, &names, top_n, &result_filters);
        }
        "rate" => {
            if args.len() < 3 {
                eprintln!(
                    "Usage: fridge rate \"<recipe>\" <like|dislike> <relevant|irrelevant> \
                     [match_pct] [ingredients]"
                );
                std::process::exit(1);
            }
            let liked = Verdict::from_str(&args[1]).map_err(|e| anyhow::anyhow!(e))?;
            let relevant = Relevance::from_str(&args[2]).map_err(|e| anyhow::anyhow!(e))?;
            let match_pct = args.get(3).cloned().unwrap_or_default();
            let ingredients: Vec<String> = args
                .get(4)
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default();

            let ratings_path: String = config
                .get("data.ratings_csv")
                .unwrap_or_else(|_| "ratings.csv".to_string());
            let log = RatingsLog::new(expand_path(&ratings_path));
            let record = RatingRecord::new(&args[0], &match_pct, &ingredients, liked, relevant);
            log.append(&record)?;
            println!("✅ Rating saved for '{}' in {}", args[0], log.path().display());
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
