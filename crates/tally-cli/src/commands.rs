use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use colored::Colorize;
use rand::Rng;
use serde::Serialize;
use tally_patterns::{load_patterns, DirectoryDatasets, PatternList};
use tally_store::{Collection, Collections, InMemoryCollection, StoreConfig};
use tally_types::{KeyExclusions, NoExclusions};
use tracing::info;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Patterns(args) => cmd_patterns(args, cli.format),
        Command::Stress(args) => cmd_stress(args, cli.format),
    }
}

#[derive(Serialize)]
struct PatternsReport {
    dataset: String,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    patterns: Option<Vec<String>>,
}

fn cmd_patterns(args: PatternsArgs, format: OutputFormat) -> anyhow::Result<()> {
    let datasets = DirectoryDatasets::new(&args.root);
    let mut list = PatternList::new();
    let count = load_patterns(&datasets, &args.dataset, &mut list)
        .with_context(|| format!("loading dataset {}", args.dataset))?;
    info!(
        dataset = %args.dataset,
        root = %args.root.display(),
        patterns = count,
        "pattern dataset checked"
    );

    let report = PatternsReport {
        dataset: args.dataset,
        count,
        patterns: args.list.then(|| list.patterns().to_vec()),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!(
                "{} {} patterns in {}",
                "✓".green().bold(),
                report.count.to_string().bold(),
                report.dataset.yellow()
            );
            for pattern in report.patterns.iter().flatten() {
                println!("  {pattern}");
            }
        }
    }
    Ok(())
}

#[derive(Default, Serialize)]
struct WorkerTally {
    stores: usize,
    upserts: usize,
    expiries: usize,
    deletes: usize,
    resolutions: usize,
    records: usize,
}

impl WorkerTally {
    fn absorb(&mut self, other: WorkerTally) {
        self.stores += other.stores;
        self.upserts += other.upserts;
        self.expiries += other.expiries;
        self.deletes += other.deletes;
        self.resolutions += other.resolutions;
        self.records += other.records;
    }
}

#[derive(Serialize)]
struct StressReport {
    collection: String,
    threads: usize,
    ops_per_thread: usize,
    elapsed_ms: u128,
    operations: WorkerTally,
    remaining_entries: usize,
    remaining_keys: usize,
    purged_expired: usize,
}

fn run_worker(
    collection: &InMemoryCollection,
    worker: usize,
    ops: usize,
    keys: usize,
) -> WorkerTally {
    let mut rng = rand::thread_rng();
    let mut tally = WorkerTally::default();
    let own_keys = format!("^w{worker}:");
    let exclusions = KeyExclusions::new().exact(format!("w{worker}:0"));

    for op in 0..ops {
        let key = format!("w{worker}:{}", rng.gen_range(0..keys));
        let mut out = Vec::new();
        match rng.gen_range(0..100) {
            0..=39 => {
                collection.store(&key, &op.to_string());
                tally.stores += 1;
            }
            40..=54 => {
                collection.store_or_update_first(&key, &op.to_string());
                tally.upserts += 1;
            }
            55..=64 => {
                collection.set_expiry(&key, rng.gen_range(-1..30));
                tally.expiries += 1;
            }
            65..=74 => {
                collection.del(&key);
                tally.deletes += 1;
            }
            75..=89 => {
                collection.resolve_multi_matches(&key, &mut out, &NoExclusions);
                tally.resolutions += 1;
            }
            90..=94 => {
                collection.resolve_single_match(&key, &mut out);
                tally.resolutions += 1;
            }
            _ => {
                collection.resolve_regular_expression(&own_keys, &mut out, &exclusions);
                tally.resolutions += 1;
            }
        }
        tally.records += out.len();
    }
    tally
}

fn cmd_stress(args: StressArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("loading store config {}", path.display()))?,
        None => StoreConfig::default(),
    };
    let threads = args.threads.max(1);
    let keys = args.keys.max(1);

    let registry = Collections::new(config);
    let collection = registry.get_or_create(&args.collection);

    let started = Instant::now();
    let handles: Vec<_> = (0..threads)
        .map(|worker| {
            let collection = Arc::clone(&collection);
            let ops = args.ops;
            thread::spawn(move || run_worker(&collection, worker, ops, keys))
        })
        .collect();

    let mut operations = WorkerTally::default();
    for handle in handles {
        let tally = handle
            .join()
            .map_err(|_| anyhow::anyhow!("stress worker panicked"))?;
        operations.absorb(tally);
    }
    let elapsed_ms = started.elapsed().as_millis();

    let purged_expired = collection.purge_expired();
    info!(
        collection = %collection.name(),
        threads,
        ops = args.ops,
        elapsed_ms = elapsed_ms as u64,
        purged_expired,
        "stress run finished"
    );
    let report = StressReport {
        collection: collection.name().to_string(),
        threads,
        ops_per_thread: args.ops,
        elapsed_ms,
        operations,
        remaining_entries: collection.len(),
        remaining_keys: collection.key_count(),
        purged_expired,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_stress_report(&report),
    }
    Ok(())
}

fn print_stress_report(report: &StressReport) {
    let ops = &report.operations;
    println!(
        "{} {} × {} ops on {} in {} ms",
        "✓".green().bold(),
        report.threads,
        report.ops_per_thread,
        report.collection.yellow().bold(),
        report.elapsed_ms
    );
    println!(
        "  stores: {}  upserts: {}  expiries: {}  deletes: {}",
        ops.stores, ops.upserts, ops.expiries, ops.deletes
    );
    println!("  resolutions: {}  records: {}", ops.resolutions, ops.records);
    println!(
        "  remaining: {} entries in {} keys ({} expired purged)",
        report.remaining_entries.to_string().bold(),
        report.remaining_keys,
        report.purged_expired
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_counts_every_operation() {
        let collection = InMemoryCollection::new("GLOBAL");
        let tally = run_worker(&collection, 0, 500, 4);
        assert_eq!(
            tally.stores + tally.upserts + tally.expiries + tally.deletes + tally.resolutions,
            500
        );
        assert!(collection.keys().iter().all(|k| k.starts_with("w0:")));
    }

    #[test]
    fn patterns_command_loads_from_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scanners.data"), "# scanners\nnikto\nsqlmap\n").unwrap();
        let args = PatternsArgs {
            dataset: "scanners.data".into(),
            root: dir.path().to_path_buf(),
            list: true,
        };
        cmd_patterns(args, OutputFormat::Json).unwrap();
    }

    #[test]
    fn patterns_command_reports_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let args = PatternsArgs {
            dataset: "absent.data".into(),
            root: dir.path().to_path_buf(),
            list: false,
        };
        let err = cmd_patterns(args, OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("absent.data"));
    }

    #[test]
    fn stress_command_runs_to_completion() {
        let args = StressArgs {
            threads: 2,
            ops: 200,
            collection: "ip".into(),
            keys: 4,
            config: None,
        };
        cmd_stress(args, OutputFormat::Text).unwrap();
    }

    #[test]
    fn absorb_sums_fields() {
        let mut total = WorkerTally::default();
        total.absorb(WorkerTally { stores: 2, records: 5, ..Default::default() });
        total.absorb(WorkerTally { stores: 1, deletes: 3, ..Default::default() });
        assert_eq!(total.stores, 3);
        assert_eq!(total.deletes, 3);
        assert_eq!(total.records, 5);
    }
}
