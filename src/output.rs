use std::io::{self, Write};

use serde::Serialize;

use crate::app::{ProgressEvent, ProgressSink, RunSummary};
use crate::domain::ExperimentType;

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Console,
    Json,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_summary(summary: &RunSummary) -> io::Result<()> {
        Self::print_json(summary)
    }

    pub fn print_experiments() -> io::Result<()> {
        #[derive(Serialize)]
        struct Entry {
            experiment: ExperimentType,
            label: &'static str,
            output_file: String,
        }
        let entries = ExperimentType::ALL
            .into_iter()
            .map(|experiment| Entry {
                experiment,
                label: experiment.label(),
                output_file: experiment.output_file_name(),
            })
            .collect::<Vec<_>>();
        Self::print_json(&entries)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn event(&self, _event: ProgressEvent) {}
}

const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

pub struct ConsoleOutput;

impl ConsoleOutput {
    pub fn print_banner(selected: ExperimentType) {
        println!("\n{CYAN}🔹 MGnify Metadata Fetcher 🔹{RESET}");
        println!(
            "Retrieves MGnify sample metadata for one experiment type and saves it as a CSV file.\n"
        );
        Self::print_experiments();
        println!(
            "\n{GREEN}✅ Using experiment type: {}{RESET}",
            selected.label()
        );
        println!("\n📌 Example usage:");
        println!("   mgnify-fetch --experiment metagenomic");
        println!("   mgnify-fetch --experiment 18s-rrna-gene-amplicon\n");
    }

    pub fn print_experiments() {
        println!("📌 Available experiment types:");
        for experiment in ExperimentType::ALL {
            println!("  {} - {}", experiment.as_str(), experiment.label());
        }
    }

    pub fn print_summary(summary: &RunSummary) {
        println!("{CYAN}📦 Summary{RESET}");
        println!(
            "{GREEN}   rows written: {} of {} listed{RESET}",
            summary.records_written, summary.accessions_listed
        );
        println!("{GREEN}🎉 {}{RESET}", summary.output_path);
    }
}

impl ProgressSink for ConsoleOutput {
    fn event(&self, event: ProgressEvent) {
        match event.elapsed {
            Some(elapsed) => println!("{} ({:.1}s)", event.message, elapsed.as_secs_f64()),
            None => println!("{}", event.message),
        }
    }
}
