use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use fieldstat_core::{DescribeIndexFieldsOutput, FlatRecord, FlatValue, IndexFieldStatus, IndexFieldType};
use fieldstat_flatten::{flatten_field_statuses_with_debug, skip_reason};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "fieldstatctl", version, about = "Flatten CloudSearch index field statuses")]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, global = true, env = "FIELDSTAT_OUTPUT", default_value_t = Output::Human)]
    output: Output,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Output { Human, Json }

#[derive(Subcommand, Debug)]
enum Commands {
    /// Flatten a captured DescribeIndexFields response
    Flatten {
        /// Response document; reads stdin when omitted or "-"
        #[arg(env = "FIELDSTAT_INPUT")]
        input: Option<PathBuf>,
        /// Report omitted entries and per-reason counts
        #[arg(long = "explain", action = ArgAction::SetTrue)]
        explain: bool,
    },
    /// List supported index field type tags
    Types,
}

fn init_tracing() {
    let env = std::env::var("FIELDSTAT_LOG").unwrap_or_else(|_| "info".to_string());
    let filter = tracing_subscriber::EnvFilter::from_str(&env).unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// Accept either a full `{"IndexFields": [...]}` response or a bare array of entries.
fn parse_statuses(text: &str) -> Result<Vec<IndexFieldStatus>> {
    let v: serde_json::Value = serde_json::from_str(text).context("parsing input as JSON")?;
    if v.is_array() {
        return serde_json::from_value(v).context("decoding IndexFieldStatus list");
    }
    let doc: DescribeIndexFieldsOutput = serde_json::from_value(v).context("decoding DescribeIndexFields response")?;
    Ok(doc.index_fields)
}

fn block_label(t: &IndexFieldType) -> &'static str {
    match t {
        IndexFieldType::Int => "IntOptions",
        IndexFieldType::Double => "DoubleOptions",
        IndexFieldType::Literal => "LiteralOptions",
        IndexFieldType::Text => "TextOptions",
        IndexFieldType::Date => "DateOptions",
        IndexFieldType::Latlon => "LatLonOptions",
        IndexFieldType::IntArray => "IntArrayOptions",
        IndexFieldType::DoubleArray => "DoubleArrayOptions",
        IndexFieldType::LiteralArray => "LiteralArrayOptions",
        IndexFieldType::TextArray => "TextArrayOptions",
        IndexFieldType::DateArray => "DateArrayOptions",
        IndexFieldType::Other(_) => "-",
    }
}

fn render_options(rec: &FlatRecord) -> String {
    let tag = rec.get("type").and_then(FlatValue::as_str).unwrap_or("");
    let block = rec.get(tag).or_else(|| IndexFieldType::KNOWN.into_iter().find_map(|t| rec.get(t.as_str())));
    let Some(map) = block.and_then(FlatValue::as_map) else { return "-".to_string() };
    let parts: Vec<String> = map
        .iter()
        .map(|(k, v)| match v {
            FlatValue::Bool(b) => format!("{}={}", k, b),
            FlatValue::String(s) => format!("{}={:?}", k, s),
            FlatValue::Map(_) => format!("{}={{..}}", k),
        })
        .collect();
    if parts.is_empty() { "-".to_string() } else { parts.join(",") }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Flatten { input, explain } => {
            info!(input = ?input, explain, "flatten invoked");
            let text = read_input(input.as_ref())?;
            let statuses = parse_statuses(&text)?;
            let (records, dbg) = flatten_field_statuses_with_debug(&statuses).context("flattening index fields")?;
            if dbg.kept < dbg.total {
                warn!(omitted = dbg.skipped(), total = dbg.total, "some index fields were omitted");
            }

            match cli.output {
                Output::Human => {
                    println!("{:<24} {:<14} {:<24} OPTIONS", "NAME", "TYPE", "STATE");
                    for r in records.iter() {
                        let get = |k: &str| r.get(k).and_then(FlatValue::as_str).unwrap_or("-").to_string();
                        println!("{:<24} {:<14} {:<24} {}", get("name"), get("type"), get("state"), render_options(r));
                    }
                }
                Output::Json => {
                    if explain {
                        #[derive(serde::Serialize)]
                        struct Omitted<'a> { index: usize, name: Option<&'a str>, reason: &'static str }
                        #[derive(serde::Serialize)]
                        struct Explain<'a> { fields: &'a [FlatRecord], omitted: Vec<Omitted<'a>>, debug: &'a fieldstat_flatten::FlattenDebugInfo }
                        let omitted: Vec<Omitted> = statuses
                            .iter()
                            .enumerate()
                            .filter_map(|(index, s)| {
                                skip_reason(s).map(|reason| Omitted {
                                    index,
                                    name: s.options.as_ref().and_then(|o| o.index_field_name.as_deref()),
                                    reason: reason.as_str(),
                                })
                            })
                            .collect();
                        println!("{}", serde_json::to_string_pretty(&Explain { fields: &records, omitted, debug: &dbg })?);
                    } else {
                        println!("{}", serde_json::to_string_pretty(&records)?);
                    }
                }
            }
            if explain && matches!(cli.output, Output::Human) {
                for (i, s) in statuses.iter().enumerate() {
                    if let Some(reason) = skip_reason(s) {
                        let name = s.options.as_ref().and_then(|o| o.index_field_name.as_deref()).unwrap_or("-");
                        eprintln!("omitted: #{} {} ({})", i, name, reason.as_str());
                    }
                }
                eprintln!("debug: total={} missing_options={} missing_status={} pending_deletion={} kept={}", dbg.total, dbg.missing_options, dbg.missing_status, dbg.pending_deletion, dbg.kept);
            }
        }
        Commands::Types => match cli.output {
            Output::Human => {
                println!("{:<14} BLOCK", "TYPE");
                for t in IndexFieldType::KNOWN.iter() {
                    println!("{:<14} {}", t.as_str(), block_label(t));
                }
            }
            Output::Json => {
                #[derive(serde::Serialize)]
                struct Row<'a> { tag: &'a str, block: &'static str, array: bool }
                let known = IndexFieldType::KNOWN;
                let rows: Vec<Row> = known
                    .iter()
                    .map(|t| Row { tag: t.as_str(), block: block_label(t), array: t.is_array() })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_response_document_and_bare_array() {
        let entry = serde_json::json!({
            "Options": { "IndexFieldName": "a", "IndexFieldType": "literal" },
            "Status": { "CreationDate": "2025-01-01T00:00:00Z", "UpdateDate": "2025-01-01T00:00:00Z", "State": "Active" }
        });
        let doc = serde_json::json!({ "IndexFields": [entry.clone(), entry.clone()] }).to_string();
        assert_eq!(parse_statuses(&doc).unwrap().len(), 2);
        let arr = serde_json::json!([entry]).to_string();
        assert_eq!(parse_statuses(&arr).unwrap().len(), 1);
        assert!(parse_statuses("{not json").is_err());
    }

    #[test]
    fn renders_nested_options_inline() {
        let rec: FlatRecord = serde_json::from_value(serde_json::json!({
            "name": "a",
            "type": "literal",
            "literal": { "facet": true, "default_value": "x" }
        }))
        .unwrap();
        assert_eq!(render_options(&rec), "default_value=\"x\",facet=true");

        let moved: FlatRecord = serde_json::from_value(serde_json::json!({
            "name": "c",
            "type": "int",
            "literal": { "default_value": "x" }
        }))
        .unwrap();
        assert_eq!(render_options(&moved), "default_value=\"x\"");

        let bare: FlatRecord = serde_json::from_value(serde_json::json!({ "name": "b", "type": "int" })).unwrap();
        assert_eq!(render_options(&bare), "-");
    }
}
