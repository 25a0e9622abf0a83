//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{LexnetArgs, OutputFormat};
use crate::error::Result;
use crate::outlier::OutlierReport;
use crate::vocabulary::{Relatedness, Synset};

/// Result structure for the distance command.
#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResult {
    pub term_a: String,
    pub term_b: String,
    pub distance: usize,
}

/// Result structure for a term lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResult {
    pub term: String,
    pub synsets: Vec<Synset>,
}

/// Result structure for one outcast file.
#[derive(Debug, Serialize, Deserialize)]
pub struct OutcastResult {
    pub file: String,
    pub report: OutlierReport,
}

/// Result structure for a raw digraph query.
#[derive(Debug, Serialize, Deserialize)]
pub struct SapResult {
    pub v: Vec<usize>,
    pub w: Vec<usize>,
    /// `-1` when the two sets share no ancestor.
    pub length: i64,
    /// `-1` when the two sets share no ancestor.
    pub ancestor: i64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &LexnetArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &LexnetArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    output_generic_human(&value, 0);
    Ok(())
}

/// Output a relatedness explanation with readable paths.
pub fn output_relatedness(
    relatedness: &Relatedness,
    gloss_of: impl Fn(usize) -> String,
    args: &LexnetArgs,
) -> Result<()> {
    if args.output_format == OutputFormat::Json {
        return output_json(relatedness, args);
    }

    println!("{} <-> {}", relatedness.term_a, relatedness.term_b);
    println!("distance: {}", relatedness.distance);
    println!("ancestor: {} ({})", relatedness.gloss, relatedness.ancestor);
    let render = |path: &[usize]| {
        path.iter()
            .map(|&id| gloss_of(id))
            .collect::<Vec<_>>()
            .join(" -> ")
    };
    println!("path a:   {}", render(&relatedness.path_a));
    println!("path b:   {}", render(&relatedness.path_b));
    Ok(())
}

/// Output an outcast report.
pub fn output_outcast(result: &OutcastResult, show_scores: bool, args: &LexnetArgs) -> Result<()> {
    if args.output_format == OutputFormat::Json {
        return output_json(result, args);
    }

    println!("{}: {}", result.file, result.report.outcast);
    if show_scores {
        for score in &result.report.scores {
            println!("  {:>8}  {}", score.total_distance, score.term);
        }
    }
    Ok(())
}

fn output_generic_human(value: &serde_json::Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Object(_) => {
                        println!("{pad}{key}:");
                        output_generic_human(val, indent + 1);
                    }
                    serde_json::Value::Array(items) if items.iter().any(|i| i.is_object()) => {
                        println!("{pad}{key}:");
                        for item in items {
                            output_generic_human(item, indent + 1);
                            println!();
                        }
                    }
                    _ => println!("{pad}{key}: {}", format_value(val)),
                }
            }
        }
        _ => println!("{pad}{}", format_value(value)),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &LexnetArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human output.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("horse")), "horse");
        assert_eq!(format_value(&json!(4)), "4");
        assert_eq!(format_value(&json!([1, 2, 3])), "[1, 2, 3]");
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!({"a": 1})), "[object]");
    }

    #[test]
    fn test_sap_result_serializes_sentinels() {
        let result = SapResult {
            v: vec![0],
            w: vec![2],
            length: -1,
            ancestor: -1,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["length"], json!(-1));
        assert_eq!(value["ancestor"], json!(-1));
    }
}
