// this_file: fontscan/src/cli.rs
//
// Command-line interface for fontscan

use crate::{
    font::FontFile,
    properties::{FontProperties, PropertyValue},
    query::{self, InstanceId, ScanCriteria, ScanOptions},
    FontscanError, Result,
};
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for fontscan
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Extract font-database metadata from font files",
    long_about = "fontscan reads font files and reports what a font database needs to know \
                  about each face and named instance: localized family, style and full names, \
                  weight, width, slant, spacing, character and language coverage, and \
                  OpenType/Graphite capabilities."
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v debug, -vv trace)",
        long_help = "Raise the log level to debug, or to trace when given twice. \
                    RUST_LOG, when set, takes precedence."
    )]
    pub verbose: u8,

    /// Output as JSON
    #[arg(
        long,
        global = true,
        help = "Output as JSON",
        long_help = "Output results in JSON format for machine processing. \
                    If not specified, results are output as human-readable text."
    )]
    pub json: bool,
}

/// Subcommands for fontscan
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the properties of every face and instance in a font file
    Query(QueryArgs),

    /// Scan directories and list the patterns that match
    Scan(ScanArgs),
}

/// Arguments for the query command
#[derive(ClapArgs, Debug)]
pub struct QueryArgs {
    /// Font file to query
    #[arg(required = true)]
    pub path: PathBuf,

    /// Instance id to query
    #[arg(
        short,
        long,
        value_parser = parse_instance_id,
        help = "Instance id to query (e.g. 0, 0x20000, 0x80000000)",
        long_help = "Query a single face or instance. The face index is in the low 16 bits, \
                    the instance number in the high 16 bits: 0 is the default instance, \
                    1..n the named instances and 0x8000 the variable pattern. \
                    Without this option every face and instance is queried."
    )]
    pub index: Option<InstanceId>,
}

/// Arguments for the scan command
#[derive(ClapArgs, Debug)]
pub struct ScanArgs {
    /// Directories or font files to scan
    #[arg(
        required = true,
        help = "Directories or font files to scan",
        long_help = "One or more directories or font files to scan. \
                    Directories will be searched recursively for font files."
    )]
    pub paths: Vec<PathBuf>,

    /// Regular expressions to match against family and full names
    #[arg(
        short,
        long,
        help = "Regular expressions to match against family and full names",
        long_help = "One or more regular expressions to match against family and full names. \
                    The search is case-insensitive and matches anywhere in the name."
    )]
    pub name: Vec<String>,

    /// Languages to search for
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Languages the font must support (e.g., de,ru)"
    )]
    pub lang: Vec<String>,

    /// OpenType scripts to search for
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "OpenType scripts to search for (e.g., latn,cyrl)",
        long_help = "Comma-separated list of OpenType script tags to search for. \
                    Common scripts include:\n\
                    - latn: Latin\n\
                    - cyrl: Cyrillic\n\
                    - grek: Greek\n\
                    - arab: Arabic\n\
                    - dev2: Devanagari"
    )]
    pub scripts: Vec<String>,

    /// Unicode codepoints or ranges to search for
    #[arg(
        short = 'u',
        long,
        value_delimiter = ',',
        help = "Unicode codepoints or ranges to search for (e.g., U+0041-U+005A,U+0061)",
        long_help = "Comma-separated list of Unicode codepoints or ranges to search for. \
                    Formats accepted:\n\
                    - Single codepoint: U+0041 or 0041\n\
                    - Range: U+0041-U+005A\n\
                    - Single character: A"
    )]
    pub codepoints: Vec<String>,

    /// Text to check for support
    #[arg(short, long, help = "Text whose characters must all be covered")]
    pub text: Option<String>,

    /// Only show variable fonts
    #[arg(
        long,
        help = "Only show variable patterns and named instances"
    )]
    pub variable: bool,

    /// Number of parallel jobs to use
    #[arg(
        short,
        long,
        default_value_t = num_cpus::get(),
        help = "Number of parallel jobs to use"
    )]
    pub jobs: usize,
}

/// Execute the command
pub fn execute(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Query(args) => {
            let results = match args.index {
                Some(id) => {
                    let file = FontFile::open(&args.path)?;
                    let face = file.face(id.face() as u32)?;
                    vec![query::query(&face, Some(&args.path), id)?]
                }
                None => query::query_all(&args.path)?,
            };
            output_results(&results, cli.json)?;
        }
        Commands::Scan(args) => {
            let options = ScanOptions {
                jobs: args.jobs,
                criteria: args_to_scan_criteria(args)?,
            };
            let results = query::scan(&args.paths, &options)?;
            output_results(&results, cli.json)?;
        }
    }

    Ok(())
}

/// Parse an instance id, decimal or `0x` hexadecimal
pub fn parse_instance_id(input: &str) -> std::result::Result<InstanceId, String> {
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => input.parse::<u32>(),
    };
    parsed
        .map(InstanceId)
        .map_err(|e| format!("Invalid instance id {}: {}", input, e))
}

/// Convert CLI arguments to scan criteria
pub fn args_to_scan_criteria(args: &ScanArgs) -> Result<ScanCriteria> {
    let mut codepoints = parse_codepoints(&args.codepoints)?;
    if let Some(text) = &args.text {
        codepoints.extend(text.chars());
    }

    Ok(ScanCriteria {
        name_patterns: args.name.clone(),
        langs: args.lang.clone(),
        scripts: args.scripts.clone(),
        codepoints,
        variable: args.variable,
    })
}

/// Parse codepoints from strings
pub fn parse_codepoints(input: &[String]) -> Result<Vec<char>> {
    let mut result = Vec::new();

    for item in input {
        match item.split_once('-') {
            Some((start, end)) if !start.is_empty() && !end.is_empty() => {
                let start = parse_codepoint(start)? as u32;
                let end = parse_codepoint(end)? as u32;
                if start > end {
                    return Err(FontscanError::Config(format!(
                        "Invalid codepoint range: {} > {}",
                        start, end
                    )));
                }
                result.extend((start..=end).filter_map(char::from_u32));
            }
            _ => result.push(parse_codepoint(item)?),
        }
    }

    Ok(result)
}

/// Parse a single codepoint from a string
fn parse_codepoint(input: &str) -> Result<char> {
    let mut chars = input.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(c);
    }

    let input = input.trim_start_matches("U+").trim_start_matches("u+");
    let cp = u32::from_str_radix(input, 16)
        .map_err(|_| FontscanError::Config(format!("Invalid codepoint: {}", input)))?;

    char::from_u32(cp)
        .ok_or_else(|| FontscanError::Config(format!("Invalid Unicode codepoint: U+{:04X}", cp)))
}

fn format_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Single(v) => format!("{}", v),
        PropertyValue::Range { min, max } => format!("{}..{}", min, max),
    }
}

/// One line per pattern: file, index, names and style
fn format_pattern(props: &FontProperties) -> String {
    let names = |list: &[crate::names::LocalizedName]| {
        list.iter()
            .map(|name| name.value.as_str())
            .collect::<Vec<_>>()
            .join(",")
    };
    let file = props
        .file
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    let mut line = format!(
        "{}:0x{:08x}: {} | {} | weight={} width={} slant={}",
        file,
        props.index,
        names(&props.family),
        names(&props.style),
        format_value(&props.weight),
        format_value(&props.width),
        props.slant.value(),
    );
    if let Some(spacing) = props.spacing {
        line.push_str(&format!(" spacing={}", spacing.value()));
    }
    if props.variable {
        line.push_str(" variable");
    }
    line
}

/// Output results
fn output_results(results: &[FontProperties], json_output: bool) -> Result<()> {
    if json_output {
        let json = serde_json::to_string_pretty(results)?;
        println!("{}", json);
    } else {
        for result in results {
            println!("{}", format_pattern(result));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{names::LocalizedName, names::SelectedNames, properties::FontPropertiesBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_codepoint() {
        assert_eq!(parse_codepoint("A").unwrap(), 'A');
        assert_eq!(parse_codepoint("ß").unwrap(), 'ß');
        assert_eq!(parse_codepoint("0041").unwrap(), 'A');
        assert_eq!(parse_codepoint("U+0041").unwrap(), 'A');
        assert_eq!(parse_codepoint("u+0041").unwrap(), 'A');
        assert!(parse_codepoint("U+D800").is_err());
    }

    #[test]
    fn test_parse_codepoints() {
        let input = vec!["A".to_string(), "U+0042-U+0044".to_string()];
        let result = parse_codepoints(&input).unwrap();
        assert_eq!(result, vec!['A', 'B', 'C', 'D']);
        assert_eq!(parse_codepoints(&["-".to_string()]).unwrap(), vec!['-']);
        assert!(parse_codepoints(&["0044-0041".to_string()]).is_err());
    }

    #[test]
    fn test_parse_instance_id() {
        assert_eq!(parse_instance_id("0"), Ok(InstanceId(0)));
        assert_eq!(parse_instance_id("131073"), Ok(InstanceId(0x0002_0001)));
        assert_eq!(parse_instance_id("0x80000000"), Ok(InstanceId::variable(0)));
        assert!(parse_instance_id("0xZZ").is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "fontscan", "-vv", "scan", "/fonts", "--lang", "de,ru", "--variable", "-j", "2",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.paths, vec![PathBuf::from("/fonts")]);
                assert_eq!(args.lang, vec!["de", "ru"]);
                assert!(args.variable);
                assert_eq!(args.jobs, 2);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli =
            Cli::try_parse_from(["fontscan", "query", "a.ttf", "--index", "0x10000", "--json"])
                .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Query(args) => assert_eq!(args.index, Some(InstanceId::new(0, 1))),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_format_pattern() {
        let mut names = SelectedNames::default();
        names.families = vec![LocalizedName::new("Example", "en")];
        names.styles = vec![LocalizedName::new("Bold", "en")];
        let mut builder = FontPropertiesBuilder::new(0x0001_0000);
        builder
            .names(names)
            .file(Some(PathBuf::from("/fonts/Example.ttf")))
            .weight_range(0.0, 210.0);
        let line = format_pattern(&builder.build());
        assert_eq!(
            line,
            "/fonts/Example.ttf:0x00010000: Example | Bold | weight=0..210 width=100 slant=0"
        );
    }
}
