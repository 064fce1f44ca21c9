//! charex - explore Unicode normalization from the command line
//!
//! Usage:
//! - `charex denormal "<>" -f nfkc` - every string that NFKC-normalizes to `<>`
//! - `charex denormal admin -f nfkc -r -n 5 -s 7` - five seeded random spoofs
//! - `charex count "<->" -f nfkc` - how many denormalizations exist
//! - `charex details U+FF21` - a character under every form, both directions
//! - `charex normalize "＜＞" -f nfkc` - apply a form to text or stdin
//! - `charex forms -d` - the supported normalization forms
//! - `charex map -f nfkc --format csv` - dump a reverse index
//!
//! Logs go to stderr; `-v`/`-vv` or `RUST_LOG` raise the level.

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use denormal::{DenormalizationQuery, Denormalizer, DepthPolicy, Form};
use itertools::Itertools;
use normforms::{codepoint, normalize};
use tabled::{settings::Style, Table, Tabled};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "charex", version)]
#[command(about = "Explore Unicode normalization and generate strings that normalize to a given string")]
struct Args {
    /// Log more: -v for progress, -vv for debug detail
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate strings that normalize to the given string
    #[command(visible_alias = "dn")]
    Denormal(DenormalOpts),

    /// Count denormalization results
    #[command(visible_alias = "ct")]
    Count {
        /// The base normalized string
        base: String,

        /// Normalization form
        #[arg(short, long, default_value = "nfkd")]
        form: Form,

        /// Maximum number of reverse normalizations to use for each character (0 = all)
        #[arg(short, long, default_value_t = 0)]
        maxdepth: usize,
    },

    /// Show a character's normalizations and reverse normalizations
    #[command(visible_alias = "dt")]
    Details {
        /// A single character, or an address such as U+FF21 or 0xFF21
        address: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Normalize text, or each line of stdin when no text is given
    #[command(visible_alias = "nl")]
    Normalize {
        /// The text to normalize
        text: Option<String>,

        /// Normalization form
        #[arg(short, long, default_value = "nfkc")]
        form: String,
    },

    /// List the supported normalization forms
    Forms {
        /// Show a description of each form
        #[arg(short, long)]
        description: bool,
    },

    /// Write the reverse normalization map for a form
    Map {
        /// Normalization form
        #[arg(short, long)]
        form: Form,

        #[arg(long, value_enum, default_value_t = MapFormat::Json)]
        format: MapFormat,
    },
}

#[derive(clap::Args)]
struct DenormalOpts {
    /// The base normalized string
    base: String,

    /// Count the total number of denormalizations instead of listing them
    #[arg(short, long)]
    count: bool,

    /// Normalization form
    #[arg(short, long, default_value = "nfkd")]
    form: Form,

    /// Maximum number of reverse normalizations to use for each character (0 = all)
    #[arg(short, long, default_value_t = 0)]
    maxdepth: usize,

    /// Maximum number of results to return (0 = all, or 1 with --random)
    #[arg(short, long, default_value_t = 0)]
    number: usize,

    /// Randomize the denormalization
    #[arg(short, long)]
    random: bool,

    /// Seed the randomized denormalization
    #[arg(short, long)]
    seed: Option<u64>,

    /// Refuse listings longer than this many results (0 = no limit)
    #[arg(long, default_value_t = 100_000)]
    limit: u64,

    /// What --maxdepth does when it would drop the base character
    #[arg(long, value_enum, default_value_t = PolicyArg::Truncate)]
    policy: PolicyArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Truncate,
    PreserveBase,
}

impl From<PolicyArg> for DepthPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Truncate => DepthPolicy::Truncate,
            PolicyArg::PreserveBase => DepthPolicy::PreserveBase,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MapFormat {
    Json,
    Csv,
}

#[derive(Tabled)]
struct FormRow {
    #[tabled(rename = "Form")]
    form: String,
    #[tabled(rename = "Normalized")]
    normalized: String,
    #[tabled(rename = "Reverse")]
    reverse: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match run(args.command, &mut out).and_then(|()| Ok(out.flush()?)) {
        // Output piped into `head` and the like
        Err(err) if is_broken_pipe(&err) => Ok(()),
        other => other,
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
    })
}

fn run<W: Write>(command: Command, out: &mut W) -> Result<()> {
    let denormalizer = Denormalizer::new();
    match command {
        Command::Denormal(opts) => write_denormalizations(&denormalizer, &opts, out),
        Command::Count {
            base,
            form,
            maxdepth,
        } => write_count(&denormalizer, &base, form, maxdepth, out),
        Command::Details { address, json } => {
            let c = codepoint::parse_address(&address)
                .with_context(|| format!("Failed to read character address {address:?}"))?;
            write_details(&denormalizer, c, json, out)
        }
        Command::Normalize { text, form } => write_normalized(text.as_deref(), &form, out),
        Command::Forms { description } => write_forms(description, out),
        Command::Map { form, format } => write_map(&denormalizer, form, format, out),
    }
}

fn write_denormalizations<W: Write>(
    denormalizer: &Denormalizer,
    opts: &DenormalOpts,
    out: &mut W,
) -> Result<()> {
    if opts.count {
        return write_count(denormalizer, &opts.base, opts.form, opts.maxdepth, out);
    }

    let mut query = DenormalizationQuery::new(opts.form, opts.base.as_str())
        .maxdepth(opts.maxdepth)
        .count(opts.number)
        .random(opts.random)
        .policy(opts.policy.into());
    if let Some(seed) = opts.seed {
        query = query.seed(seed);
    }

    let plan = denormalizer.plan(&query);
    if opts.limit > 0 {
        let total = denormalizer
            .ensure_plan_enumerable(&plan, &query, opts.limit)
            .context("Refusing to list every denormalization (narrow with --number, --maxdepth or --random, or pass --limit 0)")?;
        info!(total = %total, positions = plan.sets().len(), form = %opts.form, "listing denormalizations");
    }

    for result in denormalizer.denormalize_plan(&plan, &query) {
        writeln!(out, "{result}")?;
    }
    Ok(())
}

fn write_count<W: Write>(
    denormalizer: &Denormalizer,
    base: &str,
    form: Form,
    maxdepth: usize,
    out: &mut W,
) -> Result<()> {
    let total = denormalizer.count_denormalizations(form, base, Some(maxdepth));
    writeln!(out, "{}", group_digits(&total.to_string()))?;
    Ok(())
}

fn write_details<W: Write>(
    denormalizer: &Denormalizer,
    c: char,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let details = denormalizer.details(c);
    if json {
        serde_json::to_writer_pretty(&mut *out, &details).context("Failed to write details")?;
        writeln!(out)?;
        return Ok(());
    }

    let rows: Vec<FormRow> = details
        .forms
        .iter()
        .map(|detail| FormRow {
            form: detail.form.to_string(),
            normalized: detail.normalized.chars().map(codepoint::summarize).join(" "),
            reverse: detail.sources.iter().map(|c| codepoint::summarize(*c)).join("\n"),
        })
        .collect();

    writeln!(out, "{}", details.code_point.bold())?;
    writeln!(out, "{:>10}: {}", "category", details.category)?;
    writeln!(out, "{}", Table::new(&rows).with(Style::modern()))?;
    Ok(())
}

fn write_normalized<W: Write>(text: Option<&str>, form: &str, out: &mut W) -> Result<()> {
    let normalized = match text {
        Some(text) => normalize::normalize(form, text)?,
        None => {
            let input = io::read_to_string(io::stdin()).context("Failed to read stdin")?;
            normalize::normalize_lines(form.parse::<Form>()?, &input)
        }
    };
    writeln!(out, "{normalized}")?;
    Ok(())
}

fn write_forms<W: Write>(description: bool, out: &mut W) -> Result<()> {
    if !description {
        for name in normalize::form_names() {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }
    let width = Form::ALL.iter().map(|form| form.name().len()).max().unwrap_or(0);
    for form in Form::ALL {
        writeln!(out, "{:<width$}  {}", form.name().bold(), form.description())?;
    }
    Ok(())
}

fn write_map<W: Write>(
    denormalizer: &Denormalizer,
    form: Form,
    format: MapFormat,
    out: &mut W,
) -> Result<()> {
    let index = denormalizer.index(form);
    match format {
        MapFormat::Json => {
            index
                .write_json(&mut *out)
                .with_context(|| format!("Failed to write {form} map as JSON"))?;
            writeln!(out)?;
        }
        MapFormat::Csv => index
            .write_csv(&mut *out)
            .with_context(|| format!("Failed to write {form} map as CSV"))?,
    }
    Ok(())
}

/// Insert thousands separators into a decimal string: `1234567` -> `1,234,567`.
fn group_digits(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    chars
        .rchunks(3)
        .rev()
        .map(|chunk| chunk.iter().collect::<String>())
        .join(",")
}
