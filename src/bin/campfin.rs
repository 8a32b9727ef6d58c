use anyhow::{Context, Result, anyhow, bail};
use campfin_charts::viz::{self, ChartKind, ChartOptions};
use campfin_charts::{IntervalUnit, TimeSeries, interval, layout, storage, tooltip};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "campfin",
    version,
    about = "Bucket, lay out & chart campaign-finance series"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the length of one interval in milliseconds (unknown units print 1).
    Interval {
        /// year, quarter, month, week, day or hour
        unit: String,
    },
    /// Print the bucket label for a UTC timestamp.
    Label {
        unit: String,
        /// Milliseconds since the epoch
        #[arg(allow_hyphen_values = true)]
        timestamp: i64,
    },
    /// Print consecutive bucket starts with their labels, one per line.
    Buckets {
        unit: String,
        /// First bucket start, milliseconds since the epoch
        #[arg(allow_hyphen_values = true)]
        start: i64,
        /// Number of buckets.
        #[arg(long, default_value_t = 12)]
        count: usize,
    },
    /// Lay out (name, x, y) rows as proportional bars.
    Layout(LayoutArgs),
    /// Render a time-series chart.
    Chart(ChartArgs),
    /// Print the tooltip for one bucket.
    Tooltip(TooltipArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600). Ignored by the small chart.
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Chart caption.
    #[arg(long)]
    title: Option<String>,
    /// TTF/OTF font for chart text; without it charts have no text.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Input file: JSON array of {name, x, y} or CSV with header name,x,y.
    #[arg(short, long)]
    input: PathBuf,
    /// Save the layout (.json or .csv).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Draw the bars (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    #[command(flatten)]
    render: RenderArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Donations,
    NetFunds,
    DonationExpenditure,
    Small,
}

impl From<KindArg> for ChartKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Donations => ChartKind::Donations,
            KindArg::NetFunds => ChartKind::NetFunds,
            KindArg::DonationExpenditure => ChartKind::DonationExpenditure,
            KindArg::Small => ChartKind::SmallDonationExpend,
        }
    }
}

#[derive(Args, Debug)]
struct ChartArgs {
    #[arg(value_enum)]
    kind: KindArg,
    /// First series (donations or funds): CSV date,value or JSON [[ms, value], ...].
    #[arg(short, long)]
    input: PathBuf,
    /// Second series (debts or expenditures); required by every kind except donations.
    #[arg(long)]
    second: Option<PathBuf>,
    /// Bucket size of the donations chart.
    #[arg(long, default_value = "month")]
    interval: String,
    /// Lower y bound of the small chart.
    #[arg(long, allow_hyphen_values = true)]
    min: Option<f64>,
    /// Upper y bound of the small chart.
    #[arg(long, allow_hyphen_values = true)]
    max: Option<f64>,
    /// Output image (.svg or .png).
    #[arg(long)]
    plot: PathBuf,
    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Args, Debug)]
struct TooltipArgs {
    unit: String,
    #[arg(allow_hyphen_values = true)]
    timestamp: i64,
    /// Series value as name=amount; repeatable.
    #[arg(long = "entry")]
    entries: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Interval { unit } => {
            println!("{}", interval::interval_duration_ms(&unit));
            Ok(())
        }
        Command::Label { unit, timestamp } => {
            println!("{}", interval::format_interval_label(&unit, timestamp));
            Ok(())
        }
        Command::Buckets { unit, start, count } => {
            let unit: IntervalUnit = unit.parse()?;
            for t in interval::bucket_starts(start, unit, count) {
                println!("{t}\t{}", unit.format_label(t));
            }
            Ok(())
        }
        Command::Layout(args) => cmd_layout(args),
        Command::Chart(args) => cmd_chart(args),
        Command::Tooltip(args) => cmd_tooltip(args),
    }
}

fn options(render: &RenderArgs) -> Result<ChartOptions> {
    if let Some(font) = render.font.as_ref() {
        viz::register_font_file(font)?;
    }
    Ok(ChartOptions {
        width: render.width,
        height: render.height,
        title: render.title.clone(),
    })
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("json")
        .to_ascii_lowercase()
}

fn cmd_layout(args: LayoutArgs) -> Result<()> {
    let data = storage::load_series_data(&args.input)?;
    let bars = layout::layout_proportional_series(&data);

    match args.out.as_ref() {
        Some(path) => {
            match extension(path).as_str() {
                "json" => storage::save_layout_json(&bars, path)?,
                "csv" => storage::save_layout_csv(&bars, path)?,
                other => bail!("unsupported format: {}", other),
            }
            eprintln!("Saved {} series to {}", bars.len(), path.display());
        }
        None if args.plot.is_none() => println!("{}", serde_json::to_string_pretty(&bars)?),
        None => {}
    }

    if let Some(plot_path) = args.plot.as_ref() {
        viz::plot_proportional(&bars, plot_path, &options(&args.render)?)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }
    Ok(())
}

fn series_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn cmd_chart(args: ChartArgs) -> Result<()> {
    let opts = options(&args.render)?;
    let first = storage::load_time_series(&args.input, &series_name(&args.input))?;
    let second = || -> Result<TimeSeries> {
        let path = args
            .second
            .as_ref()
            .ok_or_else(|| anyhow!("--second is required for the {:?} chart", args.kind))?;
        storage::load_time_series(path, &series_name(path))
    };

    match ChartKind::from(args.kind) {
        ChartKind::Donations => {
            let unit: IntervalUnit = args.interval.parse()?;
            viz::plot_donations(&first, unit, &args.plot, &opts)?;
        }
        ChartKind::NetFunds => viz::plot_net_funds(&first, &second()?, &args.plot, &opts)?,
        ChartKind::DonationExpenditure => {
            viz::plot_donation_expenditure(&first, &second()?, &args.plot, &opts)?
        }
        ChartKind::SmallDonationExpend => {
            let min = args.min.ok_or_else(|| anyhow!("--min is required for the small chart"))?;
            let max = args.max.ok_or_else(|| anyhow!("--max is required for the small chart"))?;
            viz::plot_small_donation_expend(&first, &second()?, (min, max), &args.plot, opts.width)?
        }
    }
    eprintln!("Wrote plot to {}", args.plot.display());
    Ok(())
}

fn cmd_tooltip(args: TooltipArgs) -> Result<()> {
    let unit: IntervalUnit = args.unit.parse()?;
    let entries = args
        .entries
        .iter()
        .map(|e| {
            let (name, value) = e
                .rsplit_once('=')
                .ok_or_else(|| anyhow!("invalid --entry {e:?}, expected name=amount"))?;
            let value: f64 = value
                .trim()
                .parse()
                .with_context(|| format!("invalid amount in --entry {e:?}"))?;
            Ok((name.trim(), value))
        })
        .collect::<Result<Vec<_>>>()?;

    println!("{}", tooltip::tooltip_text(unit, args.timestamp, &entries));
    if let Some(link) = tooltip::donations_link(args.timestamp) {
        println!("{link}");
    }
    Ok(())
}
