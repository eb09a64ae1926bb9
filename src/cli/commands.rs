use crate::cache::TableCache;
use crate::cli::thermometer;
use crate::core::{pace, summarize};
use crate::error::{ThermoError, ThermoResult};
use crate::excel::{TableExporter, WorkbookImporter};
use crate::types::{DaysConfig, Metric, ReportTable};
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

/// Shared knobs for the report-rendering commands
pub struct ReportOptions {
    pub days: DaysConfig,
    pub start_col: usize,
    /// None renders both metric sections
    pub metric: Option<Metric>,
    pub verbose: bool,
}

impl ReportOptions {
    fn metrics(&self) -> Vec<Metric> {
        match self.metric {
            Some(metric) => vec![metric],
            None => vec![Metric::Sales, Metric::GrossProfit],
        }
    }
}

/// Format a value as whole dollars with thousands separators
pub(crate) fn format_currency(n: f64) -> String {
    let rounded = n.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Execute the report command
pub fn report(file: PathBuf, options: &ReportOptions) -> ThermoResult<()> {
    println!("{}", "🌡️  Thermo - Monthly Progress Report".bold().green());
    println!("   File: {}", file.display());
    println!();

    let table = WorkbookImporter::new(&file)
        .with_start_col(options.start_col)
        .import()?;

    if options.verbose {
        println!(
            "   Found {} companies, {} records",
            table.companies.len(),
            table.records.len()
        );
        if let Some(ref month) = table.month_label {
            println!("   Month: {}", month.bright_yellow());
        }
        println!();
    }

    render_report(&table, options);
    Ok(())
}

/// Render the per-company gauge sections for a parsed table
fn render_report(table: &ReportTable, options: &ReportOptions) {
    for metric in options.metrics() {
        let heading = match metric {
            Metric::Sales => "📈 Sales Thermometers",
            Metric::GrossProfit => "📊 Gross Profit Thermometers",
        };
        println!("{}", heading.bold().cyan());
        println!();

        for company in &table.companies {
            let series = table.company_series(company, metric);
            let goal = table.company_goal(company, metric);
            let company_pace = pace(&series, goal, options.days.for_company(company));
            println!(
                "{}",
                thermometer::render(company, metric, &company_pace, table.month_label.as_deref())
            );
        }
    }
}

/// Execute the summary command
pub fn summary(file: PathBuf, start_col: usize, verbose: bool) -> ThermoResult<()> {
    println!("{}", "🌡️  Thermo - Summary Statistics".bold().green());
    println!("   File: {}", file.display());
    println!();

    let table = WorkbookImporter::new(&file)
        .with_start_col(start_col)
        .import()?;
    let summary = summarize(&table);

    if verbose {
        println!("   Companies: {:?}", table.companies);
        println!();
    }

    if let Some(ref month) = summary.month_label {
        println!("   Month:                   {}", month.bright_yellow().bold());
    }
    println!("   Companies:               {}", summary.company_count);
    println!("   Days Elapsed:            {}", summary.days_elapsed);
    println!(
        "   Total Sales:             {}",
        format_currency(summary.total_sales).bold()
    );
    println!(
        "   Total Gross Profit:      {}",
        format_currency(summary.total_gross_profit).bold()
    );
    println!(
        "   Total Sales Goal (105%): {}",
        format_currency(summary.total_sales_goal).bold()
    );
    println!();
    println!("{}", "✅ Summary complete".bold().green());
    Ok(())
}

/// Execute the export command
pub fn export(
    input: PathBuf,
    output: PathBuf,
    days: &DaysConfig,
    start_col: usize,
    verbose: bool,
) -> ThermoResult<()> {
    println!("{}", "🌡️  Thermo - Exporting tidy table".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}", output.display());
    println!();

    let table = WorkbookImporter::new(&input)
        .with_start_col(start_col)
        .import()?;

    if verbose {
        println!(
            "   {} records across {} companies",
            table.records.len(),
            table.companies.len()
        );
    }

    TableExporter::new(&table, days).export(&output)?;

    println!(
        "{} Wrote {}",
        "✅".green(),
        output.display().to_string().bold()
    );
    Ok(())
}

/// Execute the watch command: re-render the report whenever the workbook
/// bytes change
pub fn watch(file: PathBuf, options: &ReportOptions) -> ThermoResult<()> {
    println!("{}", "👁️  Thermo - Watch Mode".bold().green());
    println!("   Watching: {}", file.display());
    println!("   Press {} to stop\n", "Ctrl+C".bold().yellow());

    if !file.exists() {
        return Err(ThermoError::Validation(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let canonical_path = file.canonicalize().map_err(ThermoError::Io)?;
    let parent_dir = canonical_path
        .parent()
        .ok_or_else(|| ThermoError::Validation("Cannot determine parent directory".to_string()))?;

    let (tx, rx) = channel();

    // Debounce so a single save does not trigger several renders
    let mut debouncer = new_debouncer(Duration::from_millis(200), tx)
        .map_err(|e| ThermoError::Validation(format!("Failed to create file watcher: {e}")))?;

    debouncer
        .watcher()
        .watch(parent_dir, RecursiveMode::NonRecursive)
        .map_err(|e| ThermoError::Validation(format!("Failed to watch directory: {e}")))?;

    if options.verbose {
        println!(
            "   {} {}",
            "Watching directory:".cyan(),
            parent_dir.display()
        );
    }

    let mut cache = TableCache::new();

    println!("{}", "🔄 Initial run...".cyan());
    run_watch_pass(&file, &mut cache, options);
    println!();

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|event| {
                    if event.kind != DebouncedEventKind::Any {
                        return false;
                    }
                    if let Ok(event_canonical) = event.path.canonicalize() {
                        if event_canonical == canonical_path {
                            return true;
                        }
                    }
                    event
                        .path
                        .file_name()
                        .is_some_and(|name| Some(name) == canonical_path.file_name())
                });

                if relevant {
                    println!("{}", "🔄 Workbook changed, re-rendering...".cyan());
                    run_watch_pass(&file, &mut cache, options);
                    println!();
                }
            }
            Ok(Err(e)) => {
                println!("{} Watch error: {e:?}", "⚠️".yellow());
            }
            Err(_) => break,
        }
    }

    Ok(())
}

/// One watch iteration. Errors are printed, not fatal — the watcher keeps
/// running so the next save gets another attempt.
fn run_watch_pass(file: &Path, cache: &mut TableCache, options: &ReportOptions) {
    let bytes = match fs::read(file) {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("{} Failed to read {}: {e}", "❌".red(), file.display());
            return;
        }
    };

    // Content-addressed: an unchanged byte stream is never recomputed
    let digest = TableCache::digest(&bytes);
    if cache.lookup(&digest).is_some() {
        println!("   {}", "Content unchanged, skipping".dimmed());
        return;
    }

    let start_col = options.start_col;
    let result = cache.get_or_build(&bytes, || {
        WorkbookImporter::from_bytes(bytes.clone())
            .with_start_col(start_col)
            .import()
    });

    match result {
        Ok(table) => render_report(&table, options),
        Err(e) => println!("{} {e}", "❌".red()),
    }
}
