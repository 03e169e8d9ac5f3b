use std::collections::BTreeSet;
use std::env;

use anyhow::{anyhow, bail, Context, Result};
use carbontrack::badges::{badge_board, CATALOG};
use carbontrack::calculator::{kg_to_tonnes, FootprintResult};
use carbontrack::factors::compare_to_benchmarks;
use carbontrack::scenario::ReductionAction;
use carbontrack::{ActivityInput, FootprintTracker};
use chrono::NaiveDate;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_usage();
        return Ok(());
    };
    let rest: Vec<String> = args.collect();
    if matches!(command.as_str(), "--help" | "-h" | "help") {
        print_usage();
        return Ok(());
    }

    let tracker = FootprintTracker::open()?;
    match command.as_str() {
        "calculate" => calculate(&tracker, &rest),
        "history" => history(&tracker, &rest),
        "stats" => stats(&tracker),
        "goal" => goal(&tracker, &rest),
        "badges" => badges(&tracker),
        "simulate" => simulate(&tracker, &rest),
        "presets" => presets(&tracker, &rest),
        "countries" => {
            for country in tracker.factors().countries() {
                println!("{country}");
            }
            Ok(())
        }
        "clear" => {
            tracker.clear_history()?;
            println!("History cleared.");
            Ok(())
        }
        other => Err(anyhow!(
            "Unknown command '{other}'. Run with --help for usage instructions."
        )),
    }
}

fn calculate(tracker: &FootprintTracker, args: &[String]) -> Result<()> {
    let mut country = None;
    let mut diet = None;
    let mut legs = Vec::new();
    let mut electricity = 0.0;
    let mut waste = 0.0;
    let mut recycling = 0.0;
    let mut dry_run = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("Expected a value after {flag}"))
        };
        match arg.as_str() {
            "--country" => country = Some(value("--country")?),
            "--diet" => diet = Some(value("--diet")?),
            "--transport" => legs.push(parse_leg(&value("--transport")?)?),
            "--electricity" => {
                electricity = parse_number("--electricity", &value("--electricity")?)?
            }
            "--waste" => waste = parse_number("--waste", &value("--waste")?)?,
            "--recycling" => recycling = parse_rate(&value("--recycling")?)?,
            "--dry-run" => dry_run = true,
            other => bail!("Unknown argument '{other}' for calculate"),
        }
    }

    let country = country.context("--country is required")?;
    let diet = diet.context("--diet is required")?;
    let mut input = ActivityInput::new(country, diet)
        .with_electricity(electricity)
        .with_waste(waste, recycling);
    for (mode, km) in legs {
        input = input.with_transport(mode, km);
    }

    let result = if dry_run {
        tracker.preview(&input)?
    } else {
        tracker.submit(&input)?
    };
    print_result(&result);

    let comparison = compare_to_benchmarks(&result);
    println!(
        "  vs {} average ({:.1} t): {:+.2} t",
        result.country,
        kg_to_tonnes(comparison.country_average_kg),
        kg_to_tonnes(comparison.vs_country_kg)
    );
    println!("  vs global average:  {:+.2} t", kg_to_tonnes(comparison.vs_global_kg));
    println!("  vs 2050 target:     {:+.2} t", kg_to_tonnes(comparison.vs_2050_target_kg));

    if !dry_run {
        if let Some(progress) = tracker.goal_progress(chrono::Local::now().date_naive())? {
            if progress.achieved {
                println!("Goal achieved!");
            } else {
                println!(
                    "Goal progress {:.0}%, {:.2} t to go, {} days remaining",
                    progress.progress_fraction * 100.0,
                    kg_to_tonnes(progress.remaining_kg),
                    progress.days_remaining
                );
            }
        }
    }
    Ok(())
}

fn history(tracker: &FootprintTracker, args: &[String]) -> Result<()> {
    let limit = match args {
        [] => usize::MAX,
        [flag, value] if flag == "--limit" => value
            .parse()
            .with_context(|| format!("Invalid --limit '{value}'"))?,
        _ => bail!("Usage: carbontrack history [--limit N]"),
    };
    let records = tracker.history().recent(limit)?;
    if records.is_empty() {
        println!("No calculation history yet.");
    }
    for record in records {
        println!(
            "{}  {:<10} {:>8.2} t",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.country,
            kg_to_tonnes(record.annualized_total())
        );
    }
    Ok(())
}

fn stats(tracker: &FootprintTracker) -> Result<()> {
    let stats = tracker.statistics()?;
    println!("Calculations: {}", stats.count);
    if let (Some(avg), Some(min), Some(max)) = (stats.average, stats.minimum, stats.maximum) {
        println!("Average: {:.2} t", kg_to_tonnes(avg));
        println!("Lowest:  {:.2} t", kg_to_tonnes(min));
        println!("Highest: {:.2} t", kg_to_tonnes(max));
        println!("Trend:   {}", stats.trend.as_str());
    }
    Ok(())
}

fn goal(tracker: &FootprintTracker, args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("set") => {
            let mut target = None;
            let mut deadline = None;
            let mut iter = args[1..].iter();
            while let Some(arg) = iter.next() {
                let value = iter
                    .next()
                    .with_context(|| format!("Expected a value after {arg}"))?;
                match arg.as_str() {
                    "--target-tonnes" => target = Some(parse_number(arg, value)? * 1000.0),
                    "--deadline" => {
                        deadline = Some(
                            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                                .with_context(|| format!("Invalid deadline '{value}'"))?,
                        )
                    }
                    other => bail!("Unknown argument '{other}' for goal set"),
                }
            }
            let goal = tracker.goals().set_goal(
                target.context("--target-tonnes is required")?,
                deadline.context("--deadline is required")?,
            )?;
            println!(
                "Goal saved: {:.2} t by {}",
                kg_to_tonnes(goal.target),
                goal.deadline
            );
        }
        Some("clear") => match tracker.goals().clear_goal()? {
            Some(_) => println!("Goal cleared."),
            None => println!("No active goal."),
        },
        Some("show") | None => match tracker.goals().active_goal()? {
            Some(goal) => println!(
                "Active goal: {:.2} t by {}",
                kg_to_tonnes(goal.target),
                goal.deadline
            ),
            None => println!("No active goal."),
        },
        Some(other) => bail!("Unknown goal subcommand '{other}'"),
    }
    Ok(())
}

fn badges(tracker: &FootprintTracker) -> Result<()> {
    let dashboard = tracker.dashboard()?;
    println!("You've earned {} of {} badges", dashboard.badges.len(), CATALOG.len());
    for status in badge_board(&dashboard.badges) {
        let mark = if status.earned { "x" } else { " " };
        println!(
            "[{mark}] {} {:<17} {}",
            status.badge.icon, status.badge.title, status.badge.description
        );
    }
    let next = dashboard.next_badges;
    if next.calculations_to_tracker > 0 {
        println!(
            "Tracker: {} more calculations",
            next.calculations_to_tracker
        );
    }
    if let Some(kg) = next.champion_reduction_kg {
        println!("Climate Champion: reduce by {:.2} t", kg_to_tonnes(kg));
    }
    Ok(())
}

fn simulate(tracker: &FootprintTracker, args: &[String]) -> Result<()> {
    if args.is_empty() {
        println!("Available actions:");
        for spec in ReductionAction::all() {
            println!(
                "  {:<22} {:<12} -{:.0}%  {}",
                spec.action.as_str(),
                spec.category.label(),
                spec.reduction * 100.0,
                spec.description
            );
        }
        return Ok(());
    }
    let actions = args
        .iter()
        .map(|raw| ReductionAction::parse(raw).with_context(|| format!("Unknown action '{raw}'")))
        .collect::<Result<BTreeSet<_>>>()?;
    let Some(outcome) = tracker.simulate_latest(&actions)? else {
        println!("No calculation history yet.");
        return Ok(());
    };
    println!("Current:   {:.2} t", kg_to_tonnes(outcome.baseline_total));
    println!("Simulated: {:.2} t", kg_to_tonnes(outcome.simulated.total));
    println!(
        "Savings:   {:.2} t ({:.1}%)",
        kg_to_tonnes(outcome.savings_kg),
        outcome.savings_fraction * 100.0
    );
    Ok(())
}

fn presets(tracker: &FootprintTracker, args: &[String]) -> Result<()> {
    let country = match args {
        [flag, value] if flag == "--country" => value.clone(),
        [] => tracker
            .factors()
            .countries()
            .next()
            .map(str::to_string)
            .context("Factor table has no countries")?,
        _ => bail!("Usage: carbontrack presets [--country C]"),
    };
    let comparison = tracker.compare_presets(&country)?;
    println!("High carbon lifestyle in {country}:");
    print_result(&comparison.high);
    println!("Low carbon lifestyle in {country}:");
    print_result(&comparison.low);
    println!(
        "Potential savings: {:.2} t ({:.1}%)",
        kg_to_tonnes(comparison.savings_kg),
        comparison.savings_fraction * 100.0
    );
    Ok(())
}

fn print_result(result: &FootprintResult) {
    println!(
        "Total: {:.2} t CO2e ({})",
        kg_to_tonnes(result.total),
        result.period.as_str()
    );
    for (category, share) in result.categories.shares() {
        println!(
            "  {:<15} {:>8.2} t  {:>5.1}%",
            category.label(),
            kg_to_tonnes(result.categories.get(category)),
            share * 100.0
        );
    }
}

fn parse_leg(raw: &str) -> Result<(String, f64)> {
    let (mode, km) = raw
        .rsplit_once(':')
        .with_context(|| format!("Expected <mode>:<km>, got '{raw}'"))?;
    Ok((mode.trim().to_string(), parse_number("--transport", km)?))
}

fn parse_number(flag: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid number '{raw}' for {flag}"))
}

/// Accepts a fraction (0.7) or a percentage with a `%` suffix (70%).
fn parse_rate(raw: &str) -> Result<f64> {
    let rate = match raw.trim().strip_suffix('%') {
        Some(percent) => parse_number("--recycling", percent)? / 100.0,
        None => parse_number("--recycling", raw)?,
    };
    if !(0.0..=1.0).contains(&rate) {
        bail!("Recycling rate '{raw}' must be between 0 and 1 (or 0% and 100%)");
    }
    Ok(rate)
}

fn print_usage() {
    println!("CarbonTrack personal carbon footprint calculator");
    println!("Usage: carbontrack <command> [options]");
    println!("Commands:");
    println!("  calculate --country C --diet D [--transport <mode>:<km/day>]...");
    println!("            [--electricity <kWh/month>] [--waste <kg/week>] [--recycling <0-1|N%>]");
    println!("            [--dry-run]");
    println!("  history [--limit N]        Show recorded calculations, most recent first");
    println!("  stats                      Show aggregate statistics and trend");
    println!("  goal set --target-tonnes T --deadline YYYY-MM-DD | goal show | goal clear");
    println!("  badges                     Show earned achievement badges");
    println!("  simulate [action]...       Apply reduction actions to the latest footprint");
    println!("  presets [--country C]      Compare high- and low-carbon lifestyles");
    println!("  countries                  List countries in the factor table");
    println!("  clear                      Delete all recorded calculations");
    println!("Set CARBONTRACK_HOME to change where data is stored; RUST_LOG controls logging.");
}
