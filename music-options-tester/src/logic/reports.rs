use anyhow::Result;
use colored::Colorize;
use music_options::MenuEntry;
use std::io::Write;
use std::time::Duration;

use super::{RefreshReport, RunReport, SampleReport};

pub fn generate_console_report(
    writer: &mut dyn Write,
    report: &RunReport,
    total_duration: Duration,
) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "📊 Music Options Results".bright_cyan().bold())?;
    writeln!(writer, "{}", "========================".cyan())?;

    match report {
        RunReport::Sample(results) => console_samples(writer, results)?,
        RunReport::Refresh(results) => console_refresh(writer, results)?,
        RunReport::Menu(entries) => console_menu(writer, entries)?,
    }

    writeln!(writer, "Total time: {total_duration:?}")?;
    Ok(())
}

fn status_label(passed: bool) -> colored::ColoredString {
    if passed {
        "✅ PASS".green()
    } else {
        "❌ FAIL".red()
    }
}

fn console_samples(writer: &mut dyn Write, results: &[SampleReport]) -> Result<()> {
    for result in results {
        writeln!(
            writer,
            "{} {} choice {} → {} ({} trials)",
            status_label(result.passed),
            result.category.to_string().bold(),
            result.choice,
            result.label,
            result.trials
        )?;
        if !result.enabled {
            writeln!(writer, "   {}", "category disabled, map default only".yellow())?;
        }
        for (track, count) in &result.counts {
            writeln!(
                writer,
                "   {track:24} {count:>6}  {:>5.1}%",
                result.share(track) * 100.0
            )?;
        }
        for failure in &result.failures {
            writeln!(writer, "     • {}", failure.red())?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn console_refresh(writer: &mut dyn Write, results: &[RefreshReport]) -> Result<()> {
    for result in results {
        writeln!(
            writer,
            "{} {}",
            status_label(result.passed),
            result.category.to_string().bold()
        )?;
        for step in &result.steps {
            let calls = if step.audio_calls.is_empty() {
                "no audio calls".to_string()
            } else {
                step.audio_calls.join(", ")
            };
            let line = format!(
                "   {:24} index {} → {} [{}/{} calls] {}",
                step.description,
                step.index,
                step.outcome,
                step.audio_calls.len(),
                step.expected_calls,
                calls
            );
            if step.passed {
                writeln!(writer, "{line}")?;
            } else {
                writeln!(writer, "{}", line.red())?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn console_menu(writer: &mut dyn Write, entries: &[MenuEntry]) -> Result<()> {
    if entries.is_empty() {
        writeln!(writer, "No music entries enabled.")?;
    }
    for entry in entries {
        writeln!(
            writer,
            "{:>4}  {} ({}, {:?})",
            entry.order,
            entry.name.bold(),
            entry.key,
            entry.widget
        )?;
        writeln!(writer, "      {}", entry.description)?;
        writeln!(writer, "      [{}]", entry.labels.join(" | "))?;
    }
    writeln!(writer)?;
    Ok(())
}

pub fn generate_json_report(writer: &mut dyn Write, report: &RunReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn generate_markdown_report(writer: &mut dyn Write, report: &RunReport) -> Result<()> {
    writeln!(writer, "# Music Options Results\n")?;

    match report {
        RunReport::Sample(results) => {
            let passed = results.iter().filter(|r| r.passed).count();
            writeln!(writer, "## Summary\n")?;
            writeln!(writer, "- **Checks**: {}", results.len())?;
            writeln!(writer, "- **Passed**: {passed}")?;
            writeln!(writer, "- **Failed**: {}\n", results.len() - passed)?;
            for result in results {
                let status = if result.passed { "✅" } else { "❌" };
                writeln!(
                    writer,
                    "### {status} {} choice {} ({})\n",
                    result.category, result.choice, result.label
                )?;
                writeln!(writer, "| Track | Count | Share |")?;
                writeln!(writer, "|---|---:|---:|")?;
                for (track, count) in &result.counts {
                    writeln!(
                        writer,
                        "| {track} | {count} | {:.1}% |",
                        result.share(track) * 100.0
                    )?;
                }
                markdown_failures(writer, &result.failures)?;
                writeln!(writer)?;
            }
        }
        RunReport::Refresh(results) => {
            for result in results {
                let status = if result.passed { "✅" } else { "❌" };
                writeln!(writer, "### {status} {}\n", result.category)?;
                writeln!(writer, "| Step | Index | Active | Calls | Expected | Outcome |")?;
                writeln!(writer, "|---|---:|---|---:|---:|---|")?;
                for step in &result.steps {
                    writeln!(
                        writer,
                        "| {} | {} | {} | {} | {} | {} |",
                        step.description,
                        step.index,
                        step.mode_active,
                        step.audio_calls.len(),
                        step.expected_calls,
                        step.outcome
                    )?;
                }
                writeln!(writer)?;
            }
        }
        RunReport::Menu(entries) => {
            writeln!(writer, "| Order | Key | Name | Widget | Labels |")?;
            writeln!(writer, "|---:|---|---|---|---|")?;
            for entry in entries {
                writeln!(
                    writer,
                    "| {} | {} | {} | {:?} | {} |",
                    entry.order,
                    entry.key,
                    entry.name,
                    entry.widget,
                    entry.labels.join(", ")
                )?;
            }
        }
    }
    Ok(())
}

fn markdown_failures(writer: &mut dyn Write, failures: &[String]) -> Result<()> {
    if failures.is_empty() {
        return Ok(());
    }
    writeln!(writer, "\n- **Failures**:")?;
    for failure in failures {
        writeln!(writer, "  - {failure}")?;
    }
    Ok(())
}
