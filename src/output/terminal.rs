// Colored terminal output for evaluation reports and single predictions.

use colored::Colorize;

use crate::pipeline::evaluation::EvaluationRun;
use crate::ranking::precision::PrecisionReport;
use crate::ranking::ranker::{FallbackReason, SUMMARY_LABEL};

/// Display the precision report and the per-aspect breakdown.
pub fn display_report(report: &PrecisionReport, run: &EvaluationRun) {
    println!(
        "\n{}",
        format!("=== Precision @1 ({} sentences) ===", report.samples).bold()
    );
    println!();

    match report.converged_at {
        Some(i) => println!(
            "  Moving average: {} at sample {}",
            format!("{:.4}", report.average).green().bold(),
            i
        ),
        None => println!("  Moving average: {}", "did not converge".yellow()),
    }
    println!("  Overall:        {:.4}", report.overall);
    println!(
        "  Correct:        {}/{}  ({} summary fallbacks)",
        run.hits(),
        run.rows(),
        run.fallbacks
    );

    if run.per_aspect.is_empty() {
        return;
    }

    println!();
    println!(
        "  {:<32} {:>7}  {:>9}",
        "Aspect".dimmed(),
        "Rows".dimmed(),
        "Precision".dimmed(),
    );
    println!("  {}", "-".repeat(52).dimmed());

    let mut rows: Vec<_> = run.per_aspect.iter().collect();
    rows.sort_by(|a, b| b.1.total.cmp(&a.1.total).then_with(|| a.0.cmp(b.0)));
    for (aspect, tally) in rows {
        println!(
            "  {:<32} {:>7}  {}",
            super::truncate_chars(aspect, 29),
            tally.total,
            colorize_precision(tally.precision()),
        );
    }
    println!();
}

/// Display every candidate's similarity for one sentence, best first.
pub fn display_scores(entity: &str, sentence: &str, scores: &Result<Vec<(String, f64)>, FallbackReason>) {
    println!(
        "\n{}",
        format!("=== Aspects for \"{}\" ===", entity).bold()
    );
    println!("  {}", super::truncate_chars(sentence, 120).dimmed());
    println!();

    let scores = match scores {
        Ok(scores) => scores,
        Err(reason) => {
            println!(
                "  Prediction: {} ({})",
                SUMMARY_LABEL.yellow().bold(),
                reason
            );
            return;
        }
    };

    let mut ranked: Vec<&(String, f64)> = scores.iter().collect();
    // stable sort keeps candidate order among ties, so the first row is the prediction
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (rank, (label, sim)) in ranked.iter().enumerate() {
        let line = format!("  {:>3}. {:<32} {:.4}", rank + 1, label, sim);
        if rank == 0 {
            println!("{}", line.green().bold());
        } else {
            println!("{line}");
        }
    }
}

fn colorize_precision(p: f64) -> colored::ColoredString {
    let text = format!("{:>9.4}", p);
    if p >= 0.75 {
        text.green()
    } else if p >= 0.4 {
        text.yellow()
    } else {
        text.red()
    }
}
