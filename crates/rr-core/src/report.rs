use std::fmt::Write as _;
use std::io::Write;

use crate::error::RankError;
use crate::matching::pipeline::RankingOutcome;
use crate::RankedResult;

/// Write the ranking report as delimited text, one row per ranked
/// result plus a header. The only persisted artifact of a request.
pub fn write_report<W: Write>(ranked: &[RankedResult], writer: W) -> Result<(), RankError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "rank",
        "filename",
        "final_score",
        "skill_score",
        "similarity_score",
        "experience_score",
        "experience_years",
        "total_skills",
        "matched_skills",
        "missing_skills",
        "email",
        "phone",
    ])?;

    for (index, result) in ranked.iter().enumerate() {
        let breakdown = &result.breakdown;
        csv_writer.write_record([
            (index + 1).to_string(),
            result.filename.clone(),
            format!("{:.4}", breakdown.final_score),
            format!("{:.4}", breakdown.skill_score),
            format!("{:.4}", breakdown.similarity_score),
            format!("{:.4}", breakdown.experience_score),
            result.experience_years.to_string(),
            result.total_skills.to_string(),
            join_set(&breakdown.matched_skills),
            join_set(&breakdown.missing_skills),
            result.contact.email.clone().unwrap_or_default(),
            result.contact.phone.clone().unwrap_or_default(),
        ])?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Human-readable ranking listing for terminal output.
pub fn render_table(outcome: &RankingOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<30} {:>7} {:>7} {:>7} {:>7} {:>6}",
        "rank", "filename", "final", "skills", "sim", "exp", "years"
    );

    for (index, result) in outcome.ranked.iter().enumerate() {
        let b = &result.breakdown;
        let _ = writeln!(
            out,
            "{:>4}  {:<30} {:>7.3} {:>7.3} {:>7.3} {:>7.3} {:>6}",
            index + 1,
            result.filename,
            b.final_score,
            b.skill_score,
            b.similarity_score,
            b.experience_score,
            result.experience_years,
        );
    }

    let summary = &outcome.summary;
    let _ = writeln!(
        out,
        "\n{} ranked, {} skipped | mean {:.3} | top {:.3} | qualified {}",
        summary.total,
        outcome.skipped.len(),
        summary.mean_score,
        summary.top_score,
        summary.qualified,
    );

    for skipped in &outcome.skipped {
        let _ = writeln!(out, "skipped {}: {}", skipped.filename, skipped.reason);
    }

    out
}

fn join_set(skills: &std::collections::BTreeSet<String>) -> String {
    skills.iter().cloned().collect::<Vec<_>>().join("; ")
}
