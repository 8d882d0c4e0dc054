use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{ConversationTurn, EmployeeScore, PredictionResult, RawUserInput, Role};

pub fn build_analysis_report(
    input: &RawUserInput,
    days_since_joining: i64,
    prediction: &PredictionResult,
    turns: &[ConversationTurn],
    generated_on: NaiveDate,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Burnout Risk Report");
    let _ = writeln!(output, "Generated on {}", generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Work Metrics");
    let _ = writeln!(
        output,
        "- Joined on {} ({} days ago)",
        input.join_date, days_since_joining
    );
    let _ = writeln!(output, "- Gender: {}", input.gender);
    let _ = writeln!(output, "- Company type: {}", input.company_type);
    let _ = writeln!(output, "- WFH setup available: {}", input.wfh_setup);
    let _ = writeln!(output, "- Designation level: {}", input.designation);
    let _ = writeln!(
        output,
        "- Resource allocation: {} projects",
        input.resource_allocation
    );
    let _ = writeln!(
        output,
        "- Mental fatigue score: {:.1}",
        input.mental_fatigue_score
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Prediction");
    let _ = writeln!(
        output,
        "- Predicted burnout score: {:.2} / 1.0",
        prediction.burn_rate
    );
    let _ = writeln!(
        output,
        "- Risk category: {} {}",
        prediction.risk_category, prediction.emoji
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Coaching Session");

    if turns.is_empty() {
        let _ = writeln!(output, "No coaching messages recorded.");
    } else {
        for turn in turns {
            let speaker = match turn.role {
                Role::User => "You",
                Role::Assistant => "Coach",
            };
            let _ = writeln!(output);
            let _ = writeln!(output, "**{}:** {}", speaker, turn.content);
        }
    }

    output
}

pub fn build_batch_report(scores: &[EmployeeScore], generated_on: NaiveDate) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Team Burnout Report");
    let _ = writeln!(output, "Generated on {}", generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Employees by Predicted Risk");

    if scores.is_empty() {
        let _ = writeln!(output, "No employees scored.");
    } else {
        for score in scores {
            let _ = writeln!(
                output,
                "- {}: score {:.2} ({} {})",
                score.name, score.burn_rate, score.risk_category, score.emoji
            );
        }
    }

    output
}
