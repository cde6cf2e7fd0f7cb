//! Console output formatter for council verdicts

use colored::Colorize;
use council_domain::{
    Conversation, ConversationSummary, CouncilVerdict, Stage, TokenUsage, TurnOutcome,
};

/// Formats council verdicts for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colored output off; when enabled, terminal detection decides
    pub fn set_color_enabled(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Format the complete verdict: all three stages, standings, and usage
    pub fn format(verdict: &CouncilVerdict) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Council"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            verdict.prompt
        ));

        // Stage 1: every member's attempt, successes and failures
        output.push_str(&Self::section_header(Stage::Responses.display_name()));
        for response in &verdict.responses {
            if response.success {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", response.model).yellow().bold(),
                    response.content
                ));
            } else {
                output.push_str(&format!(
                    "\n{}\nError: {}\n",
                    format!("── {} ──", response.model).red().bold(),
                    response.error.as_deref().unwrap_or("unknown")
                ));
            }
        }

        // Stage 2: consensus standings with attribution disclosed
        output.push_str(&Self::section_header("Stage 2: Consensus Ranking"));
        output.push('\n');
        for (position, standing) in verdict.aggregate.standings().iter().enumerate() {
            let model = verdict
                .aggregate
                .model_for(&standing.label)
                .map(|m| m.to_string())
                .unwrap_or_default();
            output.push_str(&format!(
                "  {}. {} — {} ({} pts over {} rankings)\n",
                position + 1,
                standing.label.to_string().bold(),
                model.yellow(),
                standing.score,
                standing.rankings_count
            ));
        }
        for ranking in verdict.rankings.iter().filter(|r| !r.is_valid()) {
            let reason = ranking
                .invalid_reason
                .as_deref()
                .or(ranking.result.error.as_deref())
                .unwrap_or("no ranking");
            output.push_str(&format!(
                "  {} {}: {}\n",
                "x".red(),
                ranking.result.model,
                reason.dimmed()
            ));
        }

        // Stage 3: the chairman's answer
        output.push_str(&Self::section_header("Stage 3: Final Synthesis"));
        output.push_str(&format!(
            "\n{}\n\n{}\n",
            format!("Chairman: {}", verdict.synthesis.chairman)
                .yellow()
                .bold(),
            verdict.synthesis.text
        ));

        // Token accounting
        output.push_str(&Self::section_header("Token Usage"));
        output.push('\n');
        for (name, usage) in [
            ("Stage 1", &verdict.usage.stage1_total),
            ("Stage 2", &verdict.usage.stage2_total),
            ("Stage 3", &verdict.usage.stage3_total),
        ] {
            output.push_str(&format!("  {:<10} {}\n", name, Self::usage_line(usage)));
        }
        output.push_str(&format!(
            "  {:<10} {}\n",
            "Total".bold(),
            Self::usage_line(&verdict.usage.grand_total)
        ));
        if !verdict.usage.by_model.is_empty() {
            output.push('\n');
            for (model, usage) in &verdict.usage.by_model {
                output.push_str(&format!(
                    "  {:<40} {}\n",
                    model.to_string().dimmed(),
                    Self::usage_line(usage)
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format only the final answer (concise output)
    pub fn format_final(verdict: &CouncilVerdict) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Council Answer ===".cyan().bold()
        ));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), verdict.prompt));
        output.push_str(&format!(
            "{} {}\n\n",
            "Chairman:".dimmed(),
            verdict.synthesis.chairman
        ));
        output.push_str(verdict.final_answer());
        output.push('\n');

        output
    }

    /// Format the whole verdict as JSON
    pub fn format_json(verdict: &CouncilVerdict) -> String {
        serde_json::to_string_pretty(verdict).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a conversation listing, newest first
    pub fn format_conversation_list(summaries: &[ConversationSummary]) -> String {
        if summaries.is_empty() {
            return "No stored conversations.\n".to_string();
        }

        let mut output = String::new();
        for summary in summaries {
            output.push_str(&format!(
                "{}  {}  {} ({} {})\n",
                summary.id.dimmed(),
                summary.created_at,
                summary.title.bold(),
                summary.turn_count,
                if summary.turn_count == 1 { "turn" } else { "turns" }
            ));
        }
        output
    }

    /// Format one stored conversation, turn by turn
    pub fn format_conversation(conversation: &Conversation) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&conversation.title));
        output.push_str(&format!(
            "\n{} {}  {} {}\n",
            "Id:".dimmed(),
            conversation.id,
            "Created:".dimmed(),
            conversation.created_at
        ));

        for turn in &conversation.turns {
            output.push_str(&Self::section_header(&format!("Turn {}", turn.sequence)));
            output.push_str(&format!(
                "\n{} {}\n",
                "Question:".cyan().bold(),
                turn.prompt
            ));
            if !turn.attachment_names.is_empty() {
                output.push_str(&format!(
                    "{} {}\n",
                    "Attachments:".dimmed(),
                    turn.attachment_names.join(", ")
                ));
            }
            match &turn.outcome {
                TurnOutcome::Completed { verdict } => {
                    output.push_str(&format!("\n{}\n", verdict.final_answer()));
                }
                TurnOutcome::Aborted { reason } => {
                    output.push_str(&format!("\n{} {}\n", "Aborted:".red().bold(), reason));
                }
            }
        }

        output.push_str(&Self::footer());
        output
    }

    fn usage_line(usage: &TokenUsage) -> String {
        format!(
            "{} prompt + {} completion = {} tokens",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        AggregateRanking, Anonymizer, ConversationTurn, Label, ModelId, ModelResult,
        RankingOutcome, RankingSubmission, Stage, SynthesisResult, TokenUsage, UsageRecord,
        UsageSummary,
    };
    use std::collections::BTreeSet;

    fn sample_verdict() -> CouncilVerdict {
        let responses = vec![
            ModelResult::answered(
                ModelId::new("vendor/alpha"),
                Stage::Responses,
                "alpha says hello",
                Some(TokenUsage::new(10, 5)),
            ),
            ModelResult::answered(
                ModelId::new("vendor/beta"),
                Stage::Responses,
                "beta says hello",
                Some(TokenUsage::new(12, 6)),
            ),
            ModelResult::failed(ModelId::new("vendor/gamma"), Stage::Responses, "timed out"),
        ];

        let survivors = vec![
            (ModelId::new("vendor/alpha"), "alpha says hello".to_string()),
            (ModelId::new("vendor/beta"), "beta says hello".to_string()),
        ];
        let (anonymized, map) = Anonymizer::with_seed(3).assign(survivors).unwrap();
        let expected: BTreeSet<Label> = anonymized.iter().map(|r| r.label).collect();
        let order: Vec<Label> = expected.iter().copied().collect();

        let submission =
            RankingSubmission::try_new(ModelId::new("vendor/alpha"), order, &expected).unwrap();
        let rankings = vec![
            RankingOutcome::valid(
                ModelResult::answered(
                    ModelId::new("vendor/alpha"),
                    Stage::Rankings,
                    "FINAL RANKING:\n1. Response A\n2. Response B",
                    None,
                ),
                submission.clone(),
            ),
            RankingOutcome::failed(ModelResult::failed(
                ModelId::new("vendor/gamma"),
                Stage::Rankings,
                "no usable first-stage response",
            )),
        ];

        let aggregate = AggregateRanking::from_submissions(&[submission], &expected, map);
        let synthesis = SynthesisResult::new(
            ModelId::new("vendor/chair"),
            "the definitive answer",
            Some(TokenUsage::new(50, 20)),
        );
        let usage = UsageSummary::from_records(&[
            UsageRecord::new(
                Stage::Responses,
                ModelId::new("vendor/alpha"),
                TokenUsage::new(10, 5),
            ),
            UsageRecord::new(
                Stage::Synthesis,
                ModelId::new("vendor/chair"),
                TokenUsage::new(50, 20),
            ),
        ]);

        CouncilVerdict::new(
            "sample question",
            responses,
            rankings,
            aggregate,
            synthesis,
            usage,
        )
    }

    #[test]
    fn test_full_format_has_all_sections() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&sample_verdict());
        assert!(text.contains("Stage 1: Responses"));
        assert!(text.contains("Stage 2: Consensus Ranking"));
        assert!(text.contains("Stage 3: Final Synthesis"));
        assert!(text.contains("Token Usage"));
        assert!(text.contains("vendor/alpha"));
        assert!(text.contains("Error: timed out"));
        assert!(text.contains("the definitive answer"));
    }

    #[test]
    fn test_final_format_is_just_the_answer() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_final(&sample_verdict());
        assert!(text.contains("the definitive answer"));
        assert!(!text.contains("Stage 1"));
    }

    #[test]
    fn test_json_format_round_trips() {
        let text = ConsoleFormatter::format_json(&sample_verdict());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["prompt"], "sample question");
        assert!(value["aggregate"]["standings"].is_array());
    }

    #[test]
    fn test_empty_listing() {
        assert!(ConsoleFormatter::format_conversation_list(&[]).contains("No stored"));
    }

    #[test]
    fn test_conversation_format_shows_aborted_turns() {
        colored::control::set_override(false);
        let mut conversation = Conversation::new("c-1", "2026-01-01T00:00:00Z");
        conversation.add_turn(ConversationTurn::aborted(
            1,
            "2026-01-01T00:00:01Z",
            "anyone?",
            vec![],
            "quorum_not_reached",
        ));
        let text = ConsoleFormatter::format_conversation(&conversation);
        assert!(text.contains("Turn 1"));
        assert!(text.contains("quorum_not_reached"));
    }
}
