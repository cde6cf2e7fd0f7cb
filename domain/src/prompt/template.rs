//! Prompt templates for the council stages
//!
//! Stage 1 sends the user's query as-is (with inlined documents), so there
//! is no template for it. Stage 2 and Stage 3 wrap the accumulated material
//! in fixed instruction text; the ranking prompt works strictly from
//! anonymized labels, while the chairman prompt discloses attribution.

use crate::core::model_id::ModelId;
use crate::council::aggregate::AggregateRanking;
use crate::council::anonymize::AnonymizedResponse;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Ranking prompt for one member: evaluate the anonymized set and close
    /// with a machine-readable `FINAL RANKING:` list.
    ///
    /// Only labels and response texts go in here. Model identities stay out
    /// by construction: the input type carries no readable attribution.
    pub fn ranking_prompt(question: &str, responses: &[AnonymizedResponse]) -> String {
        let responses_text: Vec<String> = responses
            .iter()
            .map(|response| format!("{}:\n{}", response.label, response.text))
            .collect();
        let responses_text = responses_text.join("\n\n");

        format!(
            r#"You are evaluating different responses to the following question:

Question: {}

Here are the responses from different models (anonymized):

{}

Your task:
1. First, evaluate each response individually. For each response, explain what it does well and what it does poorly.
2. Then, at the very end of your response, provide a final ranking.

IMPORTANT: Your final ranking MUST be formatted EXACTLY as follows:
- Start with the line "FINAL RANKING:" (all caps, with colon)
- Then list the responses from best to worst as a numbered list
- Each line should be: number, period, space, then ONLY the response label (e.g., "1. Response A")
- Do not add any other text or explanations in the ranking section

Example of the correct format for your ENTIRE response:

Response A provides good detail on X but misses Y...
Response B is accurate but lacks depth on Z...
Response C offers the most comprehensive answer...

FINAL RANKING:
1. Response C
2. Response A
3. Response B

Now provide your evaluation and ranking:"#,
            question, responses_text
        )
    }

    /// Chairman prompt: everything the run produced, attribution disclosed,
    /// with the consensus ranking as context.
    pub fn synthesis_prompt(
        question: &str,
        responses: &[(ModelId, String)],
        rankings: &[(ModelId, String)],
        aggregate: &AggregateRanking,
    ) -> String {
        let stage1_text: Vec<String> = responses
            .iter()
            .map(|(model, text)| format!("Model: {}\nResponse: {}", model, text))
            .collect();
        let stage1_text = stage1_text.join("\n\n");

        let stage2_text: Vec<String> = rankings
            .iter()
            .map(|(model, text)| format!("Model: {}\nRanking: {}", model, text))
            .collect();
        let stage2_text = stage2_text.join("\n\n");

        let consensus_text: Vec<String> = aggregate
            .standings()
            .iter()
            .enumerate()
            .map(|(position, standing)| {
                let model = aggregate
                    .model_for(&standing.label)
                    .map(|m| m.as_str())
                    .unwrap_or("unknown");
                format!(
                    "{}. {} ({}) - {} points",
                    position + 1,
                    standing.label,
                    model,
                    standing.score
                )
            })
            .collect();
        let consensus_text = consensus_text.join("\n");

        format!(
            r#"You are the Chairman of an LLM Council. Multiple AI models have provided responses to a user's question, and then ranked each other's responses.

Original Question: {}

STAGE 1 - Individual Responses:
{}

STAGE 2 - Peer Rankings:
{}

CONSENSUS RANKING (Borda count, best first):
{}

Your task as Chairman is to synthesize all of this information into a single, comprehensive, accurate answer to the user's original question. Consider:
- The individual responses and their insights
- The peer rankings and what they reveal about response quality
- Any patterns of agreement or disagreement

Provide a clear, well-reasoned final answer that represents the council's collective wisdom:"#,
            question, stage1_text, stage2_text, consensus_text
        )
    }

    /// One-shot prompt for naming a conversation after its first question
    pub fn title_prompt(question: &str) -> String {
        format!(
            r#"Generate a very short title (3-5 words maximum) that summarizes the following question.
The title should be concise and descriptive. Do not use quotes or punctuation in the title.

Question: {}

Title:"#,
            question
        )
    }
}
