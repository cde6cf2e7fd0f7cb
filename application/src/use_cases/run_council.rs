//! Run Council use case
//!
//! Orchestrates the full three-stage council flow: parallel first
//! responses, anonymized peer ranking, and chairman synthesis.

use crate::config::params::CouncilParams;
use crate::ports::model_invoker::{InvocationError, ModelAnswer, ModelInvoker};
use crate::ports::progress::{CouncilProgress, NoProgress};
use crate::use_cases::usage_ledger::UsageLedger;
use council_domain::{
    AggregateRanking, AnonymizedResponse, Anonymizer, Attachment, CouncilQuery, CouncilVerdict,
    DomainError, Label, ModelId, ModelResult, PromptTemplate, RankingOutcome, RankingSubmission,
    Stage, SynthesisResult, parse_ranking,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that end a council run
#[derive(Error, Debug)]
pub enum RunCouncilError {
    #[error("No council members configured")]
    EmptyCouncil,

    #[error("Only {usable} of {total} members responded; at least {required} required")]
    QuorumNotReached {
        usable: usize,
        total: usize,
        required: usize,
    },

    #[error("No member produced a valid ranking")]
    NoValidRankings,

    #[error("Chairman {chairman} failed to synthesize: {source}")]
    ChairmanUnavailable {
        chairman: ModelId,
        source: InvocationError,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RunCouncilError {
    /// Stable machine-readable reason, recorded in transcripts.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::EmptyCouncil => "empty_council",
            Self::QuorumNotReached { .. } => "quorum_not_reached",
            Self::NoValidRankings => "no_valid_rankings",
            Self::ChairmanUnavailable { .. } => "chairman_unavailable",
            Self::Cancelled => "cancelled",
            Self::Domain(_) => "domain_error",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Input for the RunCouncil use case
#[derive(Debug)]
pub struct RunCouncilInput {
    /// The question, attachments, and roster for this run
    pub query: CouncilQuery,
    /// Timeout and quorum knobs
    pub params: CouncilParams,
    /// Pin the label shuffle; `None` seeds from entropy
    pub anonymizer_seed: Option<u64>,
}

impl RunCouncilInput {
    pub fn new(query: CouncilQuery) -> Self {
        Self {
            query,
            params: CouncilParams::default(),
            anonymizer_seed: None,
        }
    }

    pub fn with_params(mut self, params: CouncilParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_anonymizer_seed(mut self, seed: u64) -> Self {
        self.anonymizer_seed = Some(seed);
        self
    }
}

/// Use case for running a full council deliberation
pub struct RunCouncilUseCase<I: ModelInvoker + 'static> {
    invoker: Arc<I>,
    cancellation_token: Option<CancellationToken>,
}

impl<I: ModelInvoker + 'static> RunCouncilUseCase<I> {
    pub fn new(invoker: Arc<I>) -> Self {
        Self {
            invoker,
            cancellation_token: None,
        }
    }

    /// Attach a cancellation token checked between and during stages
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunCouncilInput) -> Result<CouncilVerdict, RunCouncilError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunCouncilInput,
        progress: &dyn CouncilProgress,
    ) -> Result<CouncilVerdict, RunCouncilError> {
        if input.query.roster().is_empty() {
            return Err(RunCouncilError::EmptyCouncil);
        }

        info!(
            "Starting council with {} members",
            input.query.roster().len()
        );

        let ledger = Arc::new(UsageLedger::new());
        // Document attachments are inlined once; every stage sees the same
        // question text.
        let question = input.query.prompt_with_documents();

        // Stage 1: every member answers independently
        let responses = self
            .stage_responses(&input, &question, &ledger, progress)
            .await?;

        let survivors: Vec<(ModelId, String)> = responses
            .iter()
            .filter(|r| r.success)
            .map(|r| (r.model.clone(), r.content.clone()))
            .collect();
        if survivors.len() < input.params.response_quorum {
            return Err(RunCouncilError::QuorumNotReached {
                usable: survivors.len(),
                total: input.query.roster().len(),
                required: input.params.response_quorum,
            });
        }

        self.check_cancelled()?;

        // Stage 2: strip attribution, then each survivor ranks the set
        let mut anonymizer = match input.anonymizer_seed {
            Some(seed) => Anonymizer::with_seed(seed),
            None => Anonymizer::new(),
        };
        let (anonymized, label_map) = anonymizer.assign(survivors)?;

        let rankings = self
            .stage_rankings(&input, &question, &anonymized, &responses, &ledger, progress)
            .await?;

        let submissions: Vec<RankingSubmission> = rankings
            .iter()
            .filter_map(|r| r.submission.clone())
            .collect();
        if submissions.is_empty() {
            return Err(RunCouncilError::NoValidRankings);
        }

        let labels: BTreeSet<Label> = anonymized.iter().map(|r| r.label).collect();
        let aggregate = AggregateRanking::from_submissions(&submissions, &labels, label_map);

        self.check_cancelled()?;

        // Stage 3: the chairman synthesizes, attribution disclosed
        let prompt = Self::disclosed_record_prompt(&question, &responses, &rankings, &aggregate);
        let synthesis = self
            .stage_synthesis(&input, &prompt, &ledger, progress)
            .await?;

        Ok(CouncilVerdict::new(
            input.query.prompt(),
            responses,
            rankings,
            aggregate,
            synthesis,
            ledger.summarize(),
        ))
    }

    /// Stage 1: fan the question out to every member in parallel
    async fn stage_responses(
        &self,
        input: &RunCouncilInput,
        question: &str,
        ledger: &Arc<UsageLedger>,
        progress: &dyn CouncilProgress,
    ) -> Result<Vec<ModelResult>, RunCouncilError> {
        let roster = input.query.roster();
        info!("{}", Stage::Responses.display_name());
        progress.on_stage_start(&Stage::Responses, roster.len());

        let mut join_set = JoinSet::new();

        for model in roster.members() {
            let invoker = Arc::clone(&self.invoker);
            let ledger = Arc::clone(ledger);
            let model = model.clone();
            let prompt = question.to_string();
            let attachments = input.query.attachments().to_vec();
            let call_timeout = input.params.call_timeout;

            join_set.spawn(async move {
                let result =
                    invoke_bounded(invoker.as_ref(), &model, &prompt, &attachments, call_timeout)
                        .await;
                if let Ok(answer) = &result {
                    if let Some(usage) = answer.usage {
                        ledger.record(Stage::Responses, &model, usage);
                    }
                }
                (model, result)
            });
        }

        let mut settled: HashMap<ModelId, ModelResult> = HashMap::new();

        while let Some(result) = self.next_or_cancel(&mut join_set).await? {
            match result {
                Ok((model, Ok(answer))) => {
                    info!("Model {} responded", model);
                    progress.on_call_settled(&Stage::Responses, &model, true);
                    settled.insert(
                        model.clone(),
                        ModelResult::answered(model, Stage::Responses, answer.text, answer.usage),
                    );
                }
                Ok((model, Err(e))) => {
                    warn!("Model {} failed: {}", model, e);
                    progress.on_call_settled(&Stage::Responses, &model, false);
                    settled.insert(
                        model.clone(),
                        ModelResult::failed(model, Stage::Responses, e.to_string()),
                    );
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        progress.on_stage_complete(&Stage::Responses);

        // Roster order, never arrival order
        let responses = roster
            .members()
            .iter()
            .map(|model| {
                settled.remove(model).unwrap_or_else(|| {
                    ModelResult::failed(model.clone(), Stage::Responses, "task aborted")
                })
            })
            .collect();
        Ok(responses)
    }

    /// Stage 2: each survivor ranks the anonymized response set
    async fn stage_rankings(
        &self,
        input: &RunCouncilInput,
        question: &str,
        anonymized: &[AnonymizedResponse],
        responses: &[ModelResult],
        ledger: &Arc<UsageLedger>,
        progress: &dyn CouncilProgress,
    ) -> Result<Vec<RankingOutcome>, RunCouncilError> {
        let rankers: Vec<ModelId> = responses
            .iter()
            .filter(|r| r.success)
            .map(|r| r.model.clone())
            .collect();
        info!("{}", Stage::Rankings.display_name());
        progress.on_stage_start(&Stage::Rankings, rankers.len());

        let ranking_prompt = PromptTemplate::ranking_prompt(question, anonymized);
        let expected: BTreeSet<Label> = anonymized.iter().map(|r| r.label).collect();

        let mut join_set = JoinSet::new();

        for model in rankers {
            let invoker = Arc::clone(&self.invoker);
            let ledger = Arc::clone(ledger);
            let prompt = ranking_prompt.clone();
            let call_timeout = input.params.call_timeout;

            join_set.spawn(async move {
                let result =
                    invoke_bounded(invoker.as_ref(), &model, &prompt, &[], call_timeout).await;
                if let Ok(answer) = &result {
                    if let Some(usage) = answer.usage {
                        ledger.record(Stage::Rankings, &model, usage);
                    }
                }
                (model, result)
            });
        }

        let mut settled: HashMap<ModelId, RankingOutcome> = HashMap::new();

        while let Some(result) = self.next_or_cancel(&mut join_set).await? {
            match result {
                Ok((model, Ok(answer))) => {
                    progress.on_call_settled(&Stage::Rankings, &model, true);
                    let outcome = Self::judge_ranking(model.clone(), answer, &expected);
                    match &outcome.invalid_reason {
                        Some(reason) => warn!("Model {} ranking rejected: {}", model, reason),
                        None => debug!("Model {} ranking accepted", model),
                    }
                    settled.insert(model, outcome);
                }
                Ok((model, Err(e))) => {
                    warn!("Model {} ranking failed: {}", model, e);
                    progress.on_call_settled(&Stage::Rankings, &model, false);
                    settled.insert(
                        model.clone(),
                        RankingOutcome::failed(ModelResult::failed(
                            model,
                            Stage::Rankings,
                            e.to_string(),
                        )),
                    );
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        progress.on_stage_complete(&Stage::Rankings);

        // One outcome per member; first-stage casualties carry through
        let outcomes = input
            .query
            .roster()
            .members()
            .iter()
            .map(|model| {
                settled.remove(model).unwrap_or_else(|| {
                    RankingOutcome::failed(ModelResult::failed(
                        model.clone(),
                        Stage::Rankings,
                        "no usable first-stage response",
                    ))
                })
            })
            .collect();
        Ok(outcomes)
    }

    /// Parse and validate one ranking reply.
    ///
    /// An invalid reply is recorded with its reason and dropped from
    /// aggregation; it is never repaired into a partial submission.
    fn judge_ranking(
        model: ModelId,
        answer: ModelAnswer,
        expected: &BTreeSet<Label>,
    ) -> RankingOutcome {
        let order = parse_ranking(&answer.text);
        let result =
            ModelResult::answered(model.clone(), Stage::Rankings, answer.text, answer.usage);
        match RankingSubmission::try_new(model, order, expected) {
            Ok(submission) => RankingOutcome::valid(result, submission),
            Err(e) => RankingOutcome::rejected(result, e.to_string()),
        }
    }

    /// Chairman prompt over the whole record, attribution disclosed
    fn disclosed_record_prompt(
        question: &str,
        responses: &[ModelResult],
        rankings: &[RankingOutcome],
        aggregate: &AggregateRanking,
    ) -> String {
        let response_pairs: Vec<(ModelId, String)> = responses
            .iter()
            .filter(|r| r.success)
            .map(|r| (r.model.clone(), r.content.clone()))
            .collect();

        // Every ranking reply that arrived informs the chairman, including
        // ones that failed permutation validation.
        let ranking_pairs: Vec<(ModelId, String)> = rankings
            .iter()
            .filter(|r| r.result.success)
            .map(|r| (r.result.model.clone(), r.result.content.clone()))
            .collect();

        PromptTemplate::synthesis_prompt(question, &response_pairs, &ranking_pairs, aggregate)
    }

    /// Stage 3: a single chairman call over the disclosed record
    async fn stage_synthesis(
        &self,
        input: &RunCouncilInput,
        prompt: &str,
        ledger: &Arc<UsageLedger>,
        progress: &dyn CouncilProgress,
    ) -> Result<SynthesisResult, RunCouncilError> {
        info!("{}", Stage::Synthesis.display_name());
        progress.on_stage_start(&Stage::Synthesis, 1);

        let chairman = input.query.roster().chairman().clone();

        let call = invoke_bounded(
            self.invoker.as_ref(),
            &chairman,
            prompt,
            &[],
            input.params.call_timeout,
        );
        let result = if let Some(ref token) = self.cancellation_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    return Err(RunCouncilError::Cancelled);
                }
                result = call => result,
            }
        } else {
            call.await
        };

        match result {
            Ok(answer) => {
                if let Some(usage) = answer.usage {
                    ledger.record(Stage::Synthesis, &chairman, usage);
                }
                progress.on_call_settled(&Stage::Synthesis, &chairman, true);
                progress.on_stage_complete(&Stage::Synthesis);
                Ok(SynthesisResult::new(chairman, answer.text, answer.usage))
            }
            Err(e) => {
                warn!("Chairman {} failed: {}", chairman, e);
                progress.on_call_settled(&Stage::Synthesis, &chairman, false);
                Err(RunCouncilError::ChairmanUnavailable {
                    chairman,
                    source: e,
                })
            }
        }
    }

    /// Wait for the next task, bailing out if the run is cancelled
    async fn next_or_cancel<T: 'static>(
        &self,
        join_set: &mut JoinSet<T>,
    ) -> Result<Option<Result<T, tokio::task::JoinError>>, RunCouncilError> {
        if let Some(ref token) = self.cancellation_token {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    join_set.abort_all();
                    Err(RunCouncilError::Cancelled)
                }
                result = join_set.join_next() => Ok(result),
            }
        } else {
            Ok(join_set.join_next().await)
        }
    }

    fn check_cancelled(&self) -> Result<(), RunCouncilError> {
        if let Some(ref token) = self.cancellation_token {
            if token.is_cancelled() {
                return Err(RunCouncilError::Cancelled);
            }
        }
        Ok(())
    }
}

/// One model call under the configured timeout
async fn invoke_bounded<I: ModelInvoker>(
    invoker: &I,
    model: &ModelId,
    prompt: &str,
    attachments: &[Attachment],
    call_timeout: Duration,
) -> Result<ModelAnswer, InvocationError> {
    match tokio::time::timeout(call_timeout, invoker.invoke(model, prompt, attachments)).await {
        Ok(result) => result,
        Err(_) => Err(InvocationError::Timeout {
            seconds: call_timeout.as_secs(),
        }),
    }
}
