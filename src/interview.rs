//! Interview question generation.
//!
//! One non-streaming completion on [`INTERVIEW_ENGINE`] with a crafted prompt,
//! followed by line-level parsing of the generated text into numbered
//! questions.

use crate::api::CompletionClient;
use crate::error::ClientError;
use crate::types::{CompletionRequest, CompletionResponseChoice};
use std::time::{Duration, Instant};

/// Engine used for interview prompts.
pub const INTERVIEW_ENGINE: &str = "text-davinci-001";

const FREQUENCY_PENALTY: f32 = 0.75;
const PRESENCE_PENALTY: f32 = 0.7;
const MAX_TOKENS: u32 = 175;
const TEMPERATURE: f32 = 1.0;
const TOP_P: f32 = 0.85;

const PROMPT_PREFIX: &str = "Create a list of questions for my interview with a";

/// Bullet glyphs stripped from user input, including the mis-decoded UTF-8 form.
const BULLETS: [&str; 2] = ["â€¢", "•"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterviewArgs {
    pub job_title: Option<String>,
    pub job_description: Option<String>,
    /// Maximum number of questions returned. Unlimited when `None`.
    pub cap: Option<usize>,
}

/// Sampling parameters as sent, with server defaults filled in for unset
/// fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub max_tokens: u32,
    pub n: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl SamplingParams {
    /// Server-side defaults of the completions endpoint.
    const SERVER_MAX_TOKENS: u32 = 16;
    const SERVER_N: u32 = 1;
    const SERVER_TEMPERATURE: f32 = 1.0;
    const SERVER_TOP_P: f32 = 1.0;

    pub fn resolve(request: &CompletionRequest) -> Self {
        Self {
            frequency_penalty: request.frequency_penalty,
            presence_penalty: request.presence_penalty,
            max_tokens: request.max_tokens.unwrap_or(Self::SERVER_MAX_TOKENS),
            n: request.n.unwrap_or(Self::SERVER_N),
            temperature: request.temperature.unwrap_or(Self::SERVER_TEMPERATURE),
            top_p: request.top_p.unwrap_or(Self::SERVER_TOP_P),
        }
    }
}

/// What was sent to produce an [`InterviewResponse`].
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewInput {
    pub engine: String,
    pub sampling: SamplingParams,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewQuestion {
    /// 1-based position in the response.
    pub index: usize,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterviewResponse {
    pub input: InterviewInput,
    /// Wall-clock time of the whole call.
    pub duration: Duration,
    pub questions: Vec<InterviewQuestion>,
}

impl InterviewResponse {
    pub fn has_questions(&self) -> bool {
        !self.questions.is_empty()
    }

    /// Questions separated by a blank line.
    pub fn question_text(&self) -> String {
        self.questions
            .iter()
            .map(|q| q.question.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Generate interview questions for a job title and/or description.
///
/// Fails with [`ClientError::Validation`] before any network call when both
/// inputs are blank.
pub async fn interview_questions<C>(
    client: &C,
    args: &InterviewArgs,
) -> Result<InterviewResponse, ClientError>
where
    C: CompletionClient + ?Sized,
{
    let start = Instant::now();
    let title = args.job_title.as_deref().map(str::trim).unwrap_or_default();
    let description = args
        .job_description
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    let prompt = interview_prompt(title, description).ok_or_else(|| {
        ClientError::Validation("must specify a job title or description".to_string())
    })?;

    let request = CompletionRequest {
        frequency_penalty: FREQUENCY_PENALTY,
        presence_penalty: PRESENCE_PENALTY,
        max_tokens: Some(MAX_TOKENS),
        // One choice; the questions come back as lines of a single text block.
        n: Some(1),
        temperature: Some(TEMPERATURE),
        top_p: Some(TOP_P),
        ..CompletionRequest::new(prompt.clone())
    };
    let sampling = SamplingParams::resolve(&request);

    let response = client
        .completion_with_engine(INTERVIEW_ENGINE, request)
        .await?;

    let limit = args.cap.unwrap_or(usize::MAX);
    let questions: Vec<InterviewQuestion> = response
        .choices
        .iter()
        .flat_map(parse_choice)
        .take(limit)
        .enumerate()
        .map(|(i, question)| InterviewQuestion {
            index: i + 1,
            question,
        })
        .collect();
    tracing::debug!(
        choices = response.choices.len(),
        questions = questions.len(),
        "parsed interview questions"
    );

    Ok(InterviewResponse {
        input: InterviewInput {
            engine: INTERVIEW_ENGINE.to_string(),
            sampling,
            prompt,
        },
        duration: start.elapsed(),
        questions,
    })
}

/// Build the prompt from already-trimmed inputs; `None` when both are empty.
pub fn interview_prompt(title: &str, description: &str) -> Option<String> {
    match (title.is_empty(), description.is_empty()) {
        (false, false) => Some(format!(
            "{PROMPT_PREFIX} {}, {}",
            format_input(title),
            format_input(description)
        )),
        (false, true) => Some(format!("{PROMPT_PREFIX} {}", format_input(title))),
        (true, false) => Some(format!(
            "{PROMPT_PREFIX} job description of {}",
            format_input(description)
        )),
        (true, true) => None,
    }
}

/// Replace line breaks with spaces and drop bullet glyphs.
fn format_input(input: &str) -> String {
    let mut out = input.replace("\r\n", " ").replace('\n', " ");
    for bullet in BULLETS {
        out = out.replace(bullet, "");
    }
    out
}

/// Extract the question lines of one generated choice, in order.
fn parse_choice(choice: &CompletionResponseChoice) -> Vec<String> {
    choice
        .text
        .lines()
        .map(str::trim)
        .filter(|line| line.ends_with('?'))
        .map(parse_question)
        .collect()
}

/// Strip a leading `-` bullet and a `1) `..`99) ` marker from one line.
fn parse_question(line: &str) -> String {
    let line = line.trim();
    let line = line.strip_prefix('-').map_or(line, str::trim_start);
    let line = match line.split_once(") ") {
        Some((number, rest))
            if (1..=2).contains(&number.len()) && number.bytes().all(|b| b.is_ascii_digit()) =>
        {
            rest
        }
        _ => line,
    };
    line.trim().to_string()
}
