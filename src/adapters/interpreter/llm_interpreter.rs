//! Generative profile interpreter.
//!
//! Sends the answered items and scoring rules to an `AIProvider`, then checks
//! the reply in a fixed order. Every check has its own fatal error; nothing is
//! retried here and no partial interpretation is ever returned.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::adapters::validation::{FEEDBACK_FIELD, PRIORITY_FIELD, PROFILE_FIELD};
use crate::domain::assessment::{EmotionalProfile, Feedback, Interpretation, PriorityAreas};
use crate::domain::foundation::Score;
use crate::ports::{
    AIProvider, CompletenessMode, CompletionRequest, FinishReason, InterpretationError,
    InterpretationRequest, MessageRole, ProfileInterpreter, RequestMetadata, ResponseSchema,
    ResponseSchemaValidator,
};

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Default output budget.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Profile interpreter backed by a generative model.
pub struct LlmProfileInterpreter {
    provider: Arc<dyn AIProvider>,
    validator: Arc<dyn ResponseSchemaValidator>,
    completeness: CompletenessMode,
    temperature: f32,
    max_tokens: u32,
}

impl LlmProfileInterpreter {
    pub fn new(provider: Arc<dyn AIProvider>, validator: Arc<dyn ResponseSchemaValidator>) -> Self {
        Self {
            provider,
            validator,
            completeness: CompletenessMode::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_completeness(mut self, mode: CompletenessMode) -> Self {
        self.completeness = mode;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn completion_request(&self, request: &InterpretationRequest) -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::for_assessment(request.assessment_id))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, user_prompt(request))
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
            .expecting_json()
    }

    /// Runs the validation sequence over a raw model reply.
    pub fn parse_reply(
        &self,
        raw: &str,
        dimension_names: &[String],
    ) -> Result<Interpretation, InterpretationError> {
        // 1. A reply that is a JSON object.
        let body = strip_code_fence(raw);
        if body.is_empty() {
            return Err(InterpretationError::contract("empty model response", raw));
        }
        let reply: Value = serde_json::from_str(body).map_err(|e| {
            InterpretationError::contract(format!("model response is not JSON: {}", e), raw)
        })?;
        if !reply.is_object() {
            return Err(InterpretationError::contract(
                "model response is not a JSON object",
                raw,
            ));
        }

        // 2-4. Profile string, three priority areas, feedback.
        self.validator
            .validate(ResponseSchema::Interpretation, &reply)
            .map_err(|e| InterpretationError::contract(e.to_string(), raw))?;

        let profile_raw = string_field(&reply, PROFILE_FIELD);
        let areas: Vec<String> = reply[PRIORITY_FIELD]
            .as_array()
            .map(|areas| {
                areas
                    .iter()
                    .filter_map(|a| a.as_str().map(|s| s.trim().to_string()))
                    .collect()
            })
            .unwrap_or_default();
        let priority_areas = PriorityAreas::new(areas)
            .map_err(|e| InterpretationError::contract(e.to_string(), raw))?;
        let feedback = Feedback::new(string_field(&reply, FEEDBACK_FIELD))
            .map_err(|e| InterpretationError::contract(e.to_string(), raw))?;

        // 3b. Priority areas must name known dimensions.
        if !dimension_names.is_empty() {
            if let Some(unknown) = priority_areas
                .iter()
                .find(|area| !dimension_names.contains(area))
            {
                return Err(InterpretationError::contract(
                    format!("priority area '{}' is not an assessed dimension", unknown),
                    raw,
                ));
            }
        }

        // 5. The embedded profile.
        let emotional_profile = parse_profile(self.validator.as_ref(), profile_raw)?;

        // 6. Completeness.
        let missing = emotional_profile.missing_from(dimension_names);
        if !missing.is_empty() {
            match self.completeness {
                CompletenessMode::Strict => {
                    return Err(InterpretationError::IncompleteProfile {
                        missing: missing.iter().map(|m| m.to_string()).collect(),
                    })
                }
                CompletenessMode::Lenient => {
                    tracing::warn!(
                        missing = ?missing,
                        "Interpreted profile omits dimensions; continuing in lenient mode"
                    );
                }
            }
        }

        Ok(Interpretation {
            emotional_profile,
            priority_areas,
            feedback,
        })
    }
}

#[async_trait]
impl ProfileInterpreter for LlmProfileInterpreter {
    async fn interpret(
        &self,
        request: &InterpretationRequest,
    ) -> Result<Interpretation, InterpretationError> {
        let completion = self.completion_request(request);
        tracing::debug!(
            assessment_id = %request.assessment_id,
            provider = %self.provider.provider_info().name,
            items = request.answered_items.len(),
            estimated_tokens = self.provider.estimate_tokens(&completion.prompt_text()),
            "Requesting profile interpretation"
        );

        let response = self.provider.complete(completion).await.map_err(|e| {
            tracing::error!(assessment_id = %request.assessment_id, error = %e, "Interpretation request failed");
            InterpretationError::from(e)
        })?;

        tracing::debug!(
            assessment_id = %request.assessment_id,
            model = %response.model,
            completion_tokens = response.usage.completion_tokens,
            "Received interpretation reply"
        );
        if response.finish_reason == FinishReason::Length {
            tracing::warn!(
                assessment_id = %request.assessment_id,
                max_tokens = self.max_tokens,
                "Interpretation reply hit the token limit"
            );
        }

        self.parse_reply(&response.content, &request.dimension_names)
            .map_err(|e| {
                tracing::error!(assessment_id = %request.assessment_id, error = %e, "Interpretation rejected");
                e
            })
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}

fn string_field<'a>(reply: &'a Value, field: &str) -> &'a str {
    reply.get(field).and_then(Value::as_str).unwrap_or_default()
}

/// Decodes and validates the `emotionalProfileJSON` string.
fn parse_profile(
    validator: &dyn ResponseSchemaValidator,
    raw: &str,
) -> Result<EmotionalProfile, InterpretationError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| InterpretationError::malformed(format!("not JSON: {}", e), raw))?;

    validator
        .validate(ResponseSchema::EmotionalProfile, &value)
        .map_err(|e| InterpretationError::malformed(e.to_string(), raw))?;

    let entries = value
        .as_object()
        .ok_or_else(|| InterpretationError::malformed("profile is not a JSON object", raw))?;
    if entries.is_empty() {
        return Err(InterpretationError::malformed("profile has no dimensions", raw));
    }

    let mut profile = EmotionalProfile::new();
    for (name, score) in entries {
        let score = score
            .as_f64()
            .ok_or_else(|| InterpretationError::malformed(format!("{} is not a number", name), raw))
            .and_then(|s| {
                Score::try_new(s).map_err(|e| InterpretationError::malformed(e.to_string(), raw))
            })?;
        profile.insert(name.clone(), score);
    }
    Ok(profile)
}

/// Removes a surrounding Markdown code fence (```json ... ```), if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line.
    match inner.find('\n') {
        Some(newline) => inner[newline + 1..].trim(),
        None => inner.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::validation::JsonSchemaValidator;
    use crate::domain::assessment::ScoredProfile;
    use crate::domain::foundation::AssessmentId;
    use serde_json::json;

    fn names() -> Vec<String> {
        ["Autoestima", "Resiliencia", "Sueño y Descanso", "Estado de Ánimo"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn interpreter(provider: MockAIProvider) -> LlmProfileInterpreter {
        LlmProfileInterpreter::new(
            Arc::new(provider),
            Arc::new(JsonSchemaValidator::new().unwrap()),
        )
    }

    fn reply(profile: &str, areas: Value, feedback: &str) -> String {
        json!({
            "emotionalProfileJSON": profile,
            "priorityAreas": areas,
            "feedback": feedback,
        })
        .to_string()
    }

    fn full_profile() -> String {
        json!({
            "Autoestima": 2.5,
            "Resiliencia": 3.0,
            "Sueño y Descanso": 1.8,
            "Estado de Ánimo": 4.1,
        })
        .to_string()
    }

    fn valid_areas() -> Value {
        json!(["Sueño y Descanso", "Autoestima", "Resiliencia"])
    }

    fn request() -> InterpretationRequest {
        InterpretationRequest {
            assessment_id: AssessmentId::new(),
            answered_items: Vec::new(),
            dimension_names: names(),
            scored: ScoredProfile {
                scores: Vec::new(),
                unscored: Vec::new(),
            },
        }
    }

    fn parse(raw: &str) -> Result<Interpretation, InterpretationError> {
        interpreter(MockAIProvider::new()).parse_reply(raw, &names())
    }

    #[test]
    fn valid_reply_parses() {
        let result = parse(&reply(&full_profile(), valid_areas(), "Vas bien.")).unwrap();

        assert_eq!(result.emotional_profile.len(), 4);
        assert_eq!(result.emotional_profile.get("Sueño y Descanso").unwrap().value(), 1.8);
        assert_eq!(result.priority_areas.as_slice()[0], "Sueño y Descanso");
        assert_eq!(result.feedback.as_str(), "Vas bien.");
    }

    #[test]
    fn empty_reply_is_contract_violation() {
        let err = parse("   ").unwrap_err();
        assert!(matches!(err, InterpretationError::ContractViolation { ref rule, .. } if rule == "empty model response"));
    }

    #[test]
    fn non_object_reply_is_contract_violation() {
        assert!(matches!(
            parse("[1, 2, 3]").unwrap_err(),
            InterpretationError::ContractViolation { .. }
        ));
        assert!(matches!(
            parse("Lo siento, no puedo").unwrap_err(),
            InterpretationError::ContractViolation { .. }
        ));
    }

    #[test]
    fn fenced_reply_is_accepted() {
        let raw = format!("```json\n{}\n```", reply(&full_profile(), valid_areas(), "Bien."));
        assert!(parse(&raw).is_ok());
    }

    #[test]
    fn empty_profile_string_is_reported_first() {
        let err = parse(&reply("", json!(["A"]), "")).unwrap_err();
        match err {
            InterpretationError::ContractViolation { rule, .. } => {
                assert!(rule.contains("emotionalProfileJSON"), "rule: {}", rule)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn two_priority_areas_violate_contract() {
        let err = parse(&reply(&full_profile(), json!(["Autoestima", "Resiliencia"]), "ok"))
            .unwrap_err();
        match err {
            InterpretationError::ContractViolation { rule, raw } => {
                assert!(rule.contains("exactly 3"), "rule: {}", rule);
                assert!(raw.contains("priorityAreas"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn blank_feedback_violates_contract() {
        let err = parse(&reply(&full_profile(), valid_areas(), "  ")).unwrap_err();
        match err {
            InterpretationError::ContractViolation { rule, .. } => {
                assert!(rule.contains("feedback"), "rule: {}", rule)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_priority_area_violates_contract() {
        let err = parse(&reply(
            &full_profile(),
            json!(["Autoestima", "Felicidad", "Resiliencia"]),
            "ok",
        ))
        .unwrap_err();
        match err {
            InterpretationError::ContractViolation { rule, .. } => {
                assert!(rule.contains("Felicidad"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unparseable_profile_is_malformed_with_raw_text() {
        let err = parse(&reply("{not json", valid_areas(), "ok")).unwrap_err();
        match err {
            InterpretationError::MalformedProfileJson { raw, .. } => assert_eq!(raw, "{not json"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn non_object_profile_is_malformed() {
        for profile in ["[3,4]", "3", "\"Autoestima\""] {
            match parse(&reply(profile, valid_areas(), "ok")).unwrap_err() {
                InterpretationError::MalformedProfileJson { raw, .. } => assert_eq!(raw, profile),
                other => panic!("unexpected {:?} for {}", other, profile),
            }
        }
    }

    #[test]
    fn empty_profile_object_is_malformed() {
        let err = parse(&reply("{}", valid_areas(), "ok")).unwrap_err();
        assert!(matches!(err, InterpretationError::MalformedProfileJson { ref raw, .. } if raw == "{}"));
    }

    #[test]
    fn out_of_range_profile_score_is_malformed() {
        let profile = json!({"Autoestima": 7, "Resiliencia": 3}).to_string();
        let err = parse(&reply(&profile, valid_areas(), "ok")).unwrap_err();
        assert!(matches!(err, InterpretationError::MalformedProfileJson { .. }));
    }

    #[test]
    fn strict_mode_rejects_missing_dimensions() {
        let profile = json!({"Autoestima": 2.5, "Resiliencia": 3.0, "Sueño y Descanso": 1.8})
            .to_string();
        let err = parse(&reply(&profile, valid_areas(), "ok")).unwrap_err();
        match err {
            InterpretationError::IncompleteProfile { missing } => {
                assert_eq!(missing, vec!["Estado de Ánimo".to_string()])
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn lenient_mode_accepts_missing_dimensions() {
        let profile = json!({"Autoestima": 2.5, "Resiliencia": 3.0, "Sueño y Descanso": 1.8})
            .to_string();
        let result = interpreter(MockAIProvider::new())
            .with_completeness(CompletenessMode::Lenient)
            .parse_reply(&reply(&profile, valid_areas(), "ok"), &names())
            .unwrap();
        assert_eq!(result.emotional_profile.len(), 3);
    }

    #[tokio::test]
    async fn interpret_sends_json_request_to_provider() {
        let provider =
            MockAIProvider::new().with_response(reply(&full_profile(), valid_areas(), "Bien."));
        let interpreter = interpreter(provider.clone()).with_temperature(0.1);

        interpreter.interpret(&request()).await.unwrap();

        let call = provider.last_call().unwrap();
        assert!(call.json_response);
        assert_eq!(call.temperature, Some(0.1));
        assert_eq!(call.system_prompt.as_deref(), Some(SYSTEM_PROMPT));
        assert!(call.messages[0].content.contains("- Estado de Ánimo"));
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_provider_error() {
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);

        let err = interpreter(provider).interpret(&request()).await.unwrap_err();

        assert!(matches!(err, InterpretationError::Provider(_)));
    }

    #[test]
    fn strip_code_fence_handles_plain_and_fenced_text() {
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }
}
