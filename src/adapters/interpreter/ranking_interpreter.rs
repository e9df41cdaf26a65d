//! Deterministic profile interpreter.
//!
//! Picks the three lowest-scoring dimensions as priority areas and writes a
//! templated summary. Needs no network and always agrees with the scoring
//! engine, so it serves offline runs and tests.

use async_trait::async_trait;

use crate::domain::assessment::{DimensionScore, Feedback, Interpretation, PriorityAreas};
use crate::ports::{InterpretationError, InterpretationRequest, ProfileInterpreter};

/// Scores at or above this are described as strengths.
const STRENGTH_THRESHOLD: f64 = 4.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct RankingInterpreter;

impl RankingInterpreter {
    pub fn new() -> Self {
        Self
    }

    fn feedback(lowest: &[&DimensionScore], strongest: Option<&DimensionScore>) -> String {
        let listed = lowest
            .iter()
            .map(|s| format!("{} ({:.1})", s.name, s.score.value()))
            .collect::<Vec<_>>();

        let mut text = format!(
            "Tus resultados muestran que las áreas que más pueden beneficiarse de tu atención ahora son {}, {} y {}. ",
            listed[0], listed[1], listed[2]
        );
        text.push_str(
            "Te proponemos empezar por el camino recomendado para la primera de ellas, a tu ritmo y sin exigencias.",
        );
        if let Some(best) = strongest.filter(|s| s.score.value() >= STRENGTH_THRESHOLD) {
            text.push_str(&format!(
                " También destaca tu {} ({:.1}), un recurso en el que puedes apoyarte.",
                best.name.to_lowercase(),
                best.score.value()
            ));
        }
        text
    }
}

#[async_trait]
impl ProfileInterpreter for RankingInterpreter {
    async fn interpret(
        &self,
        request: &InterpretationRequest,
    ) -> Result<Interpretation, InterpretationError> {
        let scored = &request.scored;
        if scored.scores.len() < PriorityAreas::COUNT {
            return Err(InterpretationError::InsufficientDimensions {
                needed: PriorityAreas::COUNT,
                available: scored.scores.len(),
            });
        }

        let lowest = scored.lowest(PriorityAreas::COUNT);
        let strongest = scored
            .scores
            .iter()
            .max_by(|a, b| a.score.value().total_cmp(&b.score.value()));

        let priority_areas = PriorityAreas::new(lowest.iter().map(|s| s.name.clone()).collect())
            .map_err(|e| InterpretationError::contract(e.to_string(), ""))?;
        let feedback = Feedback::new(Self::feedback(&lowest, strongest))
            .map_err(|e| InterpretationError::contract(e.to_string(), ""))?;

        tracing::debug!(
            assessment_id = %request.assessment_id,
            priorities = ?priority_areas.as_slice(),
            "Ranked profile"
        );

        Ok(Interpretation {
            emotional_profile: scored.to_emotional_profile(),
            priority_areas,
            feedback,
        })
    }

    fn name(&self) -> &'static str {
        "ranking"
    }
}
