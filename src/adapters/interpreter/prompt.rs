//! Prompt text for the generative profile interpreter.
//!
//! The system prompt fixes role and output contract; the user message lists
//! every answered item and the scoring rules so the model can reproduce the
//! profile before commenting on it.

use std::fmt::Write;

use crate::domain::assessment::DimensionKind;
use crate::ports::{AnsweredItem, InterpretationRequest};

pub(crate) const SYSTEM_PROMPT: &str = r#"Eres un psicólogo clínico experto en evaluación emocional. Analizas respuestas a un cuestionario de autoconocimiento y devuelves un perfil emocional, tres áreas prioritarias y un comentario breve en español, cálido y sin lenguaje diagnóstico.

Responde ÚNICAMENTE con un objeto JSON, sin texto adicional ni bloques de código."#;

const SCORING_RULES: &str = r#"## Reglas de puntuación

Escala de respuesta: 1 = Nada, 2 = Poco, 3 = Moderadamente, 4 = Bastante, 5 = Mucho.

Dimensiones de rasgo:
- Si el ítem es inverso, usa (6 - respuesta); si no, la respuesta tal cual.
- Multiplica por el peso del ítem.
- La puntuación es la media de esas contribuciones.

Dimensiones de estado (Estado de Ánimo, Ansiedad Estado):
- Suma respuesta × peso de los ítems respondidos (sin inversión).
- Reescala: ((suma - n) / (5n - n)) × 4 + 1, con n = número de ítems respondidos.
- Invierte: 6 - valor reescalado.

Todas las puntuaciones van de 1.0 a 5.0 con un decimal. Puntuaciones altas indican mayor bienestar."#;

const OUTPUT_CONTRACT: &str = r#"## Formato de salida

Devuelve un objeto JSON con exactamente estas claves:
- "emotionalProfileJSON": una cadena que contiene un objeto JSON serializado cuyas claves son los nombres de TODAS las dimensiones listadas y cuyos valores son números entre 1 y 5.
- "priorityAreas": un array con exactamente 3 nombres de dimensión, elegidos de la lista, empezando por la que más atención necesita.
- "feedback": un texto en español de uno o dos párrafos."#;

/// Builds the user message for an interpretation request.
pub(crate) fn user_prompt(request: &InterpretationRequest) -> String {
    let mut prompt = String::new();

    prompt.push_str("## Dimensiones evaluadas\n\n");
    for name in &request.dimension_names {
        let _ = writeln!(prompt, "- {}", name);
    }

    prompt.push_str("\n## Respuestas\n\n");
    for item in &request.answered_items {
        let _ = writeln!(prompt, "{}", item_line(item));
    }

    prompt.push('\n');
    prompt.push_str(SCORING_RULES);
    prompt.push_str("\n\n");
    prompt.push_str(OUTPUT_CONTRACT);
    prompt
}

fn item_line(item: &AnsweredItem) -> String {
    let kind = match item.kind {
        DimensionKind::Trait => "rasgo",
        DimensionKind::State => "estado",
    };
    format!(
        "- [{}] {} | dimensión: {} ({}) | inverso: {} | peso: {} | respuesta: {} ({})",
        item.item_id,
        item.text,
        item.dimension,
        kind,
        if item.is_inverse { "sí" } else { "no" },
        item.weight,
        item.answer.value(),
        item.answer.label(),
    )
}
