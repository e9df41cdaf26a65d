//! Assessment command and query handlers.

mod complete_assessment;
mod load_questionnaire;

pub use complete_assessment::{
    reconcile, AssessmentError, AssessmentOutcome, CompleteAssessmentCommand,
    CompleteAssessmentHandler, RECONCILE_TOLERANCE,
};
pub use load_questionnaire::{LoadQuestionnaireHandler, Questionnaire, QuestionnaireItem};
