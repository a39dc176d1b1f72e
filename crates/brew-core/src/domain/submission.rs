use serde::{Deserialize, Serialize};

use super::case::{ActiveCaseView, COFFEES_PER_CASE};
use super::leaderboard::percent;
use crate::error::DomainError;

/// Answers typed into one coffee's block of the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoffeeGuess {
    pub region: String,
    pub variety: String,
    pub process: String,
    pub taste_note_1: String,
    pub taste_note_2: String,
}

/// Raw submission form contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionForm {
    pub order_id: String,
    pub coffees: [CoffeeGuess; COFFEES_PER_CASE],
    pub favorite_coffee: String,
    pub brewing_method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeAnswer {
    pub coffee_id: String,
    pub region: String,
    pub variety: String,
    pub process: String,
    pub taste_note_1: String,
    pub taste_note_2: String,
}

/// Payload POSTed to the submissions endpoint. Built fresh per submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub order_id: String,
    pub coffee_answers: Vec<CoffeeAnswer>,
    pub favorite_coffee: String,
    pub brewing_method: String,
}

impl Submission {
    /// Pair the form's four answer blocks with the active case's coffee ids.
    pub fn assemble(case: &ActiveCaseView, form: SubmissionForm) -> Result<Self, DomainError> {
        let ids = case.submission_coffee_ids()?;

        let order_id = form.order_id.trim().to_uppercase();
        if order_id.is_empty() {
            return Err(DomainError::Validation("order id is required".to_string()));
        }

        let coffee_answers = ids
            .into_iter()
            .zip(form.coffees)
            .map(|(coffee_id, guess)| CoffeeAnswer {
                coffee_id,
                region: guess.region,
                variety: guess.variety,
                process: guess.process,
                taste_note_1: guess.taste_note_1.trim().to_string(),
                taste_note_2: guess.taste_note_2.trim().to_string(),
            })
            .collect();

        Ok(Self {
            order_id,
            coffee_answers,
            favorite_coffee: form.favorite_coffee,
            brewing_method: form.brewing_method,
        })
    }
}

/// Score returned for a submission, kept briefly for the thank-you page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub score: i64,
    pub accuracy: f64,
}

impl SubmissionResult {
    pub fn accuracy_percent(&self) -> u32 {
        percent(self.accuracy)
    }
}
