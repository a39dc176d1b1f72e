use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Every case ships exactly this many coffees.
pub const COFFEES_PER_CASE: usize = 4;

const POINTS_PER_COFFEE: u32 = 100;
const POINTS_PER_BONUS: u32 = 50;

/// Which questions of a case are asked (and scored).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledQuestions {
    pub region: bool,
    pub variety: bool,
    pub process: bool,
    pub taste_note_1: bool,
    pub taste_note_2: bool,
    pub favorite_coffee: bool,
    pub brewing_method: bool,
}

impl Default for EnabledQuestions {
    fn default() -> Self {
        Self {
            region: true,
            variety: true,
            process: true,
            taste_note_1: true,
            taste_note_2: true,
            favorite_coffee: true,
            brewing_method: true,
        }
    }
}

impl EnabledQuestions {
    pub fn none() -> Self {
        Self {
            region: false,
            variety: false,
            process: false,
            taste_note_1: false,
            taste_note_2: false,
            favorite_coffee: false,
            brewing_method: false,
        }
    }

    /// Flags in field order, paired with their form key.
    pub fn flags(&self) -> [(&'static str, bool); 7] {
        [
            ("region", self.region),
            ("variety", self.variety),
            ("process", self.process),
            ("taste_note_1", self.taste_note_1),
            ("taste_note_2", self.taste_note_2),
            ("favorite_coffee", self.favorite_coffee),
            ("brewing_method", self.brewing_method),
        ]
    }

    /// Set a flag by form key. Unknown keys are ignored.
    pub fn set(&mut self, key: &str, enabled: bool) {
        match key {
            "region" => self.region = enabled,
            "variety" => self.variety = enabled,
            "process" => self.process = enabled,
            "taste_note_1" => self.taste_note_1 = enabled,
            "taste_note_2" => self.taste_note_2 = enabled,
            "favorite_coffee" => self.favorite_coffee = enabled,
            "brewing_method" => self.brewing_method = enabled,
            _ => {}
        }
    }

    pub fn coffee_question_count(&self) -> u32 {
        [
            self.region,
            self.variety,
            self.process,
            self.taste_note_1,
            self.taste_note_2,
        ]
        .iter()
        .filter(|enabled| **enabled)
        .count() as u32
    }

    pub fn bonus_question_count(&self) -> u32 {
        [self.favorite_coffee, self.brewing_method]
            .iter()
            .filter(|enabled| **enabled)
            .count() as u32
    }

    pub fn scoring(&self, coffees: usize) -> ScoringInfo {
        let coffee_questions = self.coffee_question_count();
        let bonus_questions = self.bonus_question_count();

        let coffee_points = if coffee_questions > 0 {
            POINTS_PER_COFFEE * coffees as u32
        } else {
            0
        };

        ScoringInfo {
            coffee_questions,
            bonus_questions,
            max_score: coffee_points + POINTS_PER_BONUS * bonus_questions,
        }
    }
}

/// Summary shown above the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringInfo {
    pub coffee_questions: u32,
    pub bonus_questions: u32,
    pub max_score: u32,
}

/// A coffee as the admin sees it, answers included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coffee {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub variety: String,
    #[serde(default)]
    pub process: String,
    #[serde(default)]
    pub tasting_notes: String,
}

/// Full case record from the admin endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub coffees: Vec<Coffee>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub enabled_questions: EnabledQuestions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of a case create/update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseDraft {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub is_active: bool,
    pub coffees: Vec<Coffee>,
    pub enabled_questions: EnabledQuestions,
}

impl CaseDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            return Err(DomainError::Validation(
                "name and description are required".to_string(),
            ));
        }
        if self.coffees.len() != COFFEES_PER_CASE {
            return Err(DomainError::Validation(format!(
                "a case needs {} coffees, got {}",
                COFFEES_PER_CASE,
                self.coffees.len()
            )));
        }
        if self.coffees.iter().any(|c| c.name.trim().is_empty()) {
            return Err(DomainError::Validation(
                "every coffee needs a name".to_string(),
            ));
        }
        Ok(())
    }
}

/// A coffee as a player may see it. Answer fields in the payload are
/// dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PublicCoffee {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Active case as returned by the public (answer-free) endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PublicCase {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub coffees: Vec<PublicCoffee>,
    #[serde(default)]
    pub enabled_questions: EnabledQuestions,
}

/// What the submission form may see of the active case: coffee ids and
/// question flags, never answers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveCaseView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub coffee_ids: Vec<String>,
    pub questions: EnabledQuestions,
}

impl From<PublicCase> for ActiveCaseView {
    fn from(case: PublicCase) -> Self {
        Self {
            id: case.id,
            name: case.name,
            description: case.description,
            coffee_ids: case
                .coffees
                .into_iter()
                .map(|c| c.id)
                .filter(|id| !id.is_empty())
                .collect(),
            questions: case.enabled_questions,
        }
    }
}

impl ActiveCaseView {
    /// The four coffee ids, in case order, required to build a submission.
    pub fn submission_coffee_ids(&self) -> Result<[String; COFFEES_PER_CASE], DomainError> {
        if self.coffee_ids.len() < COFFEES_PER_CASE {
            return Err(DomainError::IncompleteCase {
                found: self.coffee_ids.len(),
                expected: COFFEES_PER_CASE,
            });
        }

        Ok(std::array::from_fn(|i| self.coffee_ids[i].clone()))
    }

    pub fn scoring(&self) -> ScoringInfo {
        self.questions.scoring(COFFEES_PER_CASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_score_all_enabled() {
        let info = EnabledQuestions::default().scoring(COFFEES_PER_CASE);
        assert_eq!(info.coffee_questions, 5);
        assert_eq!(info.bonus_questions, 2);
        assert_eq!(info.max_score, 500);
    }

    #[test]
    fn test_max_score_nothing_enabled() {
        let info = EnabledQuestions::none().scoring(COFFEES_PER_CASE);
        assert_eq!(info.max_score, 0);
    }

    #[test]
    fn test_max_score_bonus_only() {
        let mut questions = EnabledQuestions::none();
        questions.set("brewing_method", true);
        assert_eq!(questions.scoring(COFFEES_PER_CASE).max_score, 50);
    }

    #[test]
    fn test_public_case_drops_answers() {
        let json = r#"{
            "id": "case-1",
            "name": "Caso Tarrazú",
            "coffees": [
                {"id": "a", "name": "Uno", "region": "tarrazu", "variety": "caturra"},
                {"id": "b", "name": "Dos", "process": "honey"}
            ],
            "enabled_questions": {"region": true, "variety": false}
        }"#;

        let case: PublicCase = serde_json::from_str(json).unwrap();
        let view = ActiveCaseView::from(case);

        assert_eq!(view.coffee_ids, vec!["a".to_string(), "b".to_string()]);
        assert!(view.questions.region);
        assert!(!view.questions.variety);
        // Missing flags keep their defaults.
        assert!(view.questions.brewing_method);
    }

    #[test]
    fn test_submission_ids_require_four() {
        let view = ActiveCaseView {
            coffee_ids: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        assert_eq!(
            view.submission_coffee_ids(),
            Err(DomainError::IncompleteCase {
                found: 2,
                expected: 4
            })
        );
    }

    #[test]
    fn test_case_draft_validation() {
        let mut draft = CaseDraft {
            name: "Caso".into(),
            description: "Cuatro cafés".into(),
            coffees: vec![
                Coffee {
                    name: "Uno".into(),
                    ..Default::default()
                };
                COFFEES_PER_CASE
            ],
            ..Default::default()
        };
        assert!(draft.validate().is_ok());

        draft.coffees.pop();
        assert!(draft.validate().is_err());
    }
}
