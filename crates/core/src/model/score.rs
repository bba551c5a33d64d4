use std::collections::HashMap;

use crate::model::{Question, QuestionId};

/// Recorded answers for a session: question id to the selected option index,
/// or `None` for a question that timed out with no selection.
pub type AnswerMap = HashMap<QuestionId, Option<usize>>;

/// Pure grading over a question list and its recorded answers.
///
/// A question counts as correct only when a recorded answer equals its
/// correct index; unanswered and absent entries count as wrong. Score is the
/// sum of points of correctly answered questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSheet {
    total: u32,
    correct: u32,
    score: u32,
    max_score: u32,
}

impl ScoreSheet {
    #[must_use]
    pub fn grade(questions: &[Question], answers: &AnswerMap) -> Self {
        let mut correct = 0_u32;
        let mut score = 0_u32;
        let mut max_score = 0_u32;

        for question in questions {
            max_score += question.points();
            let answered_correctly = answers
                .get(question.id())
                .copied()
                .flatten()
                .is_some_and(|selected| question.is_correct(selected));
            if answered_correctly {
                correct += 1;
                score += question.points();
            }
        }

        let total = u32::try_from(questions.len()).unwrap_or(u32::MAX);
        Self {
            total,
            correct,
            score,
            max_score,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.total - self.correct
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    /// Percentage of correct answers, `0.0` for an empty sheet.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.correct) / f64::from(self.total) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, correct_index: usize) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("prompt {id}"),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index,
            30,
            10,
        )
        .unwrap()
    }

    #[test]
    fn all_correct_scores_full() {
        let questions = vec![question("q1", 0), question("q2", 1)];
        let mut answers = AnswerMap::new();
        answers.insert(QuestionId::new("q1"), Some(0));
        answers.insert(QuestionId::new("q2"), Some(1));

        let sheet = ScoreSheet::grade(&questions, &answers);
        assert_eq!(sheet.correct(), 2);
        assert_eq!(sheet.wrong(), 0);
        assert_eq!(sheet.score(), 20);
        assert_eq!(sheet.max_score(), 20);
        assert!((sheet.accuracy() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unanswered_counts_as_wrong() {
        let questions = vec![question("q1", 0), question("q2", 1), question("q3", 2)];
        let mut answers = AnswerMap::new();
        answers.insert(QuestionId::new("q1"), Some(0));
        answers.insert(QuestionId::new("q2"), None);
        // q3 absent entirely

        let sheet = ScoreSheet::grade(&questions, &answers);
        assert_eq!(sheet.correct(), 1);
        assert_eq!(sheet.wrong(), 2);
        assert_eq!(sheet.score(), 10);
    }

    #[test]
    fn correct_plus_wrong_equals_total() {
        let questions = vec![question("q1", 3), question("q2", 2)];
        let mut answers = AnswerMap::new();
        answers.insert(QuestionId::new("q1"), Some(1));

        let sheet = ScoreSheet::grade(&questions, &answers);
        assert_eq!(sheet.correct() + sheet.wrong(), sheet.total());
    }

    #[test]
    fn empty_sheet_has_zero_accuracy() {
        let sheet = ScoreSheet::grade(&[], &AnswerMap::new());
        assert_eq!(sheet.total(), 0);
        assert!(sheet.accuracy().abs() < f64::EPSILON);
    }
}
