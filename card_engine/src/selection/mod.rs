//! Selection - filtering the catalog and drawing the next question.
//!
//! Drawing works as follows:
//! 1. **Filter**: Keep the catalog questions tagged with the active moment
//!    (and category, if one is set), in catalog order
//! 2. **Draw**: Pick a uniformly random index into the candidates
//! 3. **Reject**: If the drawn question is the one being replaced, draw again
//!
//! With two or more candidates the result is uniform over every candidate
//! except the excluded one. A single candidate is always returned, even when
//! it repeats.

mod random;
mod session;

pub use random::*;
pub use session::*;

use question_bank::{Category, Moment, Question, QuestionCatalog, QuestionId};
use tracing::{debug, warn};

/// Redraws allowed before giving up on the random source.
///
/// With two candidates a uniform source exceeds this with probability 2^-1000.
pub const MAX_REDRAWS: u32 = 1_000;

/// All questions tagged with `moment`, in catalog order.
pub fn filter_by_moment(catalog: &QuestionCatalog, moment: Moment) -> Vec<&Question> {
    catalog
        .questions()
        .iter()
        .filter(|q| q.has_moment(moment))
        .collect()
}

/// Narrow candidates to a single category, keeping their order.
pub fn filter_by_category<'a>(candidates: &[&'a Question], category: &Category) -> Vec<&'a Question> {
    candidates
        .iter()
        .copied()
        .filter(|q| &q.category == category)
        .collect()
}

/// Candidate set for a moment and an optional category.
pub fn filter_candidates<'a>(
    catalog: &'a QuestionCatalog,
    moment: Moment,
    category: Option<&Category>,
) -> Vec<&'a Question> {
    let by_moment = filter_by_moment(catalog, moment);
    match category {
        Some(category) => filter_by_category(&by_moment, category),
        None => by_moment,
    }
}

/// Draw the next question from `candidates`, avoiding `exclude` when possible.
///
/// Returns `None` only when there are no candidates. If the random source
/// lands on the excluded question more than [`MAX_REDRAWS`] times in a row,
/// the first other candidate is returned.
pub fn select_next<'a, R>(
    candidates: &[&'a Question],
    exclude: Option<&QuestionId>,
    rng: &mut R,
) -> Option<&'a Question>
where
    R: RandomSource + ?Sized,
{
    match candidates {
        [] => None,
        [only] => Some(*only),
        _ => {
            let mut index = rng.next_index(candidates.len());

            // Rejection is only safe when some candidate carries a different id.
            if let Some(excluded) = exclude.filter(|id| candidates.iter().any(|q| &q.id != *id)) {
                let mut redraws = 0u32;
                while &candidates[index].id == excluded {
                    if redraws == MAX_REDRAWS {
                        // A uniform source never gets here; a stuck one would loop forever.
                        warn!(excluded = %excluded, redraws, "random source keeps repeating, taking first alternative");
                        index = candidates
                            .iter()
                            .position(|q| &q.id != excluded)
                            .unwrap_or(index);
                        break;
                    }
                    index = rng.next_index(candidates.len());
                    redraws += 1;
                }
                debug!(excluded = %excluded, redraws, "rejection sampling finished");
            }

            let chosen = candidates[index];
            debug!(question = %chosen.id, candidates = candidates.len(), "selected question");
            Some(chosen)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn question(id: &str, moment: Moment) -> Question {
        Question::new(id, format!("Question {}", id), "amigos").with_moment(moment)
    }

    fn chill_catalog() -> QuestionCatalog {
        QuestionCatalog::from_questions(vec![
            question("q1", Moment::ChillNight),
            Question::new("d1", "Date", "pareja").with_moment(Moment::DateNight),
            question("q2", Moment::ChillNight),
            Question::new("q3", "Family", "familiares").with_moments([Moment::ChillNight, Moment::DeepTalk]),
        ])
        .unwrap()
    }

    fn ids<'a>(questions: &[&'a Question]) -> Vec<&'a str> {
        questions.iter().map(|q| q.id.as_str()).collect()
    }

    #[test]
    fn test_filter_by_moment_keeps_catalog_order() {
        let catalog = chill_catalog();
        let candidates = filter_by_moment(&catalog, Moment::ChillNight);
        assert_eq!(ids(&candidates), vec!["q1", "q2", "q3"]);
    }

    #[test]
    fn test_filter_by_unused_moment_is_empty() {
        let catalog = chill_catalog();
        assert!(filter_by_moment(&catalog, Moment::Birthday).is_empty());
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = chill_catalog();

        let all = filter_candidates(&catalog, Moment::ChillNight, None);
        assert_eq!(all.len(), 3);

        let family = filter_candidates(&catalog, Moment::ChillNight, Some(&Category::from("familiares")));
        assert_eq!(ids(&family), vec!["q3"]);

        let none = filter_candidates(&catalog, Moment::ChillNight, Some(&Category::from("silly")));
        assert!(none.is_empty());
    }

    #[test]
    fn test_builtin_moment_counts() {
        let catalog = QuestionCatalog::builtin().unwrap();

        assert_eq!(filter_by_moment(&catalog, Moment::DateNight).len(), 6);
        assert_eq!(filter_by_moment(&catalog, Moment::DeepTalk).len(), 8);
        assert_eq!(filter_by_moment(&catalog, Moment::Reflections).len(), 10);
        assert_eq!(filter_by_moment(&catalog, Moment::TooManyHoursOnRoad).len(), 5);
    }

    #[test]
    fn test_select_from_empty_is_none() {
        let empty: Vec<&Question> = Vec::new();
        let mut rng = EntropyRandom::new();
        let excluded = QuestionId::new("q1");

        assert!(select_next(&empty, None, &mut rng).is_none());
        assert!(select_next(&empty, Some(&excluded), &mut rng).is_none());
    }

    #[test]
    fn test_singleton_is_returned_even_when_excluded() {
        let only = question("q1", Moment::ChillNight);
        let candidates = vec![&only];
        let mut rng = EntropyRandom::new();

        for _ in 0..20 {
            let chosen = select_next(&candidates, Some(&only.id), &mut rng).unwrap();
            assert_eq!(chosen.id, only.id);
        }
        assert_eq!(select_next(&candidates, None, &mut rng).unwrap().id, only.id);
    }

    #[test]
    fn test_rejection_redraws_until_different() {
        let catalog = chill_catalog();
        let candidates = filter_by_moment(&catalog, Moment::ChillNight);

        // Draws index 0 (excluded) twice before landing on index 2.
        let mut rng = SequenceRandom::new([0, 0, 2]);
        let chosen = select_next(&candidates, Some(&QuestionId::new("q1")), &mut rng).unwrap();

        assert_eq!(chosen.id.as_str(), "q3");
        assert_eq!(rng.draws_taken(), 3);
    }

    #[test]
    fn test_no_exclusion_takes_first_draw() {
        let catalog = chill_catalog();
        let candidates = filter_by_moment(&catalog, Moment::ChillNight);

        let mut rng = SequenceRandom::new([1]);
        let chosen = select_next(&candidates, None, &mut rng).unwrap();

        assert_eq!(chosen.id.as_str(), "q2");
        assert_eq!(rng.draws_taken(), 1);
    }

    #[test]
    fn test_exclusion_not_in_candidates_is_ignored() {
        let catalog = chill_catalog();
        let candidates = filter_by_moment(&catalog, Moment::ChillNight);

        let mut rng = SequenceRandom::new([0]);
        let chosen = select_next(&candidates, Some(&QuestionId::new("d1")), &mut rng).unwrap();
        assert_eq!(chosen.id.as_str(), "q1");
    }

    #[test]
    fn test_all_candidates_excluded_does_not_loop() {
        let a = question("same", Moment::RandomFun);
        let b = question("same", Moment::RandomFun);
        let candidates = vec![&a, &b];

        let mut rng = SequenceRandom::new([1]);
        let chosen = select_next(&candidates, Some(&a.id), &mut rng).unwrap();
        assert_eq!(chosen.id.as_str(), "same");
        assert_eq!(rng.draws_taken(), 1);
    }

    #[test]
    fn test_stuck_source_falls_back_to_first_alternative() {
        let catalog = chill_catalog();
        let candidates = filter_by_moment(&catalog, Moment::ChillNight);
        let excluded = QuestionId::new("q1");

        // Always draws index 0, which is the excluded question.
        let mut rng = SequenceRandom::default();
        let chosen = select_next(&candidates, Some(&excluded), &mut rng).unwrap();
        assert_eq!(chosen.id.as_str(), "q2");
        assert_eq!(rng.draws_taken(), 1 + MAX_REDRAWS as usize);

        let mut rng = SequenceRandom::new([0]);
        let chosen = select_next(&candidates, Some(&excluded), &mut rng).unwrap();
        assert_eq!(chosen.id.as_str(), "q2");
    }

    #[test]
    fn test_stuck_source_on_last_candidate() {
        let catalog = chill_catalog();
        let candidates = filter_by_moment(&catalog, Moment::ChillNight);

        let mut rng = SequenceRandom::new([2]);
        let chosen = select_next(&candidates, Some(&QuestionId::new("q3")), &mut rng).unwrap();
        assert_eq!(chosen.id.as_str(), "q1");
    }

    #[test]
    fn test_exclusion_is_uniform_over_the_rest() {
        let questions: Vec<_> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|id| question(id, Moment::RandomFun))
            .collect();
        let candidates: Vec<&Question> = questions.iter().collect();
        let excluded = QuestionId::new("b");
        let mut rng = EntropyRandom::new();

        let trials = 9_000;
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for _ in 0..trials {
            let chosen = select_next(&candidates, Some(&excluded), &mut rng).unwrap();
            *counts.entry(chosen.id.as_str()).or_default() += 1;
        }

        assert!(!counts.contains_key("b"), "excluded id must never be drawn");
        assert_eq!(counts.len(), 3);

        // Expected 3000 each; allow a wide margin.
        for (id, count) in &counts {
            assert!(
                (2_600..=3_400).contains(count),
                "{} drawn {} times, expected about 3000",
                id,
                count
            );
        }
    }

    #[test]
    fn test_chill_night_scenario() {
        let catalog = chill_catalog();
        let candidates = filter_by_moment(&catalog, Moment::ChillNight);
        assert_eq!(ids(&candidates), vec!["q1", "q2", "q3"]);

        let mut rng = EntropyRandom::new();
        let first = select_next(&candidates, None, &mut rng).unwrap();
        assert!(["q1", "q2", "q3"].contains(&first.id.as_str()));

        for _ in 0..50 {
            let next = select_next(&candidates, Some(&first.id), &mut rng).unwrap();
            assert_ne!(next.id, first.id);
            assert!(["q1", "q2", "q3"].contains(&next.id.as_str()));
        }
    }
}
