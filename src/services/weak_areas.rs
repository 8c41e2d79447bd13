//! Weak-area bookkeeping and quiz grading. Pure data transforms: no I/O,
//! no error conditions.

use std::collections::BTreeMap;

use crate::models::domain::Quiz;

/// Record the topics missed on a completed quiz. Each missed topic's
/// counter is incremented (absent topics start at 1); duplicates in the
/// list count once each. Afterwards any counter equal to exactly 0 is
/// removed as "mastered". With the current increment-only flow no counter
/// can reach 0 here; the sweep is kept pending product-owner clarification
/// of whether correct answers were meant to decrement.
pub fn record_missed_topics(weak_areas: &mut BTreeMap<String, u32>, missed_topics: &[String]) {
    for topic in missed_topics {
        *weak_areas.entry(topic.clone()).or_insert(0) += 1;
    }

    weak_areas.retain(|_, count| *count != 0);
}

/// Lenient answer comparison: case-insensitive, whitespace-trimmed,
/// bidirectional substring containment. A paraphrased answer containing
/// the expected phrase (or contained in it) counts as correct. Known
/// trade-offs: short expected answers produce false positives, and a
/// blank answer trivially satisfies containment and counts correct.
/// Deliberate; do not tighten.
pub fn answer_matches(expected: &str, given: &str) -> bool {
    let expected = expected.trim().to_lowercase();
    let given = given.trim().to_lowercase();

    expected.contains(&given) || given.contains(&expected)
}

/// Score a quiz against the answers collected in question order. Returns
/// the correct count and the topic labels of every missed question,
/// duplicates included. A question with no collected answer is graded as
/// a blank answer.
pub fn grade(quiz: &Quiz, answers: &[String]) -> (u32, Vec<String>) {
    let mut score = 0;
    let mut wrong_topics = Vec::new();

    for (i, question) in quiz.questions.iter().enumerate() {
        let given = answers.get(i).map(String::as_str).unwrap_or("");

        if answer_matches(&question.answer, given) {
            score += 1;
        } else {
            wrong_topics.push(question.topic.clone());
        }
    }

    (score, wrong_topics)
}
