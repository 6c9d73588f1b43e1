use crate::candidate::{Candidate, CandidateSet};

/// Confidence at or above which a candidate counts as a confident match.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// True iff exactly one candidate reaches [`HIGH_CONFIDENCE_THRESHOLD`].
pub fn should_return_early(candidates: &CandidateSet) -> bool {
	high_confidence_candidate(candidates).is_some()
}

/// The sole confident candidate, if there is exactly one.
pub fn high_confidence_candidate(candidates: &CandidateSet) -> Option<&Candidate> {
	let mut confident = candidates
		.candidates
		.iter()
		.filter(|candidate| candidate.confidence >= HIGH_CONFIDENCE_THRESHOLD);
	let first = confident.next()?;

	if confident.next().is_some() { None } else { Some(first) }
}
