use serde_json::json;

use hoard_domain::{
	Candidate, CandidateSet, GeneratedItem, IMAGE_MARKER, ItemImage, ItemLocation, SearchInput,
	StoredItem, StructuredOutput,
	context::format_context,
	decision::{HIGH_CONFIDENCE_THRESHOLD, high_confidence_candidate, should_return_early},
};

fn candidates(confidences: &[f64]) -> CandidateSet {
	CandidateSet::new(
		confidences
			.iter()
			.enumerate()
			.map(|(index, confidence)| Candidate {
				item_id: None,
				name: format!("Item{index}"),
				container_name: format!("Bin{index}"),
				confidence: *confidence,
			})
			.collect(),
	)
}

fn stored(id: i64, name: &str, container: &str, image: Option<&[u8]>) -> StoredItem {
	StoredItem {
		id,
		name: name.to_string(),
		description: format!("{name} description"),
		container_name: container.to_string(),
		image: image
			.map(|bytes| ItemImage { mime_type: "image/jpeg".to_string(), bytes: bytes.to_vec() }),
	}
}

#[test]
fn threshold_is_inclusive() {
	assert!(should_return_early(&candidates(&[0.8])));
	assert!(!should_return_early(&candidates(&[0.79999])));
	assert_eq!(HIGH_CONFIDENCE_THRESHOLD, 0.8);
}

#[test]
fn single_confident_candidate_among_weak_ones_returns_early() {
	let set = candidates(&[0.2, 0.81, 0.7]);
	let sole = high_confidence_candidate(&set).expect("one confident candidate");

	assert!(should_return_early(&set));
	assert_eq!(sole.name, "Item1");
}

#[test]
fn several_confident_candidates_are_ambiguous() {
	for confidences in [&[0.8, 0.8][..], &[0.9, 0.85][..], &[0.95, 0.1, 1.0, 0.8][..]] {
		assert!(!should_return_early(&candidates(confidences)), "{confidences:?}");
	}
}

#[test]
fn no_confident_candidate_does_not_return_early() {
	assert!(!should_return_early(&candidates(&[0.1, 0.2, 0.79])));
}

#[test]
fn empty_set_does_not_return_early() {
	assert!(!should_return_early(&CandidateSet::default()));
	assert!(high_confidence_candidate(&CandidateSet::default()).is_none());
}

#[test]
fn confident_candidate_becomes_high_location() {
	let candidate = Candidate {
		item_id: Some(1),
		name: "Drill".to_string(),
		container_name: "Garage".to_string(),
		confidence: 0.95,
	};
	let location = ItemLocation::from_confident_candidate(&candidate);

	assert_eq!(location.item_name, "Drill");
	assert_eq!(location.container_name, "Garage");
	assert_eq!(location.confidence.as_str(), "High");
	assert_eq!(location.additional_info, "Found with confidence score: 0.95");

	for (confidence, expected) in [
		(1.0, "Found with confidence score: 1.0"),
		(0.8, "Found with confidence score: 0.8"),
	] {
		let confident = Candidate { confidence, ..candidate.clone() };
		let location = ItemLocation::from_confident_candidate(&confident);

		assert_eq!(location.additional_info, expected);
	}
}

#[test]
fn prompt_uses_marker_instead_of_image_payload() {
	let payloads: [&[u8]; 3] = [b"\x89PNG\r\n", b"jpeg-data-with-some-length", &[0u8; 64]];

	for payload in payloads {
		let input = SearchInput::from_item(&stored(1, "Lamp", "Attic", Some(payload)));
		let encoded = input.image.clone().expect("image is encoded");
		let prompt = input.to_prompt(&[]);

		assert!(prompt.contains(IMAGE_MARKER));
		assert!(!prompt.contains(&encoded));
	}
}

#[test]
fn context_formatting_is_repeatable() {
	let items = vec![
		stored(1, "Red Drill", "Garage", None),
		stored(2, "Lamp", "Attic", Some(&b"lamp"[..])),
		stored(3, "Tape", "Drawer", None),
	];
	let first = format_context(&items);
	let second = format_context(&items);

	assert_eq!(first, second);
	assert!(first.starts_with('[') && first.ends_with(']'));

	let parsed: serde_json::Value = serde_json::from_str(&first).expect("context is a JSON list");

	assert_eq!(parsed.as_array().map(Vec::len), Some(3));
	assert_eq!(parsed[1]["image"], IMAGE_MARKER);
}

#[test]
fn empty_context_is_an_empty_list() {
	assert_eq!(format_context(&[]), "[]");
}

#[test]
fn candidate_confidence_must_be_in_unit_range() {
	for bad in [1.2, -0.1] {
		let value = json!({ "candidates": [{ "name": "Drill", "container_name": "Garage", "confidence": bad }] });
		let err = CandidateSet::SCHEMA.validate(&value).expect_err("out of range");

		assert_eq!(err.path, "candidates[0].confidence");
	}

	for good in [0.0, 1.0] {
		let value = json!({ "candidates": [{ "name": "Drill", "container_name": "Garage", "confidence": good }] });

		assert!(CandidateSet::SCHEMA.validate(&value).is_ok());
	}
}

#[test]
fn candidate_requires_container_name() {
	let value = json!({ "candidates": [{ "name": "Drill", "confidence": 0.4 }] });
	let err = CandidateSet::SCHEMA.validate(&value).expect_err("container missing");

	assert_eq!(err.to_string(), "candidates[0].container_name is required");
}

#[test]
fn location_rejects_unknown_labels() {
	let value = json!({
		"item_name": "Drill",
		"container_name": "Garage",
		"confidence": "Certain",
		"additional_info": ""
	});

	assert!(ItemLocation::SCHEMA.validate(&value).is_err());
}

#[test]
fn generated_item_lengths_are_enforced() {
	let long_name = json!({ "name": "x".repeat(31), "description": "ok" });
	let long_description = json!({ "name": "ok", "description": "y".repeat(201) });
	let fits = json!({ "name": "x".repeat(30), "description": "y".repeat(200) });

	assert!(GeneratedItem::SCHEMA.validate(&long_name).is_err());
	assert!(GeneratedItem::SCHEMA.validate(&long_description).is_err());
	assert!(GeneratedItem::SCHEMA.validate(&fits).is_ok());
}

#[test]
fn schema_description_names_every_field() {
	let described = CandidateSet::SCHEMA.describe();
	let candidate = &described["candidates"][0];

	for key in ["item_id", "name", "container_name", "confidence"] {
		assert!(candidate.get(key).is_some(), "missing {key}");
	}

	assert!(
		candidate["confidence"]
			.as_str()
			.is_some_and(|text| text.starts_with("number between 0 and 1 (inclusive)"))
	);
}
