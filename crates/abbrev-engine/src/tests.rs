use crate::*;
use crate::dictionary::DEFAULT_ABBREVIATIONS;
use crate::measure;
use crate::pattern::{LinesetPattern, SpecializedPattern, LINESET_PREFIX, LINESET_TAG};
use crate::phrases::PhraseTable;
use crate::rules::*;
use crate::text::*;
use crate::truncate::*;
use crate::verify::*;
use abbrev_core::{AbbrevError, AbbreviationRequest, Method};
use std::sync::Arc;

const LINESET: &str = "Copper Lineset 3/8\" x 5/8\" Suction Line 3/8\" Liquid Line 1/4\" 25'";

fn engine() -> RuleEngine {
    RuleEngine::default()
}

fn reduce(text: &str, target: usize) -> Reduction {
    engine().reduce(&Dictionary::builtin(), text, target).unwrap()
}

// ========== Text helpers ==========

#[test]
fn test_apply_case_upper() {
    assert_eq!(apply_case("VALVE", "Vlv"), "VLV");
}

#[test]
fn test_apply_case_capitalized() {
    assert_eq!(apply_case("Temperature", "temp"), "Temp");
    assert_eq!(apply_case("Setpoint", "SetPt"), "SetPt");
}

#[test]
fn test_apply_case_lower() {
    assert_eq!(apply_case("assembly", "Assy"), "assy");
}

#[test]
fn test_apply_case_no_letters() {
    assert_eq!(apply_case("123", "Abc"), "Abc");
}

#[test]
fn test_take_chars_multibyte() {
    assert_eq!(take_chars("ñandú grande", 5), "ñandú");
    assert_eq!(take_chars("ab", 10), "ab");
}

#[test]
fn test_normalize_whitespace() {
    assert_eq!(normalize_whitespace("  a \t b\n\nc  "), "a b c");
}

// ========== Measurements ==========

#[test]
fn test_protected_words() {
    assert!(measure::is_protected_word("3/4\""));
    assert!(measure::is_protected_word("25'"));
    assert!(measure::is_protected_word("No.2"));
    assert!(measure::is_protected_word("XL200"));
    assert!(!measure::is_protected_word("Assembly"));
}

#[test]
fn test_dimension_paired() {
    let m = measure::DIMENSION.captures("Lineset 3/8\" x 5/8\" 50'").unwrap();
    assert_eq!(&m[0], "3/8\" x 5/8\"");
    assert!(m.get(1).is_some());
}

#[test]
fn test_measurement_with_unit() {
    let found: Vec<_> = measure::MEASUREMENT.find_iter("Pipe 1.5\" and 20'").map(|m| m.as_str()).collect();
    assert_eq!(found, vec!["1.5\"", "20'"]);
}

// ========== Dictionary ==========

#[test]
fn test_dictionary_builtin_size() {
    let d = Dictionary::builtin();
    assert!(d.len() > 100);
    assert_eq!(d.lookup("temperature"), Some("Temp"));
    assert_eq!(d.lookup("ASSEMBLY"), Some("Assy"));
}

#[test]
fn test_dictionary_later_entry_wins() {
    let d = Dictionary::new([("Valve", "Vl"), ("VALVE", "Vlv")]).unwrap();
    assert_eq!(d.len(), 1);
    assert_eq!(d.lookup("valve"), Some("Vlv"));
}

#[test]
fn test_dictionary_ignores_empty() {
    let d = Dictionary::new([("", "x"), ("Valve", " ")]).unwrap();
    assert!(d.is_empty());
    assert_eq!(d.substitute("Valve"), "Valve");
}

#[test]
fn test_dictionary_case_reapplied() {
    let d = Dictionary::new([("valve", "Vlv")]).unwrap();
    assert_eq!(d.substitute("Valve VALVE valve"), "Vlv VLV vlv");
}

#[test]
fn test_dictionary_whole_word_only() {
    let d = Dictionary::new([("heat", "Ht")]).unwrap();
    assert_eq!(d.substitute("Heater Heat preheat"), "Heater Ht preheat");
}

#[test]
fn test_dictionary_longest_key_first() {
    let d = Dictionary::new([("Control", "Ctrl"), ("Controller", "Ctrlr")]).unwrap();
    assert_eq!(d.substitute("Controller Control"), "Ctrlr Ctrl");
}

#[test]
fn test_dictionary_no_chained_substitution() {
    // "Sensor" -> "Sens" must not then become "Sns".
    let d = Dictionary::builtin();
    assert_eq!(d.substitute("Sensor"), "Sens");
    assert_eq!(d.substitute("Sens"), "Sns");
}

#[test]
fn test_dictionary_multi_word_key() {
    let d = Dictionary::builtin();
    assert_eq!(d.substitute("Adjustable Set  Point"), "Adjustable SetPt");
    assert_eq!(d.substitute("Manual Reset"), "MR");
}

#[test]
fn test_dictionary_skips_lengthening() {
    let d = Dictionary::new([("ac", "air conditioner")]).unwrap();
    assert_eq!(d.substitute("ac unit"), "ac unit");
}

#[test]
fn test_dictionary_with_entries() {
    let d = Dictionary::new([("Valve", "Vlv")]).unwrap();
    let d2 = d.with_entries([("Brass", "Brs"), ("valve", "V")]).unwrap();
    assert_eq!(d.lookup("brass"), None);
    assert_eq!(d2.lookup("brass"), Some("Brs"));
    assert_eq!(d2.lookup("Valve"), Some("V"));
    assert_eq!(d2.len(), 2);
}

#[test]
fn test_dictionary_entries_sorted() {
    let d = Dictionary::new([("Zinc", "Zn"), ("Brass", "Brs")]).unwrap();
    assert_eq!(d.entries(), vec![("Brass".to_string(), "Brs".to_string()), ("Zinc".to_string(), "Zn".to_string())]);
}

#[test]
fn test_default_table_has_domain_overrides() {
    let last = DEFAULT_ABBREVIATIONS.iter().rev().find(|(k, _)| *k == "Assembly").unwrap();
    assert_eq!(last.1, "Assy");
}

// ========== Phrases ==========

#[test]
fn test_phrases_basic() {
    let t = PhraseTable::default();
    assert_eq!(t.apply("Rooftop Unit w/ Variable Frequency Drive"), "RTU w/ VFD");
}

#[test]
fn test_phrases_longest_first() {
    let t = PhraseTable::default();
    assert_eq!(t.apply("heating ventilation and air conditioning"), "HVAC");
}

#[test]
fn test_phrases_drop_non_shortening() {
    let t = PhraseTable::new(&[("ab cd", "abcdef"), ("two way", "2-Way")]);
    assert_eq!(t.len(), 1);
}

// ========== Pattern Detector ==========

#[test]
fn test_lineset_scenario() {
    let m = LinesetPattern.detect(LINESET).unwrap();
    assert!(m.text.starts_with("Cop Lin 3/8\" x 5/8\""));
    assert_eq!(m.text, "Cop Lin 3/8\" x 5/8\" Suc Ln 3/8\" Liq Ln 1/4\" 25'");
    assert_eq!(m.applied_rules, vec![LINESET_TAG.to_string()]);
}

#[test]
fn test_lineset_absent() {
    assert!(PatternDetector::default().detect("Ball Valve 1/2\" Brass").is_none());
}

#[test]
fn test_lineset_without_copper() {
    let m = LinesetPattern.detect("lineset 1/4\" x 3/8\" 15'").unwrap();
    assert_eq!(m.text, "Cop Lin 1/4\" x 3/8\" 15'");
}

#[test]
fn test_lineset_prefix_is_fixed() {
    let m = LinesetPattern.detect("Mini Split Lineset 1/4\" x 1/2\" Suction Line 1/2\" 50'").unwrap();
    assert!(m.text.starts_with(LINESET_PREFIX));
    assert_eq!(m.text, "Cop Lin 1/4\" x 1/2\" Suc Ln 1/2\" 50'");
}

#[test]
fn test_lineset_role_without_nearby_measurement() {
    let m = LinesetPattern.detect("Copper Lineset Suction Line insulated black jacket 3/4\"").unwrap();
    assert_eq!(m.text, "Cop Lin Suc Ln");
}

#[test]
fn test_lineset_role_uses_first_candidate() {
    let m = LinesetPattern.detect("Lineset Liquid Line 1/4\" insulated 3/8\"").unwrap();
    assert_eq!(m.text, "Cop Lin Liq Ln 1/4\"");
}

#[test]
fn test_lineset_measurement_before_marker_not_used() {
    let m = LinesetPattern.detect("Lineset 7/8\" Discharge Line").unwrap();
    assert_eq!(m.text, "Cop Lin Dis Ln");
}

#[test]
fn test_lineset_ignores_target() {
    let a = Abbreviator::builtin();
    let r = a.abbreviate(LINESET, 10, true);
    assert_eq!(r.method_used, Method::SpecializedPattern);
    assert!(r.final_length() > 10);
}

// ========== Truncator ==========

#[test]
fn test_truncate_fits() {
    let t = truncate_detailed("short", 10);
    assert_eq!(t.text, "short");
    assert_eq!(t.kind, TruncationKind::None);
}

#[test]
fn test_truncate_word_boundary() {
    let t = truncate_detailed("alpha bravo charlie delta", 14);
    assert_eq!(t.text, "alpha bravo");
    assert_eq!(t.kind, TruncationKind::WordBoundary);
}

#[test]
fn test_truncate_clean_boundary_keeps_full_length() {
    let t = truncate_detailed("alpha bravo charlie", 11);
    assert_eq!(t.text, "alpha bravo");
}

#[test]
fn test_truncate_hard_cut() {
    let t = truncate_detailed("ab cdefghijklmnopqrstuvwxyz", 10);
    assert_eq!(t.text, "ab cdefghi");
    assert_eq!(t.kind, TruncationKind::HardCut);
}

#[test]
fn test_truncate_keeps_measurement() {
    let t = truncate_detailed("Flex Duct Insulated 12\" Dia Silver Jacket", 20);
    assert_eq!(t.kind, TruncationKind::Measurement);
    assert_eq!(t.text, "Flex Duct Insulated 12\"");
}

#[test]
fn test_truncate_measurement_too_far() {
    let t = truncate_detailed("Stainless braided supply connector hose 36\"", 20);
    assert_ne!(t.kind, TruncationKind::Measurement);
    assert!(char_len(&t.text) <= 20);
}

#[test]
fn test_truncate_no_ellipsis() {
    assert!(!truncate("one two three four five six", 12).contains("..."));
}

#[test]
fn test_truncate_multibyte() {
    let t = truncate("ééééééééééééé", 5);
    assert_eq!(t, "ééééé");
}

// ========== Rule passes ==========

#[test]
fn test_strip_parentheticals() {
    assert_eq!(normalize_whitespace(&strip_parentheticals("Valve (brass body) Assy")), "Valve Assy");
}

#[test]
fn test_strip_parentheticals_keeps_measurements() {
    assert_eq!(strip_parentheticals("Valve (1/2\") Assy"), "Valve (1/2\") Assy");
}

#[test]
fn test_strip_parentheticals_needs_both() {
    assert_eq!(strip_parentheticals("Valve (open"), "Valve (open");
}

#[test]
fn test_long_words() {
    assert_eq!(abbreviate_long_words("Extended Handle Brass Gate"), "Ext Hand Brass Gate");
}

#[test]
fn test_long_words_protected() {
    assert_eq!(abbreviate_long_words("Fitting 3/4\" No.12 Coupling"), "Fitt 3/4\" No.12 Cou");
}

#[test]
fn test_long_words_hyphen_and_punctuation() {
    assert_eq!(abbreviate_long_words("Extended-Handle, Brass"), "Ext-Hand, Brass");
}

#[test]
fn test_segments_keep_first() {
    let out = prioritize_segments("Gate Vlv Brass Body, Threaded Ends, Lead Free Certified", 30);
    assert!(out.starts_with("Gate Vlv Brass Body,"));
    assert!(char_len(&out) <= 30);
}

#[test]
fn test_segments_preserve_separators() {
    assert_eq!(prioritize_segments("Pump - Inline; Bronze", 40), "Pump-Inline;Bronze");
}

#[test]
fn test_segments_stop_when_budget_gone() {
    assert_eq!(prioritize_segments("Circulator Pump Assy, Cast Iron", 21), "Circulator Pump Assy");
}

#[test]
fn test_segments_squeeze_words() {
    let out = prioritize_segments("Pump, Cartridge Replacement 1/2\" Kit", 20);
    assert_eq!(out, "Pump,Car Rep 1/2\"");
}

#[test]
fn test_segments_single_segment_unchanged() {
    assert_eq!(prioritize_segments("no separators here", 5), "no separators here");
}

// ========== Rule Engine ==========

#[test]
fn test_dictionary_scenario() {
    let text = "Temperature Control Assembly With Aluminum Enclosure";
    let r = reduce(text, 30);
    assert!(char_len(&r.text) <= 30);
    assert!(r.text.starts_with("Temp Ctrl Assy"));
    assert_eq!(r.applied_rules, vec![DICTIONARY_TAG.to_string()]);
    let report = verify_with_target(text, &r.text, &r.applied_rules, 30);
    assert!(report.is_standard);
    assert!(report.meaning_preserved);
}

#[test]
fn test_exhausted_passes_truncate() {
    let group = "qwert zxcv bnml pqrs ";
    let text: String = group.repeat(10).chars().take(200).collect();
    let r = reduce(&text, 20);
    assert_eq!(r.text, "qwert zxcv bnml pqrs");
    assert_eq!(char_len(&r.text), 20);
    assert!(r.applied_rules.last().unwrap().to_lowercase().contains("truncat"));
}

#[test]
fn test_tags_follow_application_order() {
    let r = reduce("Temperature Sensor (remote mounted) Immersion Thermowell Stainless", 25);
    let idx = |tag: &str| r.applied_rules.iter().position(|t| t == tag);
    let dict = idx(DICTIONARY_TAG).unwrap();
    let parens = idx(PARENTHESES_TAG).unwrap();
    assert!(dict < parens);
    assert!(idx(PHRASE_TAG).is_none());
}

#[test]
fn test_early_exit_after_dictionary() {
    let r = reduce("Valve Actuator", 12);
    assert_eq!(r.text, "Vlv Act");
    assert_eq!(r.applied_rules.len(), 1);
}

#[test]
fn test_final_extension_keeps_measurement() {
    let d = Dictionary::empty();
    let r = engine().reduce(&d, "Bolt Nut Pin Cap Tee 3/4\"", 22).unwrap();
    assert_eq!(r.text, "Bolt Nut Pin Cap Tee 3/4\"");
    assert_eq!(r.applied_rules, vec![MEASUREMENT_EXTENSION_TAG.to_string()]);
}

#[test]
fn test_reduce_is_deterministic() {
    let text = "Thermostatic Mixing Valve Assembly, Chrome Plated, Exposed Piping; Recirculation Pump";
    let a = reduce(text, 30);
    let b = reduce(text, 30);
    assert_eq!(a, b);
}

#[test]
fn test_passes_never_grow() {
    let e = engine();
    let d = Dictionary::builtin();
    let text = "Heat Pump Outdoor Unit (2 ton) High Efficiency, Stainless Steel Cabinet - Factory Assembled";
    let mut current = normalize_whitespace(text);
    for pass in Pass::ALL {
        let next = e.apply_pass(pass, &d, &current, 20);
        assert!(char_len(&next) <= char_len(&current), "{pass:?} grew the text");
        current = next;
    }
}

#[test]
fn test_measurements_survive_passes() {
    let text = "Ball Valve 3/4\" Full Port (lead free) Threaded Bronze, 600 WOG";
    let r = reduce(text, 25);
    assert!(r.text.contains("3/4\""));
}

// ========== Verification ==========

#[test]
fn test_verify_identity() {
    let r = verify("Gate Valve", "Gate Valve", &[]);
    assert!(r.is_standard);
    assert!(r.meaning_preserved);
    assert!(r.confidence >= 0.9);
    assert!(r.suggestions.is_empty());
}

#[test]
fn test_verify_identity_long_text() {
    let long = "A very long description that exceeds the default target length";
    let r = verify(long, long, &[]);
    assert!(r.confidence >= 0.9);
}

#[test]
fn test_verify_truncated() {
    let r = verify_with_target("orig text long", "orig", &[SMART_TRUNCATION_TAG.to_string()], 10);
    assert!(!r.is_standard);
    assert!(r.meaning_preserved);
    assert_eq!(r.readability, 0.6);
    assert_eq!(r.confidence, 0.9);
    assert_eq!(r.suggestions, vec![NON_STANDARD_SUGGESTION.to_string(), READABILITY_SUGGESTION.to_string()]);
}

#[test]
fn test_verify_severe() {
    let r = verify_with_target("orig text", "o", &[SEVERE_TRUNCATION_TAG.to_string()], 10);
    assert!(!r.meaning_preserved);
    assert_eq!(r.readability, 0.3);
    assert_eq!(r.confidence, 0.4);
    assert_eq!(r.suggestions[0], SEVERE_SUGGESTION);
    assert_eq!(r.suggestions.len(), 3);
}

#[test]
fn test_verify_degraded_long_text() {
    let text = "Temperature Control Assembly With Aluminum Enclosure Kit";
    let r = verify_with_target(text, text, &["Error: Processing error: boom".to_string()], 30);
    assert_eq!(r.readability, 0.7);
    assert_eq!(r.confidence, 0.7);
    assert!(r.confidence < 0.9);
}

#[test]
fn test_verify_over_target() {
    let r = verify_with_target("abcdefghijkl", "abcdefghijk", &[DICTIONARY_TAG.to_string()], 5);
    assert_eq!(r.readability, 0.7);
    assert_eq!(r.confidence, 0.7);
    assert!(r.is_standard);
}

// ========== Model Strategy ==========

struct FailingModel;

impl ModelStrategy for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }
    fn predict(&self, _text: &str, _target: usize) -> anyhow::Result<String> {
        anyhow::bail!("model offline")
    }
}

struct EllipsisModel;

impl ModelStrategy for EllipsisModel {
    fn name(&self) -> &str {
        "ellipsis"
    }
    fn predict(&self, text: &str, _target: usize) -> anyhow::Result<String> {
        Ok(format!("{text}..."))
    }
}

fn training_pairs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Circulator Pump Bronze", "Circ Pump Brz"),
        ("Circulator Pump Cast Iron", "Circ Pump Cast Iron"),
        ("Backflow Preventer Assembly", "Bkflw Prev Assy"),
        ("Backflow Preventer", "Bkflw Prev"),
    ]
}

#[test]
fn test_word_model_fit() {
    let m = WordPatternModel::fit(&training_pairs());
    assert!(m.is_trained());
    assert!(m.vocabulary_len() >= 3);
    assert!(m.ratio() > 0.0 && m.ratio() <= 1.0);
}

#[test]
fn test_word_model_predict_uses_vocabulary() {
    let m = WordPatternModel::fit(&training_pairs());
    let out = m.predict("Circulator Backflow Preventer Kit", 20).unwrap();
    assert!(out.starts_with("Circ Bkflw Prev"));
}

#[test]
fn test_word_model_untrained_errors() {
    let m = WordPatternModel::default();
    assert!(!m.is_ready());
    assert!(m.predict("anything long enough here", 5).is_err());
}

#[test]
fn test_word_model_save_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models/word.json");
    let m = WordPatternModel::fit(&training_pairs());
    m.save(&path).unwrap();
    let loaded = WordPatternModel::load(&path).unwrap();
    assert_eq!(loaded.vocabulary_len(), m.vocabulary_len());
    assert!(loaded.is_trained());
}

#[test]
fn test_word_model_load_rejects_untrained() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("untrained.json");
    WordPatternModel::default().save(&path).unwrap();
    let err = WordPatternModel::load(&path).unwrap_err();
    assert!(matches!(err, AbbrevError::Model(_)));
    assert!(!err.is_validation());
}

// ========== Abbreviator ==========

#[test]
fn test_no_change_scenario() {
    let r = Abbreviator::builtin().abbreviate("Short text", 30, true);
    assert_eq!(r.abbreviated, "Short text");
    assert_eq!(r.method_used, Method::NoChange);
    assert!(r.applied_rules.is_empty());
}

#[test]
fn test_empty_input() {
    let r = Abbreviator::builtin().abbreviate("", 30, true);
    assert_eq!(r.method_used, Method::None);
    assert_eq!(r.original_length, 0);
}

#[test]
fn test_pattern_scenario() {
    let r = Abbreviator::builtin().abbreviate(LINESET, 30, true);
    assert_eq!(r.method_used, Method::SpecializedPattern);
    assert!(r.abbreviated.starts_with("Cop Lin 3/8\" x 5/8\""));
    assert!(r.abbreviated.contains("Suc Ln"));
    assert!(r.abbreviated.contains("Liq Ln"));
    assert!(r.abbreviated.ends_with("25'"));
}

#[test]
fn test_without_patterns_uses_rules() {
    let a = Abbreviator::builtin().with_patterns(PatternDetector::new());
    let r = a.abbreviate(LINESET, 30, false);
    assert_eq!(r.method_used, Method::RuleBased);
    assert!(r.applied_rules.iter().all(|t| t != LINESET_TAG));
}

#[test]
fn test_pattern_beats_model() {
    let m = WordPatternModel::fit(&training_pairs());
    let a = Abbreviator::builtin().with_model(Arc::new(m));
    assert_eq!(a.abbreviate(LINESET, 30, true).method_used, Method::SpecializedPattern);
}

#[test]
fn test_rule_based_scenario() {
    let r = Abbreviator::builtin().abbreviate("Temperature Control Assembly With Aluminum Enclosure", 30, false);
    assert_eq!(r.method_used, Method::RuleBased);
    assert!(r.final_length() <= 30);
    assert_eq!(r.original_length, 52);
}

#[test]
fn test_model_used_when_available() {
    let m = WordPatternModel::fit(&training_pairs());
    let a = Abbreviator::builtin().with_model(Arc::new(m));
    assert!(a.model_status().available);
    let r = a.abbreviate("Circulator Pump Backflow Preventer", 25, true);
    assert_eq!(r.method_used, Method::MlModel);
    assert!(r.final_length() <= 25);
}

#[test]
fn test_model_skipped_when_disabled() {
    let m = WordPatternModel::fit(&training_pairs());
    let a = Abbreviator::builtin().with_model(Arc::new(m));
    let r = a.abbreviate("Circulator Pump Backflow Preventer", 25, false);
    assert_eq!(r.method_used, Method::RuleBased);
}

#[test]
fn test_model_failure_falls_back() {
    let a = Abbreviator::builtin().with_model(Arc::new(FailingModel));
    let r = a.abbreviate("Temperature Control Assembly With Aluminum Enclosure", 30, true);
    assert_eq!(r.method_used, Method::RuleBased);
}

#[test]
fn test_untrained_model_not_available() {
    let a = Abbreviator::builtin().with_model(Arc::new(WordPatternModel::default()));
    assert!(!a.model_status().available);
    assert_eq!(a.model_status().name.as_deref(), Some("word_pattern"));
}

#[test]
fn test_model_ellipsis_stripped_and_truncated() {
    let a = Abbreviator::builtin().with_model(Arc::new(EllipsisModel));
    let r = a.abbreviate("alpha bravo charlie delta echo foxtrot", 20, true);
    assert_eq!(r.method_used, Method::MlModel);
    assert!(!r.abbreviated.contains("..."));
    assert!(r.final_length() <= 20);
    assert_eq!(r.applied_rules.last().map(String::as_str), Some(SMART_TRUNCATION_TAG));
}

struct BrokenReducer;

impl Reducer for BrokenReducer {
    fn reduce(&self, _d: &Dictionary, _text: &str, _target: usize) -> abbrev_core::Result<Reduction> {
        Err(AbbrevError::processing("boom"))
    }
}

#[test]
fn test_reducer_error_degrades() {
    let a = Abbreviator::builtin().with_reducer(Arc::new(BrokenReducer));
    let text = "Temperature Control Assembly With Aluminum Enclosure";
    let r = a.abbreviate(text, 30, true);
    assert_eq!(r.method_used, Method::Error);
    assert_eq!(r.abbreviated, text);
    assert!(r.applied_rules[0].starts_with("Error:"));
    assert!(r.applied_rules[0].contains("boom"));

    let report = verify_with_target(text, &r.abbreviated, &r.applied_rules, 30);
    assert!(report.confidence < 0.9);
    assert_eq!(report.readability, 0.7);
}

#[test]
fn test_process_validates() {
    let a = Abbreviator::builtin();
    assert!(a.process(&AbbreviationRequest::new("abc", 0)).unwrap_err().is_validation());
    assert_eq!(a.process(&AbbreviationRequest::new("abc", 5)).unwrap().method_used, Method::NoChange);
}

#[test]
fn test_custom_dictionary_source() {
    let d = Arc::new(Dictionary::new([("Backflow", "BF"), ("Preventer", "Prev")]).unwrap());
    let a = Abbreviator::new(Arc::new(d));
    let r = a.abbreviate("Backflow Preventer Reduced Pressure", 25, false);
    assert!(r.abbreviated.starts_with("BF Prev"));
}

#[test]
fn test_idempotent_rule_based() {
    let a = Abbreviator::builtin();
    let first = a.abbreviate("Thermostatic Mixing Valve Assembly, Chrome Plated, Exposed Piping", 30, false);
    let again = a.abbreviate(&first.abbreviated, 30, false);
    assert_eq!(again.method_used, Method::NoChange);
}
