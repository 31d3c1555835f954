//! Integration tests for OCR capture conversion

use splatlog_core::{Error, MatchRecord, SessionDocument, SessionLogParser};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures")
        .join(name)
}

#[test]
fn test_english_capture() {
    let session = SessionLogParser::parse_file(fixture("en_splat_zones.txt"), "en").unwrap();

    assert_eq!(session.x_power, "2187.3");
    assert_eq!(session.rule, "Splat Zones");
    assert_eq!(
        session.battles,
        vec![
            MatchRecord::new("Defeat", "Knockout", "Scorch Gorge"),
            MatchRecord::new("Victory", "68", "Museum d'Alfonsino"),
        ]
    );
}

#[test]
fn test_noisy_crlf_capture() {
    let session = SessionLogParser::parse_file(fixture("en_tower_control.txt"), "en").unwrap();

    assert_eq!(session.x_power, "2312.8");
    assert_eq!(session.rule, "Tower Control");
    assert_eq!(
        session.battles,
        vec![
            MatchRecord::new("Victory", "03", "Sturgeon Shipyard"),
            MatchRecord::new("Defeat", "41", "Inkblot Art Academy"),
            MatchRecord::new("Victory", "Knockout", "Mahi-Mahi Resort"),
        ]
    );
}

#[test]
fn test_japanese_capture() {
    let session = SessionLogParser::parse_file(fixture("ja_rainmaker.txt"), "ja").unwrap();

    assert_eq!(session.x_power, "2450.5");
    assert_eq!(session.rule, "ガチホコ");
    assert_eq!(
        session.battles,
        vec![
            MatchRecord::new("WIN", "100カウント", "ユノハナ大渓谷"),
            MatchRecord::new("LOSE", "ノックアウト", "マテガイ放水路"),
        ]
    );
}

#[test]
fn test_wrong_language_finds_no_power() {
    let err = SessionLogParser::parse_file(fixture("ja_rainmaker.txt"), "en").unwrap_err();
    assert!(matches!(err, Error::PowerNotFound));
}

#[test]
fn test_missing_stage_rejected() {
    let err = SessionLogParser::parse_file(fixture("en_missing_stage.txt"), "en").unwrap_err();
    assert!(matches!(
        err,
        Error::CountMismatch {
            results: 3,
            scores: 3,
            stages: 2
        }
    ));
}

#[test]
fn test_document_written_and_read_back() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("set.json");

    let session = SessionLogParser::parse_file(fixture("ja_rainmaker.txt"), "ja").unwrap();
    fs::write(&out, session.to_json().unwrap()).unwrap();

    let raw = fs::read_to_string(&out).unwrap();
    assert!(raw.contains("ユノハナ大渓谷"));

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert!(keys.contains(&"datetime"));
    assert!(keys.contains(&"set_id"));
    assert_eq!(value["battles"].as_array().unwrap().len(), 2);

    let parsed = SessionDocument::from_json(&raw).unwrap();
    assert_eq!(parsed.battles, session.battles);
    assert_eq!(parsed.set_id.get_version_num(), 4);
}
