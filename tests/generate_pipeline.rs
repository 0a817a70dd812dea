use std::collections::HashSet;
use std::fs;
use std::path::Path;

use slackkit_lib::commands::chat_manifest::{self, MANIFEST_FILE};
use slackkit_lib::commands::config::SlackKitConfig;
use slackkit_lib::commands::context::{self, ContextDocument};
use slackkit_lib::commands::emit::{self, GenerateOutcome, PersonRecord};
use slackkit_lib::commands::infer;
use slackkit_lib::templates;

const OUTPUTS: [&str; 4] = [
    emit::COMPANY_FILE,
    emit::PEOPLE_FILE,
    emit::CHANNEL_CONFIG_FILE,
    MANIFEST_FILE,
];

fn seed_project(root: &Path, faces: &[&str]) -> SlackKitConfig {
    let config = SlackKitConfig::default();
    fs::write(context::context_path(root), templates::example_context()).unwrap();
    let faces_dir = config.faces_path(root);
    fs::create_dir_all(&faces_dir).unwrap();
    for face in faces {
        fs::write(faces_dir.join(face), b"img").unwrap();
    }
    config
}

fn read_outputs(root: &Path, config: &SlackKitConfig) -> Vec<String> {
    OUTPUTS
        .iter()
        .map(|file| fs::read_to_string(config.output_path(root).join(file)).unwrap())
        .collect()
}

fn people(root: &Path, config: &SlackKitConfig) -> Vec<PersonRecord> {
    let raw = fs::read_to_string(config.output_path(root).join(emit::PEOPLE_FILE)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn regeneration_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = seed_project(dir.path(), &["priya-patel.png", "face-1.jpg", "face-2.jpg", "zoe.webp"]);

    emit::generate(dir.path(), &config).unwrap();
    let first = read_outputs(dir.path(), &config);
    emit::generate(dir.path(), &config).unwrap();
    let second = read_outputs(dir.path(), &config);

    assert_eq!(first, second);
}

#[test]
fn named_faces_are_unique_and_everyone_is_renderable() {
    let dir = tempfile::tempdir().unwrap();
    let config = seed_project(
        dir.path(),
        &[
            "kenji-tanaka.jpg",
            "priya-patel.png",
            "james-wilson.jpg",
            "hannah-wolf.jpg",
            "jordan-rivera.png",
            "alpha.png",
        ],
    );

    let outcome = emit::generate(dir.path(), &config).unwrap();
    assert!(matches!(outcome, GenerateOutcome::Generated { people: 6, .. }));

    let people = people(dir.path(), &config);
    let by_name = |name: &str| people.iter().find(|p| p.name == name).unwrap();
    assert_eq!(by_name("Priya Patel").avatar.as_deref(), Some("/assets/faces/priya-patel.png"));
    assert_eq!(by_name("Kenji Tanaka").avatar.as_deref(), Some("/assets/faces/kenji-tanaka.jpg"));
    assert_eq!(by_name("Jordan Rivera").avatar.as_deref(), Some("/assets/faces/jordan-rivera.png"));
    assert_eq!(by_name("Nexus AI").avatar, None);

    let assigned: Vec<&str> = people.iter().filter_map(|p| p.avatar.as_deref()).collect();
    let unique: HashSet<&str> = assigned.iter().copied().collect();
    assert_eq!(assigned.len(), unique.len());

    for person in &people {
        assert!(person.avatar.is_some() || !person.initials.is_empty(), "{}", person.name);
    }
}

#[test]
fn general_channel_and_manifest_are_emitted() {
    let dir = tempfile::tempdir().unwrap();
    let config = seed_project(dir.path(), &[]);
    emit::generate(dir.path(), &config).unwrap();

    let output = config.output_path(dir.path());
    let channel_config: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.join(emit::CHANNEL_CONFIG_FILE)).unwrap()).unwrap();
    let public_ids: Vec<&str> = channel_config["public"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert!(public_ids.contains(&"general"));
    assert_eq!(channel_config["messageThemes"]["general"][0]["who"], "Priya Patel");

    let manifest = chat_manifest::read_manifest(&output.join(MANIFEST_FILE)).unwrap();
    assert_eq!(manifest.schema_version, chat_manifest::SCHEMA_VERSION);
    assert_eq!(manifest.default_chat_id, "platform");
    assert_eq!(manifest.dms[0].name, "Nexus AI");
}

#[test]
fn missing_context_is_seeded_from_example() {
    let dir = tempfile::tempdir().unwrap();
    let config = SlackKitConfig::default();
    context::write_example(dir.path()).unwrap();

    let outcome = emit::generate(dir.path(), &config).unwrap();
    assert!(matches!(outcome, GenerateOutcome::Seeded(_)));
    assert!(context::context_path(dir.path()).exists());
    assert!(!config.output_path(dir.path()).join(emit::PEOPLE_FILE).exists());
}

#[test]
fn inferred_marketplace_context_generates_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let config = SlackKitConfig::default();
    let mut doc = ContextDocument::from_json(templates::example_context()).unwrap();
    doc.company.description = "A marketplace for vintage cameras".into();
    doc.channels = infer::infer_channels(&doc.company.industry, &doc.company.description, "Large");
    context::save(&context::context_path(dir.path()), &doc).unwrap();

    emit::generate(dir.path(), &config).unwrap();
    let manifest = chat_manifest::read_manifest(&config.output_path(dir.path()).join(MANIFEST_FILE)).unwrap();
    assert_eq!(manifest.default_chat_id, "operations");
    assert!(manifest.channels.iter().any(|c| c.id == "general"));
    assert!(manifest.channels.iter().all(|c| c.id != "operations"));
}
