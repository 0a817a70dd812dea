use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::commands::avatars::{classify_face, FACES_URL_PREFIX, ORGANIZE_EXTENSIONS};
use crate::commands::config::SlackKitConfig;
use crate::commands::context::Gender;
use crate::commands::emit::{write_json, PersonRecord, PEOPLE_FILE};
use crate::error::{GeneratorError, Result};

pub const REPORT_FILE: &str = "avatar-mapping-report.json";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingReport {
    pub male_names: Vec<String>,
    pub female_names: Vec<String>,
    pub male_avatars: Vec<String>,
    pub female_avatars: Vec<String>,
    pub male_mapping: BTreeMap<String, String>,
    pub female_mapping: BTreeMap<String, String>,
}

fn gender_dir(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "male",
        Gender::Female => "female",
        Gender::Neutral => "neutral",
    }
}

fn list_faces(faces_dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(faces_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let sortable = match name.rsplit_once('.') {
            Some((_, ext)) => ORGANIZE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
            None => false,
        };
        if sortable {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

fn pair_up(names: &[String], avatars: &[String]) -> BTreeMap<String, String> {
    names.iter().cloned().zip(avatars.iter().cloned()).collect()
}

/// Sorts faces into `male/` and `female/` and pins each person in `people.json`
/// to one face of their gender. Neutral people keep their avatar.
pub fn organize(root: &Path, config: &SlackKitConfig) -> Result<MappingReport> {
    let faces_dir = config.faces_path(root);
    let people_path = config.output_path(root).join(PEOPLE_FILE);
    if !people_path.exists() {
        return Err(GeneratorError::Custom(format!(
            "{} not found. Run `slackkit generate` first.",
            people_path.display()
        )));
    }
    let raw = std::fs::read_to_string(&people_path)?;
    let mut people: Vec<PersonRecord> = serde_json::from_str(&raw)?;

    std::fs::create_dir_all(&faces_dir)?;
    let mut male_avatars = Vec::new();
    let mut female_avatars = Vec::new();
    for file in list_faces(&faces_dir)? {
        match classify_face(&file) {
            Some(Gender::Female) => female_avatars.push(file),
            Some(Gender::Male) => male_avatars.push(file),
            _ => {}
        }
    }
    tracing::info!(
        "Found {} male and {} female avatars",
        male_avatars.len(),
        female_avatars.len()
    );

    let names_of = |gender: Gender| -> Vec<String> {
        people
            .iter()
            .filter(|p| p.gender == gender)
            .map(|p| p.name.clone())
            .collect()
    };
    let male_names = names_of(Gender::Male);
    let female_names = names_of(Gender::Female);

    for (gender, names, avatars) in [
        (Gender::Male, &male_names, &male_avatars),
        (Gender::Female, &female_names, &female_avatars),
    ] {
        if avatars.len() < names.len() {
            tracing::warn!(
                "Only {} {} avatars for {} {} names",
                avatars.len(),
                gender_dir(gender),
                names.len(),
                gender_dir(gender)
            );
        }
        let target_dir = faces_dir.join(gender_dir(gender));
        std::fs::create_dir_all(&target_dir)?;
        for file in avatars {
            let dest = target_dir.join(file);
            if !dest.exists() {
                std::fs::copy(faces_dir.join(file), &dest)?;
            }
        }
    }

    let male_mapping = pair_up(&male_names, &male_avatars);
    let female_mapping = pair_up(&female_names, &female_avatars);

    for person in &mut people {
        let mapped = match person.gender {
            Gender::Male => male_mapping.get(&person.name),
            Gender::Female => female_mapping.get(&person.name),
            Gender::Neutral => None,
        };
        if let Some(file) = mapped {
            person.avatar = Some(format!("{FACES_URL_PREFIX}/{}/{file}", gender_dir(person.gender)));
        }
    }
    write_json(&people_path, &people)?;

    let report = MappingReport {
        male_names,
        female_names,
        male_avatars,
        female_avatars,
        male_mapping,
        female_mapping,
    };
    write_json(&root.join(REPORT_FILE), &report)?;
    tracing::info!(
        "Mapped {} male and {} female people",
        report.male_mapping.len(),
        report.female_mapping.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, gender: Gender) -> PersonRecord {
        PersonRecord {
            name: name.into(),
            avatar: None,
            initials: crate::util::initials(name),
            gender,
            country: "United States".into(),
            role: None,
            me: false,
            emoji_heavy: false,
            verbose: false,
        }
    }

    #[test]
    fn test_organize_maps_one_to_one() {
        let dir = tempfile::tempdir().unwrap();
        let config = SlackKitConfig::default();
        let faces = config.faces_path(dir.path());
        std::fs::create_dir_all(&faces).unwrap();
        for file in ["face-1.jpg", "face-2.jpg", "sarah-williams.png", "morgan-davis.png", "notes.txt", "face-3.webp"] {
            std::fs::write(faces.join(file), b"img").unwrap();
        }
        let people = vec![
            person("Tom Hale", Gender::Male),
            person("Ann Lee", Gender::Female),
            person("Eve Park", Gender::Female),
            person("Sam Kit", Gender::Male),
            person("Bot AI", Gender::Neutral),
        ];
        write_json(&config.output_path(dir.path()).join(PEOPLE_FILE), &people).unwrap();

        let report = organize(dir.path(), &config).unwrap();
        assert_eq!(report.male_avatars, ["face-1.jpg"]);
        assert_eq!(report.female_avatars, ["face-2.jpg", "sarah-williams.png"]);
        assert_eq!(report.male_mapping.len(), 1);
        assert_eq!(report.female_mapping["Eve Park"], "sarah-williams.png");
        assert!(faces.join("female/sarah-williams.png").exists());
        assert!(faces.join("male/face-1.jpg").exists());
        assert!(dir.path().join(REPORT_FILE).exists());

        let raw = std::fs::read_to_string(config.output_path(dir.path()).join(PEOPLE_FILE)).unwrap();
        let updated: Vec<PersonRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(updated[0].avatar.as_deref(), Some("/assets/faces/male/face-1.jpg"));
        assert_eq!(updated[1].avatar.as_deref(), Some("/assets/faces/female/face-2.jpg"));
        assert_eq!(updated[3].avatar, None);
        assert_eq!(updated[4].avatar, None);
    }

    #[test]
    fn test_organize_creates_missing_faces_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = SlackKitConfig::default();
        let people = vec![person("Tom Hale", Gender::Male), person("Ann Lee", Gender::Female)];
        write_json(&config.output_path(dir.path()).join(PEOPLE_FILE), &people).unwrap();

        let report = organize(dir.path(), &config).unwrap();
        assert!(report.male_mapping.is_empty());
        assert!(report.female_mapping.is_empty());
        assert_eq!(report.male_names, ["Tom Hale"]);
        let faces = config.faces_path(dir.path());
        assert!(faces.join("male").is_dir());
        assert!(faces.join("female").is_dir());
        assert!(dir.path().join(REPORT_FILE).exists());
    }

    #[test]
    fn test_organize_requires_people_json() {
        let dir = tempfile::tempdir().unwrap();
        let err = organize(dir.path(), &SlackKitConfig::default()).unwrap_err();
        assert!(err.to_string().contains("slackkit generate"));
    }
}
