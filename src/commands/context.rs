use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GeneratorError, Result};
use crate::templates;
use crate::ui::file_embed::FileType;

pub const CONTEXT_FILE: &str = "company-context.json";
pub const EXAMPLE_FILE: &str = "company-context.json.example";

/// Role that always renders with initials and heads the DM list.
pub const AI_ASSISTANT_ROLE: &str = "AI Assistant";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Neutral,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub company_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub gender: Gender,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// `null` in the document means "use initials".
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub me: bool,
    #[serde(rename = "emoji-heavy", default, skip_serializing_if = "is_false")]
    pub emoji_heavy: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub verbose: bool,
}

impl Employee {
    pub fn is_ai_assistant(&self) -> bool {
        self.role.as_deref() == Some(AI_ASSISTANT_ROLE)
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Channel {
    pub fn new(id: &str, description: &str, topics: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: format!("#{id}"),
            is_private: None,
            description: description.to_string(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelSets {
    #[serde(default)]
    pub starred: Vec<Channel>,
    #[serde(default)]
    pub public: Vec<Channel>,
    #[serde(default)]
    pub private: Vec<Channel>,
}

impl ChannelSets {
    /// Starred, public, then private.
    pub fn all(&self) -> impl Iterator<Item = &Channel> {
        self.starred
            .iter()
            .chain(self.public.iter())
            .chain(self.private.iter())
    }

    pub fn len(&self) -> usize {
        self.starred.len() + self.public.len() + self.private.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationStyle {
    pub tone: String,
    pub formality: String,
    #[serde(default)]
    pub common_patterns: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleProfile {
    pub title: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub common_channels: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileTemplate {
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub name: String,
    pub size: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupDm {
    pub id: String,
    pub name: String,
    pub members: Vec<String>,
}

/// The single source of truth for a simulated company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextDocument {
    pub company: Company,
    pub employees: Vec<Employee>,
    pub channels: ChannelSets,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_style: Option<CommunicationStyle>,
    #[serde(default)]
    pub message_themes: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub roles: Vec<RoleProfile>,
    #[serde(default)]
    pub file_templates: Vec<FileTemplate>,
    #[serde(rename = "groupDMs", default)]
    pub group_dms: Vec<GroupDm>,
}

pub const MIN_GROUP_MEMBERS: usize = 2;
pub const MAX_GROUP_MEMBERS: usize = 5;

impl ContextDocument {
    /// Parses and validates a context document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let doc: ContextDocument = serde_json::from_str(raw)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.company.name.trim().is_empty() {
            return Err(GeneratorError::invalid("company.name", "must not be blank"));
        }
        if self.employees.is_empty() {
            return Err(GeneratorError::invalid("employees", "at least one employee is required"));
        }
        for (i, emp) in self.employees.iter().enumerate() {
            let name = emp.name.trim();
            if name.is_empty() {
                return Err(GeneratorError::invalid(
                    format!("employees[{i}].name"),
                    "must not be blank",
                ));
            }
            if name.chars().count() < 2 {
                return Err(GeneratorError::invalid(
                    format!("employees[{i}].name"),
                    "needs at least two characters for initials",
                ));
            }
        }

        for (list, channels) in [
            ("starred", &self.channels.starred),
            ("public", &self.channels.public),
            ("private", &self.channels.private),
        ] {
            let mut seen = HashSet::new();
            for (i, channel) in channels.iter().enumerate() {
                if channel.id.trim().is_empty() {
                    return Err(GeneratorError::invalid(
                        format!("channels.{list}[{i}].id"),
                        "must not be blank",
                    ));
                }
                if !seen.insert(channel.id.as_str()) {
                    return Err(GeneratorError::invalid(
                        format!("channels.{list}[{i}].id"),
                        format!("duplicate channel id '{}'", channel.id),
                    ));
                }
            }
        }

        let names: HashSet<&str> = self.employees.iter().map(|e| e.name.as_str()).collect();
        for (i, group) in self.group_dms.iter().enumerate() {
            let field = format!("groupDMs[{i}]");
            if group.id.trim().is_empty() {
                return Err(GeneratorError::invalid(format!("{field}.id"), "must not be blank"));
            }
            let size = group.members.len();
            if !(MIN_GROUP_MEMBERS..=MAX_GROUP_MEMBERS).contains(&size) {
                return Err(GeneratorError::invalid(
                    format!("{field}.members"),
                    format!("expected {MIN_GROUP_MEMBERS}-{MAX_GROUP_MEMBERS} members, got {size}"),
                ));
            }
            if let Some(unknown) = group.members.iter().find(|m| !names.contains(m.as_str())) {
                return Err(GeneratorError::invalid(
                    format!("{field}.members"),
                    format!("'{unknown}' is not an employee"),
                ));
            }
        }
        Ok(())
    }

    /// The `me` employee, or the first one.
    pub fn current_user(&self) -> Option<&Employee> {
        self.employees
            .iter()
            .find(|e| e.me)
            .or_else(|| self.employees.first())
    }

    pub fn ai_assistant(&self) -> Option<&Employee> {
        self.employees.iter().find(|e| e.is_ai_assistant())
    }
}

/// What happened when the context file was looked up.
#[derive(Debug)]
pub enum ContextLoad {
    Loaded(ContextDocument),
    /// The example was copied into place; the user should edit it first.
    Seeded(PathBuf),
}

pub fn context_path(root: &Path) -> PathBuf {
    root.join(CONTEXT_FILE)
}

/// Loads `company-context.json`, seeding it from the example file when missing.
pub fn load_or_seed(root: &Path) -> Result<ContextLoad> {
    let path = context_path(root);
    if !path.exists() {
        let example = root.join(EXAMPLE_FILE);
        if example.exists() {
            fs::copy(&example, &path)?;
            tracing::info!(
                "Created {} from example file. Edit it with your company details, then run generate again.",
                path.display()
            );
            return Ok(ContextLoad::Seeded(path));
        }
        return Err(GeneratorError::ContextMissing(path));
    }
    Ok(ContextLoad::Loaded(load(&path)?))
}

pub fn load(path: &Path) -> Result<ContextDocument> {
    let raw = fs::read_to_string(path)?;
    ContextDocument::from_json(&raw)
}

pub fn save(path: &Path, doc: &ContextDocument) -> Result<()> {
    doc.validate()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, doc.to_json()?)?;
    Ok(())
}

/// Writes the built-in example next to where the context is expected.
/// Returns `false` when an example already exists.
pub fn write_example(root: &Path) -> Result<bool> {
    let path = root.join(EXAMPLE_FILE);
    if path.exists() {
        return Ok(false);
    }
    fs::create_dir_all(root)?;
    fs::write(&path, templates::example_context())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> ContextDocument {
        ContextDocument::from_json(templates::example_context()).unwrap()
    }

    #[test]
    fn test_example_context_is_valid() {
        let doc = example();
        assert!(doc.current_user().unwrap().me);
        assert!(doc.ai_assistant().is_some());
        assert!(doc.channels.public.iter().any(|c| c.id == "general"));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let err = ContextDocument::from_json(r#"{"company": {"name": "Acme"}, "channels": {}}"#)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Json(_)));
        assert!(err.to_string().contains("employees"));
    }

    #[test]
    fn test_blank_company_name_is_rejected() {
        let mut doc = example();
        doc.company.name = "  ".into();
        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("company.name"));
    }

    #[test]
    fn test_single_character_employee_name_is_rejected() {
        let mut doc = example();
        doc.employees[0].name = " X ".into();
        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("employees[0].name"));

        doc.employees[0].name = "Xi".into();
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_duplicate_channel_id_within_list_is_rejected() {
        let mut doc = example();
        let dup = doc.channels.public[0].clone();
        doc.channels.public.push(dup);
        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate channel id"));
    }

    #[test]
    fn test_same_id_across_lists_is_allowed() {
        let mut doc = example();
        let starred = doc.channels.public[0].clone();
        doc.channels.starred.push(starred);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_group_dm_bounds_and_membership() {
        let mut doc = example();
        let first = doc.employees[0].name.clone();
        doc.group_dms = vec![GroupDm {
            id: "group-1".into(),
            name: "solo".into(),
            members: vec![first.clone()],
        }];
        assert!(doc.validate().unwrap_err().to_string().contains("2-5 members"));

        doc.group_dms[0].members = vec![first, "Nobody Here".into()];
        assert!(doc.validate().unwrap_err().to_string().contains("not an employee"));
    }

    #[test]
    fn test_optional_flags_round_trip_as_absent() {
        let doc = example();
        let json = doc.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let second = &value["employees"][1];
        assert!(second.get("me").is_none());
        assert_eq!(ContextDocument::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn test_load_or_seed_copies_example() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_or_seed(dir.path()),
            Err(GeneratorError::ContextMissing(_))
        ));

        assert!(write_example(dir.path()).unwrap());
        assert!(!write_example(dir.path()).unwrap());
        match load_or_seed(dir.path()).unwrap() {
            ContextLoad::Seeded(path) => assert!(path.exists()),
            other => panic!("expected seeded, got {other:?}"),
        }
        assert!(matches!(
            load_or_seed(dir.path()).unwrap(),
            ContextLoad::Loaded(_)
        ));
    }
}
