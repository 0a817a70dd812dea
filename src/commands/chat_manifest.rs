use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::commands::context::ContextDocument;
use crate::commands::emit::write_json;
use crate::error::{GeneratorError, Result};
use crate::util::{slugify, stable_hash};

pub const MANIFEST_FILE: &str = "chat-lists.json";
pub const SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_ASSISTANT_NAME: &str = "Rovo";
const FALLBACK_CHAT_ID: &str = "general";
const RETIRED_DEFAULT_CHAT_ID: &str = "itom-4412";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Starred,
    Dm,
    Channel,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    /// Person whose avatar the UI shows for this DM.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_of: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantRef {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatManifest {
    pub schema_version: u32,
    pub default_chat_id: String,
    pub ai_assistant: AssistantRef,
    pub starred: Vec<ChatItem>,
    pub dms: Vec<ChatItem>,
    pub channels: Vec<ChatItem>,
    pub unread_channel_ids: Vec<String>,
}

fn default_chat_id(doc: &ContextDocument) -> String {
    match doc.channels.starred.first() {
        Some(first) if first.id != RETIRED_DEFAULT_CHAT_ID => first.id.clone(),
        _ => FALLBACK_CHAT_ID.to_string(),
    }
}

/// Presence is pseudo-random but seeded, so the manifest is stable across runs.
fn presence_rng(company_name: &str) -> StdRng {
    StdRng::seed_from_u64(stable_hash(&format!("{company_name}/presence")))
}

pub fn build(doc: &ContextDocument) -> ChatManifest {
    let assistant_name = doc
        .ai_assistant()
        .map(|e| e.name.clone())
        .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string());
    let assistant = AssistantRef {
        id: slugify(&assistant_name),
        name: assistant_name,
    };

    let starred: Vec<ChatItem> = doc
        .channels
        .starred
        .iter()
        .map(|ch| ChatItem {
            id: ch.id.clone(),
            name: ch.name.clone(),
            kind: ChatKind::Starred,
            is_private: Some(ch.is_private.unwrap_or(false)),
            avatar_of: None,
            is_online: None,
        })
        .collect();

    let mut rng = presence_rng(&doc.company.name);
    let mut dms = vec![ChatItem {
        id: assistant.id.clone(),
        name: assistant.name.clone(),
        kind: ChatKind::Dm,
        is_private: None,
        avatar_of: Some(assistant.name.clone()),
        is_online: Some(true),
    }];
    dms.extend(doc.group_dms.iter().map(|group| ChatItem {
        id: group.id.clone(),
        name: group.name.clone(),
        kind: ChatKind::Dm,
        is_private: None,
        avatar_of: None,
        is_online: None,
    }));
    let direct: Vec<ChatItem> = doc
        .employees
        .iter()
        .filter(|e| !e.me && e.name != assistant.name)
        .map(|e| ChatItem {
            id: slugify(&e.name),
            name: e.name.clone(),
            kind: ChatKind::Dm,
            is_private: None,
            avatar_of: Some(e.name.clone()),
            is_online: Some(rng.gen_bool(0.5)),
        })
        .collect();

    let starred_ids: HashSet<&str> = doc.channels.starred.iter().map(|c| c.id.as_str()).collect();
    let channels: Vec<ChatItem> = doc
        .channels
        .public
        .iter()
        .map(|ch| (ch, false))
        .chain(doc.channels.private.iter().map(|ch| (ch, true)))
        .filter(|(ch, _)| !starred_ids.contains(ch.id.as_str()))
        .map(|(ch, is_private)| ChatItem {
            id: ch.id.clone(),
            name: ch.name.clone(),
            kind: ChatKind::Channel,
            is_private: Some(is_private),
            avatar_of: None,
            is_online: None,
        })
        .collect();

    let unread_channel_ids = doc
        .channels
        .all()
        .map(|c| c.id.clone())
        .chain(std::iter::once(assistant.id.clone()))
        .chain(doc.group_dms.iter().map(|g| g.id.clone()))
        .chain(direct.iter().map(|d| d.id.clone()))
        .collect();

    dms.extend(direct);

    ChatManifest {
        schema_version: SCHEMA_VERSION,
        default_chat_id: default_chat_id(doc),
        ai_assistant: assistant,
        starred,
        dms,
        channels,
        unread_channel_ids,
    }
}

pub fn write(output_dir: &Path, manifest: &ChatManifest) -> Result<()> {
    write_json(&output_dir.join(MANIFEST_FILE), manifest)
}

/// Reads a manifest back, rejecting unknown schema versions.
pub fn read_manifest(path: &Path) -> Result<ChatManifest> {
    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let version = value.get("schemaVersion").and_then(|v| v.as_u64());
    if version != Some(u64::from(SCHEMA_VERSION)) {
        return Err(GeneratorError::Custom(format!(
            "{} has schemaVersion {}, expected {SCHEMA_VERSION}",
            path.display(),
            version.map_or_else(|| "missing".to_string(), |v| v.to_string()),
        )));
    }
    Ok(serde_json::from_value(value)?)
}
