//! Avatar resolution against the local faces directory.

use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use crate::commands::context::{Employee, Gender};
use crate::error::Result;
use crate::util::slugify;

/// URL prefix the UI serves faces from.
pub const FACES_URL_PREFIX: &str = "/assets/faces";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];
/// Extensions `organize` sorts into gender folders. No webp.
pub const ORGANIZE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
const PLACEHOLDER_MARKERS: &[&str] = &["your-photo", "member1", "member2", "member3", "rovo-icon"];

fn legacy_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^face-\d+\.(jpg|jpeg|png)$").expect("valid regex"))
}

fn male_legacy_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)face-[136]\.(jpg|jpeg|png)").expect("valid regex"))
}

fn female_legacy_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)face-[2457]\.(jpg|jpeg|png)").expect("valid regex"))
}

pub fn is_image_file(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

pub fn is_legacy_face(name: &str) -> bool {
    legacy_re().is_match(name)
}

fn stem(file: &str) -> String {
    let lower = file.to_lowercase();
    match lower.rsplit_once('.') {
        Some((stem, ext)) if IMAGE_EXTENSIONS.contains(&ext) => stem.to_string(),
        _ => lower,
    }
}

pub fn face_url(file: &str) -> String {
    format!("{FACES_URL_PREFIX}/{file}")
}

/// Snapshot of the faces directory, split into named and legacy files.
#[derive(Clone, Debug, Default)]
pub struct FaceLibrary {
    named: Vec<String>,
    legacy: Vec<String>,
    male_legacy: Vec<String>,
    female_legacy: Vec<String>,
}

impl FaceLibrary {
    /// Builds a library from bare file names; non-image names are ignored.
    pub fn from_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files: Vec<String> = files
            .into_iter()
            .map(Into::into)
            .filter(|f| is_image_file(f))
            .collect();
        files.sort();
        files.dedup();

        let (legacy, named): (Vec<String>, Vec<String>) =
            files.into_iter().partition(|f| is_legacy_face(f));
        let male_legacy = legacy.iter().filter(|f| male_legacy_re().is_match(f)).cloned().collect();
        let female_legacy = legacy.iter().filter(|f| female_legacy_re().is_match(f)).cloned().collect();

        Self {
            named,
            legacy,
            male_legacy,
            female_legacy,
        }
    }

    /// Lists image files in `dir`. A missing directory yields an empty library.
    pub fn scan(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            tracing::debug!("Faces directory {} not found, using initials only", dir.display());
            return Ok(Self::default());
        }
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                files.push(name.to_string());
            }
        }
        Ok(Self::from_files(files))
    }

    pub fn len(&self) -> usize {
        self.named.len() + self.legacy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn named(&self) -> &[String] {
        &self.named
    }

    pub fn legacy(&self) -> &[String] {
        &self.legacy
    }

    fn is_named(&self, file: &str) -> bool {
        self.named.iter().any(|f| f == file)
    }
}

/// Bookkeeping carried across one assignment pass.
#[derive(Clone, Debug, Default)]
pub struct AssignmentState {
    used: HashSet<String>,
    male_index: usize,
    female_index: usize,
}

impl AssignmentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_used(&self, file: &str) -> bool {
        self.used.contains(file)
    }

    fn take(&mut self, file: &str) {
        self.used.insert(file.to_string());
    }
}

/// How an employee ended up with their avatar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AvatarSource {
    Assistant,
    NameMatch,
    Preset,
    Named,
    GenderLegacy,
    AnyLegacy,
    Initials,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAvatar {
    pub avatar: Option<String>,
    pub source: AvatarSource,
}

impl ResolvedAvatar {
    fn new(avatar: Option<String>, source: AvatarSource) -> Self {
        Self { avatar, source }
    }
}

fn is_placeholder(path: &str) -> bool {
    path.trim().is_empty() || PLACEHOLDER_MARKERS.iter().any(|m| path.contains(m))
}

fn contradicts_gender(path: &str, gender: Gender) -> bool {
    match gender {
        Gender::Male => female_legacy_re().is_match(path),
        Gender::Female => male_legacy_re().is_match(path),
        Gender::Neutral => false,
    }
}

/// Absolute avatar paths are served from `<root>/public`, relative ones from `<root>`.
fn preset_exists(root: &Path, path: &str) -> bool {
    let on_disk = match path.strip_prefix('/') {
        Some(rest) => root.join("public").join(rest),
        None => root.join(path),
    };
    on_disk.is_file()
}

/// Picks the avatar for one employee and updates `state`.
pub fn resolve_avatar(
    employee: &Employee,
    library: &FaceLibrary,
    state: &mut AssignmentState,
    root: &Path,
) -> ResolvedAvatar {
    if employee.is_ai_assistant() {
        return ResolvedAvatar::new(None, AvatarSource::Assistant);
    }

    let slug = slugify(&employee.name);
    if let Some(file) = library
        .named
        .iter()
        .find(|f| !state.is_used(f) && stem(f) == slug)
    {
        state.take(file);
        return ResolvedAvatar::new(Some(face_url(file)), AvatarSource::NameMatch);
    }

    if let Some(preset) = employee.avatar.as_deref() {
        if !is_placeholder(preset)
            && !contradicts_gender(preset, employee.gender)
            && preset_exists(root, preset)
        {
            let file = preset.rsplit('/').next().unwrap_or(preset);
            if !library.is_named(file) {
                return ResolvedAvatar::new(Some(preset.to_string()), AvatarSource::Preset);
            }
            if !state.is_used(file) {
                state.take(file);
                return ResolvedAvatar::new(Some(preset.to_string()), AvatarSource::Preset);
            }
        }
    }

    if let Some(file) = library.named.iter().find(|f| !state.is_used(f)) {
        state.take(file);
        return ResolvedAvatar::new(Some(face_url(file)), AvatarSource::Named);
    }

    match employee.gender {
        Gender::Male if !library.male_legacy.is_empty() => {
            let file = &library.male_legacy[state.male_index % library.male_legacy.len()];
            state.male_index += 1;
            return ResolvedAvatar::new(Some(face_url(file)), AvatarSource::GenderLegacy);
        }
        Gender::Female if !library.female_legacy.is_empty() => {
            let file = &library.female_legacy[state.female_index % library.female_legacy.len()];
            state.female_index += 1;
            return ResolvedAvatar::new(Some(face_url(file)), AvatarSource::GenderLegacy);
        }
        _ => {}
    }

    if !library.legacy.is_empty() {
        let index = (state.male_index + state.female_index) % library.legacy.len();
        state.male_index += 1;
        return ResolvedAvatar::new(Some(face_url(&library.legacy[index])), AvatarSource::AnyLegacy);
    }

    ResolvedAvatar::new(None, AvatarSource::Initials)
}

/// Resolves every employee in order with a fresh state.
pub fn resolve_avatars(employees: &[Employee], library: &FaceLibrary, root: &Path) -> Vec<ResolvedAvatar> {
    let mut state = AssignmentState::new();
    employees
        .iter()
        .map(|emp| {
            let resolved = resolve_avatar(emp, library, &mut state, root);
            match &resolved.avatar {
                Some(path) => tracing::info!("Assigned {path} ({:?}) to {}", resolved.source, emp.name),
                None => tracing::info!("Using initials for {}", emp.name),
            }
            resolved
        })
        .collect()
}

const FEMALE_FACE_KEYWORDS: &[&str] = &[
    "alice", "carol", "eve", "priya", "sarah", "emma", "lisa", "hannah", "mia", "ananya",
    "deepika", "amanda", "ashley", "casey",
];
const MALE_FACE_KEYWORDS: &[&str] = &[
    "james", "bob", "david", "chris", "jordan", "felix", "alexander", "paul", "mike", "arjun",
    "amit",
];

/// Guesses a face's gender from its file name. Female hints are checked first.
pub fn classify_face(file_name: &str) -> Option<Gender> {
    let lower = file_name.to_lowercase();
    if lower.contains("female")
        || female_legacy_re().is_match(&lower)
        || FEMALE_FACE_KEYWORDS.iter().any(|k| lower.contains(k))
    {
        return Some(Gender::Female);
    }
    if lower.contains("male")
        || male_legacy_re().is_match(&lower)
        || MALE_FACE_KEYWORDS.iter().any(|k| lower.contains(k))
        || (lower.contains("alex") && !lower.contains("alexandra"))
        || (lower.contains("avery") && !lower.contains("ashley"))
    {
        return Some(Gender::Male);
    }
    None
}
