use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::commands::avatars::{self, FaceLibrary, ResolvedAvatar};
use crate::commands::chat_manifest;
use crate::commands::config::SlackKitConfig;
use crate::commands::context::{
    self, Channel, ChannelSets, CommunicationStyle, ContextDocument, ContextLoad, Employee,
    FileTemplate, Gender, GroupDm, RoleProfile,
};
use crate::error::Result;
use crate::templates;
use crate::util::{company_initials, initials, stable_hash};

pub const COMPANY_FILE: &str = "company.json";
pub const PEOPLE_FILE: &str = "people.json";
pub const CHANNEL_CONFIG_FILE: &str = "channel-config.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelType {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub examples: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamingConventions {
    pub engineering: String,
    pub product: String,
    pub operations: String,
    pub general: String,
}

impl Default for NamingConventions {
    fn default() -> Self {
        Self {
            engineering: "Lowercase with hyphens".into(),
            product: "Lowercase with hyphens".into(),
            operations: "Lowercase with hyphens".into(),
            general: "Lowercase with hyphens or numbers".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelCatalogue {
    pub types: Vec<ChannelType>,
    pub naming_conventions: NamingConventions,
}

/// Contents of `company.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyConfig {
    pub name: String,
    pub logo: Option<String>,
    pub logo_initials: String,
    pub description: String,
    pub industry: String,
    pub company_size: String,
    pub channels: ChannelCatalogue,
    pub roles: Vec<RoleProfile>,
    pub topics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_style: Option<CommunicationStyle>,
    pub file_templates: Vec<FileTemplate>,
}

/// One entry of `people.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    pub avatar: Option<String>,
    pub initials: String,
    pub gender: Gender,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub me: bool,
    #[serde(rename = "emoji-heavy", default, skip_serializing_if = "std::ops::Not::not")]
    pub emoji_heavy: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub verbose: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub who: String,
    pub text: String,
}

/// Seed content for a channel: pinned announcements for `#general`, short lines elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageTheme {
    Announcements(Vec<Announcement>),
    Lines(Vec<String>),
}

/// Contents of `channel-config.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfig {
    pub starred: Vec<Channel>,
    pub public: Vec<Channel>,
    pub private: Vec<Channel>,
    pub message_themes: BTreeMap<String, MessageTheme>,
    #[serde(rename = "groupDMs")]
    pub group_dms: Vec<GroupDm>,
}

fn examples_where(public: &[Channel], keep: impl Fn(&str) -> bool) -> Vec<String> {
    public
        .iter()
        .filter(|c| keep(&c.id))
        .map(|c| format!("#{}", c.id))
        .collect()
}

fn channel_catalogue(channels: &ChannelSets) -> ChannelCatalogue {
    let public = &channels.public;
    ChannelCatalogue {
        types: vec![
            ChannelType {
                kind: "engineering".into(),
                description: "Technical discussions, code reviews, architecture decisions".into(),
                examples: examples_where(public, |id| {
                    ["eng", "dev", "backend", "frontend"].iter().any(|k| id.contains(k))
                }),
            },
            ChannelType {
                kind: "operations".into(),
                description: "Incident management, on-call rotations, infrastructure updates".into(),
                examples: examples_where(public, |id| {
                    ["ops", "incident", "alert"].iter().any(|k| id.contains(k))
                }),
            },
            ChannelType {
                kind: "cross-functional".into(),
                description: "Company-wide announcements, team updates, cross-team collaboration".into(),
                examples: examples_where(public, |id| id == "general" || id.contains("announce")),
            },
        ],
        naming_conventions: NamingConventions::default(),
    }
}

pub fn build_company(doc: &ContextDocument) -> CompanyConfig {
    let company = &doc.company;
    let logo = company
        .logo
        .as_ref()
        .filter(|logo| !logo.contains("your-logo") && !logo.contains("atlassian"))
        .cloned();

    CompanyConfig {
        name: company.name.clone(),
        logo,
        logo_initials: company_initials(&company.name),
        description: company.description.clone(),
        industry: company.industry.clone(),
        company_size: company.company_size.clone(),
        channels: channel_catalogue(&doc.channels),
        roles: doc.roles.clone(),
        topics: doc
            .channels
            .public
            .iter()
            .flat_map(|c| c.topics.iter().cloned())
            .collect(),
        communication_style: doc.communication_style.clone(),
        file_templates: doc.file_templates.clone(),
    }
}

pub fn build_people(employees: &[Employee], avatars: &[ResolvedAvatar]) -> Vec<PersonRecord> {
    employees
        .iter()
        .zip(avatars)
        .map(|(emp, resolved)| PersonRecord {
            name: emp.name.clone(),
            avatar: resolved.avatar.clone(),
            initials: initials(&emp.name),
            gender: emp.gender,
            country: emp.country.clone(),
            role: emp.role.clone(),
            me: emp.me,
            emoji_heavy: emp.emoji_heavy,
            verbose: emp.verbose,
        })
        .collect()
}

fn has_role(emp: &Employee, needles: &[&str]) -> bool {
    emp.role
        .as_deref()
        .is_some_and(|role| needles.iter().any(|n| role.contains(n)))
}

/// First employee whose role contains one of `needles`, else the employee at
/// `fallback_index`, else `default`.
fn announcer(employees: &[Employee], needles: &[&str], fallback_index: usize, default: &str) -> String {
    employees
        .iter()
        .find(|e| has_role(e, needles))
        .or_else(|| employees.get(fallback_index))
        .map(|e| e.name.clone())
        .unwrap_or_else(|| default.to_string())
}

fn general_announcements(doc: &ContextDocument, rng: &mut StdRng) -> Vec<Announcement> {
    let employees = &doc.employees;
    let company = &doc.company;
    let desc = company.description.to_lowercase();
    let industry = company.industry.to_lowercase();
    let size = company.company_size.to_lowercase();

    let mut announcements = vec![Announcement {
        who: announcer(employees, &["Manager", "Lead"], 0, "Team Lead"),
        text: templates::welcome_announcement(&company.name),
    }];

    let industry_post = if ["social", "content", "media"].iter().any(|k| desc.contains(k)) {
        Announcement {
            who: announcer(employees, &["Product", "Marketing"], 1, "Product Manager"),
            text: templates::platform_announcement().to_string(),
        }
    } else if ["ecommerce", "retail", "shop"].iter().any(|k| desc.contains(k)) {
        Announcement {
            who: announcer(employees, &["Operations", "Manager"], 1, "Operations Manager"),
            text: templates::operations_announcement().to_string(),
        }
    } else if industry.contains("health") || industry.contains("medical") {
        Announcement {
            who: announcer(employees, &["Clinical", "Operations"], 1, "Operations Lead"),
            text: templates::healthcare_announcement().to_string(),
        }
    } else {
        Announcement {
            who: announcer(employees, &["Engineering", "Product"], 1, "Engineering Lead"),
            text: templates::roadmap_announcement().to_string(),
        }
    };
    announcements.push(industry_post);

    if size.contains("growing") || size.contains("expanding") {
        let who = employees
            .iter()
            .find(|e| e.me || has_role(e, &["People", "HR"]))
            .or_else(|| employees.first())
            .map(|e| e.name.clone())
            .unwrap_or_else(|| "Team Lead".to_string());
        announcements.push(Announcement {
            who,
            text: templates::new_hires_announcement(
                rng.gen_range(2..7),
                rng.gen_range(1..4),
                rng.gen_range(1..4),
            ),
        });
    }
    announcements
}

const DEFAULT_TOPICS: &[&str] = &["updates", "discussions", "coordination"];

fn channel_lines(channel: &Channel, rng: &mut StdRng) -> Vec<String> {
    let id = channel.id.as_str();
    if id.contains("content") || id.contains("social") {
        vec![
            format!("Content moderation update: {} items reviewed today", rng.gen_range(10..60)),
            "New feature release: Enhanced content discovery algorithm deployed".to_string(),
            format!("User engagement metrics: {}% increase this week", rng.gen_range(5..35)),
            "Platform performance: All systems operational, response times within targets".to_string(),
        ]
    } else if id.contains("operations") {
        vec![
            "Daily operations update: All systems running smoothly".to_string(),
            "Inventory status: Stock levels healthy, no issues reported".to_string(),
            format!(
                "Customer service: Response times improved, {} tickets resolved today",
                rng.gen_range(5..25)
            ),
            format!("Fulfillment update: Shipping on schedule, {} orders processed", rng.gen_range(50..150)),
        ]
    } else if id.contains("engineering") || id.contains("dev") {
        vec![
            format!("Code review needed for PR #{}", rng.gen_range(1000..6000)),
            format!(
                "Deployment completed successfully: v{}.{}.{}",
                rng.gen_range(1..6),
                rng.gen_range(0..10),
                rng.gen_range(0..10)
            ),
            format!("Architecture discussion: {} improvements", channel.name.replacen('#', "", 1)),
            format!("Performance optimization: Reduced latency by {}%", rng.gen_range(10..40)),
        ]
    } else {
        let topics: Vec<&str> = if channel.topics.is_empty() {
            DEFAULT_TOPICS.to_vec()
        } else {
            channel.topics.iter().map(String::as_str).collect()
        };
        let first = topics[0];
        let pick = |i: usize| topics.get(i).copied().unwrap_or(first);
        vec![
            format!("Update on {first}"),
            format!("Discussion about {}", pick(1)),
            format!("Status update: {} progress", pick(2)),
            format!("New information regarding {first}"),
        ]
    }
}

/// Seeded from the company name so regeneration is byte-identical.
pub fn theme_rng(company_name: &str) -> StdRng {
    StdRng::seed_from_u64(stable_hash(company_name))
}

pub fn message_themes(doc: &ContextDocument) -> BTreeMap<String, MessageTheme> {
    let mut rng = theme_rng(&doc.company.name);
    let mut themes = BTreeMap::new();
    for channel in doc.channels.all() {
        let theme = if channel.id == "general" {
            MessageTheme::Announcements(general_announcements(doc, &mut rng))
        } else {
            MessageTheme::Lines(channel_lines(channel, &mut rng))
        };
        themes.insert(channel.id.clone(), theme);
    }
    themes
}

pub fn build_channel_config(doc: &ContextDocument) -> ChannelConfig {
    ChannelConfig {
        starred: doc.channels.starred.clone(),
        public: doc.channels.public.clone(),
        private: doc.channels.private.clone(),
        message_themes: message_themes(doc),
        group_dms: doc.group_dms.clone(),
    }
}

/// Writes `value` as 2-space pretty JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    tracing::info!("Generated {}", path.display());
    Ok(())
}

/// Summary of a `generate` run.
#[derive(Debug)]
pub enum GenerateOutcome {
    Generated {
        output_dir: PathBuf,
        people: usize,
        with_avatar: usize,
        channels: usize,
    },
    /// No context existed; the example was copied in and nothing was generated.
    Seeded(PathBuf),
}

/// Emits every config file from an in-memory context.
pub fn emit(doc: &ContextDocument, root: &Path, config: &SlackKitConfig) -> Result<GenerateOutcome> {
    let output_dir = config.output_path(root);
    let library = FaceLibrary::scan(&config.faces_path(root))?;
    tracing::info!("Found {} face images in {}", library.len(), config.faces_dir);

    let resolved = avatars::resolve_avatars(&doc.employees, &library, root);
    let people = build_people(&doc.employees, &resolved);
    let channel_config = build_channel_config(doc);

    write_json(&output_dir.join(COMPANY_FILE), &build_company(doc))?;
    write_json(&output_dir.join(PEOPLE_FILE), &people)?;
    write_json(&output_dir.join(CHANNEL_CONFIG_FILE), &channel_config)?;

    let manifest = chat_manifest::build(doc);
    chat_manifest::write(&output_dir, &manifest)?;

    Ok(GenerateOutcome::Generated {
        output_dir,
        people: people.len(),
        with_avatar: people.iter().filter(|p| p.avatar.is_some()).count(),
        channels: doc.channels.len(),
    })
}

/// Loads `company-context.json` from `root` (seeding it when absent) and emits the configs.
pub fn generate(root: &Path, config: &SlackKitConfig) -> Result<GenerateOutcome> {
    match context::load_or_seed(root)? {
        ContextLoad::Seeded(path) => Ok(GenerateOutcome::Seeded(path)),
        ContextLoad::Loaded(doc) => emit(&doc, root, config),
    }
}
