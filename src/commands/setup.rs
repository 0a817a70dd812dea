use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::mpsc;

use crate::commands::config::SlackKitConfig;
use crate::commands::context::{
    self, Company, ContextDocument, Employee, Gender, GroupDm, RoleProfile, AI_ASSISTANT_ROLE,
};
use crate::commands::download::AvatarDownloader;
use crate::commands::emit::{self, GenerateOutcome};
use crate::commands::infer;
use crate::error::{GeneratorError, Result};
use crate::util::capitalize;

/// Progress events streamed while a setup runs.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "event", content = "data")]
pub enum SetupEvent {
    #[serde(rename_all = "camelCase")]
    StepStarted {
        step: String,
        description: String,
        step_index: usize,
        total_steps: usize,
    },
    #[serde(rename_all = "camelCase")]
    StepProgress {
        step: String,
        progress: f64,
        detail: String,
    },
    #[serde(rename_all = "camelCase")]
    StepCompleted { step: String, detail: String },
    #[serde(rename_all = "camelCase")]
    StepWarning { step: String, message: String },
    #[serde(rename_all = "camelCase")]
    Error { step: String, message: String },
    Finished,
}

/// Answers that drive the wizard. Blank answers fall back to the defaults.
#[derive(Clone, Debug)]
pub struct SetupOptions {
    pub company_name: String,
    pub description: String,
    pub industry: String,
    pub company_size: String,
    pub logo: Option<String>,
    pub my_name: String,
    pub my_country: String,
    pub my_gender: Gender,
    pub my_role: String,
    pub nationalities: Vec<String>,
    pub seed: Option<u64>,
    pub force: bool,
    pub skip_download: bool,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            company_name: "Your Company".into(),
            description: "A company".into(),
            industry: "Software Development".into(),
            company_size: "Medium".into(),
            logo: None,
            my_name: "User".into(),
            my_country: "United States".into(),
            my_gender: Gender::Neutral,
            my_role: "Software Engineer".into(),
            nationalities: vec!["United States".into()],
            seed: None,
            force: false,
            skip_download: false,
        }
    }
}

pub const DEFAULT_LOGO: &str = "/assets/atlassian-blue.png";

const MEMBER_ROLES: &[&str] = &[
    "Software Engineer",
    "Product Manager",
    "DevOps Engineer",
    "SRE",
    "Backend Engineer",
    "Frontend Engineer",
    "Engineering Manager",
    "Designer",
];

const ASSISTANT_NAMES: &[&str] = &["Aria", "Nexus", "Astra", "Vex", "Zara", "Kai", "Luna", "Orion"];

/// Lenient gender parsing for wizard answers; anything unrecognised is neutral.
pub fn parse_gender(input: &str) -> Gender {
    match input.trim().to_lowercase().as_str() {
        "male" | "m" => Gender::Male,
        "female" | "f" => Gender::Female,
        _ => Gender::Neutral,
    }
}

pub fn parse_nationalities(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `/assets/faces/<name with whitespace runs as hyphens>.jpg`
fn face_path(name: &str) -> String {
    let stem = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("/assets/faces/{stem}.jpg")
}

pub fn target_member_count(channel_count: usize) -> usize {
    (channel_count * 5 / 2).clamp(8, 20)
}

pub fn assistant_name<R: Rng + ?Sized>(company_name: &str, description: &str, rng: &mut R) -> String {
    let source = format!("{} {}", company_name.to_lowercase(), description.to_lowercase());
    let word = source
        .split_whitespace()
        .find(|w| w.chars().count() > 3)
        .unwrap_or("assistant");
    let base = capitalize(word);

    let mut candidates = vec![format!("{base}AI"), format!("{base}Bot")];
    candidates.extend(ASSISTANT_NAMES.iter().map(|n| n.to_string()));
    let chosen = candidates.choose(rng).cloned().unwrap_or(base);
    format!("{chosen} AI")
}

/// Up to three groups of 3-5 distinct colleagues, excluding the user and the assistant.
pub fn build_group_dms<R: Rng + ?Sized>(employees: &[Employee], rng: &mut R) -> Vec<GroupDm> {
    let pool: Vec<&Employee> = employees
        .iter()
        .filter(|e| !e.me && !e.is_ai_assistant())
        .collect();
    let group_count = (pool.len() / 3).min(3);

    let mut groups = Vec::with_capacity(group_count);
    for i in 0..group_count {
        let size = rng.gen_range(3..=5);
        let members: Vec<&Employee> = pool.choose_multiple(rng, size).copied().collect();
        if members.len() < context::MIN_GROUP_MEMBERS {
            continue;
        }
        groups.push(GroupDm {
            id: format!("group-{}", i + 1),
            name: members
                .iter()
                .map(|m| m.first_name())
                .collect::<Vec<_>>()
                .join(", "),
            members: members.iter().map(|m| m.name.clone()).collect(),
        });
    }
    groups
}

pub fn role_catalogue() -> Vec<RoleProfile> {
    fn role(title: &str, responsibilities: &[&str], channels: &[&str]) -> RoleProfile {
        RoleProfile {
            title: title.into(),
            responsibilities: responsibilities.iter().map(|s| s.to_string()).collect(),
            common_channels: channels.iter().map(|s| s.to_string()).collect(),
        }
    }
    vec![
        role(
            "Software Engineer",
            &["Write and review code", "Design system architecture", "Participate in technical discussions"],
            &["#engineering", "#backend", "#code-review"],
        ),
        role(
            "Product Manager",
            &["Define product roadmap", "Gather user requirements", "Coordinate cross-functional teams"],
            &["#product", "#roadmap", "#feature-requests"],
        ),
        role(
            "Site Reliability Engineer (SRE)",
            &["Monitor system health", "Respond to incidents", "Improve system reliability"],
            &["#incidents", "#oncall", "#monitoring", "#infrastructure"],
        ),
        role(
            "DevOps Engineer",
            &["Manage CI/CD pipelines", "Automate deployments", "Maintain infrastructure"],
            &["#dev-ops", "#infrastructure", "#deployments"],
        ),
    ]
}

/// Builds a complete context document from wizard answers.
pub fn build_context<R: Rng + ?Sized>(opts: &SetupOptions, rng: &mut R) -> ContextDocument {
    let defaults = SetupOptions::default();
    let company_name = or_default(&opts.company_name, &defaults.company_name);
    let description = or_default(&opts.description, &defaults.description);
    let industry = or_default(&opts.industry, &defaults.industry);
    let company_size = or_default(&opts.company_size, &defaults.company_size);
    let my_name = or_default(&opts.my_name, &defaults.my_name);
    let nationalities = if opts.nationalities.is_empty() {
        defaults.nationalities.clone()
    } else {
        opts.nationalities.clone()
    };

    let company = Company {
        domain: Some(format!(
            "{}.com",
            company_name
                .to_lowercase()
                .split_whitespace()
                .collect::<String>()
        )),
        logo: Some(
            opts.logo
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOGO.to_string()),
        ),
        name: company_name.clone(),
        description: description.clone(),
        industry: industry.clone(),
        company_size: company_size.clone(),
    };

    let mut employees = vec![Employee {
        avatar: Some(face_path(&my_name)),
        name: my_name,
        gender: opts.my_gender,
        country: or_default(&opts.my_country, &defaults.my_country),
        role: Some(or_default(&opts.my_role, &defaults.my_role)),
        me: true,
        emoji_heavy: false,
        verbose: false,
    }];

    let channels = infer::infer_channels(&industry, &description, &company_size);
    let target = target_member_count(channels.len());
    let per_nationality = target.div_ceil(nationalities.len());

    let mut member_index = 0;
    for nationality in &nationalities {
        for _ in 0..per_nationality {
            if employees.len() >= target + 1 {
                break;
            }
            let gender = if rng.gen_bool(0.5) { Gender::Male } else { Gender::Female };
            let name = infer::generate_name(rng, nationality, gender);
            let role = MEMBER_ROLES[member_index % MEMBER_ROLES.len()];
            employees.push(Employee {
                avatar: Some(face_path(&name)),
                name,
                gender,
                country: nationality.clone(),
                role: Some(role.to_string()),
                me: false,
                emoji_heavy: rng.gen_bool(0.3),
                verbose: rng.gen_bool(0.2),
            });
            member_index += 1;
        }
    }

    employees.push(Employee {
        name: assistant_name(&company_name, &description, rng),
        gender: Gender::Neutral,
        country: "Global".into(),
        role: Some(AI_ASSISTANT_ROLE.into()),
        avatar: None,
        me: false,
        emoji_heavy: false,
        verbose: false,
    });

    let group_dms = build_group_dms(&employees, rng);

    let message_themes: BTreeMap<String, Vec<String>> = channels
        .all()
        .map(|channel| {
            let topics = infer::infer_channel_topics(&channel.id);
            let third = topics.get(2).unwrap_or(&topics[0]);
            (
                channel.id.clone(),
                vec![
                    format!("Message about {}", topics[0]),
                    format!("Discussion on {}", topics[1]),
                    format!("Update regarding {third}"),
                ],
            )
        })
        .collect();

    ContextDocument {
        communication_style: Some(infer::infer_communication_style(&industry, &company_size, &description)),
        file_templates: infer::infer_file_templates(&industry, &description),
        company,
        employees,
        channels,
        message_themes,
        roles: role_catalogue(),
        group_dms,
    }
}

fn send(on_event: &mpsc::UnboundedSender<SetupEvent>, event: SetupEvent) -> Result<()> {
    on_event
        .send(event)
        .map_err(|e| GeneratorError::Custom(e.to_string()))
}

fn calculate_total_steps(opts: &SetupOptions) -> usize {
    let mut steps = 2; // context + generate always run
    if !opts.skip_download {
        steps += 1;
    }
    steps
}

/// Writes a fresh context, fetches avatars and generates the configs.
/// Avatar download is best effort; the other steps abort the run on failure.
pub async fn run_setup(
    root: &Path,
    config: &SlackKitConfig,
    opts: SetupOptions,
    on_event: mpsc::UnboundedSender<SetupEvent>,
) -> Result<()> {
    let context_path = context::context_path(root);
    let total_steps = calculate_total_steps(&opts);
    let mut step_index: usize = 0;

    // Step 1: company context
    step_index += 1;
    send(
        &on_event,
        SetupEvent::StepStarted {
            step: "context".into(),
            description: "Writing company-context.json".into(),
            step_index,
            total_steps,
        },
    )?;

    if context_path.exists() && !opts.force {
        let message = format!(
            "{} already exists. Pass --force to overwrite it.",
            context_path.display()
        );
        send(&on_event, SetupEvent::Error { step: "context".into(), message: message.clone() })?;
        return Err(GeneratorError::Custom(message));
    }

    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let doc = build_context(&opts, &mut rng);
    if let Err(e) = context::save(&context_path, &doc) {
        send(&on_event, SetupEvent::Error { step: "context".into(), message: e.to_string() })?;
        return Err(e);
    }
    send(
        &on_event,
        SetupEvent::StepCompleted {
            step: "context".into(),
            detail: format!(
                "{} channels and {} people for {}",
                doc.channels.len(),
                doc.employees.len(),
                doc.company.name
            ),
        },
    )?;

    // Step 2: avatars (non-critical)
    if !opts.skip_download {
        step_index += 1;
        send(
            &on_event,
            SetupEvent::StepStarted {
                step: "avatars".into(),
                description: "Downloading avatars".into(),
                step_index,
                total_steps,
            },
        )?;

        let progress_tx = on_event.clone();
        let result = match AvatarDownloader::new(root, config) {
            Ok(downloader) => {
                downloader
                    .download_for_context(&doc, |done, total, name| {
                        let _ = progress_tx.send(SetupEvent::StepProgress {
                            step: "avatars".into(),
                            progress: done as f64 / total.max(1) as f64,
                            detail: format!("{name} ({done}/{total})"),
                        });
                    })
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(summary) if summary.errors == 0 => send(
                &on_event,
                SetupEvent::StepCompleted {
                    step: "avatars".into(),
                    detail: format!(
                        "Downloaded {}, skipped {}",
                        summary.downloaded, summary.skipped
                    ),
                },
            )?,
            Ok(summary) => send(
                &on_event,
                SetupEvent::StepWarning {
                    step: "avatars".into(),
                    message: format!(
                        "{} avatars could not be downloaded. Run `slackkit download-avatars` later.",
                        summary.errors
                    ),
                },
            )?,
            Err(e) => send(
                &on_event,
                SetupEvent::StepWarning {
                    step: "avatars".into(),
                    message: format!("Avatar download failed: {e}. Run `slackkit download-avatars` later."),
                },
            )?,
        }
    }

    // Step 3: generate configs
    step_index += 1;
    send(
        &on_event,
        SetupEvent::StepStarted {
            step: "generate".into(),
            description: "Generating configuration files".into(),
            step_index,
            total_steps,
        },
    )?;
    match emit::emit(&doc, root, config) {
        Ok(GenerateOutcome::Generated { output_dir, people, with_avatar, .. }) => send(
            &on_event,
            SetupEvent::StepCompleted {
                step: "generate".into(),
                detail: format!(
                    "Wrote configs to {} ({with_avatar}/{people} people with avatars)",
                    output_dir.display()
                ),
            },
        )?,
        Ok(GenerateOutcome::Seeded(path)) => send(
            &on_event,
            SetupEvent::StepCompleted {
                step: "generate".into(),
                detail: format!("Seeded {}", path.display()),
            },
        )?,
        Err(e) => {
            send(&on_event, SetupEvent::Error { step: "generate".into(), message: e.to_string() })?;
            return Err(e);
        }
    }

    send(&on_event, SetupEvent::Finished)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn options() -> SetupOptions {
        SetupOptions {
            company_name: "Tidewater Labs".into(),
            description: "Online marketplace for marine parts".into(),
            industry: "Retail".into(),
            company_size: "Small".into(),
            my_name: "Robin Vale".into(),
            nationalities: parse_nationalities("US, India, , Germany"),
            seed: Some(42),
            skip_download: true,
            ..SetupOptions::default()
        }
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_nationalities(" US, India ,,Germany"), ["US", "India", "Germany"]);
        assert_eq!(parse_gender("Female"), Gender::Female);
        assert_eq!(parse_gender("m"), Gender::Male);
        assert_eq!(parse_gender("prefer not"), Gender::Neutral);
    }

    #[test]
    fn test_target_member_count_clamps() {
        assert_eq!(target_member_count(2), 8);
        assert_eq!(target_member_count(5), 12);
        assert_eq!(target_member_count(15), 20);
    }

    #[test]
    fn test_build_context_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let doc = build_context(&options(), &mut rng);
        doc.validate().unwrap();

        assert_eq!(doc.company.domain.as_deref(), Some("tidewaterlabs.com"));
        assert_eq!(doc.company.logo.as_deref(), Some(DEFAULT_LOGO));
        assert_eq!(doc.employees[0].name, "Robin Vale");
        assert!(doc.employees[0].me);
        assert_eq!(doc.employees[0].avatar.as_deref(), Some("/assets/faces/robin-vale.jpg"));

        let target = target_member_count(doc.channels.len());
        assert_eq!(doc.employees.len(), target + 2);
        let assistant = doc.employees.last().unwrap();
        assert!(assistant.is_ai_assistant());
        assert!(assistant.name.ends_with(" AI"));
        assert_eq!(assistant.avatar, None);

        assert!(doc.channels.public.iter().any(|c| c.id == "operations"));
        assert_eq!(doc.message_themes.len(), doc.channels.all().map(|c| &c.id).collect::<HashSet<_>>().len());
        assert_eq!(doc.roles.len(), 4);
        assert_eq!(doc.communication_style.as_ref().unwrap().formality, "Very casual");
    }

    #[test]
    fn test_seed_makes_context_reproducible() {
        let a = build_context(&options(), &mut StdRng::seed_from_u64(7));
        let b = build_context(&options(), &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_group_dms_are_distinct_and_exclude_me() {
        let doc = build_context(&options(), &mut StdRng::seed_from_u64(3));
        assert_eq!(doc.group_dms.len(), 3);
        for (i, group) in doc.group_dms.iter().enumerate() {
            assert_eq!(group.id, format!("group-{}", i + 1));
            assert!((3..=5).contains(&group.members.len()));
            assert!(!group.members.contains(&"Robin Vale".to_string()));
            assert_eq!(group.name.split(", ").count(), group.members.len());
        }
    }

    #[test]
    fn test_assistant_name_skips_short_words() {
        let mut rng = StdRng::seed_from_u64(5);
        let names: HashSet<String> = (0..200)
            .map(|_| assistant_name("Io", "and rockets", &mut rng))
            .collect();
        assert!(names.contains("RocketsAI AI"));
        assert!(!names.iter().any(|n| n.starts_with("Io")));
    }

    #[test]
    fn test_assistant_name_candidates() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let name = assistant_name("Acme", "Rocket sleds", &mut rng);
            let base = name.strip_suffix(" AI").unwrap();
            assert!(
                ["AcmeAI", "AcmeBot"].contains(&base) || ASSISTANT_NAMES.contains(&base),
                "{name}"
            );
        }
    }

    #[tokio::test]
    async fn test_run_setup_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(context::context_path(dir.path()), "{}").unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let err = run_setup(dir.path(), &SlackKitConfig::default(), options(), tx)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert!(matches!(rx.recv().await, Some(SetupEvent::StepStarted { .. })));
        assert!(matches!(rx.recv().await, Some(SetupEvent::Error { .. })));
        assert_eq!(std::fs::read_to_string(context::context_path(dir.path())).unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_run_setup_writes_context_and_configs() {
        let dir = tempfile::tempdir().unwrap();
        let config = SlackKitConfig::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        run_setup(dir.path(), &config, options(), tx).await.unwrap();

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        assert_eq!(events.last(), Some(&SetupEvent::Finished));
        assert!(events.iter().all(|e| !matches!(e, SetupEvent::Error { .. })));
        assert!(matches!(
            &events[0],
            SetupEvent::StepStarted { step_index: 1, total_steps: 2, .. }
        ));

        assert!(context::context_path(dir.path()).exists());
        let output = config.output_path(dir.path());
        for file in [emit::COMPANY_FILE, emit::PEOPLE_FILE, emit::CHANNEL_CONFIG_FILE] {
            assert!(output.join(file).exists(), "{file}");
        }
    }

    #[test]
    fn test_setup_event_wire_format() {
        let event = SetupEvent::StepWarning { step: "avatars".into(), message: "offline".into() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "stepWarning");
        assert_eq!(json["data"]["step"], "avatars");
        assert_eq!(serde_json::to_value(SetupEvent::Finished).unwrap()["event"], "finished");
    }
}
