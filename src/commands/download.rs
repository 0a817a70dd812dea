use futures_util::StreamExt;
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::commands::config::SlackKitConfig;
use crate::commands::context::{ContextDocument, Gender};
use crate::error::{GeneratorError, Result};
use crate::templates::names::GENERIC_AVATAR_PEOPLE;
use crate::util::{initials, slugify, stable_hash};

const MALE_PALETTE: &[&str] = &["3B82F6", "10B981", "F59E0B", "EF4444", "8B5CF6", "EC4899", "06B6D4"];
const FEMALE_PALETTE: &[&str] = &["EC4899", "F472B6", "A855F7", "8B5CF6", "6366F1", "3B82F6", "06B6D4"];
const NEUTRAL_PALETTE: &[&str] = &["6B7280", "9CA3AF", "D1D5DB", "4B5563", "374151"];

fn palette(gender: Gender) -> &'static [&'static str] {
    match gender {
        Gender::Male => MALE_PALETTE,
        Gender::Female => FEMALE_PALETTE,
        Gender::Neutral => NEUTRAL_PALETTE,
    }
}

/// `h = c + (h << 5) - h` over UTF-16 units, where the shift wraps at 32 bits
/// but the running value does not. Matches the colours the web app picks.
pub fn name_hash(name: &str) -> i64 {
    name.encode_utf16().fold(0i64, |hash, unit| {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        i64::from(unit) + shifted - hash
    })
}

pub fn background_color(name: &str, gender: Gender) -> &'static str {
    let colors = palette(gender);
    colors[(name_hash(name).unsigned_abs() % colors.len() as u64) as usize]
}

pub fn avatar_url(service: &str, name: &str, gender: Gender) -> Result<Url> {
    let initials = initials(name);
    Url::parse_with_params(
        service,
        &[
            ("name", initials.as_str()),
            ("background", background_color(name, gender)),
            ("color", "FFFFFF"),
            ("size", "256"),
            ("bold", "true"),
            ("format", "png"),
        ],
    )
    .map_err(|e| GeneratorError::Custom(format!("Invalid avatar service URL {service}: {e}")))
}

/// `<slug>.png`, or a hash of the name when the slug has no letters or digits.
pub fn avatar_file_name(name: &str) -> String {
    let slug = slugify(name);
    if slug.chars().any(char::is_alphanumeric) {
        format!("{slug}.png")
    } else {
        format!("avatar-{:016x}.png", stable_hash(name))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl DownloadSummary {
    fn absorb(&mut self, other: DownloadSummary) {
        self.downloaded += other.downloaded;
        self.skipped += other.skipped;
        self.errors += other.errors;
    }
}

/// Sequential downloader for initials avatars.
pub struct AvatarDownloader {
    client: reqwest::Client,
    service: String,
    faces_dir: PathBuf,
    delay: Duration,
    retry_delay: Duration,
}

impl AvatarDownloader {
    pub fn new(root: &Path, config: &SlackKitConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            service: config.avatar_service_url.clone(),
            faces_dir: config.faces_path(root),
            delay: config.download_delay(),
            retry_delay: config.retry_delay(),
        })
    }

    pub fn faces_dir(&self) -> &Path {
        &self.faces_dir
    }

    async fn fetch(&self, url: &Url, target: &Path) -> Result<()> {
        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(GeneratorError::Custom(format!(
                "Failed to download: HTTP {} from {url}",
                response.status()
            )));
        }

        let mut stream = response.bytes_stream();
        let mut file = tokio::fs::File::create(target).await?;
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;
        Ok(())
    }

    /// One attempt plus a single retry. Partial files are removed after each failure.
    async fn fetch_with_retry(&self, name: &str, gender: Gender, target: &Path) -> Result<()> {
        let url = avatar_url(&self.service, name, gender)?;
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.fetch(&url, target).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    let _ = tokio::fs::remove_file(target).await;
                    if attempt >= 2 {
                        return Err(e);
                    }
                    tracing::warn!("Avatar for {name} failed ({e}), retrying in {:?}", self.retry_delay);
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }

    /// Downloads one avatar per person, skipping files already on disk.
    /// `on_item` is called after each person with (index, total, name).
    pub async fn download_people<F>(&self, people: &[(String, Gender)], mut on_item: F) -> Result<DownloadSummary>
    where
        F: FnMut(usize, usize, &str),
    {
        tokio::fs::create_dir_all(&self.faces_dir).await?;
        let mut summary = DownloadSummary::default();

        for (i, (name, gender)) in people.iter().enumerate() {
            let target = self.faces_dir.join(avatar_file_name(name));
            if tokio::fs::try_exists(&target).await.unwrap_or(false) {
                tracing::info!("Skipped {name} (already exists)");
                summary.skipped += 1;
            } else {
                match self.fetch_with_retry(name, *gender, &target).await {
                    Ok(()) => {
                        tracing::info!("Downloaded avatar for {name}");
                        summary.downloaded += 1;
                        tokio::time::sleep(self.delay).await;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to download avatar for {name}: {e}");
                        summary.errors += 1;
                    }
                }
            }
            on_item(i + 1, people.len(), name);
        }
        Ok(summary)
    }

    /// Employees first, then the fixed fallback people.
    pub async fn download_for_context<F>(&self, doc: &ContextDocument, mut on_item: F) -> Result<DownloadSummary>
    where
        F: FnMut(usize, usize, &str),
    {
        let employees: Vec<(String, Gender)> = doc
            .employees
            .iter()
            .map(|e| (e.name.clone(), e.gender))
            .collect();
        let generic: Vec<(String, Gender)> = GENERIC_AVATAR_PEOPLE
            .iter()
            .map(|(name, gender)| (name.to_string(), *gender))
            .collect();
        let total = employees.len() + generic.len();

        tracing::info!("Downloading avatars for {} employees", employees.len());
        let mut summary = self
            .download_people(&employees, |i, _, name| on_item(i, total, name))
            .await?;

        let offset = employees.len();
        tracing::info!("Downloading generic fallback avatars");
        let generic_summary = self
            .download_people(&generic, |i, _, name| on_item(offset + i, total, name))
            .await?;
        summary.absorb(generic_summary);

        tracing::info!(
            downloaded = summary.downloaded,
            skipped = summary.skipped,
            errors = summary.errors,
            "Avatar download complete, saved to {}",
            self.faces_dir.display()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_hash_matches_web_colours() {
        assert_eq!(name_hash(""), 0);
        assert_eq!(name_hash("A"), 65);
        assert_eq!(name_hash("AB"), 66 + (65 << 5) - 65);
        assert_eq!(background_color("A", Gender::Neutral), NEUTRAL_PALETTE[0]);
        assert_eq!(background_color("A", Gender::Male), MALE_PALETTE[65 % 7]);
    }

    #[test]
    fn test_name_hash_handles_long_names() {
        let hash = name_hash("Maximilian Alexander Oppenheimer-Vanderbilt");
        let color = background_color("Maximilian Alexander Oppenheimer-Vanderbilt", Gender::Female);
        assert!(FEMALE_PALETTE.contains(&color));
        assert_eq!(hash, name_hash("Maximilian Alexander Oppenheimer-Vanderbilt"));
    }

    #[test]
    fn test_avatar_url_parameters() {
        let url = avatar_url("https://ui-avatars.com/api/", "Priya Patel", Gender::Female).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("name".into(), "PP".into()));
        assert_eq!(pairs[1].0, "background");
        assert!(FEMALE_PALETTE.contains(&pairs[1].1.as_str()));
        assert_eq!(pairs[5], ("format".into(), "png".into()));
        assert!(url.as_str().starts_with("https://ui-avatars.com/api/?name=PP"));
    }

    #[test]
    fn test_avatar_file_name() {
        assert_eq!(avatar_file_name("Priya Patel"), "priya-patel.png");
    }

    #[test]
    fn test_avatar_file_name_without_slug_characters() {
        let first = avatar_file_name("李 明");
        let second = avatar_file_name("王 芳");
        assert!(first.starts_with("avatar-") && first.ends_with(".png"));
        assert_ne!(first, second);
        assert_eq!(first, avatar_file_name("李 明"));
    }

    #[tokio::test]
    async fn test_existing_files_are_skipped_without_requests() {
        let dir = tempfile::tempdir().unwrap();
        let config = SlackKitConfig {
            avatar_service_url: "http://127.0.0.1:9/".into(),
            ..SlackKitConfig::default()
        };
        let downloader = AvatarDownloader::new(dir.path(), &config).unwrap();
        std::fs::create_dir_all(downloader.faces_dir()).unwrap();
        let people = vec![
            ("Priya Patel".to_string(), Gender::Female),
            ("Kenji Tanaka".to_string(), Gender::Male),
        ];
        for (name, _) in &people {
            std::fs::write(downloader.faces_dir().join(avatar_file_name(name)), b"png").unwrap();
        }

        let mut seen = Vec::new();
        let summary = downloader
            .download_people(&people, |i, total, name| seen.push((i, total, name.to_string())))
            .await
            .unwrap();
        assert_eq!(summary, DownloadSummary { downloaded: 0, skipped: 2, errors: 0 });
        assert_eq!(seen.last(), Some(&(2, 2, "Kenji Tanaka".to_string())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_service_counts_errors_after_retry() {
        let dir = tempfile::tempdir().unwrap();
        let config = SlackKitConfig {
            avatar_service_url: "http://127.0.0.1:9/".into(),
            ..SlackKitConfig::default()
        };
        let downloader = AvatarDownloader::new(dir.path(), &config).unwrap();
        let people = vec![("Ada Byron".to_string(), Gender::Female)];
        let summary = downloader.download_people(&people, |_, _, _| {}).await.unwrap();
        assert_eq!(summary.errors, 1);
        assert!(!downloader.faces_dir().join("ada-byron.png").exists());
    }
}
