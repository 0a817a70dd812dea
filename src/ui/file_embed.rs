use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Image,
    Document,
    Spreadsheet,
    Presentation,
    Code,
    Video,
    Audio,
    Archive,
    #[serde(other)]
    Other,
}

impl FileType {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Pdf => "📄",
            Self::Image => "🖼️",
            Self::Document => "📝",
            Self::Spreadsheet => "📊",
            Self::Presentation => "📽️",
            Self::Code => "💻",
            Self::Video => "🎥",
            Self::Audio => "🎵",
            Self::Archive => "📦",
            Self::Other => "📎",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Pdf => "#DC143C",
            Self::Image => "#4CAF50",
            Self::Document => "#2196F3",
            Self::Spreadsheet => "#FF9800",
            Self::Presentation => "#9C27B0",
            Self::Code => "#607D8B",
            Self::Video => "#E91E63",
            Self::Audio => "#00BCD4",
            Self::Archive => "#795548",
            Self::Other => "#9E9E9E",
        }
    }

    /// Guesses the type from a file name's extension.
    pub fn from_file_name(name: &str) -> Self {
        let ext = match name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return Self::Other,
        };
        match ext.as_str() {
            "pdf" => Self::Pdf,
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" => Self::Image,
            "doc" | "docx" | "txt" | "md" | "rtf" => Self::Document,
            "xls" | "xlsx" | "csv" => Self::Spreadsheet,
            "ppt" | "pptx" | "key" => Self::Presentation,
            "sh" | "yaml" | "yml" | "json" | "js" | "ts" | "py" | "rs" | "go" => Self::Code,
            "mp4" | "mov" | "webm" => Self::Video,
            "mp3" | "wav" | "m4a" => Self::Audio,
            "zip" | "tar" | "gz" | "7z" => Self::Archive,
            _ => Self::Other,
        }
    }
}

/// A file attachment card shown inside a message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEmbed {
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub name: String,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub uploaded_by: String,
}

/// What the card does when one of its actions fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmbedEffect {
    /// A caller-supplied handler took care of it.
    Delegated,
    OpenInNewTab { url: String },
    Download { url: String, file_name: String },
    Nothing,
}

/// Rel attribute used for the default open behaviour.
pub const OPEN_REL: &str = "noopener,noreferrer";

impl FileEmbed {
    /// `"<size> • <uploader>"` line under the file name.
    pub fn caption(&self) -> String {
        format!("{} • {}", self.size, self.uploaded_by)
    }

    pub fn open(&self, handler: Option<&dyn Fn(&FileEmbed)>) -> EmbedEffect {
        if let Some(handler) = handler {
            handler(self);
            return EmbedEffect::Delegated;
        }
        match &self.url {
            Some(url) => EmbedEffect::OpenInNewTab { url: url.clone() },
            None => EmbedEffect::Nothing,
        }
    }

    pub fn download(&self, handler: Option<&dyn Fn(&FileEmbed)>) -> EmbedEffect {
        if let Some(handler) = handler {
            handler(self);
            return EmbedEffect::Delegated;
        }
        match &self.url {
            Some(url) => EmbedEffect::Download {
                url: url.clone(),
                file_name: self.name.clone(),
            },
            None => EmbedEffect::Nothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn embed(url: Option<&str>) -> FileEmbed {
        FileEmbed {
            file_type: FileType::Pdf,
            name: "Incident Response Runbook.pdf".into(),
            size: "1.8 MB".into(),
            url: url.map(String::from),
            thumbnail_url: None,
            uploaded_by: "Priya Patel".into(),
        }
    }

    #[test]
    fn test_icon_and_color() {
        assert_eq!(FileType::Pdf.color(), "#DC143C");
        assert_eq!(FileType::Spreadsheet.icon(), "📊");
        assert_eq!(FileType::Other.color(), "#9E9E9E");
    }

    #[test]
    fn test_unknown_type_deserializes_as_other() {
        let t: FileType = serde_json::from_str("\"hologram\"").unwrap();
        assert_eq!(t, FileType::Other);
    }

    #[test]
    fn test_from_file_name() {
        assert_eq!(FileType::from_file_name("Budget Planning.xlsx"), FileType::Spreadsheet);
        assert_eq!(FileType::from_file_name("deployment-script.sh"), FileType::Code);
        assert_eq!(FileType::from_file_name("README"), FileType::Other);
    }

    #[test]
    fn test_handler_takes_precedence() {
        let calls = Cell::new(0);
        let handler = |_: &FileEmbed| calls.set(calls.get() + 1);
        let file = embed(Some("https://files.example/runbook.pdf"));
        assert_eq!(file.open(Some(&handler)), EmbedEffect::Delegated);
        assert_eq!(file.download(Some(&handler)), EmbedEffect::Delegated);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_default_behaviour_needs_url() {
        let file = embed(Some("https://files.example/runbook.pdf"));
        assert_eq!(
            file.download(None),
            EmbedEffect::Download {
                url: "https://files.example/runbook.pdf".into(),
                file_name: "Incident Response Runbook.pdf".into(),
            }
        );
        assert!(matches!(file.open(None), EmbedEffect::OpenInNewTab { .. }));
        assert_eq!(embed(None).open(None), EmbedEffect::Nothing);
        assert_eq!(file.caption(), "1.8 MB • Priya Patel");
    }
}
