//! Case and document records as returned by the backend
//!
//! Records are created from backend responses at fetch time and live only as
//! long as the view that fetched them. Apart from `id`, every field is optional
//! on the wire: absent or `null` values decode to empty defaults and the
//! display helpers render placeholders for them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Placeholder rendered for absent dates
pub const MISSING_VALUE: &str = "—";

// ============================================================================
// Case
// ============================================================================

/// A legal matter with its parties, status and document references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub case_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub client_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub status: CaseStatus,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,
    #[serde(default, deserialize_with = "nullable")]
    pub key_parties: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub document_ids: Vec<String>,
    #[serde(default)]
    pub playbook_id: Option<String>,
}

impl Case {
    pub fn display_title(&self) -> &str {
        non_blank(&self.title).unwrap_or("Untitled case")
    }

    pub fn display_client(&self) -> &str {
        non_blank(&self.client_name).unwrap_or("Unknown client")
    }

    pub fn display_case_type(&self) -> &str {
        non_blank(&self.case_type).unwrap_or("Unclassified")
    }

    pub fn display_created(&self) -> String {
        format_date(self.created_date)
    }

    /// Playbook assignment label for the detail header
    pub fn playbook_label(&self) -> &str {
        match self.playbook_id.as_deref().and_then(non_blank) {
            Some(id) => id,
            None => "No playbook assigned",
        }
    }

    /// Key parties split into name and role
    pub fn parties(&self) -> Vec<Party> {
        self.key_parties.iter().map(|p| Party::parse(p)).collect()
    }
}

/// One entry of `keyParties`, written as `"Name (Role)"` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Party {
    pub name: String,
    pub role: Option<String>,
}

impl Party {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(stripped) = raw.strip_suffix(')') {
            if let Some(open) = stripped.rfind('(') {
                let name = stripped[..open].trim();
                let role = stripped[open + 1..].trim();
                if !name.is_empty() && !role.is_empty() {
                    return Self {
                        name: name.to_string(),
                        role: Some(role.to_string()),
                    };
                }
            }
        }

        Self {
            name: raw.to_string(),
            role: None,
        }
    }
}

/// Case status chip
///
/// Known statuses are matched case-insensitively, ignoring `_`/`-` separators.
/// Anything else is kept verbatim in `Other` and rendered as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CaseStatus {
    Active,
    UnderReview,
    Resolved,
    #[default]
    Unknown,
    Other(String),
}

impl CaseStatus {
    pub fn label(&self) -> &str {
        match self {
            CaseStatus::Active => "Active",
            CaseStatus::UnderReview => "Under Review",
            CaseStatus::Resolved => "Resolved",
            CaseStatus::Unknown => "Unknown",
            CaseStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for CaseStatus {
    fn from(raw: String) -> Self {
        match normalize_label(&raw).as_str() {
            "" => CaseStatus::Unknown,
            "active" => CaseStatus::Active,
            "under review" => CaseStatus::UnderReview,
            "resolved" => CaseStatus::Resolved,
            _ => CaseStatus::Other(raw.trim().to_string()),
        }
    }
}

impl From<CaseStatus> for String {
    fn from(status: CaseStatus) -> Self {
        match status {
            CaseStatus::Unknown => String::new(),
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Document
// ============================================================================

/// A file attached to a case, with its analysis flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub case_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub kind: DocumentKind,
    #[serde(default, deserialize_with = "nullable")]
    pub size: u64,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub upload_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable")]
    pub content_preview: String,
    #[serde(default, deserialize_with = "nullable")]
    pub analysis_completed: bool,
}

impl Document {
    pub fn display_name(&self) -> &str {
        non_blank(&self.name).unwrap_or("Untitled document")
    }

    pub fn display_uploaded(&self) -> String {
        format_date(self.upload_date)
    }

    pub fn display_size(&self) -> String {
        format_size(self.size)
    }
}

/// Document type, with the same escape hatch as [`CaseStatus`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentKind {
    Contract,
    LegalBrief,
    Evidence,
    Correspondence,
    #[default]
    Unknown,
    Other(String),
}

impl DocumentKind {
    pub fn label(&self) -> &str {
        match self {
            DocumentKind::Contract => "Contract",
            DocumentKind::LegalBrief => "Legal Brief",
            DocumentKind::Evidence => "Evidence",
            DocumentKind::Correspondence => "Correspondence",
            DocumentKind::Unknown => "Unknown",
            DocumentKind::Other(raw) => raw,
        }
    }
}

impl From<String> for DocumentKind {
    fn from(raw: String) -> Self {
        match normalize_label(&raw).as_str() {
            "" => DocumentKind::Unknown,
            "contract" => DocumentKind::Contract,
            "legal brief" | "brief" => DocumentKind::LegalBrief,
            "evidence" => DocumentKind::Evidence,
            "correspondence" | "letter" => DocumentKind::Correspondence,
            _ => DocumentKind::Other(raw.trim().to_string()),
        }
    }
}

impl From<DocumentKind> for String {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Unknown => String::new(),
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn normalize_label(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

/// Human-readable byte size ("512 B", "1.5 KB", "2.0 MB")
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Treats an explicit `null` like an absent field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates; anything else,
/// including numbers and objects, is absent
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_str().and_then(parse_timestamp))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
}
