//! Pure mappings from answer metadata to display text and colours.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Good,
    Moderate,
}

impl ConfidenceLevel {
    pub fn from_score(confidence: f64) -> Self {
        if confidence >= 0.80 {
            ConfidenceLevel::High
        } else if confidence >= 0.60 {
            ConfidenceLevel::Good
        } else {
            ConfidenceLevel::Moderate
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High quality",
            ConfidenceLevel::Good => "Good quality",
            ConfidenceLevel::Moderate => "Moderate quality",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "#4CAF50",
            ConfidenceLevel::Good => "#FF9800",
            ConfidenceLevel::Moderate => "#f44336",
        }
    }
}

pub fn confidence_percentage(confidence: f64) -> u8 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// `None` for a single attempt; the badge is only worth showing for retries.
pub fn attempts_badge(attempts: u32) -> Option<String> {
    (attempts > 1).then(|| format!("🔄 {attempts} attempts"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedClass {
    VeryFast,
    Fast,
    Complex,
}

impl SpeedClass {
    pub fn from_elapsed(elapsed: Duration) -> Self {
        match elapsed.as_millis() {
            0..=1999 => SpeedClass::VeryFast,
            2000..=4999 => SpeedClass::Fast,
            _ => SpeedClass::Complex,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedClass::VeryFast => "Very fast",
            SpeedClass::Fast => "Fast",
            SpeedClass::Complex => "Complex processing",
        }
    }
}

/// `⏱️ 1.53s (Very fast)`
pub fn format_processing_time(elapsed: Duration) -> String {
    format!(
        "⏱️ {:.2}s ({})",
        elapsed.as_secs_f64(),
        SpeedClass::from_elapsed(elapsed).label()
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolBadge {
    pub icon: &'static str,
    pub label: String,
}

const KNOWN_TOOLS: &[(&str, &str, &str)] = &[
    ("extract_experience", "💼", "Work experience"),
    ("extract_skills", "🛠️", "Technical skills"),
    ("extract_education", "🎓", "Education"),
    ("extract_projects", "🚀", "Projects"),
    ("extract_personal_info", "👤", "Personal info"),
    ("analyze_career_progression", "📈", "Career progression"),
];

pub fn tool_badge(tool: &str) -> ToolBadge {
    match KNOWN_TOOLS.iter().find(|(id, _, _)| *id == tool) {
        Some(&(_, icon, label)) => ToolBadge {
            icon,
            label: label.to_string(),
        },
        None => ToolBadge {
            icon: "🔧",
            label: tool.to_string(),
        },
    }
}

pub fn category_icon(category: &str) -> &'static str {
    match category {
        "experience" => "💼",
        "skills" => "🛠️",
        "education" => "🎓",
        "projects" => "🚀",
        "career" => "📈",
        _ => "",
    }
}

pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
