//! The agent's fixed processing graph and how a returned path lights it up.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const STAGES: [Stage; 7] = [
    Stage {
        id: "classifier",
        label: "🏷️ Classifier",
        description: "Works out the question type",
    },
    Stage {
        id: "tool_selector",
        label: "🔧 Tool selector",
        description: "Picks the extraction tools",
    },
    Stage {
        id: "information_extractor",
        label: "📊 Extractor",
        description: "Pulls the relevant facts",
    },
    Stage {
        id: "context_analyzer",
        label: "🧠 Analyzer",
        description: "Analyzes the surrounding context",
    },
    Stage {
        id: "answer_generator",
        label: "✍️ Generator",
        description: "Writes the specialised answer",
    },
    Stage {
        id: "quality_validator",
        label: "✅ Validator",
        description: "Checks answer quality",
    },
    Stage {
        id: "confidence_calculator",
        label: "📈 Calculator",
        description: "Scores confidence",
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageStatus {
    pub active: bool,
    pub completed: bool,
    pub current: bool,
}

/// Status of every known stage for `path`, in graph order.
/// Ids in `path` that are not known stages are ignored.
pub fn stage_statuses(path: &[String]) -> Vec<(Stage, StageStatus)> {
    let last = path.len().checked_sub(1);
    STAGES
        .iter()
        .map(|stage| {
            let position = path.iter().position(|id| id == stage.id);
            let status = StageStatus {
                active: position.is_some(),
                completed: matches!((position, last), (Some(p), Some(l)) if p < l),
                current: path.last().is_some_and(|id| id == stage.id),
            };
            (*stage, status)
        })
        .collect()
}

/// `classifier → tool_selector`
pub fn format_path(path: &[String]) -> String {
    path.join(" → ")
}
