//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Critical:  red, bold   (critical impact, critical exposure)
//!   - High:      red         (high impact, risk >= 70)
//!   - Medium:    yellow      (medium impact, risk >= 40)
//!   - Low:       green       (low impact, low risk)
//!   - Reference: cyan        (node ids, tree root)
//!   - Muted:     dimmed      (field labels, connectors, relations)
//!   - Emphasis:  bold        (section headers)

use crate::analysis::ExposureLevel;
use crate::domain::{ImpactLevel, NodeType};
use colored::Colorize;

use super::OutputConfig;

/// Risk score from which a node is painted yellow.
const MEDIUM_RISK: u8 = 40;

/// Risk score from which a node is painted red.
const HIGH_RISK: u8 = 70;

/// Apply semantic "warning" color (yellow) to text.
pub(crate) fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Color an impact level by severity.
pub(crate) fn colorize_impact(level: ImpactLevel, config: &OutputConfig) -> String {
    let text = level.to_string();
    if !config.use_colors {
        return text;
    }
    match level {
        ImpactLevel::Critical => text.red().bold().to_string(),
        ImpactLevel::High => text.red().to_string(),
        ImpactLevel::Medium => text.yellow().to_string(),
        ImpactLevel::Low => text.green().to_string(),
    }
}

/// Color an exposure level the same way as impact levels.
pub(crate) fn colorize_exposure(level: ExposureLevel, config: &OutputConfig) -> String {
    let impact = match level {
        ExposureLevel::Low => ImpactLevel::Low,
        ExposureLevel::Medium => ImpactLevel::Medium,
        ExposureLevel::High => ImpactLevel::High,
        ExposureLevel::Critical => ImpactLevel::Critical,
    };
    colorize_impact(impact, config)
}

/// Color a formatted risk value by the score it represents.
pub(crate) fn colorize_risk(text: &str, score: f64, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    if score >= f64::from(HIGH_RISK) {
        text.red().to_string()
    } else if score >= f64::from(MEDIUM_RISK) {
        text.yellow().to_string()
    } else {
        text.green().to_string()
    }
}

/// Colorize a node id (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Short marker for a node type, with ASCII fallback.
pub(crate) fn type_icon(node_type: NodeType, config: &OutputConfig) -> &'static str {
    match (node_type, config.use_ascii) {
        (NodeType::Organization, false) => "▣",
        (NodeType::Product, false) => "◆",
        (NodeType::Software, false) => "●",
        (NodeType::Vulnerability, false) => "▲",
        (NodeType::Organization, true) => "O",
        (NodeType::Product, true) => "P",
        (NodeType::Software, true) => "S",
        (NodeType::Vulnerability, true) => "V",
    }
}

/// Apply dimmed style to text (for labels and connectors).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}
