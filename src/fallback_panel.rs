//! Degraded UI shown in place of the application when startup fails.
//!
//! Panels are plain values; the host decides where they land (whole body for a
//! missing mount point, mount point contents for a render failure).

use crate::{app_types::RenderFailure, FALLBACK_RELOAD_BUTTON_ID};

const PANEL_STYLE: &str =
    "padding: 40px; text-align: center; font-family: system-ui; background: #fee; min-height: 100vh;";
const TITLE_STYLE: &str = "color: #dc2626; margin-bottom: 16px;";
const EXPLANATION_STYLE: &str = "margin-bottom: 16px;";
const DETAILS_STYLE: &str = "margin: 20px auto; max-width: 600px; text-align: left;";
const SUMMARY_STYLE: &str = "cursor: pointer; font-weight: bold; margin-bottom: 8px;";
const PRE_STYLE: &str =
    "background: #fff; padding: 16px; border-radius: 8px; overflow: auto; border: 1px solid #ddd;";
const BUTTON_STYLE: &str = "margin-top: 16px; padding: 8px 16px; background: #2563eb; color: white; border: none; border-radius: 4px; cursor: pointer;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    MissingMount,
    RenderFailure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackDetail {
    pub summary: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPanel {
    pub kind: FallbackKind,
    pub title: String,
    pub explanation: String,
    pub detail: Option<FallbackDetail>,
    pub reload_label: String,
}

pub fn missing_mount_panel(mount_point_id: &str) -> FallbackPanel {
    FallbackPanel {
        kind: FallbackKind::MissingMount,
        title: "Root Element Not Found".to_string(),
        explanation: format!(
            "Cannot initialize the application: #{mount_point_id} element is missing from the page."
        ),
        detail: None,
        reload_label: "Reload Page".to_string(),
    }
}

pub fn render_failure_panel(failure: &RenderFailure, include_trace: bool) -> FallbackPanel {
    FallbackPanel {
        kind: FallbackKind::RenderFailure,
        title: "Application Initialization Error".to_string(),
        explanation: "Failed to initialize the application.".to_string(),
        detail: Some(FallbackDetail {
            summary: "Error Details".to_string(),
            body: failure.detail_text(include_trace),
        }),
        reload_label: "Reload Page".to_string(),
    }
}

impl FallbackPanel {
    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"<div role="alert" style="{PANEL_STYLE}"><h1 style="{TITLE_STYLE}">{}</h1><p style="{EXPLANATION_STYLE}">{}</p>"#,
            escape_html(&self.title),
            escape_html(&self.explanation),
        );
        if let Some(detail) = &self.detail {
            html.push_str(&format!(
                r#"<details style="{DETAILS_STYLE}"><summary style="{SUMMARY_STYLE}">{}</summary><pre style="{PRE_STYLE}">{}</pre></details>"#,
                escape_html(&detail.summary),
                escape_html(&detail.body),
            ));
        }
        html.push_str(&format!(
            r#"<button type="button" id="{FALLBACK_RELOAD_BUTTON_ID}" data-action="reload" style="{BUTTON_STYLE}">{}</button></div>"#,
            escape_html(&self.reload_label),
        ));
        html
    }

    /// Approximates the panel's rendered `innerText`.
    pub fn text_content(&self) -> String {
        let mut lines = vec![self.title.as_str(), self.explanation.as_str()];
        if let Some(detail) = &self.detail {
            lines.push(detail.summary.as_str());
            lines.push(detail.body.as_str());
        }
        lines.push(self.reload_label.as_str());
        lines.join("\n")
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
