//! Dashboard view model and HTML rendering.

use minijinja::Environment;
use serde::Serialize;

use crate::config::DashboardConfig;
use crate::error::Result;
use crate::platform::{PlatformStatus, PlatformTokens};
use crate::task::Task;

const TEMPLATE_NAME: &str = "dashboard.html";
const TEMPLATE: &str = include_str!("../templates/dashboard.html");

/// Placeholder rows shown while the store is empty. Never persisted.
const SAMPLE_TASKS: [(&str, &str, &str); 3] = [
    ("Upload daily clip to TikTok", "TikTok", "Every 24h"),
    ("Repost on Facebook Gaming", "Facebook", "After each stream"),
    ("Save best plays", "Global", "Automatic"),
];

#[derive(Debug, Clone, Serialize)]
pub struct DashboardTask {
    pub position: usize,
    pub id: String,
    pub name: String,
    pub platform: String,
    pub frequency: String,
    pub active: bool,
    pub status: &'static str,
    pub sample: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub monthly_revenue: u64,
    pub active_tasks: usize,
    pub tasks: Vec<DashboardTask>,
    pub platforms: Vec<PlatformStatus>,
    pub recent_logs: Vec<String>,
}

impl DashboardView {
    pub fn build(
        tasks: &[Task],
        tokens: &PlatformTokens,
        recent_logs: Vec<String>,
        config: &DashboardConfig,
    ) -> Self {
        let rows = if tasks.is_empty() {
            sample_rows()
        } else {
            tasks
                .iter()
                .enumerate()
                .map(|(idx, task)| DashboardTask {
                    position: idx + 1,
                    id: task.id.clone(),
                    name: task.name.clone(),
                    platform: task.platform.clone(),
                    frequency: task.frequency.clone(),
                    active: task.active,
                    status: task.status_label(),
                    sample: false,
                })
                .collect()
        };

        let active_tasks = tasks.iter().filter(|task| task.active).count();
        let monthly_revenue =
            config.revenue_base + active_tasks as u64 * config.revenue_per_active_task;

        Self {
            title: "autodeck".to_string(),
            monthly_revenue,
            active_tasks,
            tasks: rows,
            platforms: tokens.statuses(),
            recent_logs,
        }
    }

    pub fn render(&self) -> Result<String> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, TEMPLATE)?;
        let template = env.get_template(TEMPLATE_NAME)?;
        Ok(template.render(self)?)
    }
}

fn sample_rows() -> Vec<DashboardTask> {
    SAMPLE_TASKS
        .iter()
        .enumerate()
        .map(|(idx, (name, platform, frequency))| DashboardTask {
            position: idx + 1,
            id: format!("sample{}", idx + 1),
            name: name.to_string(),
            platform: platform.to_string(),
            frequency: frequency.to_string(),
            active: true,
            status: "Active",
            sample: true,
        })
        .collect()
}
