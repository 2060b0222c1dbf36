//! `HostHooks` implementation tying the orchestrator and the nudges together.
//!
//! This is the only type a host needs to register. Events are handed to the
//! orchestrator on a background task, so `on_event` returns as soon as the
//! task is spawned and the approval flow is never held up.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use narrator_contracts::event::HostEvent;

use crate::{nudge::Nudges, orchestrator::Orchestrator, traits::HostHooks};

pub struct NarrationPlugin {
    orchestrator: Arc<Orchestrator>,
    nudges: Nudges,
}

impl NarrationPlugin {
    pub fn new(orchestrator: Orchestrator) -> Self {
        let config = orchestrator.config();
        let nudges = Nudges::new(config.nudge.clone(), config.patch_tool.clone());
        Self {
            orchestrator: Arc::new(orchestrator),
            nudges,
        }
    }

    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.orchestrator
    }

    pub fn nudges(&self) -> &Nudges {
        &self.nudges
    }
}

#[async_trait]
impl HostHooks for NarrationPlugin {
    async fn on_event(&self, event: HostEvent) {
        // Detached: the outcome is logged by the orchestrator itself.
        let _ = self.orchestrator.observe(event);
    }

    async fn on_chat_params(&self, provider_id: Option<&str>) {
        self.nudges.track_provider(provider_id);
    }

    async fn on_system_transform(&self, provider_id: Option<&str>, system: &mut Vec<String>) {
        self.nudges.transform_system(provider_id, system);
    }

    async fn on_tool_definition(&self, description: &mut String) {
        self.nudges.annotate_tool(description);
    }

    async fn on_tool_executed(
        &self,
        tool: &str,
        args: &serde_json::Value,
        output: &mut Option<String>,
    ) {
        debug!(tool = %tool, "tool executed");
        self.nudges.summarize_tool_result(tool, args, output);
    }
}
