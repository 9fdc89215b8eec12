use crate::domain::model::AccordionState;
use crate::utils::error::{GuideError, Result};

/// 固定的面板集合，同時最多只展開一個
#[derive(Debug, Clone)]
pub struct AccordionController {
    panel_ids: Vec<String>,
    state: AccordionState,
}

impl AccordionController {
    pub fn new<I, S>(panel_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            panel_ids: panel_ids.into_iter().map(Into::into).collect(),
            state: AccordionState::default(),
        }
    }

    pub fn state(&self) -> &AccordionState {
        &self.state
    }

    pub fn panel_ids(&self) -> &[String] {
        &self.panel_ids
    }

    pub fn is_open(&self, panel_id: &str) -> bool {
        self.state.open_id.as_deref() == Some(panel_id)
    }

    /// 展開 `panel_id` 並收合其他面板，已展開時則收合
    pub fn toggle(&mut self, panel_id: &str) -> Result<()> {
        if !self.panel_ids.iter().any(|id| id == panel_id) {
            return Err(GuideError::UnknownPanel {
                id: panel_id.to_string(),
            });
        }

        if self.is_open(panel_id) {
            self.state.open_id = None;
        } else {
            self.state.open_id = Some(panel_id.to_string());
        }
        tracing::debug!("accordion open panel: {:?}", self.state.open_id);
        Ok(())
    }
}
