//! Click-to-inspect: one selected block at a time, shown in an injected detail view.

use crate::domain::model::{BlockDetails, BlockHandle};
use crate::domain::ports::{DetailView, SceneHost};
use crate::utils::error::{EtlError, Result};

pub struct BlockInspector<D: DetailView> {
    view: D,
    selected: Option<BlockHandle>,
}

impl<D: DetailView> BlockInspector<D> {
    pub fn new(view: D) -> Self {
        Self {
            view,
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<BlockHandle> {
        self.selected
    }

    pub fn view(&self) -> &D {
        &self.view
    }

    /// Shows the block's record and highlights it. The previous selection,
    /// if still in the scene, loses its highlight.
    pub fn select<H: SceneHost>(&mut self, host: &mut H, handle: BlockHandle) -> Result<()> {
        let details = host
            .block(handle)
            .map(|block| BlockDetails::from(&block.record))
            .ok_or(EtlError::UnknownBlock(handle))?;

        self.clear_highlight(host)?;

        self.view.set_visible(true);
        self.view.set_details(&details);
        host.set_highlighted(handle, true)?;
        self.selected = Some(handle);

        tracing::debug!("Selected {} ({})", handle, details.standard_id);
        Ok(())
    }

    /// Hides the panel and drops the selection.
    pub fn dismiss<H: SceneHost>(&mut self, host: &mut H) -> Result<()> {
        self.view.set_visible(false);
        self.clear_highlight(host)
    }

    fn clear_highlight<H: SceneHost>(&mut self, host: &mut H) -> Result<()> {
        if let Some(previous) = self.selected.take() {
            // may have been destroyed by a stack test
            if host.block(previous).is_some() {
                host.set_highlighted(previous, false)?;
            }
        }
        Ok(())
    }
}
