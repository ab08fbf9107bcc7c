use crate::prelude::{ChartBackend, ChartResult, ChartSpec};

/// Lifecycle of one chart widget: created once, then only updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetState<H> {
    Uninitialized,
    Bound(H),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    Updated,
}

impl<H> Default for WidgetState<H> {
    fn default() -> Self {
        WidgetState::Uninitialized
    }
}

impl<H> WidgetState<H> {
    pub fn is_bound(&self) -> bool {
        matches!(self, WidgetState::Bound(_))
    }

    /// Creates the widget from `spec` when unbound; otherwise applies
    /// `update` to the existing widget and asks the backend to redraw it.
    ///
    /// A failed creation leaves the state `Uninitialized`.
    pub fn sync<B, S, U>(&mut self, backend: &mut B, spec: S, update: U) -> ChartResult<SyncOutcome>
    where
        B: ChartBackend<Handle = H>,
        S: FnOnce() -> ChartSpec,
        U: FnOnce(&mut B, &H) -> ChartResult<()>,
    {
        match self {
            WidgetState::Bound(handle) => {
                update(backend, handle)?;
                backend.redraw(handle)?;
                Ok(SyncOutcome::Updated)
            }
            WidgetState::Uninitialized => {
                let handle = backend.create(&spec())?;
                *self = WidgetState::Bound(handle);
                Ok(SyncOutcome::Created)
            }
        }
    }
}
