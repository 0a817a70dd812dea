use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const STATUSES: [&str; 5] = [
    "reconciling telemetry…",
    "validating windows…",
    "checking SLOs…",
    "confirming DB health…",
    "scanning error budgets…",
];

pub const TRANSITION: Duration = Duration::from_millis(1100);
pub const SETTLE_DELAY: Duration = Duration::from_millis(800);
pub const SETTLED_TEXT: &str = "has verified checks.";

pub const TITLE: &str = "Close the incident";
pub const CONFIRM_LABEL: &str = "Close and draft a PIR";
pub const CANCEL_LABEL: &str = "Cancel";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CyclerFrame {
    Status { index: usize, text: &'static str },
    Settled,
}

/// Walks the status list once, then settles. There is no way back.
#[derive(Clone, Debug, Default)]
pub struct StatusCycler {
    index: usize,
    settled: bool,
}

impl StatusCycler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> CyclerFrame {
        if self.settled {
            CyclerFrame::Settled
        } else {
            CyclerFrame::Status {
                index: self.index,
                text: STATUSES[self.index],
            }
        }
    }

    /// Time until the next frame; `None` once settled.
    pub fn next_delay(&self) -> Option<Duration> {
        if self.settled {
            None
        } else if self.index < STATUSES.len() - 1 {
            Some(TRANSITION)
        } else {
            Some(SETTLE_DELAY)
        }
    }

    pub fn advance(&mut self) -> Option<CyclerFrame> {
        if self.settled {
            return None;
        }
        if self.index < STATUSES.len() - 1 {
            self.index += 1;
        } else {
            self.settled = true;
        }
        Some(self.current())
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }
}

/// Plays the full sequence into `tx`, sleeping between frames.
/// Returns early if the receiver goes away.
pub async fn play(tx: mpsc::UnboundedSender<CyclerFrame>) {
    let mut cycler = StatusCycler::new();
    if tx.send(cycler.current()).is_err() {
        return;
    }
    while let Some(delay) = cycler.next_delay() {
        tokio::time::sleep(delay).await;
        let Some(frame) = cycler.advance() else { break };
        if tx.send(frame).is_err() {
            return;
        }
    }
}

/// Next focus index for Tab / Shift+Tab inside the dialog, wrapping at both ends.
/// `None` means the dialog container itself holds focus.
pub fn next_focus(current: Option<usize>, focusable: usize, backwards: bool) -> Option<usize> {
    if focusable == 0 {
        return current;
    }
    let last = focusable - 1;
    let next = match (current, backwards) {
        (None, false) => 0,
        (Some(i), false) if i >= last => 0,
        (Some(i), false) => i + 1,
        (None, true) | (Some(0), true) => last,
        (Some(i), true) => (i - 1).min(last),
    };
    Some(next)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKey {
    Escape,
    Tab { shift: bool },
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalOutcome {
    Closed,
    Confirmed,
}

/// Dialog state: open flag, focus position and the running status animation.
pub struct CloseIncidentModal {
    open: bool,
    focusable: usize,
    focus: Option<usize>,
    animation: Option<JoinHandle<()>>,
}

impl CloseIncidentModal {
    /// `focusable` is the number of tabbable controls (Cancel and Confirm by default).
    pub fn new(focusable: usize) -> Self {
        Self {
            open: false,
            focusable,
            focus: None,
            animation: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Opens the dialog and restarts the status sequence from the first entry.
    /// Must be called inside a Tokio runtime.
    pub fn open(&mut self) -> mpsc::UnboundedReceiver<CyclerFrame> {
        self.stop_animation();
        let (tx, rx) = mpsc::unbounded_channel();
        self.animation = Some(tokio::spawn(play(tx)));
        self.open = true;
        self.focus = None;
        rx
    }

    pub fn close(&mut self) -> ModalOutcome {
        self.teardown();
        ModalOutcome::Closed
    }

    pub fn confirm(&mut self) -> ModalOutcome {
        self.teardown();
        ModalOutcome::Confirmed
    }

    pub fn handle_key(&mut self, key: ModalKey) -> Option<ModalOutcome> {
        if !self.open {
            return None;
        }
        match key {
            ModalKey::Escape => Some(self.close()),
            ModalKey::Tab { shift } => {
                self.focus = next_focus(self.focus, self.focusable, shift);
                None
            }
            ModalKey::Other => None,
        }
    }

    fn teardown(&mut self) {
        self.stop_animation();
        self.open = false;
        self.focus = None;
    }

    fn stop_animation(&mut self) {
        if let Some(handle) = self.animation.take() {
            handle.abort();
        }
    }
}

impl Default for CloseIncidentModal {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Drop for CloseIncidentModal {
    fn drop(&mut self) {
        self.stop_animation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycler_runs_once_then_settles() {
        let mut cycler = StatusCycler::new();
        assert_eq!(
            cycler.current(),
            CyclerFrame::Status { index: 0, text: STATUSES[0] }
        );
        for expected in 1..STATUSES.len() {
            assert_eq!(cycler.next_delay(), Some(TRANSITION));
            assert_eq!(
                cycler.advance(),
                Some(CyclerFrame::Status { index: expected, text: STATUSES[expected] })
            );
        }
        assert_eq!(cycler.next_delay(), Some(SETTLE_DELAY));
        assert_eq!(cycler.advance(), Some(CyclerFrame::Settled));
        assert!(cycler.is_settled());
        assert_eq!(cycler.next_delay(), None);
        assert_eq!(cycler.advance(), None);
    }

    #[test]
    fn test_next_focus_wraps() {
        assert_eq!(next_focus(None, 2, false), Some(0));
        assert_eq!(next_focus(Some(0), 2, false), Some(1));
        assert_eq!(next_focus(Some(1), 2, false), Some(0));
        assert_eq!(next_focus(None, 2, true), Some(1));
        assert_eq!(next_focus(Some(0), 2, true), Some(1));
        assert_eq!(next_focus(Some(1), 2, true), Some(0));
        assert_eq!(next_focus(None, 0, false), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_emits_full_sequence_with_timing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let started = tokio::time::Instant::now();
        tokio::spawn(play(tx));

        let mut frames = Vec::new();
        while let Some(frame) = rx.recv().await {
            frames.push(frame);
        }
        assert_eq!(frames.len(), STATUSES.len() + 1);
        assert_eq!(frames.last(), Some(&CyclerFrame::Settled));
        assert_eq!(
            started.elapsed(),
            TRANSITION * (STATUSES.len() as u32 - 1) + SETTLE_DELAY
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_pending_frames() {
        let mut modal = CloseIncidentModal::default();
        let mut rx = modal.open();
        assert!(modal.is_open());
        assert!(matches!(rx.recv().await, Some(CyclerFrame::Status { index: 0, .. })));

        assert_eq!(modal.handle_key(ModalKey::Escape), Some(ModalOutcome::Closed));
        assert!(!modal.is_open());
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_tab_moves_focus_only_when_open() {
        let mut modal = CloseIncidentModal::default();
        assert_eq!(modal.handle_key(ModalKey::Tab { shift: false }), None);
        assert_eq!(modal.focus(), None);

        let _rx = modal.open();
        modal.handle_key(ModalKey::Tab { shift: false });
        assert_eq!(modal.focus(), Some(0));
        modal.handle_key(ModalKey::Tab { shift: true });
        assert_eq!(modal.focus(), Some(1));
        assert_eq!(modal.confirm(), ModalOutcome::Confirmed);
        assert!(!modal.is_open());
    }
}
