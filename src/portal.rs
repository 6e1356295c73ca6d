//! Screen routing and transition timing
//!
//! The portal moves Gateway → Scanner → Vault and back to Gateway. Every move
//! is delayed so the CSS choreography can play, and every delayed move is a
//! `PendingTransition` polled from the frame loop. Only the newest ticket can
//! fire: a second request supersedes the first, and `cancel` drops it, so rapid
//! input never stacks stale screen changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{PortalError, Result};
use crate::realms::RealityId;

/// Gateway press until the scanner overlay appears
pub const GATEWAY_TO_SCANNER_MS: f64 = 800.0;
/// How long the scanner sweeps before the vault opens
pub const SCAN_DURATION_MS: f64 = 3000.0;
/// Vault fade-out before the gateway returns
pub const VAULT_TO_GATEWAY_MS: f64 = 500.0;
/// Peak card tilt in degrees
pub const MAX_TILT_DEG: f32 = 15.0;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    /// Cinematic landing screen
    #[default]
    Gateway,
    /// Camera-scanner overlay
    Scanner,
    /// Helix gallery
    Vault,
}

impl Screen {
    /// DOM id / CSS hook
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Gateway => "gateway",
            Screen::Scanner => "scanner",
            Screen::Vault => "vault",
        }
    }

    /// Allowed moves. Any screen may bail back to the gateway.
    pub fn can_transition_to(&self, target: Screen) -> bool {
        matches!(
            (self, target),
            (Screen::Gateway, Screen::Scanner)
                | (Screen::Scanner, Screen::Vault)
                | (Screen::Scanner, Screen::Gateway)
                | (Screen::Vault, Screen::Gateway)
        )
    }
}

/// Identity of a scheduled transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// A screen change waiting for its delay to elapse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTransition {
    pub target: Screen,
    pub due_at_ms: f64,
    pub ticket: Ticket,
}

/// Things the shell reacts to (sound, haptics, particle bursts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalEvent {
    ScreenChanged { from: Screen, to: Screen },
    VaultUnlocked,
}

/// All mutable UI state
#[derive(Debug, Clone)]
pub struct PortalState {
    pub screen: Screen,
    pub reality: RealityId,
    pending: Option<PendingTransition>,
    next_ticket: u64,
    /// Vault lock has been released this visit
    pub unlocked: bool,
    /// Current card tilt (x = rotateX, y = rotateY, degrees)
    pub tilt: Vec2,
}

impl PortalState {
    pub fn new(reality: RealityId) -> Self {
        Self {
            screen: Screen::Gateway,
            reality,
            pending: None,
            next_ticket: 1,
            unlocked: false,
            tilt: Vec2::ZERO,
        }
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    /// Schedule a move to `target` after `delay_ms`
    ///
    /// Replaces whatever was pending. Asking again for the target that is
    /// already pending keeps the original ticket and due time.
    pub fn request(&mut self, target: Screen, delay_ms: f64, now_ms: f64) -> Result<Ticket> {
        if !delay_ms.is_finite() || delay_ms < 0.0 {
            return Err(PortalError::invalid(
                "delay_ms",
                format!("expected a finite, non-negative delay, got {delay_ms}"),
            ));
        }
        if !self.screen.can_transition_to(target) {
            return Err(PortalError::invalid(
                "target",
                format!(
                    "cannot go from {} to {}",
                    self.screen.as_str(),
                    target.as_str()
                ),
            ));
        }

        if let Some(pending) = self.pending
            && pending.target == target
        {
            return Ok(pending.ticket);
        }

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        if let Some(old) = self.pending.replace(PendingTransition {
            target,
            due_at_ms: now_ms + delay_ms,
            ticket,
        }) {
            log::debug!(
                "Transition to {} superseded by {}",
                old.target.as_str(),
                target.as_str()
            );
        }
        Ok(ticket)
    }

    /// Drop the pending transition. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Apply the pending transition once it is due
    pub fn advance(&mut self, now_ms: f64) -> Option<PortalEvent> {
        let pending = self.pending?;
        if now_ms < pending.due_at_ms {
            return None;
        }
        self.pending = None;

        let from = self.screen;
        self.screen = pending.target;
        log::info!("Screen {} -> {}", from.as_str(), self.screen.as_str());

        match self.screen {
            Screen::Scanner => {
                // The scan completes on its own
                if let Err(e) = self.request(Screen::Vault, SCAN_DURATION_MS, pending.due_at_ms) {
                    log::warn!("Scan could not schedule the vault: {}", e);
                }
            }
            Screen::Gateway => {
                self.unlocked = false;
                self.tilt = Vec2::ZERO;
            }
            Screen::Vault => {}
        }

        Some(PortalEvent::ScreenChanged {
            from,
            to: self.screen,
        })
    }

    /// Whether a gateway press would start a new entry
    ///
    /// False off the gateway and while an entry is already counting down, so
    /// the press cue and burst play once per entry.
    pub fn accepts_gateway_press(&self) -> bool {
        self.screen == Screen::Gateway && self.pending.is_none()
    }

    /// Gateway press: start the scanner sequence
    pub fn enter_portal(&mut self, now_ms: f64) -> Result<Ticket> {
        self.request(Screen::Scanner, GATEWAY_TO_SCANNER_MS, now_ms)
    }

    /// Leave the scanner or vault
    pub fn return_home(&mut self, now_ms: f64) -> Result<Ticket> {
        let delay = match self.screen {
            Screen::Vault => VAULT_TO_GATEWAY_MS,
            _ => 0.0,
        };
        self.request(Screen::Gateway, delay, now_ms)
    }

    /// Release the vault lock (only meaningful on the vault screen, fires once)
    pub fn unlock_vault(&mut self) -> Option<PortalEvent> {
        if self.screen != Screen::Vault || self.unlocked {
            return None;
        }
        self.unlocked = true;
        Some(PortalEvent::VaultUnlocked)
    }

    /// Track the pointer over a card
    pub fn set_pointer(&mut self, pointer: Vec2, card_size: Vec2) {
        self.tilt = card_tilt(pointer, card_size);
    }

    pub fn clear_pointer(&mut self) {
        self.tilt = Vec2::ZERO;
    }
}

/// Map a pointer position inside a card to (rotateX, rotateY) degrees
///
/// Center is flat; edges tilt toward the pointer up to `MAX_TILT_DEG`.
pub fn card_tilt(pointer: Vec2, card_size: Vec2) -> Vec2 {
    if card_size.x <= 0.0 || card_size.y <= 0.0 || !pointer.is_finite() {
        return Vec2::ZERO;
    }
    // -1..1 from the card center
    let n = (pointer / card_size - Vec2::splat(0.5)) * 2.0;
    Vec2::new(-n.y, n.x).clamp(Vec2::splat(-1.0), Vec2::splat(1.0)) * MAX_TILT_DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PortalState {
        PortalState::new(RealityId::Nexus)
    }

    #[test]
    fn test_full_cycle() {
        let mut s = state();
        s.enter_portal(0.0).unwrap();

        assert_eq!(s.advance(799.0), None);
        assert_eq!(
            s.advance(800.0),
            Some(PortalEvent::ScreenChanged {
                from: Screen::Gateway,
                to: Screen::Scanner
            })
        );

        // Scan chains into the vault on its own
        assert_eq!(s.pending().map(|p| p.target), Some(Screen::Vault));
        assert_eq!(s.advance(800.0 + SCAN_DURATION_MS - 1.0), None);
        assert!(matches!(
            s.advance(800.0 + SCAN_DURATION_MS),
            Some(PortalEvent::ScreenChanged { to: Screen::Vault, .. })
        ));

        assert_eq!(s.unlock_vault(), Some(PortalEvent::VaultUnlocked));
        assert_eq!(s.unlock_vault(), None);

        s.return_home(5000.0).unwrap();
        assert!(s.advance(5000.0 + VAULT_TO_GATEWAY_MS).is_some());
        assert_eq!(s.screen, Screen::Gateway);
        assert!(!s.unlocked);
    }

    #[test]
    fn test_repeated_press_does_not_stack() {
        let mut s = state();
        let first = s.enter_portal(0.0).unwrap();
        let again = s.enter_portal(300.0).unwrap();
        assert_eq!(first, again);
        // Due time is not pushed back by the repeat
        assert!(s.advance(800.0).is_some());
        assert_eq!(s.screen, Screen::Scanner);
    }

    #[test]
    fn test_gateway_press_accepted_once_per_entry() {
        let mut s = state();
        assert!(s.accepts_gateway_press());
        s.enter_portal(0.0).unwrap();
        assert!(!s.accepts_gateway_press());

        // Cancelling the countdown re-arms the sigil
        s.cancel();
        assert!(s.accepts_gateway_press());

        s.enter_portal(0.0).unwrap();
        s.advance(800.0);
        assert!(!s.accepts_gateway_press());
    }

    #[test]
    fn test_scanner_always_schedules_vault() {
        let mut s = state();
        s.enter_portal(100.0).unwrap();
        s.advance(900.0);
        let pending = s.pending().copied().unwrap();
        assert_eq!(pending.target, Screen::Vault);
        // Scheduled from the due time, not from the late poll
        assert_eq!(pending.due_at_ms, 900.0 + SCAN_DURATION_MS);
    }

    #[test]
    fn test_newer_request_supersedes() {
        let mut s = state();
        s.enter_portal(0.0).unwrap();
        s.advance(800.0);
        assert_eq!(s.screen, Screen::Scanner);

        // Bail out mid-scan: the automatic vault transition must never fire
        let old = s.pending().unwrap().ticket;
        let new = s.return_home(1000.0).unwrap();
        assert!(new > old);
        assert_eq!(
            s.advance(1000.0),
            Some(PortalEvent::ScreenChanged {
                from: Screen::Scanner,
                to: Screen::Gateway
            })
        );
        assert_eq!(s.advance(1_000_000.0), None);
        assert_eq!(s.screen, Screen::Gateway);
    }

    #[test]
    fn test_cancel() {
        let mut s = state();
        s.enter_portal(0.0).unwrap();
        assert!(s.cancel());
        assert!(!s.cancel());
        assert_eq!(s.advance(10_000.0), None);
        assert_eq!(s.screen, Screen::Gateway);
    }

    #[test]
    fn test_rejects_bad_requests() {
        let mut s = state();
        assert!(s.request(Screen::Vault, 0.0, 0.0).is_err());
        assert!(s.request(Screen::Scanner, f64::NAN, 0.0).is_err());
        assert!(s.request(Screen::Scanner, -1.0, 0.0).is_err());
        assert!(s.pending().is_none());
    }

    #[test]
    fn test_unlock_requires_vault() {
        let mut s = state();
        assert_eq!(s.unlock_vault(), None);
        assert!(!s.unlocked);
    }

    #[test]
    fn test_card_tilt() {
        let size = Vec2::new(200.0, 300.0);
        assert_eq!(card_tilt(Vec2::new(100.0, 150.0), size), Vec2::ZERO);

        // Right edge tilts around Y
        let t = card_tilt(Vec2::new(200.0, 150.0), size);
        assert!((t.y - MAX_TILT_DEG).abs() < 1e-5);
        assert!(t.x.abs() < 1e-5);

        // Top edge tilts back around X
        let t = card_tilt(Vec2::new(100.0, 0.0), size);
        assert!((t.x - MAX_TILT_DEG).abs() < 1e-5);

        // Outside the card is clamped
        let t = card_tilt(Vec2::new(-500.0, 900.0), size);
        assert_eq!(t, Vec2::new(-MAX_TILT_DEG, -MAX_TILT_DEG));

        assert_eq!(card_tilt(Vec2::new(1.0, 1.0), Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_pointer_state() {
        let mut s = state();
        s.set_pointer(Vec2::new(200.0, 150.0), Vec2::new(200.0, 300.0));
        assert!(s.tilt.y > 0.0);
        s.clear_pointer();
        assert_eq!(s.tilt, Vec2::ZERO);
    }
}
