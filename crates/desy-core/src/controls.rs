//! Control affordances driven by the screen
//!
//! The screen never owns widgets; it calls these affordances and the host
//! renders them with whatever toolkit it uses.

use crate::types::SeekDirection;

/// Transport icon state mirrored onto the play/pause buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportIcons {
    /// Icons cleared while the engine buffers
    Cleared,
    /// Normal play/pause icons
    Visible,
}

/// UI affordances the screen drives
pub trait ControlSurface {
    /// Show or hide the buffering indicator.
    fn set_buffering_indicator(&mut self, visible: bool);

    /// Swap the transport icon state.
    fn set_transport_icons(&mut self, icons: TransportIcons);

    /// Short directional slide on the corresponding seek button.
    fn animate_seek(&mut self, direction: SeekDirection);
}

/// Control surface that ignores every affordance, for headless hosts
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopControls;

impl ControlSurface for NoopControls {
    fn set_buffering_indicator(&mut self, _visible: bool) {}
    fn set_transport_icons(&mut self, _icons: TransportIcons) {}
    fn animate_seek(&mut self, _direction: SeekDirection) {}
}

/// User input routed to the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Toggle the play-when-ready intent
    PlayPause,
    /// Relative seek forward
    SeekForward,
    /// Relative seek backward
    SeekBackward,
    /// Prefer the i-th derived audio language
    SelectAudioTrack(usize),
    /// Prefer the i-th derived subtitle language
    SelectSubtitleTrack(usize),
}
