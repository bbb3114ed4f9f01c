/// One protocol command: a fixed 4-character code plus its argument.
///
/// On the wire the argument is left-justified and space-padded to four
/// characters (`VOLM30  `). Longer arguments are written as-is; the
/// device decides whether to accept them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Command {
    code: &'static str,
    arg: String,
}

impl Command {
    pub(crate) fn new(code: &'static str, arg: impl Into<String>) -> Self {
        Self {
            code,
            arg: arg.into(),
        }
    }

    pub(crate) fn encode(&self) -> String {
        format!("{}{:<4}", self.code, self.arg)
    }
}

/// Remote-control keys emulated through the `RCKY` command.
///
/// Key codes follow the table in the AQUOS operation manual; gaps in the
/// numbering are keys the protocol reserves but does not define.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKey {
    Power,
    Display,
    PowerSource,
    Rewind,
    Play,
    FastForward,
    Pause,
    SkipBack,
    Stop,
    SkipForward,
    Record,
    Sleep,
    ClosedCaption,
    AvMode,
    ViewMode,
    Flashback,
    Mute,
    VolumeDown,
    VolumeUp,
    ChannelUp,
    ChannelDown,
    Input,
    Menu,
    SmartCentral,
    Enter,
    Up,
    Down,
    Left,
    Right,
    Return,
    Exit,
}

impl RemoteKey {
    /// Numeric key code sent as the `RCKY` argument.
    pub fn code(self) -> u8 {
        match self {
            RemoteKey::Power => 0,
            RemoteKey::Display => 1,
            RemoteKey::PowerSource => 2,
            RemoteKey::Rewind => 3,
            RemoteKey::Play => 4,
            RemoteKey::FastForward => 5,
            RemoteKey::Pause => 6,
            RemoteKey::SkipBack => 7,
            RemoteKey::Stop => 8,
            RemoteKey::SkipForward => 9,
            RemoteKey::Record => 11,
            RemoteKey::Sleep => 13,
            RemoteKey::ClosedCaption => 15,
            RemoteKey::AvMode => 16,
            RemoteKey::ViewMode => 17,
            RemoteKey::Flashback => 18,
            RemoteKey::Mute => 19,
            RemoteKey::VolumeDown => 20,
            RemoteKey::VolumeUp => 21,
            RemoteKey::ChannelUp => 22,
            RemoteKey::ChannelDown => 23,
            RemoteKey::Input => 24,
            RemoteKey::Menu => 26,
            RemoteKey::SmartCentral => 27,
            RemoteKey::Enter => 28,
            RemoteKey::Up => 29,
            RemoteKey::Down => 30,
            RemoteKey::Left => 31,
            RemoteKey::Right => 32,
            RemoteKey::Return => 33,
            RemoteKey::Exit => 34,
        }
    }
}
