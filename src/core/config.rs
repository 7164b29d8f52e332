//! User facing configuration of the window manager.
//!
//! Configuration is done in code: [Config::default] is the shipped setup and individual
//! fields can be overwritten before handing it to a
//! [WindowManager][crate::core::WindowManager].
//!
//! ```
//! use trellis::{core::actions::Action, core::bindings::Binding, Config, KeySym};
//!
//! let mut config = Config::default();
//! config.audio_actions = false;
//! config.bindings.insert(
//!     Binding::plain(KeySym::from('x')),
//!     Action::Exec(vec!["xterm".to_owned()]),
//! );
//!
//! assert_eq!(config.border_width, 2);
//! ```
use crate::{
    core::{
        actions::{Action, ProgramAction, SelectScope, SyntheticInput},
        bindings::{Binding, KeyBindings, ModMask},
        pulse::BorderColors,
    },
    keysyms::XKeySym,
    pure::{Listing, Orientation, Traversal},
    KeySym,
};
use std::{collections::HashMap, time::Duration};

/// The key combination a program expects for each [ProgramAction], keyed by the instance
/// name from a window's WM_CLASS.
pub type ProgramActions = HashMap<String, HashMap<ProgramAction, (ModMask, KeySym)>>;

/// Metrics for the X core font used to draw list overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    /// The height of a line of text
    pub height: i32,
    /// The offset of the first baseline from the top of the list
    pub first_line: i32,
    /// The width of a single character
    pub width: i32,
}

/// The main user facing configuration details.
#[derive(Debug, Clone)]
pub struct Config {
    /// The key that must be held to trigger window manager actions
    pub trigger: KeySym,
    /// The width of the gap left around each window inside its frame
    pub border_width: u32,
    /// The border colours in normal operation
    pub base_colors: BorderColors,
    /// The border colours at the start of a pulse
    pub pulse_colors: BorderColors,
    /// The border colours once quitting has been confirmed
    pub quit_colors: BorderColors,
    /// The font used for list overlays
    pub font: FontMetrics,
    /// The font name requested from the X server
    pub font_name: String,
    /// The time between frames of the pulse animation
    pub pulse_frame: Duration,
    /// The duration of the pulse animation
    pub pulse_total: Duration,
    /// Whether the audio keys are grabbed and bound
    pub audio_actions: bool,
    /// The actions to run for each key pressed while the trigger is held
    pub bindings: KeyBindings,
    /// Program specific key combinations for [Action::Program]
    pub program_actions: ProgramActions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trigger: XKeySym::XK_Caps_Lock.into(),
            border_width: 2,
            base_colors: BorderColors::new(0x1f3f1f, 0x3f7f3f),
            pulse_colors: BorderColors::new(0x3f7f3f, 0x7fff7f),
            quit_colors: BorderColors::new(0x7f1f1f, 0xff3f3f),
            font: FontMetrics {
                height: 16,
                first_line: 9,
                width: 6,
            },
            font_name: "fixed".to_owned(),
            pulse_frame: Duration::from_millis(50),
            pulse_total: Duration::from_millis(1000),
            audio_actions: true,
            bindings: default_bindings(),
            program_actions: default_program_actions(),
        }
    }
}

impl Config {
    /// The keysyms that need to be grabbed: the trigger and, if enabled, the audio keys.
    pub fn grabbed_keysyms(&self) -> Vec<KeySym> {
        let mut syms = vec![self.trigger];
        if self.audio_actions {
            syms.extend(
                [
                    XKeySym::XF86XK_AudioLowerVolume,
                    XKeySym::XF86XK_AudioMute,
                    XKeySym::XF86XK_AudioRaiseVolume,
                ]
                .map(KeySym::from),
            );
        }

        syms
    }
}

fn cmd(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

fn default_bindings() -> KeyBindings {
    use Action::*;
    use Traversal::{Next, Prev};

    let p = |c: char| Binding::plain(c);
    let s = |c: char| Binding::shifted(c);
    let px = |k: XKeySym| Binding::plain(k);
    let sx = |k: XKeySym| Binding::shifted(k);

    let mut bindings: KeyBindings = HashMap::from([
        (p(' '), Exec(cmd(&["google-chrome"]))),
        (s(' '), Exec(cmd(&["google-chrome", "--incognito"]))),
        (s('|'), Exec(cmd(&["gnome-screensaver-command", "-l"]))),
        (px(XKeySym::XK_Return), Exec(cmd(&["gnome-terminal"]))),
        (
            sx(XKeySym::XK_Return),
            Exec(cmd(&[
                "dmenu_run", "-nb", "#0f0f0f", "-nf", "#3f7f3f", "-sb", "#0f0f0f", "-sf",
                "#7fff7f", "-l", "10",
            ])),
        ),
        (
            px(XKeySym::XF86XK_AudioLowerVolume),
            Audio(cmd(&["pactl", "set-sink-volume", "0", "--", "-5%"])),
        ),
        (
            px(XKeySym::XF86XK_AudioRaiseVolume),
            Audio(cmd(&["pactl", "set-sink-volume", "0", "--", "+5%"])),
        ),
        (
            px(XKeySym::XF86XK_AudioMute),
            Audio(cmd(&["pactl", "set-sink-mute", "0", "toggle"])),
        ),
        (px(XKeySym::XK_BackSpace), WindowDelete),
        (sx(XKeySym::XK_Escape), Quit),
        (p('`'), Screen(Next)),
        (s('~'), Screen(Prev)),
        (px(XKeySym::XK_Tab), Frame(Next)),
        (sx(XKeySym::XK_ISO_Left_Tab), Frame(Prev)),
        (p('q'), List(Listing::Workspaces)),
        (p('w'), Migrate),
        (p('e'), Workspace(Prev)),
        (s('E'), WorkspaceNudge(Prev)),
        (p('r'), Workspace(Next)),
        (s('R'), WorkspaceNudge(Next)),
        (p('t'), WorkspaceNew),
        (s('T'), WorkspaceDelete),
        (p('a'), List(Listing::Windows)),
        (p('s'), Select(SelectScope::One)),
        (s('S'), Select(SelectScope::All)),
        (p('d'), Window(Prev)),
        (s('D'), WindowNudge(Prev)),
        (p('f'), Window(Next)),
        (s('F'), WindowNudge(Next)),
        (p('g'), Fullscreen),
        (s('G'), Hide),
        (p('-'), Split(Orientation::Horizontal)),
        (p('='), Split(Orientation::Vertical)),
        (s('+'), Merge),
    ]);

    for (i, c) in "1234567890".chars().enumerate() {
        bindings.insert(p(c), WindowN(i));
    }
    for i in 0..12 {
        if let Some(k) = XKeySym::function_key(i + 1) {
            bindings.insert(px(k), WorkspaceN(i));
        }
    }

    let synthetic = [
        ('i', 'I', SyntheticInput::Button(4)),
        ('m', 'M', SyntheticInput::Button(5)),
        ('y', 'Y', SyntheticInput::Key(XKeySym::XK_Home.into())),
        ('u', 'U', SyntheticInput::Key(XKeySym::XK_Page_Up.into())),
        ('h', 'H', SyntheticInput::Key(XKeySym::XK_Left.into())),
        ('j', 'J', SyntheticInput::Key(XKeySym::XK_Down.into())),
        ('k', 'K', SyntheticInput::Key(XKeySym::XK_Up.into())),
        ('l', 'L', SyntheticInput::Key(XKeySym::XK_Right.into())),
        ('b', 'B', SyntheticInput::Key(XKeySym::XK_End.into())),
        ('n', 'N', SyntheticInput::Key(XKeySym::XK_Page_Down.into())),
        (',', '<', SyntheticInput::Key(XKeySym::XK_BackSpace.into())),
        ('.', '>', SyntheticInput::Key(XKeySym::XK_Delete.into())),
    ];
    for (plain, shifted, input) in synthetic {
        bindings.insert(p(plain), Synthetic(input));
        bindings.insert(s(shifted), Synthetic(input));
    }

    let program = [
        (p('/'), ProgramAction::TabNew),
        (s('?'), ProgramAction::TabClose),
        (p('c'), ProgramAction::TabPrev),
        (p('v'), ProgramAction::TabNext),
        (p('o'), ProgramAction::Copy),
        (s('O'), ProgramAction::Cut),
        (p('p'), ProgramAction::Paste),
        (s('P'), ProgramAction::PasteSpecial),
        (p('z'), ProgramAction::ZoomIn),
        (s('Z'), ProgramAction::ZoomReset),
        (p('x'), ProgramAction::ZoomOut),
    ];
    for (b, pa) in program {
        bindings.insert(b, Program(pa));
    }

    bindings
}

fn default_program_actions() -> ProgramActions {
    use ProgramAction::*;

    let ctrl = ModMask::CONTROL;
    let ctrl_shift = ModMask::CONTROL | ModMask::SHIFT;
    let page_up = KeySym::from(XKeySym::XK_Page_Up);
    let page_down = KeySym::from(XKeySym::XK_Page_Down);
    let k = KeySym::from;

    let terminal = HashMap::from([
        (TabNew, (ctrl_shift, k('T'))),
        (TabClose, (ctrl_shift, k('W'))),
        (TabPrev, (ctrl, page_up)),
        (TabNext, (ctrl, page_down)),
        (Cut, (ctrl_shift, k('C'))),
        (Copy, (ctrl_shift, k('C'))),
        (Paste, (ctrl_shift, k('V'))),
        (PasteSpecial, (ctrl_shift, k('V'))),
        (ZoomIn, (ctrl_shift, k('+'))),
        (ZoomOut, (ctrl, k('-'))),
        (ZoomReset, (ctrl, k('0'))),
    ]);

    let browser = HashMap::from([
        (TabNew, (ctrl, k('t'))),
        (TabClose, (ctrl, k('w'))),
        (TabPrev, (ctrl, page_up)),
        (TabNext, (ctrl, page_down)),
        (Cut, (ctrl, k('x'))),
        (Copy, (ctrl, k('c'))),
        (Paste, (ctrl, k('v'))),
        (PasteSpecial, (ctrl_shift, k('V'))),
        (ZoomIn, (ctrl_shift, k('+'))),
        (ZoomOut, (ctrl, k('-'))),
        (ZoomReset, (ctrl, k('0'))),
    ]);

    HashMap::from([
        ("gnome-terminal-server".to_owned(), terminal),
        ("google-chrome".to_owned(), browser),
    ])
}
