//! Core data structures and user facing functionality for the window manager
use crate::{
    core::{config::Config, pulse::BorderColors},
    keysyms::XKeySym,
    pure::{geometry::Point, Installation},
    util,
    x::{KeyMap, XConn, XEvent},
    Error, KeySym, Result,
};
use crossbeam_channel::{at, bounded, never, select, unbounded, Receiver, Sender};
use nix::sys::signal::{signal, SigHandler, Signal};
use std::{sync::Arc, thread, time::Instant};
use tracing::{debug, error, info, trace, warn};

pub mod actions;
pub mod bindings;
pub mod config;
mod draw;
mod focus;
mod handle;
pub mod pulse;
pub mod quit;

use bindings::ModMask;
use pulse::{border_colors, Pulse};
use quit::QuitState;

/// Messages sent back to the main loop from helper threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Callback {
    /// The grace period for clients to close after quitting has expired
    ForceQuit,
}

/// The details of the last key press, used when injecting input into clients.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InputState {
    pub(crate) time: u32,
    pub(crate) root: Point,
    pub(crate) state: ModMask,
}

/// Mutable internal state for the window manager
#[derive(Debug)]
pub struct State {
    pub(crate) config: Config,
    pub(crate) inst: Installation,
    pub(crate) keymap: KeyMap,
    pub(crate) quit: QuitState,
    pub(crate) pulse: Pulse,
    pub(crate) input: InputState,
    pub(crate) callbacks: Sender<Callback>,
    pub(crate) exit: bool,
}

impl State {
    /// The user provided configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current pure state of displays, workspaces, frames and windows.
    pub fn installation(&self) -> &Installation {
        &self.inst
    }

    /// Whether quitting has been confirmed.
    pub fn is_quitting(&self) -> bool {
        self.quit.is_quitting()
    }

    /// Whether the main loop will exit after the current event.
    pub fn should_exit(&self) -> bool {
        self.exit
    }

    pub(crate) fn start_pulse(&mut self) {
        self.pulse.start(Instant::now());
    }

    pub(crate) fn border_colors(&self) -> BorderColors {
        self.border_colors_at(Instant::now())
    }

    fn border_colors_at(&self, now: Instant) -> BorderColors {
        border_colors(&self.config, &self.pulse, self.quit.is_quitting(), now)
    }

    /// Draw the next frame of the pulse animation on every display.
    ///
    /// Once the animation completes it starts again if there are windows that have never
    /// been shown so that they are not forgotten about.
    pub(crate) fn pulse_frame<X: XConn>(&mut self, now: Instant, x: &X) -> Result<()> {
        let colors = self.border_colors_at(now);
        for s in 0..self.inst.displays.len() {
            draw::draw_frame_borders(self.inst.workspace_on(s), colors, self, x)?;
        }

        if self.pulse.is_finished(now, self.config.pulse_total) {
            let unseen = self.inst.all_windows().any(|w| !self.inst.windows[w].seen);
            if unseen {
                trace!("restarting pulse for unseen windows");
                self.pulse.start(now);
            } else {
                self.pulse.stop();
            }
        }

        Ok(())
    }
}

/// The main user facing window manager type.
///
/// The X connection is only borrowed while the window manager is being set up and is
/// handed over entirely when calling [WindowManager::run].
#[derive(Debug)]
pub struct WindowManager {
    state: State,
    callbacks: Receiver<Callback>,
}

impl WindowManager {
    /// Construct a new [WindowManager] with the provided config, reading the current
    /// screen layout and keyboard mapping from the X server.
    pub fn new<X: XConn>(config: Config, x: &X) -> Result<Self> {
        let screens = x.screen_details()?;
        info!(?screens, "detected screens");
        let inst = Installation::new(&screens)?;
        let keymap = x.keyboard_mapping()?;
        let (tx, rx) = bounded(1);

        let state = State {
            config,
            inst,
            keymap,
            quit: QuitState::default(),
            pulse: Pulse::default(),
            input: InputState::default(),
            callbacks: tx,
            exit: false,
        };

        Ok(Self {
            state,
            callbacks: rx,
        })
    }

    /// The current internal state of the window manager.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Grab the trigger key along with any other keys that act without it.
    ///
    /// It is an error for the trigger key to be missing from the keyboard.
    pub fn grab_keys<X: XConn>(&self, x: &X) -> Result<()> {
        let trigger = self.state.config.trigger;

        for sym in self.state.config.grabbed_keysyms() {
            match self.state.keymap.grab_code(sym) {
                Some(code) => {
                    debug!(%sym, code, "grabbing key");
                    x.grab_key(code)?;
                }
                None if sym == trigger => return Err(Error::MissingTriggerKey(sym.to_string())),
                None => warn!(%sym, "key is not on the keyboard: unable to grab"),
            }
        }

        Ok(())
    }

    /// Start managing the client windows that were already mapped when we started.
    pub fn manage_existing_clients<X: XConn>(&mut self, x: &X) -> Result<()> {
        for id in x.existing_clients()? {
            if id == x.desktop() || !x.get_window_attributes(id)?.should_manage() {
                continue;
            }
            if let Err(e) = handle::manage(id, false, &mut self.state, x) {
                warn!(%e, %id, "unable to manage existing client");
            }
        }

        Ok(())
    }

    /// Update internal state in response to a single event from the X server.
    pub fn handle_xevent<X: XConn>(&mut self, x: &X, event: XEvent) -> Result<()> {
        let state = &mut self.state;
        trace!(?event, "handling event");
        if let Some(time) = event.time() {
            state.input.time = time;
        }

        match event {
            XEvent::ButtonPress(e) => handle::button_press(e, state, x),
            XEvent::ButtonRelease(_) => Ok(()),
            XEvent::ConfigureRequest(e) => handle::configure_request(e, state, x),
            XEvent::Destroy(id) | XEvent::UnmapNotify(id) => handle::unmanage(id, state, x),
            XEvent::Enter(p) => handle::enter(p, state, x),
            XEvent::Expose(e) => handle::expose(e, state, x),
            XEvent::KeyPress(e) => handle::key_press(e, state, x),
            XEvent::KeyRelease(time) => {
                handle::key_release(time, state);
                Ok(())
            }
            XEvent::MapRequest(id) => handle::manage(id, true, state, x),
            XEvent::Motion(e) => handle::motion(e, state, x),
        }
    }

    /// Start the window manager and run it until quitting.
    ///
    /// Events from the X server are read on a dedicated thread so that the main loop can
    /// interleave them with frames of the pulse animation.
    pub fn run<X>(mut self, x: X) -> Result<()>
    where
        X: XConn + Send + Sync + 'static,
    {
        self.grab_keys(&x)?;
        if self.state.config.trigger == KeySym::from(XKeySym::XK_Caps_Lock) {
            if let Err(e) = util::disable_caps_lock() {
                warn!(%e, "unable to disable caps lock: it will still toggle");
            }
        }
        self.manage_existing_clients(&x)?;

        // ignore SIGCHILD and allow child / inherited processes to be inherited by pid1
        debug!("registering SIGCHILD signal handler");
        unsafe { signal(Signal::SIGCHLD, SigHandler::SigIgn) }.map_err(std::io::Error::from)?;

        let x = Arc::new(x);
        let events = spawn_event_reader(Arc::clone(&x));
        let callbacks = self.callbacks.clone();
        let mut next_frame: Option<Instant> = None;
        x.flush();

        info!("entering main event loop");
        loop {
            let tick = if self.state.pulse.is_active() {
                let frame = self.state.config.pulse_frame;
                at(*next_frame.get_or_insert_with(|| Instant::now() + frame))
            } else {
                next_frame = None;
                never()
            };

            select! {
                recv(events) -> msg => match msg {
                    Ok(Ok(event)) => {
                        if let Err(e) = self.handle_xevent(&*x, event) {
                            error!(%e, "error handling event");
                        }
                    }
                    Ok(Err(e)) => return Err(e),
                    Err(_) => return Err(Error::Custom("X event reader stopped".to_owned())),
                },

                recv(callbacks) -> msg => if let Ok(Callback::ForceQuit) = msg {
                    warn!("clients did not close within the grace period: exiting");
                    return Ok(());
                },

                recv(tick) -> _ => {
                    next_frame = None;
                    if let Err(e) = self.state.pulse_frame(Instant::now(), &*x) {
                        error!(%e, "error drawing pulse");
                    }
                },
            }

            x.flush();
            if self.state.exit {
                info!("exiting");
                return Ok(());
            }
        }
    }
}

fn spawn_event_reader<X>(x: Arc<X>) -> Receiver<Result<XEvent>>
where
    X: XConn + Send + Sync + 'static,
{
    let (tx, rx) = unbounded();

    thread::spawn(move || loop {
        let res = x.next_event();
        let failed = res.is_err();
        if tx.send(res).is_err() || failed {
            break;
        }
    });

    rx
}
