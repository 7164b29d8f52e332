//! trellis: a keyboard driven tiling window manager for X11.
//!
//! Logging is controlled through `RUST_LOG` and defaults to `info`.
use std::{env, process};
use tracing_subscriber::{self, prelude::*, EnvFilter};
use trellis::{x11rb::X11rbConn, Config, Result, WindowManager};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() == 2 && args[1] == "-v" {
        println!("trellis-{}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    } else if args.len() > 1 {
        eprintln!("usage: trellis [-v]");
        process::exit(1);
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .finish()
        .init();

    let config = Config::default();
    let conn = X11rbConn::new(&config.font_name)?;
    let wm = WindowManager::new(config, &conn)?;

    wm.run(conn)
}
