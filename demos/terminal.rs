//! Terminal Counter
//!
//! Drives a counter widget from stdin, persisting into a JSON file.
//!
//! Commands: `+` increment, `-` decrement, `r` reset, `c` clear history,
//! `m limited|unlimited` switch mode, `l <n>` set max limit, `t` toggle theme,
//! `q` quit.
//!
//! Run with: cargo run --example terminal -- [store.json]

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tally::builder::WidgetBuilder;
use tally::config::WidgetConfig;
use tally::core::{Mode, Operation, Theme};
use tally::effects::{AudioCue, AudioError, ThemeSink};
use tally::persist::FileStore;
use tracing_subscriber::EnvFilter;

// Terminal bell as the click sound
struct Bell;

impl AudioCue for Bell {
    fn play(&self) -> Result<(), AudioError> {
        let mut out = io::stdout();
        out.write_all(b"\x07")
            .and_then(|_| out.flush())
            .map_err(|e| AudioError::PlaybackFailed(e.to_string()))
    }
}

struct AnnounceTheme;

impl ThemeSink for AnnounceTheme {
    fn apply(&self, theme: Theme) {
        println!("  (theme set to {})", theme.as_str());
    }
}

fn parse(line: &str) -> Option<Result<Operation, String>> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?;
    let arg = parts.next().unwrap_or("");
    let op = match command {
        "+" => Ok(Operation::Increment),
        "-" => Ok(Operation::Decrement),
        "r" => Ok(Operation::Reset),
        "c" => Ok(Operation::ClearHistory),
        "t" => Ok(Operation::ToggleTheme),
        "m" => Mode::parse(arg)
            .map(Operation::SetMode)
            .ok_or_else(|| format!("unknown mode '{arg}'")),
        "l" => Ok(Operation::SetMaxLimit(tally::core::parse_limit_input(arg))),
        other => Err(format!("unknown command '{other}'")),
    };
    Some(op)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tally=info".parse()?))
        .with_writer(io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tally.json".to_string());

    let (mut widget, env) = WidgetBuilder::new()
        .store(Arc::new(FileStore::new(path)))
        .audio(Arc::new(Bell))
        .theme_sink(Arc::new(AnnounceTheme))
        .config(WidgetConfig {
            loading_delay_ms: 500,
            ..WidgetConfig::default()
        })
        .mount()
        .await?;

    print!("{}", widget.view());
    widget.ready().await;
    print!("{}", widget.view());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim() == "q" {
            break;
        }
        match parse(&line) {
            None => continue,
            Some(Err(message)) => println!("  {message}"),
            Some(Ok(op)) => {
                widget.dispatch(op, &env).await?;
                print!("{}", widget.view());
            }
        }
    }

    widget.unmount();
    Ok(())
}
