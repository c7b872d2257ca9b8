//! Terminal input thread and application event channel.
//!
//! [`EventHandler`] spawns an OS thread (not a tokio task) because
//! `crossterm::event::poll()` blocks. Drop only signals shutdown; the thread
//! exits on its next poll tick.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Terminal was resized; redraw.
    Resize,
    Tick,
    Error(String),
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (eventtx, rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_flag = shutdown.clone();

        let thread = std::thread::spawn(move || {
            while !shutdown_flag.load(Ordering::Relaxed) {
                match event::poll(tick_rate) {
                    Err(e) => {
                        let _ = eventtx.send(AppEvent::Error(format!("Terminal poll error: {e}")));
                        break;
                    }
                    Ok(false) => {
                        if eventtx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                        continue;
                    }
                    Ok(true) => {}
                }
                let forwarded = match event::read() {
                    Ok(CrosstermEvent::Key(key)) => eventtx.send(AppEvent::Key(key)),
                    Ok(CrosstermEvent::Resize(..)) => eventtx.send(AppEvent::Resize),
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => Ok(()),
                    Err(e) => {
                        let _ = eventtx.send(AppEvent::Error(format!("Terminal read error: {e}")));
                        break;
                    }
                    Ok(_) => Ok(()),
                };
                if forwarded.is_err() {
                    break;
                }
            }
        });

        Self {
            rx,
            shutdown,
            thread: Some(thread),
        }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                tracing::error!("event thread panicked");
            }
        }
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
