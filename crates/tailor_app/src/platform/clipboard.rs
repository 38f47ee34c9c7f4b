use std::sync::mpsc;
use std::thread;

use tailor_core::{ClipboardFailure, Msg};
use tailor_logging::tailor_warn;

/// Writes `text` to the system clipboard off the UI loop and reports the
/// settled result as a message.
pub fn copy_text(text: String, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        let result = write_clipboard(&text);
        if let Err(message) = &result {
            tailor_warn!("clipboard write failed: {}", message);
        }
        let _ = msg_tx.send(Msg::CopyCompleted {
            result: result.map_err(|message| ClipboardFailure { message }),
        });
    });
}

fn write_clipboard(text: &str) -> Result<(), String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|err| err.to_string())?;
    clipboard
        .set_text(text.to_string())
        .map_err(|err| err.to_string())
}
