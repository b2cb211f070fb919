#![forbid(unsafe_code)]

//! Console logging levels for the page.

use tracing::{Level, info};

/// Most verbose level the browser console subscriber prints.
pub const CONSOLE_MAX_LEVEL: Level = Level::INFO;

/// Forward the controller's drained log lines to the console.
pub fn forward(lines: &[String]) {
    for line in lines {
        info!(target: "folio", "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .expect("capture lock")
                .extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn forwarded_lines_pass_the_console_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(CONSOLE_MAX_LEVEL)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            forward(&["nav toggle open=true".to_owned(), "form sending".to_owned()]);
        });

        let output = String::from_utf8(captured.0.lock().expect("capture lock").clone())
            .expect("utf8 log output");
        assert!(output.contains("nav toggle open=true"));
        assert!(output.contains("form sending"));
    }
}
