//! `tracing` output to the browser console.

use std::io;
use tracing::Level;

/// Buffers one formatted event and logs it on flush or drop.
#[derive(Default)]
struct ConsoleWriter {
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn emit(&mut self) {
        if let Some(line) = take_line(&mut self.buf) {
            gloo_console::log!(line);
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        self.emit();
    }
}

fn take_line(buf: &mut Vec<u8>) -> Option<String> {
    let line = String::from_utf8_lossy(buf).trim_end().to_owned();
    buf.clear();
    (!line.is_empty()).then_some(line)
}

/// Install the console subscriber. Safe to call more than once.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleWriter::default)
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_line_trims_and_clears() {
        let mut buf = b" INFO ep_profile: Domain is alice.eth\n".to_vec();
        assert_eq!(
            take_line(&mut buf).as_deref(),
            Some(" INFO ep_profile: Domain is alice.eth")
        );
        assert!(buf.is_empty());
        assert_eq!(take_line(&mut buf), None);
    }
}
