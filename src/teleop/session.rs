/**
 * Teleop Session
 * 
 * read key -> apply -> send, until quit or end of input.
 * Every exit path (quit, error, drop while unwinding) sends one zeroed
 * command before the session goes away.
 */

use std::io::Write;

use tracing::{error, info};

use crate::error::Result;
use crate::sink::CommandSink;
use crate::terminal::KeyReader;
use super::command::CommandState;
use super::mapper::CommandMapper;

pub struct TeleopSession<R: KeyReader, S: CommandSink> {
    reader: R,
    sink: S,
    mapper: CommandMapper,
    status: Option<Box<dyn Write>>,
    finished: bool,
}

impl<R: KeyReader, S: CommandSink> TeleopSession<R, S> {
    pub fn new(reader: R, sink: S, max_speed: f64) -> Self {
        Self {
            reader,
            sink,
            mapper: CommandMapper::new(max_speed),
            status: None,
            finished: false,
        }
    }

    /// Print the status line before every key read
    pub fn with_status<W: Write + 'static>(mut self, out: W) -> Self {
        self.status = Some(Box::new(out));
        self
    }

    pub fn state(&self) -> &CommandState {
        self.mapper.state()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run until quit or end of input. Loop errors are logged and returned
    /// after the zeroed command went out.
    pub fn run(&mut self) -> Result<()> {
        info!(max_speed = self.mapper.state().max_speed, "teleop session started");
        let result = self.drive();
        if let Err(ref e) = result {
            error!(error = %e, "teleop loop failed, stopping thrusters");
        }
        self.shutdown();
        result
    }

    fn drive(&mut self) -> Result<()> {
        while self.mapper.is_running() {
            self.print_status();

            let Some(key) = self.reader.read_key()? else {
                info!("input closed");
                return Ok(());
            };

            match self.mapper.handle_key(key) {
                Some(state) => self.sink.send(&state)?,
                None => info!("quit requested"),
            }
        }
        Ok(())
    }

    fn print_status(&mut self) {
        let line = self.mapper.state().status_line();
        if let Some(out) = self.status.as_mut() {
            //status output is best effort
            let _ = writeln!(out, "{}", line).and_then(|_| out.flush());
        }
    }

    /// Stop the mapper and send the final zeroed command, once
    pub fn shutdown(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        let last = self.mapper.stop();
        match self.sink.send(&last) {
            Ok(()) => info!("thrusters zeroed"),
            Err(e) => error!(error = %e, "failed to send final stop command"),
        }
    }
}

impl<R: KeyReader, S: CommandSink> Drop for TeleopSession<R, S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;
    use std::rc::Rc;

    use crate::error::TeleopError;
    use crate::teleop::keymap::QUIT_KEY;
    use crate::teleop::command::DEFAULT_MAX_SPEED;

    struct ScriptedReader {
        keys: VecDeque<u8>,
        fail_at_end: bool,
    }

    impl ScriptedReader {
        fn new(keys: &[u8]) -> Self {
            Self { keys: keys.iter().copied().collect(), fail_at_end: false }
        }

        fn failing(keys: &[u8]) -> Self {
            Self { fail_at_end: true, ..Self::new(keys) }
        }
    }

    impl KeyReader for ScriptedReader {
        fn read_key(&mut self) -> Result<Option<u8>> {
            match self.keys.pop_front() {
                Some(key) => Ok(Some(key)),
                None if self.fail_at_end => Err(TeleopError::Terminal(io::Error::new(io::ErrorKind::Other, "tty gone"))),
                None => Ok(None),
            }
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        sent: Rc<RefCell<Vec<[f64; 4]>>>,
        fail_on_call: Option<usize>,
        calls: usize,
    }

    impl RecordingSink {
        fn sent(&self) -> Vec<[f64; 4]> {
            self.sent.borrow().clone()
        }
    }

    impl CommandSink for RecordingSink {
        fn send(&mut self, state: &CommandState) -> Result<()> {
            self.calls += 1;
            if self.fail_on_call == Some(self.calls) {
                return Err(TeleopError::Transport(io::Error::new(io::ErrorKind::BrokenPipe, "link down")));
            }
            self.sent.borrow_mut().push(state.channels());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_every_key_is_published_then_zeroed_on_quit() {
        let sink = RecordingSink::default();
        let mut session = TeleopSession::new(ScriptedReader::new(b"ooi\x03"), sink.clone(), DEFAULT_MAX_SPEED);
        session.run().unwrap();

        let sent = sink.sent();
        assert_eq!(sent.len(), 4);
        assert!((sent[0][3] - 0.1).abs() < 1e-9);
        assert!((sent[1][3] - 0.2).abs() < 1e-9);
        assert_eq!(sent[2][2], 140.0);
        assert_eq!(sent[3], [0.0; 4]);
        assert!(session.is_finished());
    }

    #[test]
    fn test_keys_after_quit_are_ignored() {
        let sink = RecordingSink::default();
        let mut session = TeleopSession::new(ScriptedReader::new(b"e\x03iiii"), sink.clone(), DEFAULT_MAX_SPEED);
        session.run().unwrap();
        drop(session);

        //one command for `e`, one final stop, nothing from the trailing keys
        assert_eq!(sink.sent(), vec![[140.0, 0.0, 0.0, 0.0], [0.0; 4]]);
    }

    #[test]
    fn test_unmapped_key_stops_without_ending_session() {
        let sink = RecordingSink::default();
        let mut session = TeleopSession::new(ScriptedReader::new(b"iex\x03"), sink.clone(), DEFAULT_MAX_SPEED);
        session.run().unwrap();

        let sent = sink.sent();
        assert_eq!(sent[1], [140.0, 0.0, 140.0, 0.0]);
        assert_eq!(sent[2], [0.0; 4]);
        assert_eq!(sent.len(), 4);
    }

    #[test]
    fn test_end_of_input_shuts_down() {
        let sink = RecordingSink::default();
        let mut session = TeleopSession::new(ScriptedReader::new(b"ii"), sink.clone(), DEFAULT_MAX_SPEED);
        session.run().unwrap();

        assert_eq!(sink.sent().last(), Some(&[0.0; 4]));
        assert!(session.state().is_stopped());
    }

    #[test]
    fn test_read_failure_still_zeroes() {
        let sink = RecordingSink::default();
        let mut session = TeleopSession::new(ScriptedReader::failing(b"dd"), sink.clone(), DEFAULT_MAX_SPEED);
        let result = session.run();

        assert!(matches!(result, Err(TeleopError::Terminal(_))));
        assert_eq!(sink.sent(), vec![[-140.0, 0.0, 0.0, 0.0], [-280.0, 0.0, 0.0, 0.0], [0.0; 4]]);
    }

    #[test]
    fn test_send_failure_ends_loop_and_zeroes() {
        let sink = RecordingSink { fail_on_call: Some(2), ..RecordingSink::default() };
        let mut session = TeleopSession::new(ScriptedReader::new(b"iiii\x03"), sink.clone(), DEFAULT_MAX_SPEED);
        let result = session.run();

        assert!(matches!(result, Err(TeleopError::Transport(_))));
        //first key delivered, second failed, then only the stop command
        assert_eq!(sink.sent(), vec![[0.0, 0.0, 140.0, 0.0], [0.0; 4]]);
    }

    #[test]
    fn test_drop_without_run_sends_stop_once() {
        let sink = RecordingSink::default();
        let mut session = TeleopSession::new(ScriptedReader::new(b""), sink.clone(), DEFAULT_MAX_SPEED);
        session.shutdown();
        session.shutdown();
        drop(session);

        assert_eq!(sink.sent(), vec![[0.0; 4]]);
    }

    #[test]
    fn test_status_line_printed_before_each_read() {
        let out = SharedBuf::default();
        let mut session = TeleopSession::new(ScriptedReader::new(b"e\x03"), RecordingSink::default(), 1400.0)
            .with_status(out.clone());
        session.run().unwrap();

        let text = String::from_utf8(out.0.borrow().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Left: speed    0.0 [%]"));
        assert!(lines[1].starts_with("Left: speed   10.0 [%]"));
    }

    #[test]
    fn test_quit_key_constant_matches_ctrl_c() {
        assert_eq!(QUIT_KEY, b'C' & 0x1f);
    }
}
