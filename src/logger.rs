use std::{
    fs::{File, create_dir_all},
    io::{self, Write as _},
    path::PathBuf,
    sync::mpsc::{Receiver, Sender, channel},
    thread::{self, JoinHandle},
};

use chrono::Local;
use clap::ValueEnum;
use log::{LevelFilter, Log, Metadata, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
    /// Trace everything, including other crates' targets.
    Full,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace | LogLevel::Full => LevelFilter::Trace,
        }
    }
}

enum MessageEvent {
    Message(String),
    Flush(Sender<()>),
}

/// `log` backend that formats on the calling thread and writes on a background one.
///
/// Lines go to stderr, keeping stdout free for traversal output, and are mirrored to
/// `<path>/<date>/<time>.log` when a path is configured.
#[derive(Debug)]
pub struct Logger {
    join_handle: Option<JoinHandle<()>>,
    message_sender: Option<Sender<MessageEvent>>,
    level_filter: LevelFilter,
    full_logs: bool,
    prefixes: Vec<String>,
}

impl Logger {
    pub fn install(self) -> Result<(), io::Error> {
        let level = self.level_filter;
        log::set_boxed_logger(Box::new(self))
            .map(|_| log::set_max_level(level))
            .map_err(io::Error::other)
    }

    pub fn new(
        log_path: Option<PathBuf>,
        level: LogLevel,
        prefixes: Vec<String>,
    ) -> Result<Logger, io::Error> {
        let file = log_path
            .map(|mut path| {
                let now = Local::now();
                path.push(now.format("%Y-%m-%d").to_string());
                create_dir_all(&path)?;
                path.push(now.format("%H-%M-%S.log").to_string());
                File::create(path)
            })
            .transpose()?;
        let (message_sender, message_receiver) = channel();
        let join_handle = thread::spawn(move || Logger::writer_thread(file, message_receiver));
        Ok(Logger {
            join_handle: Some(join_handle),
            message_sender: Some(message_sender),
            level_filter: level.into(),
            full_logs: matches!(level, LogLevel::Full),
            prefixes,
        })
    }

    fn writer_thread(mut file: Option<File>, message_receiver: Receiver<MessageEvent>) {
        let mut stderr = io::stderr();
        for message in message_receiver {
            match message {
                MessageEvent::Message(text) => {
                    let _ = writeln!(stderr, "{text}");
                    if let Some(file) = &mut file {
                        let _ = writeln!(file, "{text}");
                    }
                }
                MessageEvent::Flush(done) => {
                    let _ = stderr.flush();
                    if let Some(file) = &mut file {
                        let _ = file.flush();
                    }
                    let _ = done.send(());
                }
            }
        }
    }

    fn send(&self, event: MessageEvent) -> bool {
        self.message_sender
            .as_ref()
            .is_some_and(|sender| sender.send(event).is_ok())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        (self.full_logs
            || self.prefixes.is_empty()
            || self
                .prefixes
                .iter()
                .any(|prefix| metadata.target().starts_with(prefix)))
            && metadata.level() <= self.level_filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}|{}|{}{}] {}",
            record.level(),
            Local::now().format("%H:%M:%S%.3f"),
            record.target(),
            record.line().map(|x| format!(":{x}")).unwrap_or_default(),
            record.args()
        );
        self.send(MessageEvent::Message(line));
    }

    /// Blocks until everything logged so far has been written.
    fn flush(&self) {
        let (done_sender, done_receiver) = channel();
        if self.send(MessageEvent::Flush(done_sender)) {
            let _ = done_receiver.recv();
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        drop(self.message_sender.take());
        if let Some(join_handle) = self.join_handle.take() {
            let _ = join_handle.join();
        }
    }
}

#[derive(Debug, Default)]
pub struct LoggerBuilder {
    pub path: Option<PathBuf>,
    pub level: LogLevel,
    pub prefixes: Vec<String>,
}

impl LoggerBuilder {
    pub fn new() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    pub fn path_option(mut self, path: Option<PathBuf>) -> Self {
        self.path = path;
        self
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> LoggerBuilder {
        self.prefixes.push(prefix.into());
        self
    }

    pub fn build(self) -> Result<Logger, io::Error> {
        Logger::new(self.path, self.level, self.prefixes)
    }

    pub fn install(self) -> Result<(), io::Error> {
        self.build()?.install()
    }
}
